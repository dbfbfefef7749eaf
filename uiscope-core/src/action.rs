//! The action vocabulary and its wire form.

use crate::{
    error::WireError,
    path::{Path, RoutingTable},
    reducer::SharedReducer,
    tree::Vars,
};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Set one variable at a path.
pub const UPDATE_UI_STATE: &str = "@@redux-ui/UPDATE_UI_STATE";
/// Set many variables, possibly owned by different paths, in one action.
pub const MASS_UPDATE_UI_STATE: &str = "@@redux-ui/MASS_UPDATE_UI_STATE";
/// Replace (or delete) the whole subtree at a path.
pub const SET_DEFAULT_UI_STATE: &str = "@@redux-ui/SET_DEFAULT_UI_STATE";
/// Seed a subtree with defaults and optionally register a custom reducer.
pub const MOUNT_UI_STATE: &str = "@@redux-ui/MOUNT_UI_STATE";
/// Delete a subtree and deregister its custom reducer.
pub const UNMOUNT_UI_STATE: &str = "@@redux-ui/UNMOUNT_UI_STATE";

/// A state transition request processed by the store.
#[derive(Debug, Clone)]
pub enum Action {
    /// Set `name` on the node at `path`.
    Update {
        /// Owning node.
        path: Path,
        /// Variable name.
        name: String,
        /// New value.
        value: Value,
    },
    /// Set every variable in `transforms` at the path `routing` maps it to.
    MassUpdate {
        /// Variable name to owning path.
        routing: RoutingTable,
        /// Variable name to new value.
        transforms: Vars,
    },
    /// Replace the subtree at `path` with `value`; `None` deletes it.
    SetDefault {
        /// Subtree root.
        path: Path,
        /// Replacement variables.
        value: Option<Vars>,
    },
    /// Seed the subtree at `path` with `defaults`.
    Mount {
        /// Subtree root.
        path: Path,
        /// Default variables.
        defaults: Vars,
        /// Reducer to register for `path`.
        reducer: Option<SharedReducer>,
    },
    /// Delete the subtree at `path` and deregister its reducer.
    Unmount {
        /// Subtree root.
        path: Path,
    },
    /// Any other action. Only custom reducers react to it.
    Custom(WireAction),
}

impl Action {
    /// An UPDATE action.
    pub fn update(path: impl Into<Path>, name: impl Into<String>, value: impl Into<Value>) -> Self {
        Self::Update {
            path: path.into(),
            name: name.into(),
            value: value.into(),
        }
    }

    /// A MASS_UPDATE action.
    pub fn mass_update(routing: RoutingTable, transforms: Vars) -> Self {
        Self::MassUpdate {
            routing,
            transforms,
        }
    }

    /// A SET_DEFAULT action.
    pub fn set_default(path: impl Into<Path>, value: Option<Vars>) -> Self {
        Self::SetDefault {
            path: path.into(),
            value,
        }
    }

    /// A MOUNT action.
    pub fn mount(path: impl Into<Path>, defaults: Vars, reducer: Option<SharedReducer>) -> Self {
        Self::Mount {
            path: path.into(),
            defaults,
            reducer,
        }
    }

    /// An UNMOUNT action.
    pub fn unmount(path: impl Into<Path>) -> Self {
        Self::Unmount { path: path.into() }
    }

    /// A custom action with an arbitrary type string.
    pub fn custom(kind: impl Into<String>, payload: Value) -> Self {
        Self::Custom(WireAction::new(kind, payload))
    }

    /// The namespaced type string of this action.
    pub fn type_name(&self) -> &str {
        match self {
            Self::Update { .. } => UPDATE_UI_STATE,
            Self::MassUpdate { .. } => MASS_UPDATE_UI_STATE,
            Self::SetDefault { .. } => SET_DEFAULT_UI_STATE,
            Self::Mount { .. } => MOUNT_UI_STATE,
            Self::Unmount { .. } => UNMOUNT_UI_STATE,
            Self::Custom(wire) => &wire.kind,
        }
    }

    /// The single path this action targets, if it targets one.
    pub fn path(&self) -> Option<&Path> {
        match self {
            Self::Update { path, .. }
            | Self::SetDefault { path, .. }
            | Self::Mount { path, .. }
            | Self::Unmount { path } => Some(path),
            Self::MassUpdate { .. } | Self::Custom(_) => None,
        }
    }

    /// The type string if this is a custom action.
    pub fn custom_type(&self) -> Option<&str> {
        match self {
            Self::Custom(wire) => Some(&wire.kind),
            _ => None,
        }
    }

    /// Encode into the `{ type, payload }` wire form.
    ///
    /// A MOUNT loses its custom reducer: functions do not travel.
    pub fn to_wire(&self) -> WireAction {
        let mut payload = Map::new();
        match self {
            Self::Update { path, name, value } => {
                payload.insert("key".into(), path_to_json(path));
                payload.insert("name".into(), Value::String(name.clone()));
                payload.insert("value".into(), value.clone());
            }
            Self::MassUpdate {
                routing,
                transforms,
            } => {
                let routes = routing
                    .iter()
                    .map(|(name, path)| (name.clone(), path_to_json(path)))
                    .collect();
                payload.insert("uiVars".into(), Value::Object(routes));
                payload.insert("transforms".into(), vars_to_json(transforms));
            }
            Self::SetDefault { path, value } => {
                payload.insert("key".into(), path_to_json(path));
                if let Some(value) = value {
                    payload.insert("value".into(), vars_to_json(value));
                }
            }
            Self::Mount { path, defaults, .. } => {
                payload.insert("key".into(), path_to_json(path));
                payload.insert("defaults".into(), vars_to_json(defaults));
            }
            Self::Unmount { path } => {
                payload.insert("key".into(), path_to_json(path));
            }
            Self::Custom(wire) => return wire.clone(),
        }
        WireAction::new(self.type_name(), Value::Object(payload))
    }

    /// Decode a wire action. Unknown types become [`Action::Custom`].
    pub fn from_wire(wire: WireAction) -> Result<Self, WireError> {
        let kind = wire.kind.as_str();
        let known = [
            UPDATE_UI_STATE,
            MASS_UPDATE_UI_STATE,
            SET_DEFAULT_UI_STATE,
            MOUNT_UI_STATE,
            UNMOUNT_UI_STATE,
        ];
        if !known.contains(&kind) {
            return Ok(Self::Custom(wire));
        }

        let empty = Map::new();
        let payload = match &wire.payload {
            Value::Object(map) => map,
            Value::Null => &empty,
            _ => return Err(WireError::PayloadNotObject),
        };
        let path = payload_path(payload)?;

        Ok(match kind {
            UPDATE_UI_STATE => Self::Update {
                path,
                name: payload
                    .get("name")
                    .and_then(Value::as_str)
                    .ok_or(WireError::MissingField("name"))?
                    .to_owned(),
                value: payload.get("value").cloned().unwrap_or(Value::Null),
            },
            MASS_UPDATE_UI_STATE => {
                let routes = payload
                    .get("uiVars")
                    .ok_or(WireError::MissingField("uiVars"))?;
                let Value::Object(routes) = routes else {
                    return Err(WireError::invalid("uiVars", "expected an object"));
                };
                let routing = routes
                    .iter()
                    .map(|(name, path)| Ok((name.clone(), json_to_path("uiVars", path)?)))
                    .collect::<Result<RoutingTable, WireError>>()?;
                let transforms = payload
                    .get("transforms")
                    .ok_or(WireError::MissingField("transforms"))?;
                Self::MassUpdate {
                    routing,
                    transforms: json_to_vars("transforms", transforms)?,
                }
            }
            SET_DEFAULT_UI_STATE => Self::SetDefault {
                path,
                value: match payload.get("value") {
                    None | Some(Value::Null) => None,
                    Some(value) => Some(json_to_vars("value", value)?),
                },
            },
            MOUNT_UI_STATE => Self::Mount {
                path,
                defaults: match payload.get("defaults") {
                    None | Some(Value::Null) => Vars::new(),
                    Some(value) => json_to_vars("defaults", value)?,
                },
                reducer: None,
            },
            _ => Self::Unmount { path },
        })
    }
}

/// The stable `{ type, payload }` shape of an action.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WireAction {
    /// Namespaced action type.
    #[serde(rename = "type")]
    pub kind: String,
    /// Action payload.
    #[serde(default)]
    pub payload: Value,
}

impl WireAction {
    /// Create a wire action.
    pub fn new(kind: impl Into<String>, payload: Value) -> Self {
        Self {
            kind: kind.into(),
            payload,
        }
    }
}

impl TryFrom<WireAction> for Action {
    type Error = WireError;

    fn try_from(wire: WireAction) -> Result<Self, Self::Error> {
        Action::from_wire(wire)
    }
}

impl From<&Action> for WireAction {
    fn from(action: &Action) -> Self {
        action.to_wire()
    }
}

fn path_to_json(path: &Path) -> Value {
    path.segments().iter().cloned().map(Value::String).collect()
}

fn vars_to_json(vars: &Vars) -> Value {
    Value::Object(
        vars.iter()
            .map(|(name, value)| (name.clone(), value.clone()))
            .collect(),
    )
}

fn payload_path(payload: &Map<String, Value>) -> Result<Path, WireError> {
    match payload.get("key") {
        None | Some(Value::Null) => Ok(Path::root()),
        Some(key) => json_to_path("key", key),
    }
}

// Scalars are wrapped into single-segment paths.
fn json_to_path(field: &'static str, value: &Value) -> Result<Path, WireError> {
    match value {
        Value::String(key) => Ok(Path::from(key.as_str())),
        Value::Number(key) => Ok(Path::from(key.to_string())),
        Value::Array(segments) => segments
            .iter()
            .map(|segment| match segment {
                Value::String(s) => Ok(s.clone()),
                Value::Number(n) => Ok(n.to_string()),
                other => Err(WireError::invalid(
                    field,
                    format!("path segment must be a string, got {other}"),
                )),
            })
            .collect(),
        other => Err(WireError::invalid(
            field,
            format!("expected a key or an array of keys, got {other}"),
        )),
    }
}

fn json_to_vars(field: &'static str, value: &Value) -> Result<Vars, WireError> {
    match value {
        Value::Object(map) => Ok(map
            .iter()
            .map(|(name, value)| (name.clone(), value.clone()))
            .collect()),
        _ => Err(WireError::invalid(field, "expected an object")),
    }
}
