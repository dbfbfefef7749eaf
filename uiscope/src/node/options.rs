use std::{collections::BTreeMap, fmt, sync::Arc};
use uiscope_core::{CustomReducer, SharedReducer, UiState, Value, Vars};

type DeriveFn<P, G> = dyn Fn(&P, &G) -> Value + Send + Sync;

/// A declared default: a literal, or a function of the node's props and the
/// global state evaluated whenever defaults are (re)seeded.
pub enum DefaultValue<P, G = UiState> {
    /// Used as-is.
    Value(Value),
    /// Computed from `(props, global_state)`.
    Derived(Arc<DeriveFn<P, G>>),
}

impl<P, G> DefaultValue<P, G> {
    /// Resolve to a concrete value.
    pub fn resolve(&self, props: &P, global: &G) -> Value {
        match self {
            Self::Value(value) => value.clone(),
            Self::Derived(derive) => derive(props, global),
        }
    }
}

impl<P, G> Clone for DefaultValue<P, G> {
    fn clone(&self) -> Self {
        match self {
            Self::Value(value) => Self::Value(value.clone()),
            Self::Derived(derive) => Self::Derived(derive.clone()),
        }
    }
}

impl<P, G> fmt::Debug for DefaultValue<P, G> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Value(value) => f.debug_tuple("Value").field(value).finish(),
            Self::Derived(_) => f.write_str("Derived(..)"),
        }
    }
}

/// Per-component configuration of a [`UiNode`](super::UiNode).
///
/// `P` is the component's props type and `G` the host's global state type,
/// both only used by derived defaults.
///
/// ```rust
/// use uiscope::{UiOptions, UiState, json};
///
/// struct Props { initial: String }
///
/// let options = UiOptions::<Props, UiState>::new("SearchBox")
///     .key("search")
///     .state("focused", false)
///     .derived("query", |props: &Props, _: &UiState| json!(props.initial));
///
/// let defaults = options.resolve_defaults(&Props { initial: "rust".into() }, &UiState::new());
/// assert_eq!(defaults.get("query"), Some(&json!("rust")));
/// ```
pub struct UiOptions<P = (), G = UiState> {
    display_name: String,
    key: Option<String>,
    state: BTreeMap<String, DefaultValue<P, G>>,
    reducer: Option<SharedReducer>,
    persist: bool,
}

impl<P, G> UiOptions<P, G> {
    /// Options for a component called `display_name`.
    ///
    /// The display name appears in error messages and prefixes generated
    /// keys.
    pub fn new(display_name: impl Into<String>) -> Self {
        Self {
            display_name: display_name.into(),
            key: None,
            state: BTreeMap::new(),
            reducer: None,
            persist: false,
        }
    }

    /// Use a fixed key instead of a generated one.
    pub fn key(mut self, key: impl Into<String>) -> Self {
        self.key = Some(key.into());
        self
    }

    /// Declare a variable with a literal default.
    pub fn state(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.state
            .insert(name.into(), DefaultValue::Value(value.into()));
        self
    }

    /// Declare a variable whose default is computed from props and the
    /// global state.
    pub fn derived<F>(mut self, name: impl Into<String>, derive: F) -> Self
    where
        F: Fn(&P, &G) -> Value + Send + Sync + 'static,
    {
        self.state
            .insert(name.into(), DefaultValue::Derived(Arc::new(derive)));
        self
    }

    /// Register a custom reducer for this component's subtree.
    pub fn reducer<R: CustomReducer>(mut self, reducer: R) -> Self {
        self.reducer = Some(SharedReducer::new(reducer));
        self
    }

    /// Keep this component's state in the store after it is destroyed.
    pub fn persist(mut self, persist: bool) -> Self {
        self.persist = persist;
        self
    }

    /// The component's display name.
    pub fn display_name(&self) -> &str {
        &self.display_name
    }

    /// The fixed key, if one was set.
    pub fn fixed_key(&self) -> Option<&str> {
        self.key.as_deref()
    }

    /// Names of the declared variables.
    pub fn declared(&self) -> impl Iterator<Item = &str> {
        self.state.keys().map(String::as_str)
    }

    /// Whether any variable is declared.
    pub fn has_defaults(&self) -> bool {
        !self.state.is_empty()
    }

    /// The custom reducer, if any.
    pub fn custom_reducer(&self) -> Option<&SharedReducer> {
        self.reducer.as_ref()
    }

    /// Whether state outlives the component.
    pub fn is_persistent(&self) -> bool {
        self.persist
    }

    /// Evaluate every declared default.
    pub fn resolve_defaults(&self, props: &P, global: &G) -> Vars {
        self.state
            .iter()
            .map(|(name, default)| (name.clone(), default.resolve(props, global)))
            .collect()
    }
}

impl<P, G> Clone for UiOptions<P, G> {
    fn clone(&self) -> Self {
        Self {
            display_name: self.display_name.clone(),
            key: self.key.clone(),
            state: self.state.clone(),
            reducer: self.reducer.clone(),
            persist: self.persist,
        }
    }
}

impl<P, G> fmt::Debug for UiOptions<P, G> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("UiOptions")
            .field("display_name", &self.display_name)
            .field("key", &self.key)
            .field("state", &self.state)
            .field("reducer", &self.reducer)
            .field("persist", &self.persist)
            .finish()
    }
}
