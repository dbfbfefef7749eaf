//! Typed custom actions.

use crate::{action::Action, error::WireError};
use serde::{Serialize, de::DeserializeOwned};

/// A typed action that travels as [`Action::Custom`].
///
/// Implementors pick a namespaced [`TYPE`](Self::TYPE) string and are
/// converted to and from the untyped action with serde. With the `macros`
/// feature of `uiscope`, `#[derive(CustomAction)]` writes the impl.
///
/// ```rust
/// use serde::{Deserialize, Serialize};
/// use uiscope_core::{Action, CustomAction};
///
/// #[derive(Serialize, Deserialize, PartialEq, Debug)]
/// struct SelectRow { index: usize }
///
/// impl CustomAction for SelectRow {
///     const TYPE: &'static str = "my_app/SelectRow";
/// }
///
/// let action = SelectRow { index: 3 }.into_action().unwrap();
/// assert_eq!(action.custom_type(), Some("my_app/SelectRow"));
/// assert_eq!(SelectRow::from_action(&action), Some(SelectRow { index: 3 }));
/// ```
pub trait CustomAction: Serialize + DeserializeOwned {
    /// The namespaced action type string.
    const TYPE: &'static str;

    /// Encode into an untyped custom action.
    fn into_action(self) -> Result<Action, WireError> {
        Ok(Action::custom(Self::TYPE, serde_json::to_value(&self)?))
    }

    /// Decode from an action if its type matches.
    fn from_action(action: &Action) -> Option<Self> {
        match action {
            Action::Custom(wire) if wire.kind == Self::TYPE => {
                serde_json::from_value(wire.payload.clone()).ok()
            }
            _ => None,
        }
    }
}
