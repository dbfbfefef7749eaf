//! The root of UI state held by a store.

use crate::{
    path::Path,
    registry::{REDUCERS_KEY, ReducerRegistry},
    tree::StateNode,
};
use serde_json::Value;
use std::sync::Arc;

/// Everything the UI slice of a store holds: the state tree and the custom
/// reducer registry.
#[derive(Debug, Clone, Default)]
pub struct UiState {
    tree: StateNode,
    reducers: ReducerRegistry,
}

impl UiState {
    /// An empty state with no registered reducers.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a state from its parts.
    pub fn from_parts(tree: StateNode, reducers: ReducerRegistry) -> Self {
        Self { tree, reducers }
    }

    /// The state tree.
    pub fn tree(&self) -> &StateNode {
        &self.tree
    }

    /// Mutable access to the state tree.
    pub fn tree_mut(&mut self) -> &mut StateNode {
        &mut self.tree
    }

    /// The custom reducer registry.
    pub fn reducers(&self) -> &ReducerRegistry {
        &self.reducers
    }

    /// Mutable access to the custom reducer registry.
    pub fn reducers_mut(&mut self) -> &mut ReducerRegistry {
        &mut self.reducers
    }

    /// The subtree at `path`.
    pub fn get_in(&self, path: &Path) -> Option<&StateNode> {
        self.tree.get_in(path)
    }

    /// The variable `name` at `path`.
    pub fn var_in(&self, path: &Path, name: &str) -> Option<&Value> {
        self.tree.var_in(path, name)
    }

    /// A JSON snapshot: the tree plus the dotted keys of registered reducers
    /// under [`REDUCERS_KEY`].
    pub fn to_json(&self) -> Value {
        let mut json = self.tree.to_json();
        if let Value::Object(object) = &mut json {
            object.insert(
                REDUCERS_KEY.to_owned(),
                self.reducers.keys().map(Value::String).collect(),
            );
        }
        json
    }
}

/// Selects the UI slice out of a host's global state.
///
/// Hosts that keep UI state next to other application state implement this
/// for their root state type; [`UiState`] selects itself.
pub trait UiSlice {
    /// The UI slice.
    fn ui(&self) -> &UiState;
}

impl UiSlice for UiState {
    fn ui(&self) -> &UiState {
        self
    }
}

impl<T: UiSlice + ?Sized> UiSlice for Arc<T> {
    fn ui(&self) -> &UiState {
        (**self).ui()
    }
}

impl<T: UiSlice + ?Sized> UiSlice for &T {
    fn ui(&self) -> &UiState {
        (**self).ui()
    }
}
