//! Reducer traits.

use crate::{action::Action, error::UiError, state::UiState, tree::StateNode};
use std::{fmt, sync::Arc};

/// A node-supplied reducer, scoped to that node's own subtree.
///
/// The reducer receives the subtree rooted at the node's path (an empty node
/// if nothing is stored there) and every action the store processes, after
/// the action's own structural change has been applied. Whatever it returns
/// is written back at the node's path.
///
/// Returning `None` is a contract violation: the store aborts the dispatch
/// with [`UiError::ReducerContract`] rather than silently dropping state.
///
/// Closures implement this trait:
///
/// ```rust
/// use uiscope_core::{Action, CustomReducer, StateNode};
///
/// let reducer = |state: StateNode, action: &Action| {
///     if action.custom_type() == Some("CUSTOM") {
///         return Some(state.with_var("name", "override"));
///     }
///     Some(state)
/// };
/// let out = reducer.reduce(StateNode::new(), &Action::custom("CUSTOM", ().into()));
/// assert_eq!(out.unwrap().var("name").unwrap(), "override");
/// ```
#[diagnostic::on_unimplemented(
    message = "`{Self}` is not a custom reducer",
    label = "missing `CustomReducer` implementation",
    note = "Custom reducers are `Fn(StateNode, &Action) -> Option<StateNode>`."
)]
pub trait CustomReducer: Send + Sync + 'static {
    /// Produce the next subtree state for `action`.
    fn reduce(&self, state: StateNode, action: &Action) -> Option<StateNode>;
}

impl<F> CustomReducer for F
where
    F: Fn(StateNode, &Action) -> Option<StateNode> + Send + Sync + 'static,
{
    fn reduce(&self, state: StateNode, action: &Action) -> Option<StateNode> {
        self(state, action)
    }
}

/// A reference-counted custom reducer, cheap to clone into actions and the
/// registry.
#[derive(Clone)]
pub struct SharedReducer(Arc<dyn CustomReducer>);

impl SharedReducer {
    /// Wrap a custom reducer.
    pub fn new<R: CustomReducer>(reducer: R) -> Self {
        Self(Arc::new(reducer))
    }

    /// Whether both handles point at the same reducer.
    pub fn ptr_eq(&self, other: &SharedReducer) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }
}

impl CustomReducer for SharedReducer {
    fn reduce(&self, state: StateNode, action: &Action) -> Option<StateNode> {
        self.0.reduce(state, action)
    }
}

impl fmt::Debug for SharedReducer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("SharedReducer")
            .field(&Arc::as_ptr(&self.0))
            .finish()
    }
}

/// A root reducer: `(state, action) -> state` over the whole [`UiState`].
///
/// The standard implementation (`ScopedReducer` in `uiscope-std`) applies
/// the action and fans out to registered custom reducers. Closures with the
/// matching signature implement this trait as well, which is how root-level
/// enhancers are written.
#[diagnostic::on_unimplemented(
    message = "`{Self}` is not a root reducer",
    label = "missing `Reducer` implementation",
    note = "Root reducers are `Fn(&UiState, &Action) -> Result<UiState, UiError>`."
)]
pub trait Reducer: Send + Sync + 'static {
    /// Compute the next state. Must not mutate anything observable.
    fn reduce(&self, state: &UiState, action: &Action) -> Result<UiState, UiError>;
}

impl<F> Reducer for F
where
    F: Fn(&UiState, &Action) -> Result<UiState, UiError> + Send + Sync + 'static,
{
    fn reduce(&self, state: &UiState, action: &Action) -> Result<UiState, UiError> {
        self(state, action)
    }
}
