//! The tree store reducer.
//!
//! [`ScopedReducer`] is a pure `(state, action) -> state` function in two
//! phases:
//!
//! 1. Apply the structural change for the action kind.
//! 2. Offer the same action to every registered custom reducer, in
//!    registration order, each with only the subtree at its own path. The
//!    result is written back at that path.
//!
//! Because phase 2 runs after phase 1, a custom reducer reacting to an
//! UPDATE inside its own subtree already sees the new value.

use uiscope_core::{Action, CustomReducer, Reducer, StateNode, UiError, UiState};

/// The standard root reducer for UI state.
#[derive(Debug, Clone, Copy, Default)]
pub struct ScopedReducer;

impl ScopedReducer {
    /// Create the reducer.
    pub const fn new() -> Self {
        Self
    }
}

impl Reducer for ScopedReducer {
    fn reduce(&self, state: &UiState, action: &Action) -> Result<UiState, UiError> {
        let mut next = state.clone();
        apply(&mut next, action)?;
        fan_out(&mut next, action)?;
        Ok(next)
    }
}

fn apply(state: &mut UiState, action: &Action) -> Result<(), UiError> {
    match action {
        Action::Update { path, name, value } => {
            state.tree_mut().set_var_in(path, name.clone(), value.clone());
        }
        Action::MassUpdate {
            routing,
            transforms,
        } => {
            let tree = state.tree_mut();
            for (name, value) in transforms.iter() {
                let path = routing
                    .get(name.as_str())
                    .ok_or_else(|| UiError::UnroutedTransform { name: name.clone() })?;
                tree.set_var_in(path, name.clone(), value.clone());
            }
        }
        Action::SetDefault { path, value } => match value {
            Some(vars) => state
                .tree_mut()
                .set_in(path, StateNode::from_vars(vars.clone())),
            None => {
                state.tree_mut().delete_in(path);
            }
        },
        Action::Mount {
            path,
            defaults,
            reducer,
        } => {
            state
                .tree_mut()
                .set_in(path, StateNode::from_vars(defaults.clone()));
            if let Some(reducer) = reducer {
                let replaced = state.reducers_mut().register(path.clone(), reducer.clone());
                #[cfg(feature = "tracing")]
                tracing::debug!(
                    path = %path,
                    replaced = replaced.is_some(),
                    "registered custom UI reducer"
                );
                #[cfg(not(feature = "tracing"))]
                let _ = replaced;
            }
        }
        Action::Unmount { path } => {
            // Subtree delete: a leaf unmounting after its ancestor is a no-op.
            state.tree_mut().delete_in(path);
            if state.reducers_mut().deregister(path).is_some() {
                #[cfg(feature = "tracing")]
                tracing::debug!(path = %path, "deregistered custom UI reducer");
            }
        }
        Action::Custom(_) => {}
    }
    Ok(())
}

fn fan_out(state: &mut UiState, action: &Action) -> Result<(), UiError> {
    if state.reducers().is_empty() {
        return Ok(());
    }

    // Snapshot so a reducer can never observe registry changes mid-fan-out.
    let registry = state.reducers().clone();
    for entry in registry.iter() {
        let path = entry.path();
        let current = state.tree().get_in(path).cloned();
        let next = entry
            .reducer()
            .reduce(current.clone().unwrap_or_default(), action)
            .ok_or_else(|| UiError::ReducerContract { path: path.clone() })?;

        let changed = match &current {
            Some(current) => *current != next,
            None => !next.is_empty(),
        };
        if changed {
            state.tree_mut().set_in(path, next);
        }
    }
    Ok(())
}

/// A root reducer that runs [`ScopedReducer`] first and then `root` over the
/// whole UI state.
///
/// Use it for behavior that belongs to no single component:
///
/// ```rust
/// use uiscope_core::{Action, UiError, UiState};
/// use uiscope_std::{Store, enhance};
///
/// let reducer = enhance(|state: &UiState, action: &Action| -> Result<UiState, UiError> {
///     let mut next = state.clone();
///     if action.custom_type() == Some("CUSTOM_ACTION_TYPE") {
///         next.tree_mut().set_var("isHooked", true);
///     }
///     Ok(next)
/// });
/// let store = Store::builder().reducer(reducer).build();
/// store.dispatch(Action::custom("CUSTOM_ACTION_TYPE", ().into())).unwrap();
/// assert_eq!(store.state().tree().var("isHooked"), Some(&true.into()));
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct Enhanced<R> {
    scoped: ScopedReducer,
    root: R,
}

/// Wrap `root` so it runs after the standard reducer.
pub const fn enhance<R: Reducer>(root: R) -> Enhanced<R> {
    Enhanced {
        scoped: ScopedReducer,
        root,
    }
}

impl<R: Reducer> Reducer for Enhanced<R> {
    fn reduce(&self, state: &UiState, action: &Action) -> Result<UiState, UiError> {
        let state = self.scoped.reduce(state, action)?;
        self.root.reduce(&state, action)
    }
}
