//! Observers wrapped around every dispatch.
//!
//! Middleware sees each action before the root reducer runs and the outcome
//! after. It cannot change either: the reducer stays the only thing that
//! turns actions into state.

mod logging;

pub use logging::LoggingMiddleware;

use uiscope_core::{Action, UiError, UiState};

/// Observes actions flowing through a [`Store`](crate::Store).
pub trait Middleware: Send + Sync + 'static {
    /// Called with the state the action is about to be applied to.
    fn before(&self, action: &Action, state: &UiState) {
        let _ = (action, state);
    }

    /// Called with the reducer's outcome. On `Err` nothing was committed.
    fn after(&self, action: &Action, outcome: Result<&UiState, &UiError>) {
        let _ = (action, outcome);
    }
}
