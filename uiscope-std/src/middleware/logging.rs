//! Logging middleware for action observation.

use super::Middleware;
use uiscope_core::{Action, UiError, UiState};

/// A middleware that logs every action and its outcome.
///
/// Logs go through `tracing` when the `tracing` feature is enabled and are
/// compiled out otherwise.
#[derive(Debug, Clone, Copy, Default)]
pub struct LoggingMiddleware;

impl Middleware for LoggingMiddleware {
    fn before(&self, action: &Action, state: &UiState) {
        #[cfg(feature = "tracing")]
        {
            tracing::info!(
                action = %action.type_name(),
                path = ?action.path().map(|p| p.dotted()),
                reducers = state.reducers().len(),
                "dispatching UI action"
            );
        }
        #[cfg(not(feature = "tracing"))]
        {
            let _ = (action, state); // Suppress unused warning
        }
    }

    fn after(&self, action: &Action, outcome: Result<&UiState, &UiError>) {
        #[cfg(feature = "tracing")]
        {
            match outcome {
                Ok(_) => tracing::debug!(action = %action.type_name(), "UI action applied"),
                Err(error) => {
                    tracing::error!(action = %action.type_name(), %error, "UI action failed")
                }
            }
        }
        #[cfg(not(feature = "tracing"))]
        {
            let _ = (action, outcome);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Store;

    #[test]
    fn logging_is_transparent() {
        let store = Store::builder().middleware(LoggingMiddleware).build();
        store.dispatch(Action::update("a", "n", 1)).unwrap();
        assert!(store.state().get_in(&"a".into()).is_some());
    }
}
