//! The boundary a view layer provides to node controllers.

use crate::{action::Action, error::UiError, state::UiSlice};

/// A unit of work deferred to the next paint or idle opportunity.
pub type DeferredTask = Box<dyn FnOnce() + Send + 'static>;

/// The single global store a host exposes.
///
/// `dispatch` must process the action completely, including custom reducer
/// fan-out, before it returns. `state` returns the latest committed state.
pub trait UiStore: Send + Sync {
    /// The host's global state; only its UI slice is read.
    type State: UiSlice;

    /// Process `action` synchronously.
    fn dispatch(&self, action: Action) -> Result<(), UiError>;

    /// The latest committed global state.
    fn state(&self) -> Self::State;
}

/// Defers work to the host's next paint or idle tick.
///
/// Deferral is a scheduling hint only: every accepted task must eventually
/// run exactly once.
pub trait FrameScheduler: Send + Sync {
    /// Queue `task`. A scheduler that can no longer accept work hands the
    /// task back so the caller can run it immediately.
    fn defer(&self, task: DeferredTask) -> Result<(), DeferredTask>;
}
