//! Testing utilities for uiscope.
//!
//! This module provides helpers that make assertions about dispatch and
//! custom reducers easier.
//!
//! # Features
//!
//! - [`RecordingMiddleware`]: records every action type a store processes
//! - [`RecordingReducer`]: a custom reducer that records the subtree state it
//!   is handed before delegating

use crate::middleware::Middleware;
use parking_lot::Mutex;
use std::sync::{
    Arc,
    atomic::{AtomicUsize, Ordering},
};
use uiscope_core::{Action, CustomReducer, SharedReducer, StateNode, UiError, UiState};

// ============================================================================
// Recording Middleware
// ============================================================================

/// A middleware that records the type of every action it sees.
///
/// Clones share the same log, so keep one clone for assertions:
///
/// ```rust,ignore
/// let recorder = RecordingMiddleware::new();
/// let store = Store::builder().middleware(recorder.clone()).build();
/// store.dispatch(action)?;
/// assert_eq!(recorder.count(), 1);
/// ```
#[derive(Clone, Default)]
pub struct RecordingMiddleware {
    actions: Arc<Mutex<Vec<String>>>,
    failures: Arc<AtomicUsize>,
}

impl RecordingMiddleware {
    /// Create an empty recorder.
    pub fn new() -> Self {
        Self::default()
    }

    /// The recorded action types, in dispatch order.
    pub fn actions(&self) -> Vec<String> {
        self.actions.lock().clone()
    }

    /// Number of recorded actions.
    pub fn count(&self) -> usize {
        self.actions.lock().len()
    }

    /// Number of the recorded actions whose reducer failed.
    pub fn failures(&self) -> usize {
        self.failures.load(Ordering::SeqCst)
    }

    /// Forget everything recorded so far.
    pub fn clear(&self) {
        self.actions.lock().clear();
        self.failures.store(0, Ordering::SeqCst);
    }
}

impl Middleware for RecordingMiddleware {
    fn before(&self, action: &Action, _state: &UiState) {
        self.actions.lock().push(action.type_name().to_owned());
    }

    fn after(&self, _action: &Action, outcome: Result<&UiState, &UiError>) {
        if outcome.is_err() {
            self.failures.fetch_add(1, Ordering::SeqCst);
        }
    }
}

// ============================================================================
// Recording Reducer
// ============================================================================

/// A custom reducer that records every subtree it receives.
///
/// Useful for checking that a reducer is only ever handed its own slice of
/// the tree.
pub struct RecordingReducer {
    inner: SharedReducer,
    seen: Arc<Mutex<Vec<(String, StateNode)>>>,
}

impl RecordingReducer {
    /// Record, then return the state unchanged.
    pub fn passthrough() -> Self {
        Self::wrap(|state: StateNode, _: &Action| Some(state))
    }

    /// Record, then delegate to `inner`.
    pub fn wrap<R: CustomReducer>(inner: R) -> Self {
        Self {
            inner: SharedReducer::new(inner),
            seen: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// A handle to register with a node; it shares this recorder's log.
    pub fn shared(&self) -> SharedReducer {
        SharedReducer::new(Self {
            inner: self.inner.clone(),
            seen: self.seen.clone(),
        })
    }

    /// `(action type, subtree)` pairs in call order.
    pub fn calls(&self) -> Vec<(String, StateNode)> {
        self.seen.lock().clone()
    }

    /// The subtree passed with the most recent action.
    pub fn last_state(&self) -> Option<StateNode> {
        self.seen.lock().last().map(|(_, s)| s.clone())
    }

    /// Number of calls so far.
    pub fn count(&self) -> usize {
        self.seen.lock().len()
    }

    /// Forget recorded calls.
    pub fn clear(&self) {
        self.seen.lock().clear();
    }
}

impl CustomReducer for RecordingReducer {
    fn reduce(&self, state: StateNode, action: &Action) -> Option<StateNode> {
        let call = (action.type_name().to_owned(), state.clone());
        self.seen.lock().push(call);
        self.inner.reduce(state, action)
    }
}
