//! A single-writer, synchronous store for UI state.

use crate::{middleware::Middleware, reducer::ScopedReducer};
use parking_lot::{Mutex, RwLock};
use std::{
    collections::{HashMap, VecDeque},
    sync::{
        Arc,
        atomic::{AtomicU64, Ordering},
    },
    thread::{self, ThreadId},
};
use uiscope_core::{Action, Reducer, UiError, UiState, UiStore};

type Listener = Arc<dyn Fn(&UiState) + Send + Sync>;
type Deferred = Mutex<HashMap<ThreadId, VecDeque<Action>>>;

/// Registers a thread as notifying. The entry is removed on drop, unwinding
/// included.
struct Draining<'a> {
    deferred: &'a Deferred,
    thread: ThreadId,
}

impl<'a> Draining<'a> {
    fn start(deferred: &'a Deferred, thread: ThreadId) -> Self {
        deferred.lock().insert(thread, VecDeque::new());
        Self { deferred, thread }
    }
}

impl Drop for Draining<'_> {
    fn drop(&mut self) {
        self.deferred.lock().remove(&self.thread);
    }
}

/// Handle returned by [`Store::subscribe`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Subscription(u64);

/// The one store every node dispatches to.
///
/// `dispatch` runs the root reducer to completion before it returns. The
/// new state is committed only if the reducer succeeds, so a failed
/// dispatch leaves the committed state exactly as it was. Dispatches from
/// different threads are serialized.
///
/// A subscriber may dispatch from its callback. That action is queued and
/// processed once every subscriber has seen the current state, so each
/// subscriber observes states in commit order. A queued dispatch returns
/// `Ok(())` at once; if its reducer fails, middleware `after` hooks see the
/// error and no subscriber is notified.
///
/// # Example
/// ```rust
/// use uiscope_core::{Action, Path, json};
/// use uiscope_std::Store;
///
/// let store = Store::new();
/// store.dispatch(Action::update("panel", "open", true)).unwrap();
/// assert_eq!(store.state().var_in(&Path::from("panel"), "open"), Some(&json!(true)));
/// ```
pub struct Store {
    state: RwLock<UiState>,
    reducer: Box<dyn Reducer>,
    middleware: Vec<Box<dyn Middleware>>,
    listeners: Mutex<Vec<(Subscription, Listener)>>,
    next_subscription: AtomicU64,
    writer: Mutex<()>,
    // Actions dispatched by subscribers, keyed by the notifying thread.
    deferred: Deferred,
}

impl Default for Store {
    fn default() -> Self {
        Self::new()
    }
}

impl Store {
    /// A store with empty state and the standard [`ScopedReducer`].
    pub fn new() -> Self {
        Self::builder().build()
    }

    /// Start building a store.
    pub fn builder() -> StoreBuilder {
        StoreBuilder::new()
    }

    /// A snapshot of the committed state. O(1).
    pub fn state(&self) -> UiState {
        self.state.read().clone()
    }

    /// Process `action` and notify subscribers.
    pub fn dispatch(&self, action: Action) -> Result<(), UiError> {
        let thread = thread::current().id();
        if let Some(queue) = self.deferred.lock().get_mut(&thread) {
            queue.push_back(action);
            return Ok(());
        }

        let committed = self.commit(&action)?;
        self.notify(thread, committed);
        Ok(())
    }

    fn commit(&self, action: &Action) -> Result<UiState, UiError> {
        let _writer = self.writer.lock();
        let current = self.state();
        for m in &self.middleware {
            m.before(action, &current);
        }

        let outcome = self.reducer.reduce(&current, action);
        for m in self.middleware.iter().rev() {
            m.after(action, outcome.as_ref());
        }

        let next = outcome?;
        *self.state.write() = next.clone();
        Ok(next)
    }

    // Listeners run outside the writer lock. Whatever they dispatch is
    // drained here, one committed state at a time.
    fn notify(&self, thread: ThreadId, committed: UiState) {
        let _draining = Draining::start(&self.deferred, thread);
        let mut pending = Some(committed);
        while let Some(state) = pending.take() {
            let listeners: Vec<Listener> = self
                .listeners
                .lock()
                .iter()
                .map(|(_, listener)| listener.clone())
                .collect();
            for listener in listeners {
                listener(&state);
            }

            while let Some(action) = self.next_deferred(thread) {
                match self.commit(&action) {
                    Ok(next) => {
                        pending = Some(next);
                        break;
                    }
                    Err(error) => {
                        #[cfg(feature = "tracing")]
                        tracing::warn!(
                            %error,
                            action = action.type_name(),
                            "queued dispatch failed"
                        );
                        #[cfg(not(feature = "tracing"))]
                        let _ = error;
                    }
                }
            }
        }
    }

    fn next_deferred(&self, thread: ThreadId) -> Option<Action> {
        self.deferred.lock().get_mut(&thread)?.pop_front()
    }

    /// Call `listener` with the committed state after every successful
    /// dispatch, in subscription order.
    pub fn subscribe<F>(&self, listener: F) -> Subscription
    where
        F: Fn(&UiState) + Send + Sync + 'static,
    {
        let id = Subscription(self.next_subscription.fetch_add(1, Ordering::Relaxed));
        self.listeners.lock().push((id, Arc::new(listener)));
        id
    }

    /// Remove a listener. Returns whether it was subscribed.
    pub fn unsubscribe(&self, subscription: Subscription) -> bool {
        let mut listeners = self.listeners.lock();
        let before = listeners.len();
        listeners.retain(|(id, _)| *id != subscription);
        listeners.len() != before
    }

    /// Number of active subscriptions.
    pub fn subscriber_count(&self) -> usize {
        self.listeners.lock().len()
    }
}

impl UiStore for Store {
    type State = UiState;

    fn dispatch(&self, action: Action) -> Result<(), UiError> {
        Store::dispatch(self, action)
    }

    fn state(&self) -> UiState {
        Store::state(self)
    }
}

/// Builder for [`Store`].
///
/// ```rust,ignore
/// let store = Store::builder()
///     .reducer(enhance(my_root_reducer))
///     .middleware(LoggingMiddleware)
///     .build();
/// ```
pub struct StoreBuilder {
    initial: UiState,
    reducer: Box<dyn Reducer>,
    middleware: Vec<Box<dyn Middleware>>,
}

impl Default for StoreBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl StoreBuilder {
    /// Create a new builder with the standard reducer.
    pub fn new() -> Self {
        Self {
            initial: UiState::new(),
            reducer: Box::new(ScopedReducer),
            middleware: Vec::new(),
        }
    }

    /// Set the initial state.
    pub fn initial_state(mut self, state: UiState) -> Self {
        self.initial = state;
        self
    }

    /// Replace the root reducer.
    pub fn reducer<R: Reducer>(mut self, reducer: R) -> Self {
        self.reducer = Box::new(reducer);
        self
    }

    /// Add a middleware. `before` hooks run in registration order, `after`
    /// hooks in reverse.
    pub fn middleware<M: Middleware>(mut self, middleware: M) -> Self {
        self.middleware.push(Box::new(middleware));
        self
    }

    /// Build the store.
    pub fn build(self) -> Store {
        Store {
            state: RwLock::new(self.initial),
            reducer: self.reducer,
            middleware: self.middleware,
            listeners: Mutex::new(Vec::new()),
            next_subscription: AtomicU64::new(0),
            writer: Mutex::new(()),
            deferred: Mutex::new(HashMap::new()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::RecordingMiddleware;
    use std::sync::atomic::AtomicUsize;
    use uiscope_core::{Path, RoutingTable, Vars, json};

    #[test]
    fn dispatch_commits_state() {
        let store = Store::new();
        store.dispatch(Action::update("a", "foo", "bar")).unwrap();
        assert_eq!(
            store.state().var_in(&Path::from("a"), "foo"),
            Some(&json!("bar"))
        );
    }

    #[test]
    fn failed_dispatch_leaves_state_untouched() {
        let store = Store::new();
        store.dispatch(Action::update("a", "x", 1)).unwrap();
        let before = store.state();

        let mut routing = RoutingTable::new();
        routing.insert("x".into(), Path::from("a"));
        let transforms: Vars = [("x".to_string(), json!(2)), ("nope".to_string(), json!(3))]
            .into_iter()
            .collect();

        assert!(store.dispatch(Action::mass_update(routing, transforms)).is_err());
        assert_eq!(store.state().tree(), before.tree());
    }

    #[test]
    fn subscribers_see_committed_state() {
        let store = Store::new();
        let seen = Arc::new(Mutex::new(Vec::new()));
        let sink = seen.clone();
        let id = store.subscribe(move |state| {
            let n = state.var_in(&Path::from("a"), "n").cloned();
            sink.lock().push(n);
        });

        store.dispatch(Action::update("a", "n", 1)).unwrap();
        assert!(store.unsubscribe(id));
        store.dispatch(Action::update("a", "n", 2)).unwrap();

        assert_eq!(*seen.lock(), vec![Some(json!(1))]);
        assert!(!store.unsubscribe(id));
    }

    #[test]
    fn subscriber_may_dispatch() {
        let store = Arc::new(Store::new());
        let inner = Arc::downgrade(&store);
        let calls = Arc::new(AtomicUsize::new(0));
        let counter = calls.clone();
        store.subscribe(move |state| {
            counter.fetch_add(1, Ordering::SeqCst);
            if state.var_in(&Path::from("a"), "echo").is_none() {
                if let Some(store) = inner.upgrade() {
                    store.dispatch(Action::update("a", "echo", true)).unwrap();
                }
            }
        });

        store.dispatch(Action::update("a", "n", 1)).unwrap();
        assert_eq!(calls.load(Ordering::SeqCst), 2);
        assert_eq!(
            store.state().var_in(&Path::from("a"), "echo"),
            Some(&json!(true))
        );
    }

    #[test]
    fn subscribers_observe_states_in_commit_order() {
        let store = Arc::new(Store::new());
        let inner = Arc::downgrade(&store);
        store.subscribe(move |state| {
            if state.var_in(&Path::from("a"), "n") == Some(&json!(1)) {
                if let Some(store) = inner.upgrade() {
                    store.dispatch(Action::update("a", "n", 2)).unwrap();
                }
            }
        });
        let seen = Arc::new(Mutex::new(Vec::new()));
        let sink = seen.clone();
        store.subscribe(move |state| {
            let n = state.var_in(&Path::from("a"), "n").cloned();
            sink.lock().push(n);
        });

        store.dispatch(Action::update("a", "n", 1)).unwrap();
        assert_eq!(*seen.lock(), vec![Some(json!(1)), Some(json!(2))]);
        assert_eq!(store.state().var_in(&Path::from("a"), "n"), Some(&json!(2)));
    }

    #[test]
    fn failed_queued_dispatch_is_skipped() {
        let recorder = RecordingMiddleware::new();
        let store = Arc::new(Store::builder().middleware(recorder.clone()).build());
        let inner = Arc::downgrade(&store);
        let calls = Arc::new(AtomicUsize::new(0));
        let counter = calls.clone();
        store.subscribe(move |_| {
            if counter.fetch_add(1, Ordering::SeqCst) == 0 {
                if let Some(store) = inner.upgrade() {
                    let transforms: Vars = [("ghost".to_string(), json!(1))].into_iter().collect();
                    let bad = Action::mass_update(RoutingTable::new(), transforms);
                    store.dispatch(bad).unwrap();
                    store.dispatch(Action::update("a", "after", true)).unwrap();
                }
            }
        });

        store.dispatch(Action::update("a", "n", 1)).unwrap();
        assert_eq!(recorder.count(), 3);
        assert_eq!(recorder.failures(), 1);
        assert_eq!(calls.load(Ordering::SeqCst), 2);
        assert_eq!(
            store.state().var_in(&Path::from("a"), "after"),
            Some(&json!(true))
        );
    }

    #[test]
    fn middleware_observes_every_action() {
        let recorder = RecordingMiddleware::new();
        let store = Store::builder().middleware(recorder.clone()).build();

        store.dispatch(Action::update("a", "n", 1)).unwrap();
        store.dispatch(Action::custom("CUSTOM", json!(null))).unwrap();

        assert_eq!(
            recorder.actions(),
            vec!["@@redux-ui/UPDATE_UI_STATE".to_string(), "CUSTOM".to_string()]
        );
        assert_eq!(recorder.failures(), 0);
    }
}
