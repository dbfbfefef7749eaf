//! The node controller.
//!
//! A [`UiNode`] binds one component instance to its slice of the global UI
//! state. The host drives it through three lifecycle calls and the wrapped
//! component talks to it through `update`, `update_many`, `mass_update` and
//! `reset`.
//!
//! # Lifecycle
//!
//! ```text
//! Unmounted -> Mounting -> Mounted -> Unmounting -> Unmounted
//! ```
//!
//! - [`on_will_initialize`](UiNode::on_will_initialize) seeds the node's
//!   defaults if its path holds nothing yet.
//! - [`on_will_receive_external_state`](UiNode::on_will_receive_external_state)
//!   re-seeds them if an ancestor's reset wiped the path, and moves the node
//!   when its inherited context gives it a new path.
//! - [`on_will_destroy`](UiNode::on_will_destroy) removes the subtree, on the
//!   next frame when a [`FrameScheduler`] is attached.
//!
//! Calls made in the wrong phase are ignored.

mod key;
mod options;

pub use options::{DefaultValue, UiOptions};

use std::sync::{
    Arc,
    atomic::{AtomicBool, Ordering},
};
use uiscope_core::{
    Action, DeferredTask, FrameScheduler, Path, RoutingTable, UiError, UiSlice, UiStore, Value,
    Vars,
};
use uiscope_std::ScopeContext;

/// Where a node is in its lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Phase {
    /// Not initialized, or destroyed.
    Unmounted,
    /// Seeding defaults.
    Mounting,
    /// Live.
    Mounted,
    /// Destroyed, with the UNMOUNT dispatch still waiting for a frame.
    Unmounting,
}

/// What a node hands to the component it wraps.
#[derive(Debug, Clone, PartialEq)]
pub struct NodeProps {
    /// The node's key.
    pub key: String,
    /// The node's absolute path.
    pub path: Path,
    /// Every routed variable that currently has a value.
    pub state: Arc<Vars>,
}

/// Controller for one component instance.
///
/// `S` is the host's store and `P` the component's props, which only derived
/// defaults look at.
pub struct UiNode<S: UiStore, P = ()> {
    store: Arc<S>,
    options: UiOptions<P, S::State>,
    key: String,
    props: P,
    inherited: Option<Arc<ScopeContext>>,
    context: Arc<ScopeContext>,
    phase: Phase,
    // Set by the deferred UNMOUNT once it has run.
    unmounted: Option<Arc<AtomicBool>>,
    scheduler: Option<Arc<dyn FrameScheduler>>,
    previous: Option<Arc<Vars>>,
}

impl<S, P> UiNode<S, P>
where
    S: UiStore + 'static,
{
    /// Create a node under `inherited`, or at the top level when `None`.
    ///
    /// The key and the scope context are fixed here, before the node is
    /// initialized. A node without a fixed key gets a fresh random one.
    pub fn new(
        store: Arc<S>,
        options: UiOptions<P, S::State>,
        props: P,
        inherited: Option<Arc<ScopeContext>>,
    ) -> Self {
        let key = match options.fixed_key() {
            Some(key) => key.to_owned(),
            None => key::generate_key(options.display_name()),
        };
        let context = Arc::new(scope_for(inherited.as_deref(), &key, &options));
        Self {
            store,
            options,
            key,
            props,
            inherited,
            context,
            phase: Phase::Unmounted,
            unmounted: None,
            scheduler: None,
            previous: None,
        }
    }

    /// Defer the UNMOUNT dispatch through `scheduler`.
    pub fn with_scheduler(mut self, scheduler: Arc<dyn FrameScheduler>) -> Self {
        self.scheduler = Some(scheduler);
        self
    }

    /// This node's key.
    pub fn key(&self) -> &str {
        &self.key
    }

    /// This node's absolute path.
    pub fn path(&self) -> &Path {
        self.context.path()
    }

    /// Variable name to owning path, inherited entries included.
    pub fn routing(&self) -> &RoutingTable {
        self.context.routing()
    }

    /// The context to hand to child nodes.
    pub fn context(&self) -> Arc<ScopeContext> {
        self.context.clone()
    }

    /// The current props.
    pub fn props(&self) -> &P {
        &self.props
    }

    /// The options this node was built with.
    pub fn options(&self) -> &UiOptions<P, S::State> {
        &self.options
    }

    /// The lifecycle phase.
    pub fn phase(&self) -> Phase {
        match (&self.phase, &self.unmounted) {
            (Phase::Unmounting, Some(done)) if done.load(Ordering::Acquire) => Phase::Unmounted,
            (phase, _) => *phase,
        }
    }

    /// Seed this node's defaults unless its path already holds state.
    pub fn on_will_initialize(&mut self) -> Result<(), UiError> {
        if self.phase() != Phase::Unmounted {
            #[cfg(feature = "tracing")]
            tracing::debug!(path = %self.path(), phase = ?self.phase(), "ignoring initialize");
            return Ok(());
        }
        self.phase = Phase::Mounting;
        self.unmounted = None;

        if let Err(err) = self.mount() {
            self.phase = Phase::Unmounted;
            return Err(err);
        }
        self.phase = Phase::Mounted;
        Ok(())
    }

    /// Take new props and context from the host, then restore defaults if
    /// the node's state has been wiped.
    ///
    /// The scope context is recomputed when `inherited` is a different
    /// context than last time. Derived defaults see `next_props`. If that
    /// moves a mounted node to a new path, the old subtree and its custom
    /// reducer are unmounted (unless the node persists) and the node mounts
    /// again at the new path.
    pub fn on_will_receive_external_state(
        &mut self,
        next_props: P,
        inherited: Option<Arc<ScopeContext>>,
    ) -> Result<(), UiError> {
        let mut moved_from = None;
        if !same_context(self.inherited.as_ref(), inherited.as_ref()) {
            let next = scope_for(inherited.as_deref(), &self.key, &self.options);
            if *self.context != next {
                if next.path() != self.path() {
                    moved_from = Some(self.path().clone());
                }
                self.context = Arc::new(next);
            }
            self.inherited = inherited;
        }
        self.props = next_props;

        if self.phase() != Phase::Mounted {
            return Ok(());
        }

        if let Some(old) = moved_from {
            #[cfg(feature = "tracing")]
            tracing::debug!(from = %old, to = %self.path(), "moving UI node");
            if !self.options.is_persistent() {
                self.store.dispatch(Action::unmount(old))?;
            }
            return self.mount();
        }

        let global = self.store.state();
        if global.ui().get_in(self.path()).is_some() || !self.options.has_defaults() {
            return Ok(());
        }
        let defaults = self.options.resolve_defaults(&self.props, &global);
        #[cfg(feature = "tracing")]
        tracing::debug!(path = %self.path(), "restoring wiped UI defaults");
        self.store
            .dispatch(Action::set_default(self.path(), Some(defaults)))
    }

    /// Remove this node's subtree unless it persists.
    ///
    /// With a scheduler the UNMOUNT is dispatched on the next frame and this
    /// returns `Ok` at once; a failure at that point is logged. Without one
    /// it is dispatched before returning. Either way it is dispatched at most
    /// once per mount.
    pub fn on_will_destroy(&mut self) -> Result<(), UiError> {
        if self.phase() != Phase::Mounted {
            #[cfg(feature = "tracing")]
            tracing::debug!(path = %self.path(), phase = ?self.phase(), "ignoring destroy");
            return Ok(());
        }
        if self.options.is_persistent() {
            self.phase = Phase::Unmounted;
            return Ok(());
        }

        let action = Action::unmount(self.path());
        self.phase = Phase::Unmounting;
        let Some(scheduler) = &self.scheduler else {
            let outcome = self.store.dispatch(action);
            self.phase = Phase::Unmounted;
            return outcome;
        };

        let done = Arc::new(AtomicBool::new(false));
        let task = unmount_task(self.store.clone(), action, done.clone());
        self.unmounted = Some(done);
        if let Err(task) = scheduler.defer(task) {
            task();
        }
        Ok(())
    }

    // MOUNT this node's defaults and reducer unless its path holds state.
    fn mount(&self) -> Result<(), UiError> {
        let global = self.store.state();
        if global.ui().get_in(self.path()).is_some() || !self.options.has_defaults() {
            return Ok(());
        }
        let defaults = self.options.resolve_defaults(&self.props, &global);
        #[cfg(feature = "tracing")]
        tracing::debug!(path = %self.path(), vars = defaults.len(), "mounting UI node");
        self.store.dispatch(Action::mount(
            self.path(),
            defaults,
            self.options.custom_reducer().cloned(),
        ))
    }

    /// The current value of every routed variable.
    ///
    /// Read fresh from the store on each call. When nothing changed since
    /// the last call the previous `Arc` is returned, so callers can skip
    /// work with [`Arc::ptr_eq`].
    pub fn state(&mut self) -> Arc<Vars> {
        let global = self.store.state();
        let ui = global.ui();
        let current: Vars = self
            .context
            .routing()
            .iter()
            .filter_map(|(name, path)| {
                ui.var_in(path, name)
                    .map(|value| (name.clone(), value.clone()))
            })
            .collect();

        match &self.previous {
            Some(previous) if **previous == current => previous.clone(),
            _ => {
                let next = Arc::new(current);
                self.previous = Some(next.clone());
                next
            }
        }
    }

    /// Key, path and state for the wrapped component.
    pub fn render_props(&mut self) -> NodeProps {
        NodeProps {
            key: self.key.clone(),
            path: self.path().clone(),
            state: self.state(),
        }
    }

    /// Set `name` on whichever node owns it.
    ///
    /// Fails with [`UiError::Undeclared`] before dispatching anything if
    /// neither this node nor an ancestor declared `name`.
    pub fn update(&self, name: &str, value: impl Into<Value>) -> Result<(), UiError> {
        let path = self
            .context
            .resolve(name)
            .ok_or_else(|| UiError::Undeclared {
                name: name.to_owned(),
                component: self.options.display_name().to_owned(),
            })?;
        self.store.dispatch(Action::update(path, name, value))
    }

    /// Set several variables in one dispatch, each on its owning node.
    pub fn update_many(&self, patch: Vars) -> Result<(), UiError> {
        self.mass_update(self.context.routing().clone(), patch)
    }

    /// Dispatch a MASS_UPDATE with an explicit routing table.
    pub fn mass_update(&self, routing: RoutingTable, transforms: Vars) -> Result<(), UiError> {
        self.store
            .dispatch(Action::mass_update(routing, transforms))
    }

    /// Replace this node's subtree with freshly evaluated defaults.
    ///
    /// Descendant state under this path is removed with it.
    pub fn reset(&self) -> Result<(), UiError> {
        let global = self.store.state();
        let defaults = self.options.resolve_defaults(&self.props, &global);
        self.store
            .dispatch(Action::set_default(self.path(), Some(defaults)))
    }
}

fn scope_for<P, G>(
    inherited: Option<&ScopeContext>,
    key: &str,
    options: &UiOptions<P, G>,
) -> ScopeContext {
    match inherited {
        Some(parent) => parent.child(key, options.declared()),
        None => ScopeContext::root().child(key, options.declared()),
    }
}

fn same_context(a: Option<&Arc<ScopeContext>>, b: Option<&Arc<ScopeContext>>) -> bool {
    match (a, b) {
        (Some(a), Some(b)) => Arc::ptr_eq(a, b),
        (None, None) => true,
        _ => false,
    }
}

fn unmount_task<S: UiStore + 'static>(
    store: Arc<S>,
    action: Action,
    done: Arc<AtomicBool>,
) -> DeferredTask {
    Box::new(move || {
        if let Err(error) = store.dispatch(action) {
            #[cfg(feature = "tracing")]
            tracing::error!(%error, "deferred UI unmount failed");
            #[cfg(not(feature = "tracing"))]
            let _ = error;
        }
        done.store(true, Ordering::Release);
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use uiscope_core::json;
    use uiscope_std::Store;

    fn node(store: &Arc<Store>, options: UiOptions) -> UiNode<Store> {
        UiNode::new(store.clone(), options, (), None)
    }

    #[test]
    fn fixed_key_becomes_path() {
        let store = Arc::new(Store::new());
        let node = node(&store, UiOptions::new("T").key("k").state("a", 1));
        assert_eq!(node.key(), "k");
        assert_eq!(node.path(), &Path::from("k"));
        assert_eq!(node.routing().get("a"), Some(&Path::from("k")));
    }

    #[test]
    fn initialize_is_ignored_when_mounted() {
        let store = Arc::new(Store::new());
        let mut node = node(&store, UiOptions::new("T").key("k").state("a", 1));
        node.on_will_initialize().unwrap();
        node.update("a", 2).unwrap();

        node.on_will_initialize().unwrap();
        assert_eq!(node.phase(), Phase::Mounted);
        assert_eq!(node.state().get("a"), Some(&json!(2)));
    }

    #[test]
    fn existing_state_is_not_overwritten_on_mount() {
        let store = Arc::new(Store::new());
        store.dispatch(Action::update("k", "a", "kept")).unwrap();

        let mut node = node(&store, UiOptions::new("T").key("k").state("a", 1));
        node.on_will_initialize().unwrap();
        assert_eq!(node.state().get("a"), Some(&json!("kept")));
    }

    #[test]
    fn state_reuses_previous_snapshot() {
        let store = Arc::new(Store::new());
        let mut node = node(&store, UiOptions::new("T").key("k").state("a", 1));
        node.on_will_initialize().unwrap();

        let first = node.state();
        store.dispatch(Action::update("elsewhere", "x", 1)).unwrap();
        assert!(Arc::ptr_eq(&first, &node.state()));

        node.update("a", 2).unwrap();
        let changed = node.state();
        assert!(!Arc::ptr_eq(&first, &changed));
        assert_eq!(changed.get("a"), Some(&json!(2)));
    }

    #[test]
    fn render_props_carry_identity() {
        let store = Arc::new(Store::new());
        let mut node = node(&store, UiOptions::new("T").key("k").state("a", 1));
        node.on_will_initialize().unwrap();

        let props = node.render_props();
        assert_eq!(props.key, "k");
        assert_eq!(props.path, Path::from("k"));
        assert_eq!(props.state.get("a"), Some(&json!(1)));
    }
}
