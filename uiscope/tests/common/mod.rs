#![allow(dead_code)]

use std::sync::Arc;
use uiscope::{Store, UiNode, UiOptions, Value, Vars};

// ============================================================================
// Stores
// ============================================================================

pub fn store() -> Arc<Store> {
    Arc::new(Store::new())
}

// ============================================================================
// Nodes
// ============================================================================

/// Create and initialize a top-level node.
pub fn mount_root(store: &Arc<Store>, options: UiOptions) -> UiNode<Store> {
    let mut node = UiNode::new(store.clone(), options, (), None);
    node.on_will_initialize().unwrap();
    node
}

/// Create and initialize a node under `parent`.
pub fn mount_child(
    store: &Arc<Store>,
    parent: &UiNode<Store>,
    options: UiOptions,
) -> UiNode<Store> {
    let mut node = UiNode::new(store.clone(), options, (), Some(parent.context()));
    node.on_will_initialize().unwrap();
    node
}

/// Re-render `node` with its current props and context, as a host would
/// after any store change.
pub fn rerender(node: &mut UiNode<Store>, parent: Option<&UiNode<Store>>) {
    let inherited = parent.map(UiNode::context);
    node.on_will_receive_external_state((), inherited).unwrap();
}

/// The routed value of `name` as `node` renders it.
pub fn read(node: &mut UiNode<Store>, name: &str) -> Option<Value> {
    node.state().get(name).cloned()
}

// ============================================================================
// Values
// ============================================================================

pub fn vars(pairs: &[(&str, Value)]) -> Vars {
    pairs
        .iter()
        .map(|(name, value)| (name.to_string(), value.clone()))
        .collect()
}
