//! The persistent state tree.

use crate::path::Path;
use imbl::OrdMap;
use serde_json::{Map, Value};

/// A node's variables, keyed by variable name.
pub type Vars = OrdMap<String, Value>;

/// One node of the state tree: its own variables plus named child subtrees.
///
/// `StateNode` is persistent. Cloning shares structure, and every write
/// through `&mut self` copies only the nodes on the written path, which is
/// what lets the store hand out snapshots while a new tree is being built.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StateNode {
    vars: Vars,
    children: OrdMap<String, StateNode>,
}

impl StateNode {
    /// An empty node.
    pub fn new() -> Self {
        Self::default()
    }

    /// A leaf node holding `vars`.
    pub fn from_vars(vars: Vars) -> Self {
        Self {
            vars,
            children: OrdMap::new(),
        }
    }

    /// This node's variables.
    pub fn vars(&self) -> &Vars {
        &self.vars
    }

    /// One of this node's variables.
    pub fn var(&self, name: &str) -> Option<&Value> {
        self.vars.get(name)
    }

    /// This node's child subtrees.
    pub fn children(&self) -> &OrdMap<String, StateNode> {
        &self.children
    }

    /// One child subtree.
    pub fn child(&self, key: &str) -> Option<&StateNode> {
        self.children.get(key)
    }

    /// Whether the node has neither variables nor children.
    pub fn is_empty(&self) -> bool {
        self.vars.is_empty() && self.children.is_empty()
    }

    /// Set a variable on this node.
    pub fn set_var(&mut self, name: impl Into<String>, value: impl Into<Value>) {
        self.vars.insert(name.into(), value.into());
    }

    /// Builder form of [`set_var`](Self::set_var), handy inside reducers.
    pub fn with_var(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.set_var(name, value);
        self
    }

    /// Remove a variable from this node.
    pub fn remove_var(&mut self, name: &str) -> Option<Value> {
        self.vars.remove(name)
    }

    /// The subtree at `path`, if present. The root path returns `self`.
    pub fn get_in(&self, path: &Path) -> Option<&StateNode> {
        path.segments()
            .iter()
            .try_fold(self, |node, key| node.children.get(key.as_str()))
    }

    /// Whether a subtree exists at `path`.
    pub fn contains(&self, path: &Path) -> bool {
        self.get_in(path).is_some()
    }

    /// The variable `name` stored on the node at `path`.
    pub fn var_in(&self, path: &Path, name: &str) -> Option<&Value> {
        self.get_in(path).and_then(|node| node.var(name))
    }

    /// Mutable access to the node at `path`, creating intermediate nodes.
    pub fn node_mut(&mut self, path: &Path) -> &mut StateNode {
        path.segments()
            .iter()
            .fold(self, |node, key| node.children.entry(key.clone()).or_default())
    }

    /// Replace the whole subtree at `path` with `node`.
    pub fn set_in(&mut self, path: &Path, node: StateNode) {
        *self.node_mut(path) = node;
    }

    /// Set the variable `name` on the node at `path`, creating it if needed.
    pub fn set_var_in(&mut self, path: &Path, name: impl Into<String>, value: impl Into<Value>) {
        self.node_mut(path).set_var(name, value);
    }

    /// Remove the subtree at `path` with all of its descendants.
    ///
    /// Deleting beneath an ancestor that no longer exists is a no-op, so a
    /// leaf unmounting after its ancestor does not resurrect the branch.
    pub fn delete_in(&mut self, path: &Path) -> Option<StateNode> {
        match path.segments().split_last() {
            None => Some(std::mem::take(self)),
            Some((last, ancestors)) => self
                .existing_mut(ancestors)?
                .children
                .remove(last.as_str()),
        }
    }

    fn existing_mut(&mut self, segments: &[String]) -> Option<&mut StateNode> {
        match segments.split_first() {
            None => Some(self),
            Some((key, rest)) => self.children.get_mut(key.as_str())?.existing_mut(rest),
        }
    }

    /// A JSON view of the subtree: variables and children merged into one
    /// object, the shape a debugger or devtools panel expects.
    pub fn to_json(&self) -> Value {
        let mut object: Map<String, Value> = self
            .vars
            .iter()
            .map(|(name, value)| (name.clone(), value.clone()))
            .collect();
        for (key, child) in self.children.iter() {
            object.insert(key.clone(), child.to_json());
        }
        Value::Object(object)
    }
}

impl From<Vars> for StateNode {
    fn from(vars: Vars) -> Self {
        Self::from_vars(vars)
    }
}
