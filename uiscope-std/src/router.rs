//! Path and variable routing.
//!
//! Every node derives its [`ScopeContext`] from the one its parent provides:
//! its path is the parent path plus its own key, and its routing table is
//! the parent's table with every variable the node declares pointed at the
//! node's own path. Declaration always wins over inheritance, so a child
//! declaring `name` shadows a parent's `name` instead of writing into it.

use uiscope_core::{Path, RoutingTable};

/// The immutable record a node provides to its descendants.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ScopeContext {
    routing: RoutingTable,
    path: Path,
}

impl ScopeContext {
    /// The context above every top-level node: empty path, empty table.
    pub fn root() -> Self {
        Self::default()
    }

    /// Build a context from its parts.
    pub fn new(routing: RoutingTable, path: impl Into<Path>) -> Self {
        Self {
            routing,
            path: path.into(),
        }
    }

    /// Variable name to owning path.
    pub fn routing(&self) -> &RoutingTable {
        &self.routing
    }

    /// The absolute path of the node that provided this context.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// The path owning `name`, if any node on the way up declared it.
    pub fn resolve(&self, name: &str) -> Option<&Path> {
        self.routing.get(name)
    }

    /// The context of a child with `key` declaring `declared`.
    pub fn child<'a, I>(&self, key: &str, declared: I) -> ScopeContext
    where
        I: IntoIterator<Item = &'a str>,
    {
        compute_context(&self.routing, self.path.clone(), key, declared)
    }
}

/// Compute a node's context from its parent's table and path.
///
/// `parent_path` accepts a scalar key, which is wrapped into a
/// single-segment path. The parent's table is never modified: the returned
/// table is a copy-on-write clone.
pub fn compute_context<'a, I>(
    parent_table: &RoutingTable,
    parent_path: impl Into<Path>,
    own_key: &str,
    declared: I,
) -> ScopeContext
where
    I: IntoIterator<Item = &'a str>,
{
    let path = parent_path.into().child(own_key);
    let mut routing = parent_table.clone();
    for name in declared {
        routing.insert(name.to_owned(), path.clone());
    }
    ScopeContext { routing, path }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn root_node_gets_single_segment_path() {
        let ctx = ScopeContext::root().child("parent", ["name"]);
        assert_eq!(ctx.path(), &Path::from("parent"));
        assert_eq!(ctx.resolve("name"), Some(&Path::from("parent")));
    }

    #[test]
    fn child_inherits_undeclared_variables() {
        let parent = ScopeContext::root().child("parent", ["name", "open"]);
        let child = parent.child("child", []);

        assert_eq!(child.path(), &Path::from(["parent", "child"]));
        assert_eq!(child.resolve("open"), Some(&Path::from("parent")));
    }

    #[test]
    fn declaration_shadows_inheritance() {
        let parent = ScopeContext::root().child("parent", ["name"]);
        let child = parent.child("child", ["name"]);

        assert_eq!(child.resolve("name"), Some(&Path::from(["parent", "child"])));
        assert_eq!(parent.resolve("name"), Some(&Path::from("parent")));
    }

    #[test]
    fn parent_table_is_not_mutated() {
        let parent = ScopeContext::root().child("parent", ["a"]);
        let before = parent.routing().clone();
        let _child = compute_context(parent.routing(), parent.path().clone(), "c", ["a", "b"]);
        assert_eq!(parent.routing(), &before);
        assert!(parent.resolve("b").is_none());
    }

    #[test]
    fn scalar_parent_path_is_wrapped() {
        let ctx = compute_context(&RoutingTable::new(), "parent", "child", ["x"]);
        assert_eq!(ctx.path(), &Path::from(["parent", "child"]));
    }

    #[test]
    fn recomputation_is_idempotent() {
        let parent = ScopeContext::root().child("p", ["a"]);
        assert_eq!(parent.child("c", ["b"]), parent.child("c", ["b"]));
    }
}
