//! Registry of custom reducers, one per mounted node path.

use crate::{path::Path, reducer::SharedReducer};
use imbl::Vector;

/// The name under which the registry appears in JSON snapshots.
///
/// The registry itself is stored next to the tree, not inside it, so a
/// component is free to use this string as its key.
pub const REDUCERS_KEY: &str = "__reducers";

/// A registered custom reducer together with the path it is scoped to.
#[derive(Debug, Clone)]
pub struct RegistryEntry {
    path: Path,
    reducer: SharedReducer,
}

impl RegistryEntry {
    /// Create an entry.
    pub fn new(path: Path, reducer: SharedReducer) -> Self {
        Self { path, reducer }
    }

    /// The node path the reducer is scoped to.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// The reducer.
    pub fn reducer(&self) -> &SharedReducer {
        &self.reducer
    }
}

/// Insertion-ordered custom reducers keyed by dotted path.
///
/// Persistent like the tree: cloning is cheap and a clone never observes
/// later registrations.
#[derive(Debug, Clone, Default)]
pub struct ReducerRegistry {
    entries: Vector<RegistryEntry>,
}

impl ReducerRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `reducer` for `path`.
    ///
    /// A second registration at the same dotted path overwrites the first in
    /// place, keeping its position in the fan-out order. The replaced entry
    /// is returned.
    pub fn register(&mut self, path: Path, reducer: SharedReducer) -> Option<RegistryEntry> {
        let entry = RegistryEntry::new(path, reducer);
        match self.position(&entry.path.dotted()) {
            Some(index) => Some(self.entries.set(index, entry)),
            None => {
                self.entries.push_back(entry);
                None
            }
        }
    }

    /// Remove the reducer registered at `path`.
    pub fn deregister(&mut self, path: &Path) -> Option<RegistryEntry> {
        let index = self.position(&path.dotted())?;
        Some(self.entries.remove(index))
    }

    /// The entry registered under a dotted path.
    pub fn get(&self, dotted: &str) -> Option<&RegistryEntry> {
        self.entries.iter().find(|e| e.path.dotted() == dotted)
    }

    /// Whether a reducer is registered at `path`.
    pub fn contains(&self, path: &Path) -> bool {
        self.position(&path.dotted()).is_some()
    }

    /// Iterate entries in registration order.
    pub fn iter(&self) -> impl Iterator<Item = &RegistryEntry> {
        self.entries.iter()
    }

    /// The dotted keys of all entries, in registration order.
    pub fn keys(&self) -> impl Iterator<Item = String> + '_ {
        self.entries.iter().map(|e| e.path.dotted())
    }

    /// Number of registered reducers.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether no reducer is registered.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn position(&self, dotted: &str) -> Option<usize> {
        self.entries.iter().position(|e| e.path.dotted() == dotted)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Action, StateNode};

    fn identity() -> SharedReducer {
        SharedReducer::new(|state: StateNode, _: &Action| Some(state))
    }

    #[test]
    fn register_and_deregister() {
        let mut registry = ReducerRegistry::new();
        assert!(registry.register(Path::from(["a", "b"]), identity()).is_none());
        assert_eq!(registry.len(), 1);
        assert!(registry.get("a.b").is_some());

        let removed = registry.deregister(&Path::from(["a", "b"])).unwrap();
        assert_eq!(removed.path(), &Path::from(["a", "b"]));
        assert!(registry.is_empty());
        assert!(registry.deregister(&Path::from(["a", "b"])).is_none());
    }

    #[test]
    fn same_path_overwrites_in_place() {
        let first = identity();
        let second = identity();
        let mut registry = ReducerRegistry::new();
        registry.register(Path::from("x"), first.clone());
        registry.register(Path::from("y"), identity());

        let replaced = registry.register(Path::from("x"), second.clone()).unwrap();
        assert!(replaced.reducer().ptr_eq(&first));
        assert_eq!(registry.len(), 2);
        assert_eq!(registry.keys().collect::<Vec<_>>(), vec!["x", "y"]);
        assert!(registry.get("x").unwrap().reducer().ptr_eq(&second));
    }

    #[test]
    fn clones_are_isolated() {
        let mut registry = ReducerRegistry::new();
        let snapshot = registry.clone();
        registry.register(Path::from("x"), identity());
        assert!(snapshot.is_empty());
        assert!(registry.contains(&Path::from("x")));
    }
}
