//! Hierarchical paths into the state tree.

use imbl::OrdMap;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Maps every visible variable name to the path of the node that owns it.
pub type RoutingTable = OrdMap<String, Path>;

/// An ordered sequence of string keys identifying one node in the state tree.
///
/// The empty path addresses the root. A scalar key converts into a
/// single-segment path, so callers never have to wrap keys by hand:
///
/// ```rust
/// use uiscope_core::Path;
///
/// let path = Path::from("parent").child("child");
/// assert_eq!(path.dotted(), "parent.child");
/// assert_eq!(Path::from("solo").len(), 1);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Path(Vec<String>);

impl Path {
    /// The root path (no segments).
    pub const fn root() -> Self {
        Self(Vec::new())
    }

    /// Build a path from any sequence of segments.
    pub fn new<I, S>(segments: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self(segments.into_iter().map(Into::into).collect())
    }

    /// Return a new path with `key` appended. `self` is left untouched.
    pub fn child(&self, key: impl Into<String>) -> Self {
        let mut segments = Vec::with_capacity(self.0.len() + 1);
        segments.extend(self.0.iter().cloned());
        segments.push(key.into());
        Self(segments)
    }

    /// The segments of this path, root first.
    pub fn segments(&self) -> &[String] {
        &self.0
    }

    /// The last segment, if any.
    pub fn last(&self) -> Option<&str> {
        self.0.last().map(String::as_str)
    }

    /// Number of segments.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether this is the root path.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Whether `prefix` is an ancestor of (or equal to) this path.
    pub fn starts_with(&self, prefix: &Path) -> bool {
        self.0.starts_with(&prefix.0)
    }

    /// The segments joined by `.`; this is the registry key for the path.
    pub fn dotted(&self) -> String {
        self.0.join(".")
    }
}

impl fmt::Display for Path {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.dotted())
    }
}

impl From<&str> for Path {
    fn from(key: &str) -> Self {
        Self(vec![key.to_owned()])
    }
}

impl From<String> for Path {
    fn from(key: String) -> Self {
        Self(vec![key])
    }
}

impl From<Vec<String>> for Path {
    fn from(segments: Vec<String>) -> Self {
        Self(segments)
    }
}

impl From<&[&str]> for Path {
    fn from(segments: &[&str]) -> Self {
        Self::new(segments.iter().copied())
    }
}

impl<const N: usize> From<[&str; N]> for Path {
    fn from(segments: [&str; N]) -> Self {
        Self::new(segments)
    }
}

impl From<&Path> for Path {
    fn from(path: &Path) -> Self {
        path.clone()
    }
}

impl FromIterator<String> for Path {
    fn from_iter<I: IntoIterator<Item = String>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl<'a> IntoIterator for &'a Path {
    type Item = &'a String;
    type IntoIter = std::slice::Iter<'a, String>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scalar_key_becomes_single_segment() {
        let path = Path::from("parent");
        assert_eq!(path.segments(), &["parent".to_string()]);
        assert_eq!(Path::from(String::from("x")).len(), 1);
    }

    #[test]
    fn child_does_not_touch_parent() {
        let parent = Path::from("a");
        let child = parent.child("b");
        assert_eq!(parent.dotted(), "a");
        assert_eq!(child.dotted(), "a.b");
        assert!(child.starts_with(&parent));
        assert!(!parent.starts_with(&child));
    }

    #[test]
    fn root_is_empty() {
        let root = Path::root();
        assert!(root.is_empty());
        assert_eq!(root.dotted(), "");
        assert_eq!(root.last(), None);
        assert_eq!(root.child("k"), Path::from("k"));
    }

    #[test]
    fn serializes_as_array() {
        let path = Path::from(["a", "b"]);
        let json = serde_json::to_value(&path).unwrap();
        assert_eq!(json, serde_json::json!(["a", "b"]));
    }
}
