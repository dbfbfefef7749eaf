mod common;

use common::{mount_root, store};
use std::collections::HashSet;
use uiscope::{Path, UiOptions};

#[test]
fn generated_keys_are_unique_and_prefixed() {
    let store = store();
    let nodes: Vec<_> = (0..3)
        .map(|_| mount_root(&store, UiOptions::new("Test")))
        .collect();

    for node in &nodes {
        assert!(!node.key().is_empty());
        assert!(node.key().starts_with("Test"));
        assert!(node.key().len() >= "Test".len() + 5);
    }
    let unique: HashSet<_> = nodes.iter().map(|n| n.key().to_owned()).collect();
    assert_eq!(unique.len(), 3);
}

#[test]
fn fixed_key_is_used_verbatim() {
    let store = store();
    let node = mount_root(&store, UiOptions::new("Test").key("testKey"));
    assert_eq!(node.key(), "testKey");
    assert_eq!(node.path(), &Path::from("testKey"));
}

#[test]
fn registry_name_is_a_legal_key() {
    let store = store();
    let mut node = mount_root(&store, UiOptions::new("Odd").key("__reducers").state("n", 1));
    node.update("n", 2).unwrap();
    assert_eq!(node.state().get("n"), Some(&uiscope::json!(2)));
    assert!(store.state().reducers().is_empty());
}
