mod common;

use common::{mount_child, mount_root, read, store, vars};
use uiscope::{Path, UiOptions, json};

#[test]
fn node_renders_its_defaults() {
    let store = store();
    let mut node = mount_root(
        &store,
        UiOptions::new("Test").state("name", "foo").state("isValid", true),
    );

    let props = node.render_props();
    assert!(props.key.starts_with("Test"));
    assert_eq!(props.path, Path::from(props.key.as_str()));
    assert_eq!(
        *props.state,
        vars(&[("name", json!("foo")), ("isValid", json!(true))])
    );
}

#[test]
fn single_update() {
    let store = store();
    let mut node = mount_root(&store, UiOptions::new("Test").state("name", "foo"));

    node.update("name", "test").unwrap();
    assert_eq!(read(&mut node, "name"), Some(json!("test")));
}

#[test]
fn mass_update_sets_everything_in_one_dispatch() {
    let store = store();
    let mut node = mount_root(
        &store,
        UiOptions::new("Test").state("name", "foo").state("isValid", true),
    );
    let notified = std::sync::Arc::new(std::sync::atomic::AtomicUsize::new(0));
    let counter = notified.clone();
    store.subscribe(move |_| {
        counter.fetch_add(1, std::sync::atomic::Ordering::SeqCst);
    });

    node.update_many(vars(&[("name", json!("test")), ("isValid", json!(false))]))
        .unwrap();

    assert_eq!(notified.load(std::sync::atomic::Ordering::SeqCst), 1);
    assert_eq!(read(&mut node, "name"), Some(json!("test")));
    assert_eq!(read(&mut node, "isValid"), Some(json!(false)));
}

#[test]
fn mass_update_spans_owning_nodes() {
    let store = store();
    let parent = mount_root(&store, UiOptions::new("Parent").key("p").state("a", 0));
    let mut child = mount_child(&store, &parent, UiOptions::new("Child").key("c").state("b", 0));

    child
        .update_many(vars(&[("a", json!(1)), ("b", json!(2))]))
        .unwrap();

    let state = store.state();
    assert_eq!(state.var_in(&Path::from("p"), "a"), Some(&json!(1)));
    assert_eq!(state.var_in(&Path::from(["p", "c"]), "b"), Some(&json!(2)));
    assert_eq!(read(&mut child, "a"), Some(json!(1)));
}

#[test]
fn child_inherits_and_updates_parent_variables() {
    let store = store();
    let mut parent = mount_root(&store, UiOptions::new("Parent").state("name", "foo"));
    let mut child = mount_child(&store, &parent, UiOptions::new("Child"));

    assert_eq!(*child.state(), *parent.state());
    assert_eq!(child.routing().get("name"), Some(parent.path()));

    child.update("name", "bar").unwrap();
    assert_eq!(read(&mut parent, "name"), Some(json!("bar")));
    assert_eq!(read(&mut child, "name"), Some(json!("bar")));
}

#[test]
fn declaration_shadows_parent() {
    let store = store();
    let mut parent = mount_root(
        &store,
        UiOptions::new("Parent").key("parent").state("name", "parent"),
    );
    let mut child = mount_child(
        &store,
        &parent,
        UiOptions::new("Child").key("child").state("name", "child"),
    );

    child.update("name", "x").unwrap();
    assert_eq!(read(&mut child, "name"), Some(json!("x")));
    assert_eq!(read(&mut parent, "name"), Some(json!("parent")));
}

#[test]
fn siblings_are_isolated() {
    let store = store();
    let parent = mount_root(&store, UiOptions::new("List").key("list"));
    let mut first = mount_child(&store, &parent, UiOptions::new("Row").state("selected", false));
    let mut second = mount_child(&store, &parent, UiOptions::new("Row").state("selected", false));
    assert_ne!(first.key(), second.key());

    first.update("selected", true).unwrap();
    assert_eq!(read(&mut first, "selected"), Some(json!(true)));
    assert_eq!(read(&mut second, "selected"), Some(json!(false)));
}

#[test]
fn grandchild_resolves_through_two_levels() {
    let store = store();
    let mut root = mount_root(&store, UiOptions::new("Root").key("r").state("theme", "light"));
    let middle = mount_child(&store, &root, UiOptions::new("Middle").key("m"));
    let leaf = mount_child(&store, &middle, UiOptions::new("Leaf").key("l"));

    assert_eq!(leaf.path(), &Path::from(["r", "m", "l"]));
    leaf.update("theme", "dark").unwrap();
    assert_eq!(read(&mut root, "theme"), Some(json!("dark")));
}
