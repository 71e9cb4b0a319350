mod common;

use std::collections::BTreeSet;
use std::sync::Arc;

use common::TableBridge;
use flatns_core::{root_with, GroupKind, Namespace, NamespaceError, ResolverOptions};

fn fresh_root() -> Namespace<TableBridge> {
    root_with(Arc::new(TableBridge::new()), ResolverOptions::builtin())
}

fn names(ns: &Namespace<TableBridge>) -> Vec<String> {
    ns.candidates().collect()
}

fn name_set(ns: &Namespace<TableBridge>) -> BTreeSet<String> {
    ns.candidates().collect()
}

fn set(items: &[&str]) -> BTreeSet<String> {
    items.iter().map(|s| s.to_string()).collect()
}

#[test]
fn root_spells_the_empty_name() {
    assert_eq!(names(&fresh_root()), vec![String::new()]);
}

#[test]
fn single_label_has_one_spelling() {
    assert_eq!(names(&fresh_root().child("package")), vec!["package"]);
}

#[test]
fn two_labels_expand_over_default_separators() {
    let ns = fresh_root().child("package").child("initialize");
    assert_eq!(
        names(&ns),
        vec![
            "package-initialize",
            "package/initialize",
            "package:initialize",
            "package|initialize"
        ]
    );
}

#[test]
fn leading_boundary_doubles_separator() {
    let ns = fresh_root().child("package").child("_initialize");
    assert_eq!(
        name_set(&ns),
        set(&[
            "package--initialize",
            "package//initialize",
            "package::initialize",
            "package||initialize"
        ])
    );
}

#[test]
fn boundary_inside_label_expands() {
    let ns = fresh_root().child("with_underscore");
    assert_eq!(
        name_set(&ns),
        set(&[
            "with-underscore",
            "with/underscore",
            "with:underscore",
            "with|underscore"
        ])
    );
}

#[test]
fn three_labels_enumerate_root_most_separator_first() {
    let ns = fresh_root().path(["a", "b", "c"]);
    let all = names(&ns);
    assert_eq!(all.len(), 16);
    assert_eq!(&all[..5], &["a-b-c", "a/b-c", "a:b-c", "a|b-c", "a-b/c"]);
    assert_eq!(all.last().map(String::as_str), Some("a|b|c"));
    assert_eq!(all.iter().collect::<BTreeSet<_>>().len(), 16);
}

#[test]
fn enumeration_restarts_from_scratch() {
    let ns = fresh_root().path(["a", "b", "c"]);
    let mut partial = ns.candidates();
    partial.next();
    partial.next();
    assert_eq!(names(&ns), names(&ns));
    assert_eq!(ns.candidates().next().as_deref(), Some("a-b-c"));
}

#[test]
fn index_appends_literal_verbatim() {
    let spacemacs = fresh_root().child("spacemacs");
    assert_eq!(names(&spacemacs.index("--")), vec!["spacemacs--"]);
}

#[test]
fn label_after_pinned_index_keeps_its_separator() {
    let spacemacs = fresh_root().child("spacemacs");
    assert_eq!(names(&spacemacs.index("--").child("stuff")), vec!["spacemacs--stuff"]);
    assert_eq!(names(&spacemacs.index("--").child("_stuff")), vec!["spacemacs---stuff"]);
    assert_eq!(names(&spacemacs.index("/").child("_stuff")), vec!["spacemacs//stuff"]);
}

#[test]
fn pin_only_covers_the_leading_run() {
    let ns = fresh_root()
        .child("spacemacs")
        .index("/")
        .child("_with_underscore");
    assert_eq!(
        name_set(&ns),
        set(&[
            "spacemacs//with-underscore",
            "spacemacs//with/underscore",
            "spacemacs//with:underscore",
            "spacemacs//with|underscore"
        ])
    );
}

#[test]
fn unpinned_leading_run_expands() {
    let ns = fresh_root().child("spacemacs").child("_stuff");
    assert_eq!(
        name_set(&ns),
        set(&[
            "spacemacs--stuff",
            "spacemacs//stuff",
            "spacemacs::stuff",
            "spacemacs||stuff"
        ])
    );
}

#[test]
fn every_spelling_gets_an_escape_boundary() {
    let parent = fresh_root().path(["alpha", "beta"]);
    for name in parent.child("gamma").candidates() {
        let before = &name[..name.len() - "gamma".len()];
        let boundary = before.chars().last().expect("boundary before label");
        assert!(!boundary.is_alphanumeric(), "{} lacks a boundary", name);
    }
}

#[test]
fn custom_policy_applies_to_children_only() {
    let root = fresh_root();
    let loff = root.child("loff").with_separators("~^").expect("valid policy");
    assert_eq!(names(&loff), vec!["loff"]);
    assert_eq!(name_set(&loff.child("ding")), set(&["loff~ding", "loff^ding"]));
    assert_eq!(name_set(&loff.child("_ding")), set(&["loff~~ding", "loff^^ding"]));

    let doff = loff
        .child("ding")
        .with_separators("$")
        .expect("valid policy")
        .child("doff");
    assert_eq!(name_set(&doff), set(&["loff~ding$doff", "loff^ding$doff"]));

    assert_eq!(names(&root.path(["loff", "ding"])).len(), 4);
}

#[test]
fn rebound_root_uses_new_policy() {
    let root = fresh_root().with_separators("~^").expect("valid policy");
    let ding = root.child("loff").child("ding");
    assert_eq!(names(&ding), vec!["loff~ding", "loff^ding"]);
    assert_eq!(
        name_set(&root.child("loff").child("_ding")),
        set(&["loff~~ding", "loff^^ding"])
    );
}

#[test]
fn separator_width_is_fixed_when_built() {
    let ab = fresh_root().path(["a", "b"]);
    let narrowed = ab.with_separators("~").expect("valid policy");
    let abc = narrowed.child("c");

    let widths: Vec<usize> = abc
        .groups()
        .iter()
        .filter(|g| g.kind() == GroupKind::Separator)
        .map(|g| g.len())
        .collect();
    assert_eq!(widths, vec![4, 1]);
    assert_eq!(names(&abc).len(), 4);
}

#[test]
fn empty_policy_is_rejected() {
    let root = fresh_root();
    assert!(matches!(
        root.with_separators(""),
        Err(NamespaceError::InvalidPolicy)
    ));
}

#[test]
fn custom_boundary_marker_splits_labels() {
    let options = ResolverOptions::builtin().with_boundary_marker('.');
    let root = root_with(Arc::new(TableBridge::new()), options);
    assert_eq!(
        name_set(&root.child("with.dot")),
        set(&["with-dot", "with/dot", "with:dot", "with|dot"])
    );
    assert_eq!(names(&root.child("with_underscore")), vec!["with_underscore"]);
}

#[test]
fn deep_paths_keep_a_canonical_spelling() {
    let labels: Vec<String> = (0..40).map(|i| format!("s{}", i)).collect();
    let ns = fresh_root().path(labels.iter().map(String::as_str));
    let expected = labels.join("-");

    assert_eq!(ns.symbol().expect("canonical"), expected);
    assert_eq!(ns.candidates().next(), Some(expected.clone()));
    assert_eq!(ns.candidates().size_hint(), (usize::MAX, None));
    assert_eq!(ns.candidates().take(3).count(), 3);
    assert!(format!("{:?}", ns).contains("s39"));
}
