//! Inheritance and shadowing tests
//!
//! The walk rules: most-derived wins entirely, class metadata never
//! inherits, categories are judged per level, statics never walk.

use adorn_reflect::{
    ClassBuilder, ClassDecorator, MethodDecorator, PropertyDecorator, Receiver, Value,
};

use super::harness::*;

// ============================================================================
// Non-shadowed inheritance
// ============================================================================

#[test]
fn test_parent_decorated_method_surfaces_for_child() {
    let log = MethodDecorator::<(String,), String>::direct();

    let base = ClassBuilder::new("Base")
        .method("handle", |_recv, _args| Value::str("base"), vec![log.with((s("audit"),))])
        .build()
        .unwrap();
    let child = ClassBuilder::new("Child").extends(&base).build().unwrap();

    let items = log.methods(&child);
    assert_eq!(items.len(), 1);
    assert_eq!(items[0].name, "handle");
    assert_eq!(items[0].metadata, vec!["audit"]);
    // The callable comes from the contributing (parent) level
    let instance = adorn_reflect::Instance::new(&child);
    assert_eq!(
        items[0].callable.invoke(Receiver::Instance(&instance), &[]),
        Value::str("base")
    );
}

#[test]
fn test_three_level_chain_collects_nearest_of_each_name() {
    let log = MethodDecorator::<(String,), String>::direct();

    let a = ClassBuilder::new("A")
        .method("alpha", noop, vec![log.with((s("a.alpha"),))])
        .method("shared", noop, vec![log.with((s("a.shared"),))])
        .build()
        .unwrap();
    let b = ClassBuilder::new("B")
        .extends(&a)
        .method("shared", noop, vec![log.with((s("b.shared"),))])
        .build()
        .unwrap();
    let c = ClassBuilder::new("C")
        .extends(&b)
        .method("gamma", noop, vec![log.with((s("c.gamma"),))])
        .build()
        .unwrap();

    let items = log.methods(&c);
    let summary: Vec<(String, Vec<String>)> =
        items.into_iter().map(|m| (m.name, m.metadata)).collect();
    // Own level first, then ancestors in chain order
    assert_eq!(
        summary,
        vec![
            (s("gamma"), vec![s("c.gamma")]),
            (s("shared"), vec![s("b.shared")]),
            (s("alpha"), vec![s("a.alpha")]),
        ]
    );
}

// ============================================================================
// Shadowing
// ============================================================================

#[test]
fn test_redecorated_override_carries_only_child_metadata() {
    let log = MethodDecorator::<(String,), String>::direct();

    let base = ClassBuilder::new("Base")
        .method("handle", noop, vec![log.with((s("base"),))])
        .build()
        .unwrap();
    let child = ClassBuilder::new("Child")
        .extends(&base)
        .method("handle", noop, vec![log.with((s("child"),))])
        .build()
        .unwrap();

    let items = log.methods(&child);
    assert_eq!(items.len(), 1);
    assert_eq!(items[0].metadata, vec!["child"]);
}

#[test]
fn test_undecorated_override_blocks_ancestor_entirely() {
    let log = MethodDecorator::<(String,), String>::direct();

    let base = ClassBuilder::new("Base")
        .method("handle", noop, vec![log.with((s("base"),))])
        .build()
        .unwrap();
    let child = ClassBuilder::new("Child")
        .extends(&base)
        .method("handle", noop, vec![])
        .build()
        .unwrap();

    // The child's own declaration claims the name; no merging, no
    // fallback to the ancestor's metadata
    assert!(log.methods(&child).is_empty());
    // The base still reports its own decoration
    assert_eq!(log.methods(&base).len(), 1);
}

#[test]
fn test_class_metadata_does_not_inherit() {
    let tag = ClassDecorator::<(String,), String>::direct();

    let base = ClassBuilder::new("Base").annotate(tag.with((s("x"),))).build().unwrap();
    let child = ClassBuilder::new("Child").extends(&base).build().unwrap();

    assert_eq!(tag.class(&base).len(), 1);
    assert!(tag.class(&child).is_empty());
}

// ============================================================================
// Per-category independent walk
// ============================================================================

#[test]
fn test_methods_and_properties_may_source_same_name_from_different_levels() {
    // "mode" is a decorated data property on the parent and an
    // undecorated method on the child. The method walk claims the name at
    // the child and finds nothing; the property walk skips the child's
    // callable without claiming and surfaces the parent's data slot.
    let column = PropertyDecorator::<(String,), String>::direct();

    let base = ClassBuilder::new("Base")
        .property("mode", Some(Value::int(1)), vec![column.with((s("col"),))])
        .build()
        .unwrap();
    let child = ClassBuilder::new("Child")
        .extends(&base)
        .method("mode", noop, vec![])
        .build()
        .unwrap();

    let reflector = adorn_reflect::reflect(&child);
    assert!(reflector.methods::<String>(column.key()).is_empty());
    let props = reflector.properties::<String>(column.key());
    assert_eq!(props.len(), 1);
    assert_eq!(props[0].name, "mode");
    assert_eq!(props[0].metadata, vec!["col"]);
}

#[test]
fn test_property_shadowed_by_undecorated_child_field() {
    let column = PropertyDecorator::<(String,), String>::direct();

    let base = ClassBuilder::new("Base")
        .property("mode", None, vec![column.with((s("col"),))])
        .build()
        .unwrap();
    let child = ClassBuilder::new("Child")
        .extends(&base)
        .property("mode", None, vec![])
        .build()
        .unwrap();

    // Same category at the child level: the name is claimed, nothing
    // surfaces
    assert!(column.properties(&child).is_empty());
}

// ============================================================================
// Statics
// ============================================================================

#[test]
fn test_static_members_are_not_inherited_by_queries() {
    let log = MethodDecorator::<(String,), String>::direct();

    let base = ClassBuilder::new("Base")
        .static_method("create", noop, vec![log.with((s("factory"),))])
        .build()
        .unwrap();
    let child = ClassBuilder::new("Child").extends(&base).build().unwrap();

    assert_eq!(log.methods(&base).len(), 1);
    // Statics are scanned on the queried class only
    assert!(log.methods(&child).is_empty());
}

#[test]
fn test_static_and_instance_methods_with_same_name_both_surface() {
    let log = MethodDecorator::<(String,), String>::direct();

    let svc = ClassBuilder::new("Svc")
        .method("run", noop, vec![log.with((s("instance"),))])
        .static_method("run", noop, vec![log.with((s("static"),))])
        .build()
        .unwrap();

    let items = log.methods(&svc);
    assert_eq!(items.len(), 2);
    assert_eq!(items[0].metadata, vec!["instance"]);
    assert_eq!(items[1].metadata, vec!["static"]);
}
