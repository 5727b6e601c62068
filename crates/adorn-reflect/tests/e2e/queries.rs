//! Reflection query tests
//!
//! Covers empty reads, the fixed `all` ordering, scoped reflectors, and
//! enumeration exclusions.

use adorn_reflect::{
    create_scoped_reflector, reflect, ClassBuilder, DecoratedItem, Descriptor, MetadataKey,
    MethodDecorator, ParameterDecorator, PropertyDecorator, Surface, Value,
};

use super::harness::*;

#[test]
fn test_unused_key_reads_empty_on_decorated_class() {
    let log = MethodDecorator::<(String,), String>::direct();
    let other = MetadataKey::mint();

    let svc = ClassBuilder::new("Svc")
        .method("run", noop, vec![log.with((s("x"),))])
        .build()
        .unwrap();

    let reflector = reflect(&svc);
    assert!(reflector.class::<String>(other).is_empty());
    assert!(reflector.methods::<String>(other).is_empty());
    assert!(reflector.properties::<String>(other).is_empty());
    assert!(reflector.parameters::<String>(other).is_empty());
    assert!(reflector.all::<String>(other).is_empty());
}

#[test]
fn test_empty_reads_do_not_materialize_storage() {
    let svc = ClassBuilder::new("Svc").build().unwrap();
    let key = MetadataKey::mint();

    let _ = reflect(&svc).methods::<String>(key);
    let _ = reflect(&svc).parameters::<String>(key);

    // Reads leave no trace behind
    assert!(!svc.has_own_metadata(key, Surface::Prototype, Some("run")));
    assert!(svc.own_metadata_keys(Surface::Constructor, None).is_empty());
}

#[test]
fn test_all_groups_items_by_factory_kind() {
    let log = MethodDecorator::<(String,), String>::direct();
    let column = PropertyDecorator::<(String,), String>::direct();
    let inject = ParameterDecorator::<(String,), String>::direct();

    let svc = ClassBuilder::new("Svc")
        .method("run", noop, vec![log.with((s("m"),))])
        .property("mode", None, vec![column.with((s("p"),))])
        .constructor(vec![inject.ctor_param(0, (s("a"),))])
        .build()
        .unwrap();

    // Each factory sees only its own kind through `all`
    let methods = log.reflect(&svc).all();
    assert_eq!(methods.len(), 1);
    assert!(matches!(methods[0], DecoratedItem::Method(_)));

    let properties = column.reflect(&svc).all();
    assert_eq!(properties.len(), 1);
    assert!(matches!(properties[0], DecoratedItem::Property(_)));

    let parameters = inject.reflect(&svc).all();
    assert_eq!(parameters.len(), 1);
    assert!(matches!(parameters[0], DecoratedItem::Parameter(_)));
}

#[test]
fn test_scoped_reflector_matches_keyed_queries() {
    let log = MethodDecorator::<(String,), String>::direct();

    let svc = ClassBuilder::new("Svc")
        .method("run", noop, vec![log.with((s("x"),))])
        .build()
        .unwrap();

    let scoped = create_scoped_reflector::<String>(&svc, log.key());
    let keyed = reflect(&svc).methods::<String>(log.key());

    assert_eq!(scoped.methods().len(), keyed.len());
    assert_eq!(scoped.methods()[0].name, keyed[0].name);
    assert_eq!(scoped.methods()[0].metadata, keyed[0].metadata);

    // The factory's shortcut is the same facade
    let via_factory = log.reflect(&svc);
    assert_eq!(via_factory.key(), log.key());
    assert_eq!(via_factory.methods().len(), 1);
}

#[test]
fn test_reserved_names_are_excluded_from_enumeration() {
    let key = MetadataKey::mint();
    let svc = ClassBuilder::new("Svc").build().unwrap();

    // Declared through the substrate directly, bypassing builder checks
    svc.define(
        Surface::Prototype,
        "prototype",
        Descriptor::Data(Some(Value::int(1))),
    );
    svc.define_metadata(
        key,
        std::sync::Arc::new(vec![s("x")]),
        Surface::Prototype,
        Some("prototype"),
    );

    assert!(reflect(&svc).properties::<String>(key).is_empty());
}

#[test]
fn test_reflector_target_is_the_queried_class() {
    let svc = ClassBuilder::new("Svc").build().unwrap();
    let reflector = reflect(&svc);
    assert_eq!(reflector.target().id(), svc.id());
}

#[test]
fn test_decorated_class_item_references_class() {
    let tag = adorn_reflect::ClassDecorator::<(String,), String>::direct();
    let svc = ClassBuilder::new("Svc").annotate(tag.with((s("t"),))).build().unwrap();

    let items = tag.reflect(&svc).class();
    assert_eq!(items.len(), 1);
    assert_eq!(items[0].class.id(), svc.id());
    assert_eq!(items[0].name, "constructor");
}
