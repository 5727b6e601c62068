//! Interceptor tests
//!
//! Covers wrap composition order, accumulated-metadata visibility at
//! decoration time, name preservation, accessor round-trips, and the
//! silent-degradation sites.

use std::sync::Arc;

use parking_lot::Mutex;

use adorn_reflect::{
    create_method_interceptor, create_property_interceptor, ClassBuilder, Instance,
    MethodInterceptor, PropertyInterceptor, Receiver, Surface, Value,
};

use super::harness::*;

// ============================================================================
// Method interceptors
// ============================================================================

#[test]
fn test_interceptor_composition_order() {
    let calls: Arc<Mutex<Vec<String>>> = Arc::new(Mutex::new(Vec::new()));
    let seen_meta: Arc<Mutex<Vec<Vec<String>>>> = Arc::new(Mutex::new(Vec::new()));

    let log = {
        let calls = calls.clone();
        let seen_meta = seen_meta.clone();
        MethodInterceptor::<(String,), String>::direct(move |original, meta, _ctx| {
            // The array reflects every application so far, latest last
            seen_meta.lock().push(meta.to_vec());
            let tag = meta.last().cloned().unwrap_or_default();
            let calls = calls.clone();
            Arc::new(move |recv: Receiver<'_>, args: &[Value]| {
                calls.lock().push(tag.clone());
                original.invoke(recv, args)
            })
        })
    };

    let svc = ClassBuilder::new("Svc")
        .method(
            "work",
            {
                let calls = calls.clone();
                move |_recv, _args| {
                    calls.lock().push(s("original"));
                    Value::null()
                }
            },
            vec![log.with((s("inner"),)), log.with((s("outer"),))],
        )
        .build()
        .unwrap();

    let instance = Instance::new(&svc);
    instance.call_method("work", &[]);

    // The later application wraps the earlier one's result
    assert_eq!(*calls.lock(), vec!["outer", "inner", "original"]);
    assert_eq!(
        *seen_meta.lock(),
        vec![vec![s("inner")], vec![s("inner"), s("outer")]]
    );
}

#[test]
fn test_intercepted_method_keeps_observable_name() {
    let trace = MethodInterceptor::<(String,), String>::direct(|original, _meta, _ctx| {
        Arc::new(move |recv: Receiver<'_>, args: &[Value]| original.invoke(recv, args))
    });

    let svc = ClassBuilder::new("Svc")
        .method("work", noop, vec![trace.with((s("t"),))])
        .build()
        .unwrap();

    let items = trace.methods(&svc);
    assert_eq!(items[0].callable.name(), "work");
}

#[test]
fn test_reflected_callable_is_post_interception() {
    let add_one = MethodInterceptor::<(String,), String>::direct(|original, _meta, _ctx| {
        Arc::new(move |recv: Receiver<'_>, args: &[Value]| {
            let inner = original.invoke(recv, args);
            Value::int(inner.as_int().unwrap_or(0) + 1)
        })
    });

    let svc = ClassBuilder::new("Svc")
        .method("next", echo, vec![add_one.with((s("t"),))])
        .build()
        .unwrap();

    let items = add_one.methods(&svc);
    let instance = Instance::new(&svc);
    let result = items[0]
        .callable
        .invoke(Receiver::Instance(&instance), &[Value::int(41)]);
    assert_eq!(result, Value::Int(42));
}

#[test]
fn test_interceptor_on_data_member_records_metadata_only() {
    let trace = MethodInterceptor::<(String,), String>::direct(|original, _meta, _ctx| {
        Arc::new(move |recv: Receiver<'_>, args: &[Value]| original.invoke(recv, args))
    });

    let svc = ClassBuilder::new("Svc")
        .property("version", Some(Value::int(1)), vec![trace.with((s("t"),))])
        .build()
        .unwrap();

    // No wrap happened, but the metadata is queryable under the member's
    // actual category
    assert!(trace.methods(&svc).is_empty());
    let props = adorn_reflect::reflect(&svc).properties::<String>(trace.key());
    assert_eq!(props.len(), 1);
    assert_eq!(props[0].metadata, vec!["t"]);

    let instance = Instance::new(&svc);
    assert_eq!(instance.get_property("version"), Some(Value::Int(1)));
}

#[test]
fn test_interceptor_on_undeclared_member_records_metadata_only() {
    let trace = MethodInterceptor::<(String,), String>::direct(|original, _meta, _ctx| {
        Arc::new(move |recv: Receiver<'_>, args: &[Value]| original.invoke(recv, args))
    });

    let svc = ClassBuilder::new("Svc").build().unwrap();
    trace
        .with((s("t"),))
        .apply(&svc, Surface::Prototype, "ghost")
        .unwrap();

    // No slot was declared, so enumeration cannot reach the metadata
    assert!(trace.methods(&svc).is_empty());
    assert!(svc.own_member(Surface::Prototype, "ghost").is_none());
}

#[test]
fn test_composed_interceptor_metadata_reaches_wrap() {
    #[derive(Debug, Clone, PartialEq)]
    struct Retry {
        attempts: i64,
    }

    let calls: Arc<Mutex<Vec<i64>>> = Arc::new(Mutex::new(Vec::new()));
    let retry = {
        let calls = calls.clone();
        create_method_interceptor(
            |(attempts,): (i64,)| Retry { attempts },
            move |original, meta: &[Retry], _ctx| {
                let attempts = meta.last().map(|r| r.attempts).unwrap_or(0);
                let calls = calls.clone();
                Arc::new(move |recv: Receiver<'_>, args: &[Value]| {
                    calls.lock().push(attempts);
                    original.invoke(recv, args)
                })
            },
        )
    };

    let svc = ClassBuilder::new("Svc")
        .method("fetch", echo, vec![retry.with((3,))])
        .build()
        .unwrap();

    let instance = Instance::new(&svc);
    instance.call_method("fetch", &[Value::int(1)]);
    assert_eq!(*calls.lock(), vec![3]);
    assert_eq!(retry.methods(&svc)[0].metadata, vec![Retry { attempts: 3 }]);
}

// ============================================================================
// Property interceptors
// ============================================================================

#[test]
fn test_set_interceptor_round_trip_preserves_value() {
    let audit: Arc<Mutex<Vec<Value>>> = Arc::new(Mutex::new(Vec::new()));

    let watched = PropertyInterceptor::<(String,), String>::direct().on_set({
        let audit = audit.clone();
        move |base, _meta, _ctx| {
            let audit = audit.clone();
            Arc::new(move |instance: &Instance, value: Value| {
                audit.lock().push(value.clone());
                base(instance, value)
            })
        }
    });

    let gauge = ClassBuilder::new("Gauge")
        .property("level", Some(Value::int(0)), vec![watched.with((s("w"),))])
        .build()
        .unwrap();

    let instance = Instance::new(&gauge);
    instance.set_property("level", Value::int(7));

    // With no get interceptor, the last assigned value reads back
    // unchanged
    assert_eq!(instance.get_property("level"), Some(Value::Int(7)));
    assert_eq!(*audit.lock(), vec![Value::Int(7)]);
}

#[test]
fn test_get_interceptor_transforms_reads() {
    let loud = PropertyInterceptor::<(String,), String>::direct().on_get(|base, _meta, _ctx| {
        Arc::new(move |instance: &Instance| {
            match base(instance) {
                Value::Str(text) => Value::Str(text.to_uppercase()),
                other => other,
            }
        })
    });

    let banner = ClassBuilder::new("Banner")
        .property("text", Some(Value::str("hello")), vec![loud.with((s("w"),))])
        .build()
        .unwrap();

    let instance = Instance::new(&banner);
    // Seeded from the declared default
    assert_eq!(instance.get_property("text"), Some(Value::str("HELLO")));

    instance.set_property("text", Value::str("bye"));
    assert_eq!(instance.get_property("text"), Some(Value::str("BYE")));
    // The raw store keeps the unwrapped value
    assert_eq!(instance.get_field("text"), Some(Value::str("bye")));
}

#[test]
fn test_get_and_set_interceptors_together() {
    let clamped = PropertyInterceptor::<(String,), String>::direct()
        .on_get(|base, _meta, _ctx| {
            Arc::new(move |instance: &Instance| base(instance))
        })
        .on_set(|base, _meta, _ctx| {
            Arc::new(move |instance: &Instance, value: Value| {
                let clamped = value.as_int().map(|i| Value::int(i.min(100))).unwrap_or(value);
                base(instance, clamped);
            })
        });

    let gauge = ClassBuilder::new("Gauge")
        .property("percent", Some(Value::int(0)), vec![clamped.with((s("w"),))])
        .build()
        .unwrap();

    let instance = Instance::new(&gauge);
    instance.set_property("percent", Value::int(250));
    assert_eq!(instance.get_property("percent"), Some(Value::Int(100)));
}

#[test]
fn test_property_interceptor_without_callbacks_is_plain_decoration() {
    let column = PropertyInterceptor::<(String,), String>::direct();

    let entity = ClassBuilder::new("Entity")
        .property("id", Some(Value::int(1)), vec![column.with((s("c"),))])
        .build()
        .unwrap();

    // Not an error, and no behavioral rewrite: the slot is still plain
    // data
    let instance = Instance::new(&entity);
    instance.set_property("id", Value::int(9));
    assert_eq!(instance.get_property("id"), Some(Value::Int(9)));
    assert_eq!(column.properties(&entity).len(), 1);
}

#[test]
fn test_composed_property_interceptor() {
    let renamed = create_property_interceptor(|(table, column): (String, String)| {
        format!("{table}.{column}")
    })
    .on_set(|base, _meta, _ctx| {
        Arc::new(move |instance: &Instance, value: Value| base(instance, value))
    });

    let entity = ClassBuilder::new("User")
        .property("id", Some(Value::int(0)), vec![renamed.with((s("users"), s("id")))])
        .build()
        .unwrap();

    assert_eq!(renamed.properties(&entity)[0].metadata, vec!["users.id"]);

    let instance = Instance::new(&entity);
    instance.set_property("id", Value::int(12));
    assert_eq!(instance.get_property("id"), Some(Value::Int(12)));
}

#[test]
fn test_stacked_property_interceptors_compose() {
    let double = PropertyInterceptor::<(String,), String>::direct().on_set(|base, _m, _c| {
        Arc::new(move |instance: &Instance, value: Value| {
            let doubled = value.as_int().map(|i| Value::int(i * 2)).unwrap_or(value);
            base(instance, doubled);
        })
    });
    let add_ten = PropertyInterceptor::<(String,), String>::direct().on_set(|base, _m, _c| {
        Arc::new(move |instance: &Instance, value: Value| {
            let bumped = value.as_int().map(|i| Value::int(i + 10)).unwrap_or(value);
            base(instance, bumped);
        })
    });

    let gauge = ClassBuilder::new("Gauge")
        .property(
            "level",
            Some(Value::int(0)),
            vec![double.with((s("d"),)), add_ten.with((s("a"),))],
        )
        .build()
        .unwrap();

    // add_ten wraps double's accessor pair: (5 + 10) * 2
    let instance = Instance::new(&gauge);
    instance.set_property("level", Value::int(5));
    assert_eq!(instance.get_property("level"), Some(Value::Int(30)));
}
