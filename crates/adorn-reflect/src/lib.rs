//! Adorn: typed annotations and reflection for modeled classes
//!
//! This crate lets libraries attach typed, structured metadata to
//! classes, methods, properties, and parameters at declaration time, then
//! query it back later, grouped by decoration kind:
//! - **Factories** (`factory` module): `create_*_decorator` functions
//!   mint a unique key and produce reusable annotation factories
//! - **Interceptors** (`intercept` module): decorator variants that also
//!   rewrite the decorated member's runtime behavior
//! - **Builder** (`builder` module): the declaration protocol that
//!   applies annotations in a defined order
//! - **Reflector** (`reflect` module): hierarchy-walking queries with
//!   most-derived-wins shadowing
//! - **Scoped reflector** (`scoped` module): a key-bound query facade
//!
//! # Example
//!
//! ```rust,ignore
//! use adorn_reflect::{create_method_decorator, ClassBuilder};
//! use adorn_core::Value;
//!
//! #[derive(Clone)]
//! struct Route { path: String, verb: String }
//!
//! let route = create_method_decorator(|(path, verb): (String, String)| {
//!     Route { path, verb }
//! });
//!
//! let users = ClassBuilder::new("UserController")
//!     .method("list", |_recv, _args| Value::null(), vec![
//!         route.with(("/users".to_string(), "GET".to_string())),
//!     ])
//!     .build()?;
//!
//! for method in route.methods(&users) {
//!     println!("{} -> {}", method.metadata[0].path, method.name);
//! }
//! ```

#![warn(missing_docs)]
#![warn(rust_2018_idioms)]

pub mod args;
pub mod builder;
pub mod error;
pub mod factory;
pub mod intercept;
pub mod reflect;
pub mod scoped;

mod store;

/// Bound every metadata payload type satisfies.
///
/// Blanket-implemented; nothing to implement by hand.
pub trait Metadata: Clone + Send + Sync + 'static {}

impl<T: Clone + Send + Sync + 'static> Metadata for T {}

pub use args::HeadArgs;
pub use builder::ClassBuilder;
pub use error::AnnotationError;
pub use factory::{
    create_class_decorator, create_method_decorator, create_parameter_decorator,
    create_property_decorator, ClassAnnotation, ClassDecorator, MemberAnnotation, MethodDecorator,
    ParameterDecorator, PropertyDecorator,
};
pub use intercept::{
    create_method_interceptor, create_property_interceptor, InterceptContext, MethodInterceptor,
    PropertyInterceptor,
};
pub use reflect::{
    reflect, DecoratedClass, DecoratedItem, DecoratedMethod, DecoratedParameter,
    DecoratedProperty, Reflector,
};
pub use scoped::{create_scoped_reflector, ScopedReflector};

// Re-export substrate types (canonical definitions live in adorn-core)
pub use adorn_core::{
    Callable, Class, Descriptor, GetterFn, Instance, Member, MetaValue, MetadataKey, NativeFn,
    Receiver, SetterFn, Surface, Value,
};
