//! Adorn core: class model and metadata storage primitive
//!
//! This crate provides the substrate the adorn annotation layer targets:
//! - **Values**: a safe dynamic value enum (`value` module)
//! - **Classes**: named type descriptors with parent links, per-surface
//!   member tables, and hierarchy queries (`class` module)
//! - **Members**: explicit descriptors tagging each member as method,
//!   data, or accessor (`member` module)
//! - **Instances**: field stores with descriptor-aware access and method
//!   dispatch (`instance` module)
//! - **Metadata primitive**: opaque key/value payloads addressed by
//!   `(surface, member, key)` with own and inherited reads (`metadata`
//!   module)
//!
//! Nothing in this crate knows about decorators; it only supplies the
//! storage and traversal primitives they are built from.

#![warn(missing_docs)]
#![warn(rust_2018_idioms)]

pub mod callable;
pub mod class;
pub mod instance;
pub mod member;
pub mod metadata;
pub mod value;

pub use callable::{Callable, GetterFn, NativeFn, Receiver, SetterFn};
pub use class::{hierarchy, Class};
pub use instance::Instance;
pub use member::{Descriptor, Member, Surface};
pub use metadata::{MetaValue, MetadataKey};
pub use value::Value;
