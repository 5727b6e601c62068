//! Class members and their descriptors
//!
//! Each declared member carries an explicit descriptor tag instead of the
//! duck-typed "is the slot a function" check of dynamic object systems:
//! [`Descriptor::Method`] is the callable category, [`Descriptor::Data`]
//! and [`Descriptor::Accessor`] are the property category.

use std::fmt;

use crate::callable::{Callable, GetterFn, SetterFn};
use crate::value::Value;

/// The two owner surfaces of a class.
///
/// Class-level metadata, constructor parameter maps, and static members
/// live on the constructor side; instance members live on the prototype
/// side. Metadata addresses and member tables are split along this axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Surface {
    /// The constructor / static side of a class
    Constructor,
    /// The prototype / instance side of a class
    Prototype,
}

/// The shape of a declared member.
#[derive(Clone)]
pub enum Descriptor {
    /// A method with a concrete implementation
    Method(Callable),
    /// A data property with an optional declared default
    ///
    /// `Data(None)` is the placeholder slot a property annotation declares
    /// when the name has no declaration of its own.
    Data(Option<Value>),
    /// An accessor pair installed in place of a data property
    Accessor {
        /// Property getter
        get: GetterFn,
        /// Property setter, absent for read-only accessors
        set: Option<SetterFn>,
    },
}

impl Descriptor {
    /// Whether this descriptor is the callable category
    pub fn is_callable(&self) -> bool {
        matches!(self, Descriptor::Method(_))
    }

    /// The callable implementation, if this is a method descriptor
    pub fn as_method(&self) -> Option<&Callable> {
        match self {
            Descriptor::Method(callable) => Some(callable),
            _ => None,
        }
    }
}

impl fmt::Debug for Descriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Descriptor::Method(callable) => f.debug_tuple("Method").field(callable).finish(),
            Descriptor::Data(value) => f.debug_tuple("Data").field(value).finish(),
            Descriptor::Accessor { set, .. } => f
                .debug_struct("Accessor")
                .field("has_set", &set.is_some())
                .finish(),
        }
    }
}

/// A declared member of a class surface.
#[derive(Debug, Clone)]
pub struct Member {
    /// Member name
    pub name: String,
    /// Member shape
    pub descriptor: Descriptor,
}
