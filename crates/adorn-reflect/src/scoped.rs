//! Key-bound reflection facade
//!
//! A [`ScopedReflector`] curries one metadata key (and the metadata type
//! that goes with it) over a [`Reflector`], so factory consumers query
//! without repeating the key. It holds no state beyond the pair.

use std::marker::PhantomData;
use std::sync::Arc;

use adorn_core::{Class, MetadataKey};

use crate::reflect::{
    DecoratedClass, DecoratedItem, DecoratedMethod, DecoratedParameter, DecoratedProperty,
    Reflector,
};
use crate::Metadata;

/// A reflector bound to one metadata key.
pub struct ScopedReflector<T> {
    reflector: Reflector,
    key: MetadataKey,
    _metadata: PhantomData<fn() -> T>,
}

/// Create a reflector bound to `key`
pub fn create_scoped_reflector<T: Metadata>(
    class: &Arc<Class>,
    key: MetadataKey,
) -> ScopedReflector<T> {
    ScopedReflector::new(class, key)
}

impl<T: Metadata> ScopedReflector<T> {
    pub(crate) fn new(class: &Arc<Class>, key: MetadataKey) -> Self {
        Self {
            reflector: Reflector::new(class),
            key,
            _metadata: PhantomData,
        }
    }

    /// The bound metadata key
    pub fn key(&self) -> MetadataKey {
        self.key
    }

    /// Class-level metadata, as [`Reflector::class`]
    pub fn class(&self) -> Vec<DecoratedClass<T>> {
        self.reflector.class(self.key)
    }

    /// Decorated methods, as [`Reflector::methods`]
    pub fn methods(&self) -> Vec<DecoratedMethod<T>> {
        self.reflector.methods(self.key)
    }

    /// Decorated properties, as [`Reflector::properties`]
    pub fn properties(&self) -> Vec<DecoratedProperty<T>> {
        self.reflector.properties(self.key)
    }

    /// Decorated parameters, as [`Reflector::parameters`]
    pub fn parameters(&self) -> Vec<DecoratedParameter<T>> {
        self.reflector.parameters(self.key)
    }

    /// Every decorated item, as [`Reflector::all`]
    pub fn all(&self) -> Vec<DecoratedItem<T>> {
        self.reflector.all(self.key)
    }
}
