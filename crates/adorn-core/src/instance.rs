//! Object instances
//!
//! An [`Instance`] is an object of a [`Class`]: a name-keyed field store
//! plus descriptor-aware property access and method dispatch through the
//! class's parent chain.
//!
//! The raw field store doubles as the private per-instance backing that
//! converted accessors read and write.

use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use parking_lot::RwLock;
use rustc_hash::FxHashMap;

use crate::callable::Receiver;
use crate::class::Class;
use crate::member::Descriptor;
use crate::value::Value;

/// Global counter for generating unique instance IDs
static NEXT_INSTANCE_ID: AtomicU64 = AtomicU64::new(1);

/// An object instance of a class.
pub struct Instance {
    id: u64,
    class: Arc<Class>,
    fields: RwLock<FxHashMap<String, Value>>,
}

impl Instance {
    /// Create a new instance of `class` with no fields assigned
    pub fn new(class: &Arc<Class>) -> Self {
        Self {
            id: NEXT_INSTANCE_ID.fetch_add(1, Ordering::Relaxed),
            class: class.clone(),
            fields: RwLock::new(FxHashMap::default()),
        }
    }

    /// Unique instance ID
    pub fn id(&self) -> u64 {
        self.id
    }

    /// The class this instance belongs to
    pub fn class(&self) -> &Arc<Class> {
        &self.class
    }

    // ========================================================================
    // Raw field store
    // ========================================================================

    /// Read a raw field, bypassing accessors
    pub fn get_field(&self, name: &str) -> Option<Value> {
        self.fields.read().get(name).cloned()
    }

    /// Write a raw field, bypassing accessors
    pub fn set_field(&self, name: &str, value: Value) {
        self.fields.write().insert(name.to_string(), value);
    }

    // ========================================================================
    // Descriptor-aware access
    // ========================================================================

    /// Read a property through its descriptor.
    ///
    /// Accessor members invoke their getter; data members read the raw
    /// field, falling back to the declared default. Undeclared names read
    /// the raw field directly.
    pub fn get_property(&self, name: &str) -> Option<Value> {
        match self.class.lookup(name).map(|m| m.descriptor) {
            Some(Descriptor::Accessor { get, .. }) => Some(get(self)),
            Some(Descriptor::Data(default)) => self.get_field(name).or(default),
            Some(Descriptor::Method(_)) => None,
            None => self.get_field(name),
        }
    }

    /// Write a property through its descriptor.
    ///
    /// Accessor members invoke their setter (a missing setter makes the
    /// write a no-op); everything else writes the raw field.
    pub fn set_property(&self, name: &str, value: Value) {
        match self.class.lookup(name).map(|m| m.descriptor) {
            Some(Descriptor::Accessor { set: Some(set), .. }) => set(self, value),
            Some(Descriptor::Accessor { set: None, .. }) => {}
            _ => self.set_field(name, value),
        }
    }

    /// Invoke an instance method resolved through the parent chain.
    ///
    /// Returns `None` if the name does not resolve to a method.
    pub fn call_method(&self, name: &str, args: &[Value]) -> Option<Value> {
        let member = self.class.lookup(name)?;
        let callable = member.descriptor.as_method()?.clone();
        Some(callable.invoke(Receiver::Instance(self), args))
    }
}

impl fmt::Debug for Instance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Instance")
            .field("id", &self.id)
            .field("class", &self.class.name())
            .finish_non_exhaustive()
    }
}
