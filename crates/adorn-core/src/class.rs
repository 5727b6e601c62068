//! Class model
//!
//! A [`Class`] is a named, reference-counted type descriptor: a parent
//! link, two member tables (prototype side and constructor/static side),
//! and its metadata table. Member tables keep declaration order.
//!
//! Decoration mutates a live class (replacing method implementations,
//! installing accessors, writing metadata); by convention all decoration
//! completes before the class is queried or instantiated, so reflection
//! observes a frozen shape.

use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use parking_lot::RwLock;

use crate::callable::{Callable, GetterFn, Receiver, SetterFn};
use crate::member::{Descriptor, Member, Surface};
use crate::metadata::{MetaValue, MetadataKey, MetadataTable};
use crate::value::Value;

/// Global counter for generating unique class IDs
static NEXT_CLASS_ID: AtomicU64 = AtomicU64::new(1);

/// A class: the unit decoration targets and reflection queries.
pub struct Class {
    id: u64,
    name: String,
    parent: Option<Arc<Class>>,
    instance_members: RwLock<Vec<Member>>,
    static_members: RwLock<Vec<Member>>,
    metadata: MetadataTable,
}

impl Class {
    /// Create a new root class
    pub fn new(name: impl Into<String>) -> Arc<Self> {
        Arc::new(Self {
            id: NEXT_CLASS_ID.fetch_add(1, Ordering::Relaxed),
            name: name.into(),
            parent: None,
            instance_members: RwLock::new(Vec::new()),
            static_members: RwLock::new(Vec::new()),
            metadata: MetadataTable::default(),
        })
    }

    /// Create a new class extending `parent`
    pub fn with_parent(name: impl Into<String>, parent: &Arc<Class>) -> Arc<Self> {
        Arc::new(Self {
            id: NEXT_CLASS_ID.fetch_add(1, Ordering::Relaxed),
            name: name.into(),
            parent: Some(parent.clone()),
            instance_members: RwLock::new(Vec::new()),
            static_members: RwLock::new(Vec::new()),
            metadata: MetadataTable::default(),
        })
    }

    /// Unique class ID
    pub fn id(&self) -> u64 {
        self.id
    }

    /// Class name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Immediate base class, if any
    pub fn parent(&self) -> Option<&Arc<Class>> {
        self.parent.as_ref()
    }

    fn table(&self, surface: Surface) -> &RwLock<Vec<Member>> {
        match surface {
            Surface::Constructor => &self.static_members,
            Surface::Prototype => &self.instance_members,
        }
    }

    /// Declare (or redeclare) a member on a surface
    pub fn define(&self, surface: Surface, name: impl Into<String>, descriptor: Descriptor) {
        let name = name.into();
        let mut members = self.table(surface).write();
        match members.iter_mut().find(|m| m.name == name) {
            Some(member) => member.descriptor = descriptor,
            None => members.push(Member { name, descriptor }),
        }
    }

    /// Declare an instance method
    pub fn define_method(&self, name: impl Into<String>, callable: Callable) {
        self.define(Surface::Prototype, name, Descriptor::Method(callable));
    }

    /// Declare an instance data property with an optional default
    pub fn define_property(&self, name: impl Into<String>, default: Option<Value>) {
        self.define(Surface::Prototype, name, Descriptor::Data(default));
    }

    /// Declare a static method
    pub fn define_static_method(&self, name: impl Into<String>, callable: Callable) {
        self.define(Surface::Constructor, name, Descriptor::Method(callable));
    }

    /// Declare a static data property with an optional default
    pub fn define_static_property(&self, name: impl Into<String>, default: Option<Value>) {
        self.define(Surface::Constructor, name, Descriptor::Data(default));
    }

    /// Get a member declared directly on this class
    pub fn own_member(&self, surface: Surface, name: &str) -> Option<Member> {
        self.table(surface).read().iter().find(|m| m.name == name).cloned()
    }

    /// All members declared directly on this class, in declaration order
    pub fn own_members(&self, surface: Surface) -> Vec<Member> {
        self.table(surface).read().clone()
    }

    /// Resolve an instance-side member through the parent chain, nearest
    /// declaration first
    pub fn lookup(&self, name: &str) -> Option<Member> {
        let mut current = Some(self);
        while let Some(class) = current {
            if let Some(member) = class.own_member(Surface::Prototype, name) {
                return Some(member);
            }
            current = class.parent.as_deref();
        }
        None
    }

    /// Replace a declared member's implementation with another callable.
    ///
    /// Returns `false` if the name has no declaration on this surface.
    pub fn replace_method(&self, surface: Surface, name: &str, callable: Callable) -> bool {
        let mut members = self.table(surface).write();
        match members.iter_mut().find(|m| m.name == name) {
            Some(member) => {
                member.descriptor = Descriptor::Method(callable);
                true
            }
            None => false,
        }
    }

    /// Replace a declared instance member with an accessor pair.
    ///
    /// Returns `false` if the name has no declaration.
    pub fn install_accessor(&self, name: &str, get: GetterFn, set: Option<SetterFn>) -> bool {
        let mut members = self.instance_members.write();
        match members.iter_mut().find(|m| m.name == name) {
            Some(member) => {
                member.descriptor = Descriptor::Accessor { get, set };
                true
            }
            None => false,
        }
    }

    /// Read a static data property, walking the parent chain
    pub fn get_static(&self, name: &str) -> Option<Value> {
        let mut current = Some(self);
        while let Some(class) = current {
            if let Some(member) = class.own_member(Surface::Constructor, name) {
                return match member.descriptor {
                    Descriptor::Data(value) => value,
                    _ => None,
                };
            }
            current = class.parent.as_deref();
        }
        None
    }

    /// Write a static data property declared on this class.
    ///
    /// Returns `false` if the name is not a data member here.
    pub fn set_static(&self, name: &str, value: Value) -> bool {
        let mut members = self.static_members.write();
        match members.iter_mut().find(|m| m.name == name) {
            Some(member) if matches!(member.descriptor, Descriptor::Data(_)) => {
                member.descriptor = Descriptor::Data(Some(value));
                true
            }
            _ => false,
        }
    }

    /// Invoke a static method, walking the parent chain for the
    /// implementation
    pub fn call_static(&self, name: &str, args: &[Value]) -> Option<Value> {
        let mut current = Some(self);
        while let Some(class) = current {
            if let Some(member) = class.own_member(Surface::Constructor, name) {
                return member
                    .descriptor
                    .as_method()
                    .map(|callable| callable.invoke(Receiver::Static(self), args));
            }
            current = class.parent.as_deref();
        }
        None
    }

    /// Whether this class is `other` or one of its subclasses
    pub fn is_subclass_of(&self, other: &Class) -> bool {
        let mut current = Some(self);
        while let Some(class) = current {
            if class.id == other.id {
                return true;
            }
            current = class.parent.as_deref();
        }
        false
    }

    // ========================================================================
    // Metadata primitive
    // ========================================================================

    /// Define metadata at `(surface, member, key)`, overwriting any
    /// existing payload
    pub fn define_metadata(
        &self,
        key: MetadataKey,
        value: MetaValue,
        surface: Surface,
        member: Option<&str>,
    ) {
        self.metadata.define(key, value, surface, member);
    }

    /// Get metadata defined directly on this class
    pub fn get_own_metadata(
        &self,
        key: MetadataKey,
        surface: Surface,
        member: Option<&str>,
    ) -> Option<MetaValue> {
        self.metadata.get_own(key, surface, member)
    }

    /// Get metadata, falling back to ancestor classes
    pub fn get_metadata(
        &self,
        key: MetadataKey,
        surface: Surface,
        member: Option<&str>,
    ) -> Option<MetaValue> {
        let mut current = Some(self);
        while let Some(class) = current {
            if let Some(value) = class.metadata.get_own(key, surface, member) {
                return Some(value);
            }
            current = class.parent.as_deref();
        }
        None
    }

    /// Whether metadata is defined directly on this class
    pub fn has_own_metadata(&self, key: MetadataKey, surface: Surface, member: Option<&str>) -> bool {
        self.metadata.has_own(key, surface, member)
    }

    /// Whether metadata is defined on this class or an ancestor
    pub fn has_metadata(&self, key: MetadataKey, surface: Surface, member: Option<&str>) -> bool {
        self.get_metadata(key, surface, member).is_some()
    }

    /// Delete metadata defined directly on this class.
    ///
    /// Returns `true` if a payload existed and was removed.
    pub fn delete_metadata(&self, key: MetadataKey, surface: Surface, member: Option<&str>) -> bool {
        self.metadata.delete(key, surface, member)
    }

    /// All keys with metadata directly on `(surface, member)`
    pub fn own_metadata_keys(&self, surface: Surface, member: Option<&str>) -> Vec<MetadataKey> {
        self.metadata.own_keys(surface, member)
    }
}

/// The inheritance chain of `class`.
///
/// The first element is the class itself, the last is the root ancestor.
pub fn hierarchy(class: &Arc<Class>) -> Vec<Arc<Class>> {
    let mut chain = Vec::new();
    let mut current = Some(class.clone());
    while let Some(class) = current {
        current = class.parent.clone();
        chain.push(class);
    }
    chain
}

impl fmt::Debug for Class {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Class")
            .field("id", &self.id)
            .field("name", &self.name)
            .field("parent", &self.parent.as_ref().map(|p| p.name()))
            .finish_non_exhaustive()
    }
}
