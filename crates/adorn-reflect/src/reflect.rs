//! Reflection queries
//!
//! The [`Reflector`] walks a class's hierarchy and collects decorated
//! members into normalized, typed results.
//!
//! The walk rules, which reflection correctness hangs on:
//!
//! - `class` reads the queried class's own constructor-surface array and
//!   never consults ancestors; class-level metadata does not inherit.
//! - `methods`/`properties` walk the prototype surfaces from the class to
//!   the root. At each level a member whose descriptor matches the walk's
//!   category (callable for methods, non-callable for properties) claims
//!   its name for all farther levels, whether or not it carries metadata:
//!   the nearest matching declaration wins entirely, with no merging
//!   across levels. A mismatched-category declaration claims nothing, so
//!   the two walks may source the same name from different levels.
//! - Static members are scanned on the queried class only, after the
//!   instance walk, with no deduplication against instance-side names.
//! - An item is emitted only when its metadata array is non-empty.

use std::sync::Arc;

use adorn_core::{hierarchy, Callable, Class, Descriptor, MetadataKey, Surface};
use rustc_hash::FxHashSet;

use crate::factory::is_reserved_member;
use crate::store;
use crate::Metadata;

/// A decorated class result.
#[derive(Debug, Clone)]
pub struct DecoratedClass<T> {
    /// Fixed item name, always `"constructor"`
    pub name: String,
    /// Accumulated metadata, in application order
    pub metadata: Vec<T>,
    /// The decorated class
    pub class: Arc<Class>,
}

/// A decorated method result.
#[derive(Debug, Clone)]
pub struct DecoratedMethod<T> {
    /// Member name
    pub name: String,
    /// Accumulated metadata, in application order
    pub metadata: Vec<T>,
    /// The implementation found at the contributing level, post-
    /// interception
    pub callable: Callable,
}

/// A decorated property result.
#[derive(Debug, Clone)]
pub struct DecoratedProperty<T> {
    /// Member name
    pub name: String,
    /// Accumulated metadata, in application order
    pub metadata: Vec<T>,
}

/// A decorated parameter result.
#[derive(Debug, Clone)]
pub struct DecoratedParameter<T> {
    /// Owning member name, `"constructor"` for constructor parameters
    pub name: String,
    /// Zero-based parameter index
    pub parameter_index: usize,
    /// Accumulated metadata, in application order
    pub metadata: Vec<T>,
}

/// Any decorated item, tagged by decoration kind.
#[derive(Debug, Clone)]
pub enum DecoratedItem<T> {
    /// A class-level item
    Class(DecoratedClass<T>),
    /// A method item
    Method(DecoratedMethod<T>),
    /// A property item
    Property(DecoratedProperty<T>),
    /// A parameter item
    Parameter(DecoratedParameter<T>),
}

/// Query engine over one class.
pub struct Reflector {
    class: Arc<Class>,
}

/// Create a reflector for a class
pub fn reflect(class: &Arc<Class>) -> Reflector {
    Reflector::new(class)
}

impl Reflector {
    /// Create a reflector for a class
    pub fn new(class: &Arc<Class>) -> Self {
        Self {
            class: class.clone(),
        }
    }

    /// The class being queried
    pub fn target(&self) -> &Arc<Class> {
        &self.class
    }

    /// Class-level metadata under `key`: a single-item list, or empty.
    ///
    /// Never walks ancestors.
    pub fn class<T: Metadata>(&self, key: MetadataKey) -> Vec<DecoratedClass<T>> {
        let metadata = store::get_array::<T>(key, &self.class, Surface::Constructor, None);
        if metadata.is_empty() {
            return Vec::new();
        }
        vec![DecoratedClass {
            name: "constructor".to_string(),
            metadata,
            class: self.class.clone(),
        }]
    }

    /// Methods carrying metadata under `key`, instance side through the
    /// hierarchy, then own statics
    pub fn methods<T: Metadata>(&self, key: MetadataKey) -> Vec<DecoratedMethod<T>> {
        let mut items = Vec::new();
        let mut seen: FxHashSet<String> = FxHashSet::default();

        for level in hierarchy(&self.class) {
            for member in level.own_members(Surface::Prototype) {
                if is_reserved_member(&member.name) || seen.contains(&member.name) {
                    continue;
                }
                let Descriptor::Method(callable) = member.descriptor else {
                    continue;
                };
                seen.insert(member.name.clone());
                let metadata =
                    store::get_array::<T>(key, &level, Surface::Prototype, Some(&member.name));
                if metadata.is_empty() {
                    continue;
                }
                tracing::trace!(class = level.name(), member = %member.name, "decorated method");
                items.push(DecoratedMethod {
                    name: member.name,
                    metadata,
                    callable,
                });
            }
        }

        for member in self.class.own_members(Surface::Constructor) {
            if is_reserved_member(&member.name) {
                continue;
            }
            let Descriptor::Method(callable) = member.descriptor else {
                continue;
            };
            let metadata =
                store::get_array::<T>(key, &self.class, Surface::Constructor, Some(&member.name));
            if metadata.is_empty() {
                continue;
            }
            items.push(DecoratedMethod {
                name: member.name,
                metadata,
                callable,
            });
        }

        items
    }

    /// Properties carrying metadata under `key`, instance side through
    /// the hierarchy, then own statics
    pub fn properties<T: Metadata>(&self, key: MetadataKey) -> Vec<DecoratedProperty<T>> {
        let mut items = Vec::new();
        let mut seen: FxHashSet<String> = FxHashSet::default();

        for level in hierarchy(&self.class) {
            for member in level.own_members(Surface::Prototype) {
                if is_reserved_member(&member.name) || seen.contains(&member.name) {
                    continue;
                }
                if member.descriptor.is_callable() {
                    continue;
                }
                seen.insert(member.name.clone());
                let metadata =
                    store::get_array::<T>(key, &level, Surface::Prototype, Some(&member.name));
                if metadata.is_empty() {
                    continue;
                }
                tracing::trace!(class = level.name(), member = %member.name, "decorated property");
                items.push(DecoratedProperty {
                    name: member.name,
                    metadata,
                });
            }
        }

        for member in self.class.own_members(Surface::Constructor) {
            if is_reserved_member(&member.name) || member.descriptor.is_callable() {
                continue;
            }
            let metadata =
                store::get_array::<T>(key, &self.class, Surface::Constructor, Some(&member.name));
            if metadata.is_empty() {
                continue;
            }
            items.push(DecoratedProperty {
                name: member.name,
                metadata,
            });
        }

        items
    }

    /// Parameters carrying metadata under `key`: constructor parameters
    /// from the class's own map, then instance methods through the
    /// hierarchy, then own static methods
    pub fn parameters<T: Metadata>(&self, key: MetadataKey) -> Vec<DecoratedParameter<T>> {
        let mut items = Vec::new();

        let ctor_map = store::get_param_map::<T>(key, &self.class, Surface::Constructor, None);
        for (parameter_index, metadata) in ctor_map {
            if metadata.is_empty() {
                continue;
            }
            items.push(DecoratedParameter {
                name: "constructor".to_string(),
                parameter_index,
                metadata,
            });
        }

        let mut seen: FxHashSet<String> = FxHashSet::default();
        for level in hierarchy(&self.class) {
            for member in level.own_members(Surface::Prototype) {
                if is_reserved_member(&member.name) || seen.contains(&member.name) {
                    continue;
                }
                if !member.descriptor.is_callable() {
                    continue;
                }
                seen.insert(member.name.clone());
                let map =
                    store::get_param_map::<T>(key, &level, Surface::Prototype, Some(&member.name));
                for (parameter_index, metadata) in map {
                    if metadata.is_empty() {
                        continue;
                    }
                    items.push(DecoratedParameter {
                        name: member.name.clone(),
                        parameter_index,
                        metadata,
                    });
                }
            }
        }

        for member in self.class.own_members(Surface::Constructor) {
            if is_reserved_member(&member.name) || !member.descriptor.is_callable() {
                continue;
            }
            let map = store::get_param_map::<T>(
                key,
                &self.class,
                Surface::Constructor,
                Some(&member.name),
            );
            for (parameter_index, metadata) in map {
                if metadata.is_empty() {
                    continue;
                }
                items.push(DecoratedParameter {
                    name: member.name.clone(),
                    parameter_index,
                    metadata,
                });
            }
        }

        items
    }

    /// Every decorated item under `key`: class, then methods, then
    /// properties, then parameters
    pub fn all<T: Metadata>(&self, key: MetadataKey) -> Vec<DecoratedItem<T>> {
        let mut items: Vec<DecoratedItem<T>> = Vec::new();
        items.extend(self.class(key).into_iter().map(DecoratedItem::Class));
        items.extend(self.methods(key).into_iter().map(DecoratedItem::Method));
        items.extend(self.properties(key).into_iter().map(DecoratedItem::Property));
        items.extend(self.parameters(key).into_iter().map(DecoratedItem::Parameter));
        items
    }
}
