//! Metadata storage primitive
//!
//! Key/value storage attached to classes: arbitrary opaque payloads
//! addressed by `(surface, optional member name, key)`. This is the
//! low-level capability the annotation layer builds on; it knows nothing
//! about arrays, parameter maps, or decoration kinds.
//!
//! Payloads are `Arc<dyn Any>` so callers can store their own structured
//! types without serialization. Defining a value overwrites whatever was
//! stored at the same address; merging is a caller concern.

use std::any::Any;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use parking_lot::RwLock;
use rustc_hash::FxHashMap;

use crate::member::Surface;

/// Global counter for minting metadata keys
static NEXT_KEY_ID: AtomicU64 = AtomicU64::new(1);

/// An opaque, process-unique metadata namespacing token.
///
/// Minted once per decorator factory and never reused, so unrelated
/// decorators cannot collide even when applied to the same member.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct MetadataKey(u64);

impl MetadataKey {
    /// Mint a fresh, process-unique key
    pub fn mint() -> Self {
        Self(NEXT_KEY_ID.fetch_add(1, Ordering::Relaxed))
    }
}

/// An opaque metadata payload.
pub type MetaValue = Arc<dyn Any + Send + Sync>;

/// Storage address for one payload on one class.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
struct MetaAddress {
    surface: Surface,
    member: Option<String>,
    key: MetadataKey,
}

/// Per-class metadata table.
///
/// Own-storage only: inherited resolution is the class model's concern,
/// which walks parent links over these tables.
#[derive(Default)]
pub(crate) struct MetadataTable {
    entries: RwLock<FxHashMap<MetaAddress, MetaValue>>,
}

impl MetadataTable {
    pub(crate) fn define(
        &self,
        key: MetadataKey,
        value: MetaValue,
        surface: Surface,
        member: Option<&str>,
    ) {
        let address = MetaAddress {
            surface,
            member: member.map(str::to_string),
            key,
        };
        self.entries.write().insert(address, value);
    }

    pub(crate) fn get_own(
        &self,
        key: MetadataKey,
        surface: Surface,
        member: Option<&str>,
    ) -> Option<MetaValue> {
        let address = MetaAddress {
            surface,
            member: member.map(str::to_string),
            key,
        };
        self.entries.read().get(&address).cloned()
    }

    pub(crate) fn has_own(&self, key: MetadataKey, surface: Surface, member: Option<&str>) -> bool {
        self.get_own(key, surface, member).is_some()
    }

    pub(crate) fn delete(&self, key: MetadataKey, surface: Surface, member: Option<&str>) -> bool {
        let address = MetaAddress {
            surface,
            member: member.map(str::to_string),
            key,
        };
        self.entries.write().remove(&address).is_some()
    }

    pub(crate) fn own_keys(&self, surface: Surface, member: Option<&str>) -> Vec<MetadataKey> {
        let mut keys: Vec<MetadataKey> = self
            .entries
            .read()
            .keys()
            .filter(|address| {
                address.surface == surface && address.member.as_deref() == member
            })
            .map(|address| address.key)
            .collect();
        keys.sort();
        keys
    }
}
