//! Metadata store adapter
//!
//! Typed coercion helpers over the core metadata primitive. No business
//! logic lives here: arrays and parameter maps are read as own metadata,
//! defaulted when absent, and written back whole. `append_array` and the
//! parameter-map update are read-modify-write sequences; decoration is
//! synchronous and single-threaded, so they need no atomicity.

use std::collections::BTreeMap;
use std::sync::Arc;

use adorn_core::{Class, MetadataKey, Surface};

use crate::Metadata;

/// Read the metadata array at an address, defaulting to empty.
///
/// Never mutates storage.
pub(crate) fn get_array<T: Metadata>(
    key: MetadataKey,
    class: &Class,
    surface: Surface,
    member: Option<&str>,
) -> Vec<T> {
    class
        .get_own_metadata(key, surface, member)
        .and_then(|payload| payload.downcast_ref::<Vec<T>>().cloned())
        .unwrap_or_default()
}

/// Append one value to the metadata array at an address.
pub(crate) fn append_array<T: Metadata>(
    key: MetadataKey,
    class: &Class,
    surface: Surface,
    member: Option<&str>,
    value: T,
) {
    let mut array = get_array::<T>(key, class, surface, member);
    array.push(value);
    tracing::debug!(
        class = class.name(),
        ?surface,
        member,
        len = array.len(),
        "append metadata"
    );
    class.define_metadata(key, Arc::new(array), surface, member);
}

/// Read the parameter-index map at an address, defaulting to empty.
pub(crate) fn get_param_map<T: Metadata>(
    key: MetadataKey,
    class: &Class,
    surface: Surface,
    member: Option<&str>,
) -> BTreeMap<usize, Vec<T>> {
    class
        .get_own_metadata(key, surface, member)
        .and_then(|payload| payload.downcast_ref::<BTreeMap<usize, Vec<T>>>().cloned())
        .unwrap_or_default()
}

/// Write a parameter-index map at an address, replacing the previous map.
pub(crate) fn set_param_map<T: Metadata>(
    key: MetadataKey,
    class: &Class,
    surface: Surface,
    member: Option<&str>,
    map: BTreeMap<usize, Vec<T>>,
) {
    tracing::debug!(
        class = class.name(),
        ?surface,
        member,
        indices = map.len(),
        "write parameter map"
    );
    class.define_metadata(key, Arc::new(map), surface, member);
}
