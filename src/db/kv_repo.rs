use anyhow::Result;
use serde::{Serialize, de::DeserializeOwned};

use crate::db::KvStore;

/// Reads a named slot, decoding its JSON. An absent slot and one whose
/// JSON no longer parses both yield `default`.
pub(crate) fn get_slot<T: DeserializeOwned>(
    store: &dyn KvStore,
    key: &str,
    default: T,
) -> Result<T> {
    match store.get(key)? {
        Some(raw) => Ok(serde_json::from_str(&raw).unwrap_or(default)),
        None => Ok(default),
    }
}

/// Serializes `value` and overwrites the whole slot.
pub(crate) fn set_slot<T: Serialize>(store: &dyn KvStore, key: &str, value: &T) -> Result<()> {
    store.set(key, &serde_json::to_string(value)?)
}
