//! Storage Module
//!
//! The slot-limited key-value store the title cache is layered on. Values are
//! plain strings; the store enforces a device-wide quota, not a per-key one.

mod file;
mod memory;

use std::collections::BTreeMap;

use thiserror::Error;

pub use file::JsonFileStore;
pub use memory::MemoryStore;

// == Public Constants ==
/// Default device-wide quota in bytes (keys + values)
pub const DEFAULT_STORE_QUOTA: usize = 5 * 1024 * 1024;

// == Store Error ==
/// Failures reported by the underlying store.
#[derive(Error, Debug)]
pub enum StoreError {
    /// Total storage would exceed the device quota
    #[error("storage quota exceeded: {required} bytes required, quota is {quota} bytes")]
    QuotaExceeded { required: usize, quota: usize },

    /// Backing file could not be read or written
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Backing file holds something other than a string map
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

// == Key Value Store ==
/// Blocking get/set capability of the underlying store.
pub trait KeyValueStore {
    /// Returns the value stored under `key`, or `None` if the key is absent.
    fn get(&self, key: &str) -> Result<Option<String>, StoreError>;

    /// Stores `value` under `key`. Fails atomically: on error the previous
    /// value is left in place.
    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError>;
}

/// Store handle used by the server, chosen at startup.
pub type SharedStore = Box<dyn KeyValueStore + Send + Sync>;

impl<S: KeyValueStore + ?Sized> KeyValueStore for Box<S> {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        (**self).get(key)
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError> {
        (**self).set(key, value)
    }
}

// == Quota Accounting ==
/// Bytes used by all keys and values in `entries`.
pub(crate) fn usage_of(entries: &BTreeMap<String, String>) -> usize {
    entries.iter().map(|(k, v)| k.len() + v.len()).sum()
}

/// Usage after replacing `key` with `value`, or `QuotaExceeded` if that
/// would not fit.
pub(crate) fn check_quota(
    entries: &BTreeMap<String, String>,
    usage: usize,
    quota: usize,
    key: &str,
    value: &str,
) -> Result<usize, StoreError> {
    let previous = entries.get(key).map(|v| key.len() + v.len()).unwrap_or(0);
    let required = usage - previous + key.len() + value.len();
    if required > quota {
        return Err(StoreError::QuotaExceeded { required, quota });
    }
    Ok(required)
}
