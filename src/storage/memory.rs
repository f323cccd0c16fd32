//! In-memory store with a device quota.

use std::collections::BTreeMap;

use tracing::warn;

use super::{check_quota, usage_of, KeyValueStore, StoreError, DEFAULT_STORE_QUOTA};

// == Memory Store ==
/// Volatile store, used when no backing file is configured and in tests.
#[derive(Debug, Clone)]
pub struct MemoryStore {
    entries: BTreeMap<String, String>,
    usage: usize,
    quota: usize,
}

impl MemoryStore {
    /// Creates an empty store with the default quota.
    pub fn new() -> Self {
        Self::with_quota(DEFAULT_STORE_QUOTA)
    }

    /// Creates an empty store that holds at most `quota` bytes.
    pub fn with_quota(quota: usize) -> Self {
        Self {
            entries: BTreeMap::new(),
            usage: 0,
            quota,
        }
    }

    /// Creates a store pre-populated with `entries`, ignoring the quota for
    /// the initial contents.
    pub fn from_entries<I, K, V>(entries: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        let entries: BTreeMap<String, String> = entries
            .into_iter()
            .map(|(k, v)| (k.into(), v.into()))
            .collect();
        let usage = usage_of(&entries);
        Self {
            entries,
            usage,
            quota: DEFAULT_STORE_QUOTA.max(usage),
        }
    }

    /// Bytes currently used by keys and values.
    pub fn usage(&self) -> usize {
        self.usage
    }

    pub fn quota(&self) -> usize {
        self.quota
    }

    /// Number of keys held.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        Ok(self.entries.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError> {
        let usage = check_quota(&self.entries, self.usage, self.quota, key, value)
            .inspect_err(|e| warn!("Rejected write to '{}': {}", key, e))?;
        self.entries.insert(key.to_string(), value.to_string());
        self.usage = usage;
        Ok(())
    }
}
