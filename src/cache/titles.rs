//! Title Cache Module
//!
//! Façade combining the record codec and the slot allocator over one
//! underlying store: duplicate-checked insert and first-match lookup.

use serde::Serialize;
use tracing::{debug, info, warn};

use crate::cache::allocator::SlotAllocator;
use crate::cache::record::{self, Record};
use crate::cache::{CacheStats, CAPACITY_BOUND, DEFAULT_BASE_NAME};
use crate::error::{CacheError, Result};
use crate::storage::{KeyValueStore, StoreError};

// == Partition Info ==
/// Snapshot of one partition's occupancy.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PartitionInfo {
    pub index: usize,
    pub key: String,
    pub occupied_bytes: usize,
    pub records: usize,
}

// == Title Cache ==
/// Partitioned title collection over a store `S`.
///
/// Operations take `&mut self` and run to completion; callers sharing one
/// cache must serialize access themselves.
#[derive(Debug)]
pub struct TitleCache<S> {
    /// Underlying key-value store
    store: S,
    /// Partition discovery and allocation
    allocator: SlotAllocator,
    /// Lookup and insert counters
    stats: CacheStats,
}

impl<S: KeyValueStore> TitleCache<S> {
    // == Constructor ==
    /// Opens a cache over `store`, discovering the partitions already
    /// written under `base_name`.
    pub fn new(store: S, base_name: impl Into<String>, capacity_bound: usize) -> Result<Self> {
        let mut allocator = SlotAllocator::new(base_name, capacity_bound);
        allocator.initialize(&store)?;

        Ok(Self {
            store,
            allocator,
            stats: CacheStats::new(),
        })
    }

    /// Opens a cache with the default base name and capacity bound.
    pub fn with_defaults(store: S) -> Result<Self> {
        Self::new(store, DEFAULT_BASE_NAME, CAPACITY_BOUND)
    }

    // == Insert ==
    /// Appends `title` to the first partition with room for it.
    ///
    /// Returns the index of the partition the record was written to.
    /// Nothing is written when the title is malformed, too large, or its
    /// name is already cached.
    pub fn insert(&mut self, title: &str) -> Result<usize> {
        let parsed = Record::parse(title).inspect_err(|_| self.stats.record_invalid())?;

        if let Some(existing) = self.find(&parsed.name)? {
            self.stats.record_duplicate();
            debug!("Title '{}' already cached as '{}'", title, existing);
            return Err(CacheError::AlreadyExists(existing.numbered_title().to_string()));
        }

        let payload = record::encode(title)?;
        let capacity = self.allocator.capacity_bound();
        if payload.len() > capacity {
            self.stats.record_invalid();
            return Err(CacheError::RecordTooLarge {
                size: payload.len(),
                capacity,
            });
        }

        let index = self
            .allocator
            .find_space_for(&mut self.store, payload.len())
            .map_err(|e| self.write_failure(e))?;
        self.append(index, &payload)
            .map_err(|e| self.write_failure(e))?;

        self.stats.record_insert();
        info!("Saved title '{}' to partition {}", title, index);
        Ok(index)
    }

    fn append(&mut self, index: usize, payload: &str) -> std::result::Result<(), StoreError> {
        let key = self.allocator.partition_key(index);
        let mut content = self.store.get(&key)?.unwrap_or_default();
        content.push_str(payload);
        self.store.set(&key, &content)
    }

    fn write_failure(&mut self, err: StoreError) -> CacheError {
        self.stats.record_storage_failure();
        warn!("Write to underlying store failed: {}", err);
        err.into()
    }

    // == Lookup ==
    /// Returns the first record named `name` (case-insensitive), scanning
    /// partitions in index order.
    pub fn lookup(&mut self, name: &str) -> Result<Record> {
        match self.find(name)? {
            Some(found) => {
                self.stats.record_hit();
                Ok(found)
            }
            None => {
                self.stats.record_miss();
                Err(CacheError::NotFound(name.to_string()))
            }
        }
    }

    fn find(&self, name: &str) -> Result<Option<Record>> {
        for index in 0..self.allocator.partition_count() {
            if let Some(content) = self.partition_content(index)? {
                if let Some(found) = record::search(&content, name) {
                    return Ok(Some(found));
                }
            }
        }
        Ok(None)
    }

    // == Introspection ==
    /// Raw value of partition `index`, or `None` if it is not in the store.
    pub fn partition_content(&self, index: usize) -> Result<Option<String>> {
        Ok(self.store.get(&self.allocator.partition_key(index))?)
    }

    /// Occupancy of every known partition, in index order.
    pub fn partitions(&self) -> Result<Vec<PartitionInfo>> {
        (0..self.allocator.partition_count())
            .map(|index| {
                let content = self.partition_content(index)?.unwrap_or_default();
                Ok(PartitionInfo {
                    index,
                    key: self.allocator.partition_key(index),
                    occupied_bytes: content.len(),
                    records: record::records(&content).count(),
                })
            })
            .collect()
    }

    pub fn partition_count(&self) -> usize {
        self.allocator.partition_count()
    }

    pub fn base_name(&self) -> &str {
        self.allocator.base_name()
    }

    pub fn capacity_bound(&self) -> usize {
        self.allocator.capacity_bound()
    }

    /// Returns current counters.
    pub fn stats(&self) -> CacheStats {
        let mut stats = self.stats.clone();
        stats.set_partition_count(self.allocator.partition_count());
        stats
    }

    pub fn store(&self) -> &S {
        &self.store
    }
}
