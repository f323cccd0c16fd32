//! Slot Allocator Module
//!
//! Discovers partitions in the underlying store, measures how full each one
//! is, and picks (or creates) the partition that will receive a new record.
//!
//! Partitions live under `<base_name>-0`, `<base_name>-1`, ... and are never
//! removed, so the count only grows.

use tracing::{debug, info, warn};

use crate::storage::{KeyValueStore, StoreError};

// == Slot Allocator ==
/// Partition bookkeeping for one base name.
#[derive(Debug, Clone)]
pub struct SlotAllocator {
    /// Key prefix shared by all partitions
    base_name: String,
    /// Maximum encoded bytes per partition value
    capacity_bound: usize,
    /// Number of partitions known to exist, indices `0..partition_count`
    partition_count: usize,
}

impl SlotAllocator {
    // == Constructor ==
    /// Creates an allocator that knows of no partitions yet; call
    /// [`initialize`](Self::initialize) to discover existing ones.
    pub fn new(base_name: impl Into<String>, capacity_bound: usize) -> Self {
        Self {
            base_name: base_name.into(),
            capacity_bound,
            partition_count: 0,
        }
    }

    // == Initialize ==
    /// Probes `<base_name>-0`, `<base_name>-1`, ... and stops at the first
    /// absent key.
    ///
    /// Partitions past a gap are not reachable from this instance.
    pub fn initialize<S: KeyValueStore + ?Sized>(
        &mut self,
        store: &S,
    ) -> Result<usize, StoreError> {
        let mut count = 0;
        while store.get(&self.partition_key(count))?.is_some() {
            count += 1;
        }
        self.partition_count = count;
        info!("Discovered {} partition(s) under '{}'", count, self.base_name);
        Ok(count)
    }

    /// Store key of partition `index`.
    pub fn partition_key(&self, index: usize) -> String {
        format!("{}-{}", self.base_name, index)
    }

    pub fn base_name(&self) -> &str {
        &self.base_name
    }

    pub fn capacity_bound(&self) -> usize {
        self.capacity_bound
    }

    pub fn partition_count(&self) -> usize {
        self.partition_count
    }

    // == Occupancy ==
    /// UTF-8 byte length of partition `index`'s value, or `None` if the key
    /// is missing from the store.
    pub fn occupied_bytes<S: KeyValueStore + ?Sized>(
        &self,
        store: &S,
        index: usize,
    ) -> Result<Option<usize>, StoreError> {
        Ok(store.get(&self.partition_key(index))?.map(|content| content.len()))
    }

    // == Find Space ==
    /// Returns the first partition (lowest index) with room for
    /// `payload_bytes` more bytes, creating an empty partition at the end if
    /// none has room.
    ///
    /// The caller must ensure `payload_bytes <= capacity_bound`.
    pub fn find_space_for<S: KeyValueStore + ?Sized>(
        &mut self,
        store: &mut S,
        payload_bytes: usize,
    ) -> Result<usize, StoreError> {
        for index in 0..self.partition_count {
            match self.occupied_bytes(store, index)? {
                Some(occupied) if occupied + payload_bytes <= self.capacity_bound => {
                    debug!(
                        "Partition {} has room: {} + {} <= {}",
                        index, occupied, payload_bytes, self.capacity_bound
                    );
                    return Ok(index);
                }
                Some(_) => {}
                None => warn!(
                    "Partition '{}' is missing from the store",
                    self.partition_key(index)
                ),
            }
        }

        self.create_partition(store)
    }

    /// Writes an empty value at index `partition_count` and counts it.
    fn create_partition<S: KeyValueStore + ?Sized>(
        &mut self,
        store: &mut S,
    ) -> Result<usize, StoreError> {
        let index = self.partition_count;
        let key = self.partition_key(index);
        store.set(&key, "")?;
        self.partition_count += 1;
        info!("Created partition '{}'", key);
        Ok(index)
    }
}
