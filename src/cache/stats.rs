//! Cache Statistics Module
//!
//! Tracks lookup and insert outcomes.

use serde::Serialize;

// == Cache Stats ==
#[derive(Debug, Clone, Default, Serialize)]
pub struct CacheStats {
    /// Lookups that found a record
    pub hits: u64,
    /// Lookups that scanned every partition without a match
    pub misses: u64,
    /// Records written
    pub inserts: u64,
    /// Inserts rejected because the name was already stored
    pub duplicates: u64,
    /// Inserts rejected by the record grammar or the size bound
    pub invalid: u64,
    /// Inserts that failed in the underlying store
    pub storage_failures: u64,
    /// Current number of partitions
    pub partition_count: usize,
}

impl CacheStats {
    pub fn new() -> Self {
        Self::default()
    }

    // == Hit Rate ==
    /// Returns hits / (hits + misses), or 0.0 if no lookups have been made.
    pub fn hit_rate(&self) -> f64 {
        let total = self.hits + self.misses;
        if total == 0 {
            0.0
        } else {
            self.hits as f64 / total as f64
        }
    }

    pub fn record_hit(&mut self) {
        self.hits += 1;
    }

    pub fn record_miss(&mut self) {
        self.misses += 1;
    }

    pub fn record_insert(&mut self) {
        self.inserts += 1;
    }

    pub fn record_duplicate(&mut self) {
        self.duplicates += 1;
    }

    pub fn record_invalid(&mut self) {
        self.invalid += 1;
    }

    pub fn record_storage_failure(&mut self) {
        self.storage_failures += 1;
    }

    pub fn set_partition_count(&mut self, count: usize) {
        self.partition_count = count;
    }
}
