//! Cache Module
//!
//! Question-title cache split across fixed-capacity partitions of an
//! underlying key-value store.

mod allocator;
pub mod record;
mod stats;
mod titles;


// Re-export public types
pub use allocator::SlotAllocator;
pub use record::{Difficulty, Record};
pub use stats::CacheStats;
pub use titles::{PartitionInfo, TitleCache};

// == Public Constants ==
/// Maximum encoded bytes per partition (slots hold ~2KB, 1.9KB to be safe)
pub const CAPACITY_BOUND: usize = 1900;

/// Key prefix of partitions, `lh-storage-0`, `lh-storage-1`, ...
pub const DEFAULT_BASE_NAME: &str = "lh-storage";
