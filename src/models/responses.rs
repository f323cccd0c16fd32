//! Response DTOs for the title cache API
//!
//! Defines the structure of outgoing HTTP response bodies.

use serde::Serialize;

use crate::cache::{CacheStats, PartitionInfo, Record};

/// Response body for the LOOKUP operation (GET /titles/:name)
#[derive(Debug, Clone, Serialize)]
pub struct LookupResponse {
    /// The requested name
    pub name: String,
    /// Stored title without difficulty, e.g. "1. Two Sum"
    pub numbered_title: String,
    /// Difficulty as stored, e.g. "Easy"
    pub difficulty: String,
}

impl LookupResponse {
    /// Creates a new LookupResponse from a found record
    pub fn new(name: impl Into<String>, record: &Record) -> Self {
        Self {
            name: name.into(),
            numbered_title: record.numbered_title().to_string(),
            difficulty: record.difficulty_label().to_string(),
        }
    }
}

/// Response body for the INSERT operation (PUT /titles)
#[derive(Debug, Clone, Serialize)]
pub struct InsertResponse {
    /// Success message
    pub message: String,
    /// The title that was cached
    pub title: String,
    /// Index of the partition holding the title
    pub partition: usize,
}

impl InsertResponse {
    /// Creates a new InsertResponse
    pub fn new(title: impl Into<String>, partition: usize) -> Self {
        let title = title.into();
        Self {
            message: format!("Title '{}' cached successfully", title),
            title,
            partition,
        }
    }
}

/// Response body for the partitions endpoint (GET /partitions)
#[derive(Debug, Clone, Serialize)]
pub struct PartitionsResponse {
    pub base_name: String,
    pub capacity_bound: usize,
    pub partition_count: usize,
    pub partitions: Vec<PartitionInfo>,
}

/// Response body for the stats endpoint (GET /stats)
#[derive(Debug, Clone, Serialize)]
pub struct StatsResponse {
    /// Lookups that found a title
    pub hits: u64,
    /// Lookups that found nothing
    pub misses: u64,
    /// Titles written
    pub inserts: u64,
    /// Inserts rejected as duplicates
    pub duplicates: u64,
    /// Inserts rejected as malformed or too large
    pub invalid: u64,
    /// Inserts failed by the underlying store
    pub storage_failures: u64,
    /// Current number of partitions
    pub partition_count: usize,
    /// Hit rate (hits / (hits + misses))
    pub hit_rate: f64,
}

impl From<CacheStats> for StatsResponse {
    fn from(stats: CacheStats) -> Self {
        Self {
            hit_rate: stats.hit_rate(),
            hits: stats.hits,
            misses: stats.misses,
            inserts: stats.inserts,
            duplicates: stats.duplicates,
            invalid: stats.invalid,
            storage_failures: stats.storage_failures,
            partition_count: stats.partition_count,
        }
    }
}

/// Response body for the health endpoint (GET /health)
#[derive(Debug, Clone, Serialize)]
pub struct HealthResponse {
    /// Health status (e.g., "healthy")
    pub status: String,
    /// Current timestamp in ISO 8601 format
    pub timestamp: String,
}

impl HealthResponse {
    /// Creates a new HealthResponse with current timestamp
    pub fn healthy() -> Self {
        Self {
            status: "healthy".to_string(),
            timestamp: chrono::Utc::now().to_rfc3339(),
        }
    }
}

/// Error response body for all error conditions
#[derive(Debug, Clone, Serialize)]
pub struct ErrorResponse {
    /// Error message describing what went wrong
    pub error: String,
}

impl ErrorResponse {
    /// Creates a new ErrorResponse
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
        }
    }
}
