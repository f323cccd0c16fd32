//! Configuration Module
//!
//! Handles loading and managing server configuration from environment variables.

use std::env;
use std::path::PathBuf;

use crate::cache::{CAPACITY_BOUND, DEFAULT_BASE_NAME};
use crate::storage::DEFAULT_STORE_QUOTA;

/// Server configuration parameters.
///
/// All values can be configured via environment variables with sensible defaults.
#[derive(Debug, Clone)]
pub struct Config {
    /// Key prefix of partitions in the underlying store
    pub base_name: String,
    /// Maximum encoded bytes per partition
    pub capacity_bound: usize,
    /// JSON file backing the store; in-memory when unset
    pub store_path: Option<PathBuf>,
    /// Device-wide quota of the underlying store in bytes
    pub store_quota: usize,
    /// HTTP server port
    pub server_port: u16,
}

impl Config {
    /// Creates a new Config by loading values from environment variables.
    ///
    /// # Environment Variables
    /// - `BASE_NAME` - Partition key prefix (default: lh-storage)
    /// - `CAPACITY_BOUND` - Bytes per partition (default: 1900)
    /// - `STORE_PATH` - Backing JSON file (default: none, in-memory)
    /// - `STORE_QUOTA` - Store quota in bytes (default: 5242880)
    /// - `SERVER_PORT` - HTTP server port (default: 3000)
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            base_name: env::var("BASE_NAME")
                .ok()
                .filter(|v| !v.is_empty())
                .unwrap_or(defaults.base_name),
            capacity_bound: env::var("CAPACITY_BOUND")
                .ok()
                .and_then(|v| v.parse::<usize>().ok())
                .filter(|&v| v > 0)
                .unwrap_or(defaults.capacity_bound),
            store_path: env::var("STORE_PATH")
                .ok()
                .filter(|v| !v.is_empty())
                .map(PathBuf::from),
            store_quota: env::var("STORE_QUOTA")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.store_quota),
            server_port: env::var("SERVER_PORT")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.server_port),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            base_name: DEFAULT_BASE_NAME.to_string(),
            capacity_bound: CAPACITY_BOUND,
            store_path: None,
            store_quota: DEFAULT_STORE_QUOTA,
            server_port: 3000,
        }
    }
}
