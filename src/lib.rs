//! Title Cache - A partitioned question-title cache
//!
//! Stores an unbounded collection of `<number>. <name>: <difficulty>` titles
//! across fixed-capacity slots of a key-value store, with duplicate-checked
//! insertion and lookup by name.

pub mod api;
pub mod cache;
pub mod config;
pub mod error;
pub mod models;
pub mod storage;

pub use api::AppState;
pub use cache::TitleCache;
pub use config::Config;
pub use error::CacheError;
