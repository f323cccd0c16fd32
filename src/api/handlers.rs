//! API Handlers
//!
//! HTTP request handlers for each title cache endpoint.

use std::sync::Arc;
use tokio::sync::RwLock;

use axum::{
    extract::{Path, State},
    Json,
};
use tracing::info;

use crate::cache::TitleCache;
use crate::config::Config;
use crate::error::{CacheError, Result};
use crate::models::{
    HealthResponse, InsertRequest, InsertResponse, LookupResponse, PartitionsResponse,
    StatsResponse,
};
use crate::storage::{JsonFileStore, MemoryStore, SharedStore};

/// Application state shared across all handlers.
///
/// The lock serializes all cache operations; the cache itself has no
/// internal synchronization.
#[derive(Clone)]
pub struct AppState {
    /// Thread-safe title cache
    pub cache: Arc<RwLock<TitleCache<SharedStore>>>,
}

impl AppState {
    /// Creates a new AppState with the given title cache.
    pub fn new(cache: TitleCache<SharedStore>) -> Self {
        Self {
            cache: Arc::new(RwLock::new(cache)),
        }
    }

    /// Creates a new AppState from configuration.
    ///
    /// Opens the JSON file store when `store_path` is set, otherwise an
    /// in-memory store, then discovers existing partitions.
    pub fn from_config(config: &Config) -> Result<Self> {
        let store: SharedStore = match &config.store_path {
            Some(path) => {
                info!("Using JSON file store at {:?}", path);
                Box::new(JsonFileStore::open(path, config.store_quota)?)
            }
            None => {
                info!("Using in-memory store");
                Box::new(MemoryStore::with_quota(config.store_quota))
            }
        };
        let cache = TitleCache::new(store, config.base_name.clone(), config.capacity_bound)?;
        Ok(Self::new(cache))
    }
}

/// Handler for PUT /titles
///
/// Caches a numbered title in the first partition with room for it.
pub async fn insert_handler(
    State(state): State<AppState>,
    Json(req): Json<InsertRequest>,
) -> Result<Json<InsertResponse>> {
    // Validate request
    if let Some(error_msg) = req.validate() {
        return Err(CacheError::InvalidFormat(error_msg));
    }

    let mut cache = state.cache.write().await;
    let partition = cache.insert(&req.title)?;

    Ok(Json(InsertResponse::new(req.title, partition)))
}

/// Handler for GET /titles/:name
///
/// Looks up a title by its bare question name.
pub async fn lookup_handler(
    State(state): State<AppState>,
    Path(name): Path<String>,
) -> Result<Json<LookupResponse>> {
    // Write lock: lookups update hit/miss counters
    let mut cache = state.cache.write().await;
    let record = cache.lookup(&name)?;

    Ok(Json(LookupResponse::new(name, &record)))
}

/// Handler for GET /partitions
///
/// Returns occupancy of every partition.
pub async fn partitions_handler(
    State(state): State<AppState>,
) -> Result<Json<PartitionsResponse>> {
    let cache = state.cache.read().await;

    Ok(Json(PartitionsResponse {
        base_name: cache.base_name().to_string(),
        capacity_bound: cache.capacity_bound(),
        partition_count: cache.partition_count(),
        partitions: cache.partitions()?,
    }))
}

/// Handler for GET /stats
pub async fn stats_handler(State(state): State<AppState>) -> Json<StatsResponse> {
    let cache = state.cache.read().await;
    Json(StatsResponse::from(cache.stats()))
}

/// Handler for GET /health
pub async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse::healthy())
}
