//! Caching layer for route results.
//!
//! The network is immutable once built, so a route between two stations never
//! changes for the life of the process. Both found routes and "no route"
//! outcomes are cached; the TTL only bounds memory held by cold pairs.

use std::sync::Arc;
use std::time::Duration;

use moka::future::Cache as MokaCache;

use crate::domain::StationId;
use crate::planner::{PlanError, Planner, Route, RouteRequest};

/// Cache key: (origin, destination). Direction matters for the station order.
type RouteKey = (StationId, StationId);

/// Cached search outcome.
type RouteEntry = Result<Arc<Route>, PlanError>;

/// Configuration for the cache.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CacheConfig {
    /// TTL for cached entries.
    pub ttl: Duration,

    /// Maximum number of cached entries.
    pub max_capacity: u64,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            ttl: Duration::from_secs(600),
            max_capacity: 10_000,
        }
    }
}

/// Cache of route search outcomes.
pub struct RouteCache {
    routes: MokaCache<RouteKey, RouteEntry>,
}

impl RouteCache {
    /// Create a new cache with the given configuration.
    pub fn new(config: &CacheConfig) -> Self {
        let routes = MokaCache::builder()
            .time_to_live(config.ttl)
            .max_capacity(config.max_capacity)
            .build();

        Self { routes }
    }

    /// Get a cached outcome.
    pub async fn get(&self, key: &RouteKey) -> Option<RouteEntry> {
        self.routes.get(key).await
    }

    /// Insert an outcome into the cache.
    pub async fn insert(&self, key: RouteKey, entry: RouteEntry) {
        self.routes.insert(key, entry).await;
    }

    /// Get cache statistics (for monitoring).
    pub fn entry_count(&self) -> u64 {
        self.routes.entry_count()
    }

    /// Invalidate all cached entries.
    pub fn invalidate_all(&self) {
        self.routes.invalidate_all();
    }
}

/// Whether a search outcome is a property of the network and may be cached.
///
/// Request-shape errors are cheap to recompute and are never stored.
fn cacheable(entry: &RouteEntry) -> bool {
    matches!(entry, Ok(_) | Err(PlanError::NoRoute { .. }))
}

/// Planner with caching.
///
/// Searches run on the blocking thread pool.
pub struct CachedPlanner {
    planner: Planner,
    cache: RouteCache,
}

impl CachedPlanner {
    /// Create a new cached planner.
    pub fn new(planner: Planner, cache_config: &CacheConfig) -> Self {
        Self {
            planner,
            cache: RouteCache::new(cache_config),
        }
    }

    /// Plan a route, using the cache if available.
    pub async fn plan(&self, request: RouteRequest) -> Result<Arc<Route>, PlanError> {
        let key = (request.from, request.to);

        if let Some(cached) = self.cache.get(&key).await {
            return cached;
        }

        let planner = self.planner.clone();
        let search = tokio::task::spawn_blocking(move || planner.plan(&request));
        let entry: RouteEntry = match search.await {
            Ok(result) => result.map(Arc::new),
            Err(join) => return Err(PlanError::Aborted(join.to_string())),
        };

        if cacheable(&entry) {
            self.cache.insert(key, entry.clone()).await;
        }

        entry
    }

    /// Access the underlying planner for operations that bypass cache.
    pub fn planner(&self) -> &Planner {
        &self.planner
    }

    /// Get cache statistics.
    pub fn cache_entry_count(&self) -> u64 {
        self.cache.entry_count()
    }

    /// Invalidate all cached entries.
    pub fn invalidate_cache(&self) {
        self.cache.invalidate_all();
    }
}
