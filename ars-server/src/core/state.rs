use std::sync::Arc;

use dashmap::DashMap;
use sqlx::SqlitePool;

use crate::cache::QueryCache;
use crate::core::Config;
use crate::db::DbService;
use crate::utils::AppResult;

/// Per-resource version counters
///
/// Lock-free via DashMap; each resource type keeps its own counter which only
/// ever increases. Handlers expose it as the `x-resource-version` header so
/// clients can tell whether their copy of a list is stale.
#[derive(Debug)]
pub struct ResourceVersions {
    versions: DashMap<String, u64>,
}

impl ResourceVersions {
    pub fn new() -> Self {
        Self {
            versions: DashMap::new(),
        }
    }

    /// Bump the version of a resource and return the new value
    ///
    /// Unknown resources start at 0, so the first bump returns 1
    pub fn increment(&self, resource: &str) -> u64 {
        let mut entry = self.versions.entry(resource.to_string()).or_insert(0);
        *entry += 1;
        *entry
    }

    /// Current version of a resource (0 if never bumped)
    pub fn get(&self, resource: &str) -> u64 {
        self.versions.get(resource).map(|v| *v).unwrap_or(0)
    }
}

impl Default for ResourceVersions {
    fn default() -> Self {
        Self::new()
    }
}

/// Server state shared by every handler
///
/// Cheap to clone: the pool and the cache are reference counted.
///
/// | field | type | description |
/// |-------|------|-------------|
/// | config | Config | configuration (immutable) |
/// | pool | SqlitePool | database pool |
/// | cache | Arc<QueryCache> | list query cache with optimistic patches |
/// | resource_versions | Arc<ResourceVersions> | per-resource versions |
#[derive(Clone, Debug)]
pub struct ServerState {
    pub config: Config,
    pub pool: SqlitePool,
    pub cache: Arc<QueryCache>,
    pub resource_versions: Arc<ResourceVersions>,
}

impl ServerState {
    /// Build state from already opened parts
    pub fn new(config: Config, pool: SqlitePool) -> Self {
        let resource_versions = Arc::new(ResourceVersions::new());
        let cache = Arc::new(QueryCache::new(resource_versions.clone()));
        Self {
            config,
            pool,
            cache,
            resource_versions,
        }
    }

    /// Open the database (running migrations) and build the state
    pub async fn initialize(config: &Config) -> AppResult<Self> {
        if let Some(parent) = std::path::Path::new(&config.database_path).parent()
            && !parent.as_os_str().is_empty()
        {
            std::fs::create_dir_all(parent).map_err(|e| {
                crate::utils::AppError::internal(format!(
                    "Failed to create database directory {}: {e}",
                    parent.display()
                ))
            })?;
        }

        let db = DbService::new(&config.database_path).await?;
        Ok(Self::new(config.clone(), db.pool))
    }

    pub fn restock_threshold(&self) -> i64 {
        self.config.restock_threshold
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_versions_start_at_zero_and_increase() {
        let versions = ResourceVersions::new();
        assert_eq!(versions.get("students"), 0);
        assert_eq!(versions.increment("students"), 1);
        assert_eq!(versions.increment("students"), 2);
        assert_eq!(versions.get("courses"), 0);
    }
}
