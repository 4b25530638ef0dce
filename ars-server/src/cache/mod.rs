//! Query cache with optimistic updates
//!
//! List endpoints serve from [`QueryCache`]; writes patch the cached list
//! before touching the database and either settle or roll back:
//!
//! ```ignore
//! let guard = state.cache.optimistic(&QueryKey::list("courses"), |list| {
//!     patch::append(list, placeholder::course(&payload))
//! });
//! let course = course::create(&state.pool, payload).await?; // error: guard drops, patch undone
//! guard.commit();                                            // settled: resource invalidated
//! ```
//!
//! Every entry remembers the [`ResourceVersions`] value it was loaded at,
//! which handlers expose as the `x-resource-version` header.

pub mod patch;
pub mod placeholder;

use std::fmt;
use std::future::Future;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use axum::response::{IntoResponse, Response};
use dashmap::DashMap;
use http::HeaderValue;
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::core::ResourceVersions;
use crate::utils::{AppError, AppResult};

/// Response header carrying the resource version
pub const VERSION_HEADER: &str = "x-resource-version";

/// Cache key: a resource list, or one record of it
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct QueryKey {
    pub resource: &'static str,
    pub id: Option<i64>,
}

impl QueryKey {
    pub fn list(resource: &'static str) -> Self {
        Self { resource, id: None }
    }

    pub fn detail(resource: &'static str, id: i64) -> Self {
        Self {
            resource,
            id: Some(id),
        }
    }
}

impl fmt::Display for QueryKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.id {
            Some(id) => write!(f, "{}:{}", self.resource, id),
            None => f.write_str(self.resource),
        }
    }
}

#[derive(Debug, Clone)]
struct CacheEntry {
    value: Value,
    version: u64,
    /// Bumped on every write to this entry
    stamp: u64,
}

/// Process-local cache of query results
#[derive(Debug)]
pub struct QueryCache {
    entries: DashMap<QueryKey, CacheEntry>,
    versions: Arc<ResourceVersions>,
    stamps: AtomicU64,
}

impl QueryCache {
    pub fn new(versions: Arc<ResourceVersions>) -> Self {
        Self {
            entries: DashMap::new(),
            versions,
            stamps: AtomicU64::new(0),
        }
    }

    fn next_stamp(&self) -> u64 {
        self.stamps.fetch_add(1, Ordering::Relaxed) + 1
    }

    /// Cached value of `key`, or the result of `loader` (stored on success)
    ///
    /// Returns the value with the resource version it belongs to.
    pub async fn get_or_load<T, F, Fut>(&self, key: &QueryKey, loader: F) -> AppResult<Versioned<T>>
    where
        T: Serialize + DeserializeOwned,
        F: FnOnce() -> Fut,
        Fut: Future<Output = AppResult<T>>,
    {
        let cached = self.entries.get(key).map(|e| (e.value.clone(), e.version));
        if let Some((value, version)) = cached {
            match serde_json::from_value::<T>(value) {
                Ok(data) => {
                    tracing::trace!(key = %key, version, "Cache hit");
                    return Ok(Versioned { version, data });
                }
                Err(e) => {
                    tracing::warn!(key = %key, error = %e, "Dropping unreadable cache entry");
                    self.entries.remove(key);
                }
            }
        }

        // Version read before loading: a write racing the load leaves the entry stale-versioned
        let version = self.versions.get(key.resource);
        let data = loader().await?;
        let value = serde_json::to_value(&data)
            .map_err(|e| AppError::internal(format!("Failed to cache {key}: {e}")))?;

        if self.versions.get(key.resource) == version {
            let stamp = self.next_stamp();
            self.entries.insert(
                key.clone(),
                CacheEntry {
                    value,
                    version,
                    stamp,
                },
            );
            tracing::debug!(key = %key, version, "Cache fill");
        }
        Ok(Versioned { version, data })
    }

    /// Cached raw value of `key`, if any
    pub fn peek(&self, key: &QueryKey) -> Option<Value> {
        self.entries.get(key).map(|e| e.value.clone())
    }

    /// Apply `patch` to the cached value of `key` right away
    ///
    /// The returned guard restores the previous value when dropped, unless
    /// [`OptimisticGuard::commit`] is called. Nothing is patched when the key
    /// is not cached; the guard still settles the resource on commit.
    pub fn optimistic<F>(&self, key: &QueryKey, patch: F) -> OptimisticGuard<'_>
    where
        F: FnOnce(&mut Value),
    {
        let mut previous = None;
        if let Some(mut entry) = self.entries.get_mut(key) {
            let before = entry.value.clone();
            patch(&mut entry.value);
            entry.stamp = self.next_stamp();
            previous = Some((before, entry.stamp));
            tracing::debug!(key = %key, "Optimistic patch applied");
        }

        OptimisticGuard {
            cache: self,
            key: key.clone(),
            previous,
            committed: false,
        }
    }

    /// Drop one key
    pub fn invalidate(&self, key: &QueryKey) {
        self.entries.remove(key);
    }

    /// Drop every key of a resource and bump its version
    pub fn invalidate_resource(&self, resource: &str) -> u64 {
        self.entries.retain(|k, _| k.resource != resource);
        let version = self.versions.increment(resource);
        tracing::debug!(resource, version, "Resource invalidated");
        version
    }

    pub fn version(&self, resource: &str) -> u64 {
        self.versions.get(resource)
    }

    fn rollback(&self, key: &QueryKey, previous: Value, stamp: u64) {
        // Restore only if nobody wrote the entry after our patch; otherwise drop it
        let restored = match self.entries.get_mut(key) {
            Some(mut entry) if entry.stamp == stamp => {
                entry.value = previous;
                entry.stamp = self.next_stamp();
                true
            }
            Some(_) => false,
            None => return,
        };
        if restored {
            tracing::debug!(key = %key, "Optimistic patch rolled back");
        } else {
            self.entries.remove(key);
        }
    }
}

/// Pending optimistic patch; rolls back on drop unless committed
#[must_use = "dropping the guard rolls the patch back"]
pub struct OptimisticGuard<'a> {
    cache: &'a QueryCache,
    key: QueryKey,
    previous: Option<(Value, u64)>,
    committed: bool,
}

impl OptimisticGuard<'_> {
    /// The write succeeded: settle by invalidating the whole resource
    ///
    /// Returns the new resource version.
    pub fn commit(mut self) -> u64 {
        self.committed = true;
        self.cache.invalidate_resource(self.key.resource)
    }

    /// Whether a cached value was patched
    pub fn is_patched(&self) -> bool {
        self.previous.is_some()
    }
}

impl Drop for OptimisticGuard<'_> {
    fn drop(&mut self) {
        if self.committed {
            return;
        }
        if let Some((previous, stamp)) = self.previous.take() {
            self.cache.rollback(&self.key, previous, stamp);
        }
    }
}

/// Data tagged with its resource version; renders the version header
#[derive(Debug, Clone)]
pub struct Versioned<T> {
    pub version: u64,
    pub data: T,
}

impl<T> Versioned<T> {
    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> Versioned<U> {
        Versioned {
            version: self.version,
            data: f(self.data),
        }
    }
}

impl<T: Serialize> IntoResponse for Versioned<T> {
    fn into_response(self) -> Response {
        let mut response = axum::Json(self.data).into_response();
        response
            .headers_mut()
            .insert(VERSION_HEADER, HeaderValue::from(self.version));
        response
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn cache() -> QueryCache {
        QueryCache::new(Arc::new(ResourceVersions::new()))
    }

    async fn fill(cache: &QueryCache, key: &QueryKey, value: Vec<Value>) {
        cache
            .get_or_load(key, move || async move { Ok(value) })
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn test_get_or_load_caches() {
        let cache = cache();
        let key = QueryKey::list("courses");
        let first = cache
            .get_or_load(&key, || async { Ok(vec![1, 2, 3]) })
            .await
            .unwrap();
        assert_eq!(first.data, vec![1, 2, 3]);

        let second: Versioned<Vec<i32>> = cache
            .get_or_load(&key, || async { Err(AppError::internal("loader must not run")) })
            .await
            .unwrap();
        assert_eq!(second.data, vec![1, 2, 3]);
    }

    #[tokio::test]
    async fn test_loader_error_is_not_cached() {
        let cache = cache();
        let key = QueryKey::list("courses");
        let result: AppResult<Versioned<Vec<i32>>> = cache
            .get_or_load(&key, || async { Err(AppError::database("down")) })
            .await;
        assert!(result.is_err());
        assert!(cache.peek(&key).is_none());
    }

    #[tokio::test]
    async fn test_optimistic_rollback_on_drop() {
        let cache = cache();
        let key = QueryKey::list("courses");
        fill(&cache, &key, vec![json!({"id": 1, "name": "Tailoring"})]).await;

        {
            let guard = cache.optimistic(&key, |v| patch::remove_by_id(v, 1));
            assert!(guard.is_patched());
            assert_eq!(cache.peek(&key), Some(json!([])));
        }

        assert_eq!(cache.peek(&key), Some(json!([{"id": 1, "name": "Tailoring"}])));
        assert_eq!(cache.version("courses"), 0);
    }

    #[tokio::test]
    async fn test_optimistic_commit_invalidates() {
        let cache = cache();
        let key = QueryKey::list("courses");
        fill(&cache, &key, vec![json!({"id": 1})]).await;
        cache
            .get_or_load(&QueryKey::detail("courses", 1), || async { Ok(json!({"id": 1})) })
            .await
            .unwrap();

        let guard = cache.optimistic(&key, |v| patch::append(v, json!({"id": 2})));
        let version = guard.commit();

        assert_eq!(version, 1);
        assert!(cache.peek(&key).is_none());
        assert!(cache.peek(&QueryKey::detail("courses", 1)).is_none());

        let reloaded = cache
            .get_or_load(&key, || async { Ok(vec![1]) })
            .await
            .unwrap();
        assert_eq!(reloaded.version, 1);
    }

    #[tokio::test]
    async fn test_rollback_drops_entry_rewritten_after_patch() {
        let cache = cache();
        let key = QueryKey::list("courses");
        fill(&cache, &key, vec![json!({"id": 1})]).await;

        let guard = cache.optimistic(&key, |v| patch::remove_by_id(v, 1));
        let other = cache.optimistic(&key, |v| patch::append(v, json!({"id": 3})));
        other.commit();
        fill(&cache, &key, vec![json!({"id": 3})]).await;
        drop(guard);

        assert!(cache.peek(&key).is_none());
    }

    #[tokio::test]
    async fn test_pending_row_is_served_from_cache() {
        use shared::models::{Course, CourseCreate};

        let cache = cache();
        let key = QueryKey::list("courses");
        let existing = placeholder::course(&CourseCreate {
            name: "Beautician".into(),
            description: None,
            duration: None,
            price: Some(500.0),
        });
        let existing = Course { id: 7, ..existing };
        cache
            .get_or_load(&key, move || async move { Ok(vec![existing]) })
            .await
            .unwrap();

        let payload = CourseCreate {
            name: "Tailoring".into(),
            description: None,
            duration: Some("3 months".into()),
            price: Some(1000.0),
        };
        let guard = cache.optimistic(&key, |v| patch::append(v, placeholder::course(&payload)));

        let served: Versioned<Vec<Course>> = cache
            .get_or_load(&key, || async { Err(AppError::internal("loader must not run")) })
            .await
            .unwrap();
        assert_eq!(served.data.len(), 2);
        assert_eq!(served.data[1].id, patch::PENDING_ID);
        assert_eq!(served.data[1].name, "Tailoring");
        assert!(cache.peek(&key).is_some());

        drop(guard);
        let served: Versioned<Vec<Course>> = cache
            .get_or_load(&key, || async { Err(AppError::internal("loader must not run")) })
            .await
            .unwrap();
        assert_eq!(served.data.len(), 1);
        assert_eq!(served.data[0].id, 7);
    }

    #[tokio::test]
    async fn test_optimistic_without_cached_value() {
        let cache = cache();
        let key = QueryKey::list("payments");
        let guard = cache.optimistic(&key, |v| patch::append(v, json!({"id": 1})));
        assert!(!guard.is_patched());
        drop(guard);
        assert!(cache.peek(&key).is_none());
    }

    #[test]
    fn test_key_display() {
        assert_eq!(QueryKey::list("students").to_string(), "students");
        assert_eq!(QueryKey::detail("students", 7).to_string(), "students:7");
    }
}
