//! Cache abstractions for fetched tile images.
//!
//! Tile sessions overlap heavily when the origin moves a short distance, so
//! keeping recently fetched tile bytes in memory avoids refetching the same
//! imagery. The cache is keyed by tile URL, which distinguishes elevation
//! from imagery tilesets for free.
//!
//! # Implementations
//!
//! - [`MemoryCache`]: In-memory cache with an optional byte budget
//! - [`NoCache`]: Passthrough implementation that caches nothing

use crate::error::Result;
use std::{
    collections::{HashMap, VecDeque},
    future::Future,
    pin::Pin,
    sync::{Arc, RwLock},
};

/// Future type for cache get operations.
pub type GetFuture<'a> = Pin<Box<dyn Future<Output = Result<Option<Vec<u8>>>> + Send + 'a>>;

/// Future type for cache put/clear operations.
pub type CacheFuture<'a> = Pin<Box<dyn Future<Output = Result<()>> + Send + 'a>>;

/// A cache for fetched tile bytes, keyed by tile URL.
///
/// Implementations may store data in memory, on disk, or anywhere else;
/// the client only requires that `get` returns what `put` stored.
pub trait Cache: Send + Sync {
    /// Get tile bytes from the cache.
    ///
    /// Returns `Ok(Some(data))` on a hit, `Ok(None)` on a miss, or an error
    /// if the cache operation itself failed.
    fn get(&self, url: &str) -> GetFuture<'_>;

    /// Store tile bytes in the cache.
    fn put(&self, url: &str, data: Vec<u8>) -> CacheFuture<'_>;

    /// Drop all cached data.
    fn clear(&self) -> CacheFuture<'_>;
}

/// A cache that stores nothing (passthrough).
#[derive(Debug, Clone, Default)]
pub struct NoCache;

impl NoCache {
    /// Create a new no-op cache.
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl Cache for NoCache {
    fn get(&self, _url: &str) -> GetFuture<'_> {
        Box::pin(async { Ok(None) })
    }

    fn put(&self, _url: &str, _data: Vec<u8>) -> CacheFuture<'_> {
        Box::pin(async { Ok(()) })
    }

    fn clear(&self) -> CacheFuture<'_> {
        Box::pin(async { Ok(()) })
    }
}

/// An in-memory tile cache with an optional byte budget.
///
/// When the budget is exceeded, the oldest tiles are evicted first. Clones
/// share the same underlying storage.
#[derive(Debug)]
pub struct MemoryCache {
    inner: Arc<RwLock<Inner>>,
    max_bytes: Option<usize>,
}

#[derive(Debug, Default)]
struct Inner {
    tiles: HashMap<String, Vec<u8>>,
    /// Insertion order, oldest first.
    order: VecDeque<String>,
    total_bytes: usize,
}

impl MemoryCache {
    /// Create a cache with no byte budget.
    #[must_use]
    pub fn new() -> Self {
        Self {
            inner: Arc::new(RwLock::new(Inner::default())),
            max_bytes: None,
        }
    }

    /// Create a cache that evicts oldest tiles beyond `max_bytes`.
    #[must_use]
    pub fn with_max_bytes(max_bytes: usize) -> Self {
        Self {
            inner: Arc::new(RwLock::new(Inner::default())),
            max_bytes: Some(max_bytes),
        }
    }

    /// Total size of cached tile data in bytes.
    #[must_use]
    pub fn size(&self) -> usize {
        self.inner.read().unwrap().total_bytes
    }

    /// Number of cached tiles.
    #[must_use]
    pub fn len(&self) -> usize {
        self.inner.read().unwrap().tiles.len()
    }

    /// Check if the cache is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Default for MemoryCache {
    fn default() -> Self {
        Self::new()
    }
}

impl Clone for MemoryCache {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
            max_bytes: self.max_bytes,
        }
    }
}

impl Cache for MemoryCache {
    fn get(&self, url: &str) -> GetFuture<'_> {
        let result = self.inner.read().unwrap().tiles.get(url).cloned();
        Box::pin(async move { Ok(result) })
    }

    fn put(&self, url: &str, data: Vec<u8>) -> CacheFuture<'_> {
        let url = url.to_string();
        let mut inner = self.inner.write().unwrap();

        if let Some(old) = inner.tiles.remove(&url) {
            inner.total_bytes -= old.len();
            inner.order.retain(|k| k != &url);
        }

        if let Some(max_bytes) = self.max_bytes {
            while inner.total_bytes + data.len() > max_bytes {
                let Some(oldest) = inner.order.pop_front() else {
                    break;
                };
                if let Some(evicted) = inner.tiles.remove(&oldest) {
                    inner.total_bytes -= evicted.len();
                }
            }
        }

        inner.total_bytes += data.len();
        inner.order.push_back(url.clone());
        inner.tiles.insert(url, data);

        Box::pin(async { Ok(()) })
    }

    fn clear(&self) -> CacheFuture<'_> {
        let mut inner = self.inner.write().unwrap();
        inner.tiles.clear();
        inner.order.clear();
        inner.total_bytes = 0;
        Box::pin(async { Ok(()) })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const URL_A: &str = "https://tiles.test/15/100/200.pngraw";
    const URL_B: &str = "https://tiles.test/15/101/200.pngraw";
    const URL_C: &str = "https://tiles.test/15/102/200.pngraw";

    #[tokio::test]
    async fn test_no_cache_is_passthrough() {
        let cache = NoCache::new();
        cache.put(URL_A, vec![1, 2, 3]).await.unwrap();
        assert!(cache.get(URL_A).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_memory_cache_round_trip() {
        let cache = MemoryCache::new();
        assert!(cache.is_empty());

        cache.put(URL_A, vec![1, 2, 3]).await.unwrap();
        assert_eq!(cache.len(), 1);
        assert_eq!(cache.size(), 3);
        assert_eq!(cache.get(URL_A).await.unwrap(), Some(vec![1, 2, 3]));
        assert!(cache.get(URL_B).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_memory_cache_eviction_order() {
        let cache = MemoryCache::with_max_bytes(10);

        cache.put(URL_A, vec![0; 5]).await.unwrap();
        cache.put(URL_B, vec![0; 5]).await.unwrap();
        assert_eq!(cache.size(), 10);

        // Exceeding the budget drops the oldest tile first.
        cache.put(URL_C, vec![0; 3]).await.unwrap();
        assert!(cache.get(URL_A).await.unwrap().is_none());
        assert!(cache.get(URL_B).await.unwrap().is_some());
        assert!(cache.get(URL_C).await.unwrap().is_some());
        assert_eq!(cache.size(), 8);
    }

    #[tokio::test]
    async fn test_memory_cache_update_replaces() {
        let cache = MemoryCache::new();

        cache.put(URL_A, vec![0; 3]).await.unwrap();
        cache.put(URL_A, vec![0; 7]).await.unwrap();
        assert_eq!(cache.len(), 1);
        assert_eq!(cache.size(), 7);
    }

    #[tokio::test]
    async fn test_memory_cache_clear() {
        let cache = MemoryCache::new();
        cache.put(URL_A, vec![1]).await.unwrap();
        cache.put(URL_B, vec![2]).await.unwrap();

        cache.clear().await.unwrap();
        assert!(cache.is_empty());
        assert_eq!(cache.size(), 0);
    }

    #[tokio::test]
    async fn test_clones_share_storage() {
        let cache = MemoryCache::new();
        let clone = cache.clone();

        cache.put(URL_A, vec![9]).await.unwrap();
        assert_eq!(clone.get(URL_A).await.unwrap(), Some(vec![9]));
    }
}
