use std::collections::HashMap;
use std::hash::Hash;
use std::sync::Arc;
use std::time::{Duration, Instant};

use tokio::sync::RwLock;

#[derive(Clone)]
struct CacheEntry<V> {
    value: V,
    expires_at: Option<Instant>,
}

impl<V> CacheEntry<V> {
    fn is_expired(&self, now: Instant) -> bool {
        self.expires_at.is_some_and(|at| at <= now)
    }
}

/// In-memory cache with optional per-entry time-to-live.
///
/// Cloning yields another handle to the same storage. Individual `get`/`set`
/// calls are atomic; concurrent misses on one key each refetch and the last
/// write wins.
pub struct TtlCache<K, V> {
    entries: Arc<RwLock<HashMap<K, CacheEntry<V>>>>,
}

impl<K, V> Clone for TtlCache<K, V> {
    fn clone(&self) -> Self {
        Self {
            entries: self.entries.clone(),
        }
    }
}

impl<K, V> TtlCache<K, V>
where
    K: Eq + Hash,
    V: Clone,
{
    pub fn new() -> Self {
        Self {
            entries: Arc::new(RwLock::new(HashMap::new())),
        }
    }

    /// Cached value, or `None` if absent or expired
    pub async fn get(&self, key: &K) -> Option<V> {
        let now = Instant::now();
        {
            let entries = self.entries.read().await;
            match entries.get(key) {
                Some(entry) if !entry.is_expired(now) => return Some(entry.value.clone()),
                Some(_) => {}
                None => return None,
            }
        }

        // Expired: evict, unless a fresh value was written in the meantime
        let mut entries = self.entries.write().await;
        if entries.get(key).is_some_and(|e| e.is_expired(now)) {
            entries.remove(key);
        }
        None
    }

    /// Store a value that never expires
    pub async fn set(&self, key: K, value: V) {
        self.insert(key, value, None).await;
    }

    pub async fn set_with_ttl(&self, key: K, value: V, ttl: Duration) {
        self.insert(key, value, Some(Instant::now() + ttl)).await;
    }

    async fn insert(&self, key: K, value: V, expires_at: Option<Instant>) {
        self.entries
            .write()
            .await
            .insert(key, CacheEntry { value, expires_at });
    }

    /// Number of stored entries, expired ones included until next read
    pub async fn len(&self) -> usize {
        self.entries.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }
}

impl<K, V> Default for TtlCache<K, V>
where
    K: Eq + Hash,
    V: Clone,
{
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_set_and_get() {
        let cache: TtlCache<String, i32> = TtlCache::new();
        assert!(cache.get(&"a".to_string()).await.is_none());

        cache.set("a".to_string(), 1).await;
        assert_eq!(cache.get(&"a".to_string()).await, Some(1));

        cache.set("a".to_string(), 2).await;
        assert_eq!(cache.get(&"a".to_string()).await, Some(2));
    }

    #[tokio::test]
    async fn test_ttl_expiry() {
        let cache: TtlCache<&'static str, Vec<i32>> = TtlCache::new();
        cache
            .set_with_ttl("snapshot", vec![1, 2, 3], Duration::from_millis(20))
            .await;
        assert_eq!(cache.get(&"snapshot").await, Some(vec![1, 2, 3]));

        tokio::time::sleep(Duration::from_millis(40)).await;
        assert!(cache.get(&"snapshot").await.is_none());
        assert!(cache.is_empty().await);
    }

    #[tokio::test]
    async fn test_zero_ttl_is_immediately_stale() {
        let cache: TtlCache<i64, i64> = TtlCache::new();
        cache.set_with_ttl(1, 1, Duration::ZERO).await;
        assert!(cache.get(&1).await.is_none());
    }

    #[tokio::test]
    async fn test_clones_share_storage() {
        let cache: TtlCache<i64, &'static str> = TtlCache::new();
        let handle = cache.clone();
        handle.set(7, "seven").await;
        assert_eq!(cache.get(&7).await, Some("seven"));
        assert_eq!(cache.len().await, 1);
    }
}
