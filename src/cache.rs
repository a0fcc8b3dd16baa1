//! TTL cache for provider responses
//!
//! Explicit key -> (value, insertion time) map replacing the decorator-style
//! memoization of earlier bot versions. An expired entry is treated as
//! absent on lookup; insertion overwrites any previous entry for the key.

use serde_json::Value;
use std::collections::HashMap;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::RwLock;

/// A cached provider response with its insertion time
#[derive(Debug, Clone)]
struct CacheEntry {
    value: Value,
    inserted_at: Instant,
}

impl CacheEntry {
    fn is_expired(&self, ttl: Duration) -> bool {
        self.inserted_at.elapsed() > ttl
    }
}

/// Concurrent read-through cache keyed by request URL
pub struct ResponseCache {
    entries: Arc<RwLock<HashMap<String, CacheEntry>>>,
    ttl: Duration,
}

impl ResponseCache {
    /// Creates a new cache whose entries expire after `ttl`
    pub fn new(ttl: Duration) -> Self {
        Self {
            entries: Arc::new(RwLock::new(HashMap::new())),
            ttl,
        }
    }

    /// Returns the cached response for a key, or None if absent or expired
    pub async fn get(&self, key: &str) -> Option<Value> {
        let entries = self.entries.read().await;
        let entry = entries.get(key)?;
        if entry.is_expired(self.ttl) {
            return None;
        }
        Some(entry.value.clone())
    }

    /// Stores a response under a key, stamping it with the current time
    pub async fn insert(&self, key: impl Into<String>, value: Value) {
        let mut entries = self.entries.write().await;
        entries.insert(
            key.into(),
            CacheEntry {
                value,
                inserted_at: Instant::now(),
            },
        );
    }

    /// Drops expired entries; lookups never return them either way
    pub async fn evict_expired(&self) {
        let mut entries = self.entries.write().await;
        entries.retain(|_, entry| !entry.is_expired(self.ttl));
    }

    /// Number of live (non-expired) entries
    pub async fn len(&self) -> usize {
        let entries = self.entries.read().await;
        entries
            .values()
            .filter(|entry| !entry.is_expired(self.ttl))
            .count()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[tokio::test]
    async fn fresh_entries_are_served() {
        let cache = ResponseCache::new(Duration::from_secs(60));
        cache.insert("global", json!({"ok": true})).await;

        let value = cache.get("global").await.unwrap();
        assert_eq!(value, json!({"ok": true}));
        assert_eq!(cache.len().await, 1);
    }

    #[tokio::test]
    async fn missing_keys_are_absent() {
        let cache = ResponseCache::new(Duration::from_secs(60));
        assert!(cache.get("nope").await.is_none());
        assert!(cache.is_empty().await);
    }

    #[tokio::test]
    async fn expired_entries_are_treated_as_absent() {
        let cache = ResponseCache::new(Duration::from_millis(0));
        cache.insert("global", json!(1)).await;

        tokio::time::sleep(Duration::from_millis(5)).await;
        assert!(cache.get("global").await.is_none());

        cache.evict_expired().await;
        assert!(cache.is_empty().await);
    }

    #[tokio::test]
    async fn insert_overwrites_previous_entry() {
        let cache = ResponseCache::new(Duration::from_secs(60));
        cache.insert("key", json!(1)).await;
        cache.insert("key", json!(2)).await;
        assert_eq!(cache.get("key").await.unwrap(), json!(2));
        assert_eq!(cache.len().await, 1);
    }
}
