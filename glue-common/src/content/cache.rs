//! Response cache capability
//!
//! The remote fetcher reads through a [`ResponseCache`]; mutation handlers
//! invalidate entries by tag. Entries are immutable snapshots that get
//! replaced wholesale, never edited in place.

use serde_json::Value;
use std::collections::HashMap;
use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};
use std::time::{Duration, Instant};
use tracing::{debug, warn};

/// Revalidation interval plus invalidation tags attached to a fetch
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CacheDirective {
    /// Age after which a cached response is stale. Zero disables caching.
    pub revalidate: Duration,
    pub tags: Vec<String>,
}

impl CacheDirective {
    pub fn new(revalidate_secs: u64, tags: &[&str]) -> Self {
        Self {
            revalidate: Duration::from_secs(revalidate_secs),
            tags: tags.iter().map(|t| t.to_string()).collect(),
        }
    }

    /// Cache key for `section` under this directive: name plus sorted tags
    pub fn cache_key(&self, section: &str) -> String {
        let mut tags: Vec<&str> = self.tags.iter().map(String::as_str).collect();
        tags.sort_unstable();
        tags.dedup();
        format!("{}|{}", section, tags.join(","))
    }
}

/// Shared response cache addressed by key and tag
pub trait ResponseCache: Send + Sync {
    /// Fresh cached value for `key`, if any
    fn get(&self, key: &str) -> Option<Arc<Value>>;

    /// Store `value` under `key` with the directive's lifetime and tags
    fn put(&self, key: &str, value: Value, directive: &CacheDirective);

    /// Drop every entry carrying `tag`. Returns how many were dropped.
    fn invalidate(&self, tag: &str) -> usize;
}

struct CacheEntry {
    value: Arc<Value>,
    tags: Vec<String>,
    stored_at: Instant,
    revalidate: Duration,
}

impl CacheEntry {
    fn is_fresh(&self) -> bool {
        self.stored_at.elapsed() < self.revalidate
    }
}

/// In-process [`ResponseCache`]
///
/// Entries are replaced whole, so a writer that panicked cannot leave one
/// half-written; a poisoned lock is recovered and logged.
#[derive(Default)]
pub struct MemoryCache {
    entries: RwLock<HashMap<String, CacheEntry>>,
}

impl MemoryCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored entries, stale ones included
    pub fn len(&self) -> usize {
        self.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn read(&self) -> RwLockReadGuard<'_, HashMap<String, CacheEntry>> {
        self.entries.read().unwrap_or_else(|poisoned| {
            warn!("Response cache lock poisoned, recovering");
            poisoned.into_inner()
        })
    }

    fn write(&self) -> RwLockWriteGuard<'_, HashMap<String, CacheEntry>> {
        self.entries.write().unwrap_or_else(|poisoned| {
            warn!("Response cache lock poisoned, recovering");
            poisoned.into_inner()
        })
    }
}

impl ResponseCache for MemoryCache {
    fn get(&self, key: &str) -> Option<Arc<Value>> {
        self.read()
            .get(key)
            .filter(|entry| entry.is_fresh())
            .map(|entry| Arc::clone(&entry.value))
    }

    fn put(&self, key: &str, value: Value, directive: &CacheDirective) {
        if directive.revalidate.is_zero() {
            return;
        }
        self.write().insert(
            key.to_string(),
            CacheEntry {
                value: Arc::new(value),
                tags: directive.tags.clone(),
                stored_at: Instant::now(),
                revalidate: directive.revalidate,
            },
        );
    }

    fn invalidate(&self, tag: &str) -> usize {
        let mut entries = self.write();
        let before = entries.len();
        entries.retain(|_, entry| !entry.tags.iter().any(|t| t == tag));
        let dropped = before - entries.len();
        debug!(tag = %tag, dropped, "Invalidated cache tag");
        dropped
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_cache_key_sorts_tags() {
        let a = CacheDirective::new(60, &["b", "a"]);
        let b = CacheDirective::new(30, &["a", "b", "a"]);
        assert_eq!(a.cache_key("menu"), "menu|a,b");
        assert_eq!(a.cache_key("menu"), b.cache_key("menu"));
    }

    #[test]
    fn test_put_then_get() {
        let cache = MemoryCache::new();
        let directive = CacheDirective::new(60, &["colors"]);
        cache.put("k", json!({"box1": "#000000"}), &directive);

        let hit = cache.get("k").expect("fresh entry");
        assert_eq!(hit["box1"], "#000000");
        assert!(cache.get("missing").is_none());
    }

    #[test]
    fn test_zero_revalidate_never_caches() {
        let cache = MemoryCache::new();
        cache.put("k", json!(1), &CacheDirective::new(0, &["t"]));
        assert!(cache.is_empty());
    }

    #[test]
    fn test_stale_entry_not_served() {
        let cache = MemoryCache::new();
        let directive = CacheDirective {
            revalidate: Duration::from_millis(1),
            tags: vec![],
        };
        cache.put("k", json!(1), &directive);
        std::thread::sleep(Duration::from_millis(5));
        assert!(cache.get("k").is_none());
    }

    #[test]
    fn test_invalidate_by_tag() {
        let cache = MemoryCache::new();
        cache.put("a", json!(1), &CacheDirective::new(60, &["site", "colors"]));
        cache.put("b", json!(2), &CacheDirective::new(60, &["site"]));
        cache.put("c", json!(3), &CacheDirective::new(60, &["menu"]));

        assert_eq!(cache.invalidate("colors"), 1);
        assert!(cache.get("a").is_none());
        assert_eq!(cache.invalidate("site"), 1);
        assert!(cache.get("c").is_some());
        assert_eq!(cache.invalidate("nothing"), 0);
    }

    #[test]
    fn test_poisoned_lock_keeps_working() {
        let cache = Arc::new(MemoryCache::new());
        let directive = CacheDirective::new(60, &["menu"]);
        cache.put("before", json!(1), &directive);

        let poisoner = Arc::clone(&cache);
        let joined = std::thread::spawn(move || {
            let _guard = poisoner.entries.write().unwrap();
            panic!("writer panicked while holding the lock");
        })
        .join();
        assert!(joined.is_err());
        assert!(cache.entries.is_poisoned());

        assert!(cache.get("before").is_some());
        cache.put("after", json!(2), &directive);
        assert_eq!(cache.len(), 2);
        assert_eq!(cache.invalidate("menu"), 2);
    }
}
