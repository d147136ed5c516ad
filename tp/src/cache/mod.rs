//! Time-bounded in-memory cache for enrichment lookups
//!
//! Keys are destinations normalized with [`normalize_key`]. Entries expire
//! after a fixed TTL; a read drops its own expired entry and every insert
//! sweeps all expired entries.

use std::collections::HashMap;
use std::hash::Hash;
use std::sync::Mutex;
use std::time::{Duration, Instant};

use tracing::debug;

/// Trimmed, lowercased destination used as a cache key
pub fn normalize_key(destination: &str) -> String {
    destination.trim().to_lowercase()
}

struct Entry<V> {
    value: V,
    inserted_at: Instant,
}

/// A TTL map behind a mutex; the lock is never held across an await
pub struct TtlCache<K, V> {
    ttl: Duration,
    entries: Mutex<HashMap<K, Entry<V>>>,
}

impl<K, V> TtlCache<K, V>
where
    K: Eq + Hash,
    V: Clone,
{
    pub fn new(ttl: Duration) -> Self {
        Self {
            ttl,
            entries: Mutex::new(HashMap::new()),
        }
    }

    pub fn get(&self, key: &K) -> Option<V> {
        self.get_at(key, Instant::now())
    }

    /// Look up `key` as of `now`, dropping the entry if it has expired
    pub fn get_at(&self, key: &K, now: Instant) -> Option<V> {
        let mut entries = self.entries.lock().unwrap_or_else(|e| e.into_inner());
        let expired = match entries.get(key) {
            Some(entry) => now.saturating_duration_since(entry.inserted_at) >= self.ttl,
            None => return None,
        };
        if expired {
            debug!("TtlCache::get_at: entry expired");
            entries.remove(key);
            return None;
        }
        entries.get(key).map(|entry| entry.value.clone())
    }

    pub fn insert(&self, key: K, value: V) {
        self.insert_at(key, value, Instant::now());
    }

    /// Store `value` as of `now`, sweeping entries expired by then
    pub fn insert_at(&self, key: K, value: V, now: Instant) {
        let mut entries = self.entries.lock().unwrap_or_else(|e| e.into_inner());
        let before = entries.len();
        entries.retain(|_, entry| now.saturating_duration_since(entry.inserted_at) < self.ttl);
        let swept = before - entries.len();
        if swept > 0 {
            debug!(swept, "TtlCache::insert_at: swept expired entries");
        }
        entries.insert(key, Entry { value, inserted_at: now });
    }

    pub fn len(&self) -> usize {
        self.entries.lock().unwrap_or_else(|e| e.into_inner()).len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_key() {
        assert_eq!(normalize_key("  Paris "), "paris");
        assert_eq!(normalize_key("NEW YORK"), "new york");
    }

    #[test]
    fn test_hit_within_ttl() {
        let cache = TtlCache::new(Duration::from_secs(60));
        let start = Instant::now();
        cache.insert_at("paris".to_string(), 7, start);

        assert_eq!(cache.get_at(&"paris".to_string(), start + Duration::from_secs(59)), Some(7));
        assert_eq!(cache.get_at(&"rome".to_string(), start), None);
    }

    #[test]
    fn test_expired_entry_is_evicted() {
        let cache = TtlCache::new(Duration::from_secs(60));
        let start = Instant::now();
        cache.insert_at("paris".to_string(), 7, start);

        assert_eq!(cache.get_at(&"paris".to_string(), start + Duration::from_secs(60)), None);
        assert!(cache.is_empty());
    }

    #[test]
    fn test_insert_replaces_and_refreshes() {
        let cache = TtlCache::new(Duration::from_secs(10));
        let start = Instant::now();
        cache.insert_at("k", "old", start);
        cache.insert_at("k", "new", start + Duration::from_secs(8));

        assert_eq!(cache.get_at(&"k", start + Duration::from_secs(15)), Some("new"));
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn test_insert_sweeps_expired_entries() {
        let cache = TtlCache::new(Duration::from_secs(1));
        let start = Instant::now();
        for i in 0..10_000 {
            cache.insert_at(format!("city-{}", i), i, start);
        }
        assert_eq!(cache.len(), 10_000);

        let later = start + Duration::from_secs(7200);
        cache.insert_at("fresh".to_string(), 1, later);

        assert_eq!(cache.len(), 1);
        assert_eq!(cache.get_at(&"fresh".to_string(), later), Some(1));
    }

    #[test]
    fn test_insert_keeps_live_entries() {
        let cache = TtlCache::new(Duration::from_secs(60));
        let start = Instant::now();
        cache.insert_at("old", 1, start);
        cache.insert_at("recent", 2, start + Duration::from_secs(30));
        cache.insert_at("new", 3, start + Duration::from_secs(61));

        assert_eq!(cache.len(), 2);
        assert_eq!(cache.get_at(&"recent", start + Duration::from_secs(61)), Some(2));
    }
}
