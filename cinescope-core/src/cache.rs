//! Fixed-TTL memoization for query results
//!
//! Expiry is the only invalidation mechanism: there is no size bound, no
//! per-entry eviction, and no manual bypass. Stale entries are dropped
//! lazily on the access that discovers them.
//!
//! The clock is injected so expiry is testable without sleeping.

use std::collections::HashMap;
use std::hash::Hash;
use std::sync::Arc;
use std::time::{Duration, Instant};

/// Time source for the cache.
pub trait Clock: Send + Sync {
    fn now(&self) -> Instant;
}

/// Production clock backed by `Instant::now`.
#[derive(Debug, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> Instant {
        Instant::now()
    }
}

struct Entry<V> {
    value: V,
    inserted_at: Instant,
}

/// A (key → value, timestamp) map with a single fixed TTL.
pub struct TtlCache<K, V> {
    ttl: Duration,
    clock: Arc<dyn Clock>,
    entries: HashMap<K, Entry<V>>,
}

impl<K: Eq + Hash, V> TtlCache<K, V> {
    /// Create a cache with the given TTL and the system clock.
    pub fn new(ttl: Duration) -> Self {
        Self::with_clock(ttl, Arc::new(SystemClock))
    }

    /// Create a cache with an explicit clock (tests).
    pub fn with_clock(ttl: Duration, clock: Arc<dyn Clock>) -> Self {
        Self {
            ttl,
            clock,
            entries: HashMap::new(),
        }
    }

    /// Look up a fresh entry. A stale entry is removed and reported as a
    /// miss.
    pub fn get(&mut self, key: &K) -> Option<&V> {
        let now = self.clock.now();
        let fresh = match self.entries.get(key) {
            Some(entry) => now.duration_since(entry.inserted_at) < self.ttl,
            None => return None,
        };

        if !fresh {
            self.entries.remove(key);
            return None;
        }

        self.entries.get(key).map(|entry| &entry.value)
    }

    /// Store a value, stamping it with the current time. Replaces any
    /// previous entry for the key.
    pub fn insert(&mut self, key: K, value: V) {
        let inserted_at = self.clock.now();
        self.entries.insert(key, Entry { value, inserted_at });
    }

    /// Number of entries, fresh or stale.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    /// Manually advanced clock for expiry tests.
    struct ManualClock {
        now: Mutex<Instant>,
    }

    impl ManualClock {
        fn new() -> Self {
            Self {
                now: Mutex::new(Instant::now()),
            }
        }

        fn advance(&self, by: Duration) {
            let mut now = self.now.lock().unwrap();
            *now += by;
        }
    }

    impl Clock for ManualClock {
        fn now(&self) -> Instant {
            *self.now.lock().unwrap()
        }
    }

    #[test]
    fn test_hit_within_ttl() {
        let clock = Arc::new(ManualClock::new());
        let mut cache = TtlCache::with_clock(Duration::from_secs(3600), clock.clone());

        cache.insert("genres", vec![1, 2, 3]);
        clock.advance(Duration::from_secs(3599));

        assert_eq!(cache.get(&"genres"), Some(&vec![1, 2, 3]));
    }

    #[test]
    fn test_miss_after_ttl() {
        let clock = Arc::new(ManualClock::new());
        let mut cache = TtlCache::with_clock(Duration::from_secs(3600), clock.clone());

        cache.insert("genres", vec![1, 2, 3]);
        clock.advance(Duration::from_secs(3600));

        assert_eq!(cache.get(&"genres"), None);
        // The stale entry was dropped, not retained
        assert!(cache.is_empty());
    }

    #[test]
    fn test_reinsert_after_expiry() {
        let clock = Arc::new(ManualClock::new());
        let mut cache = TtlCache::with_clock(Duration::from_secs(60), clock.clone());

        cache.insert("k", 1);
        clock.advance(Duration::from_secs(61));
        assert_eq!(cache.get(&"k"), None);

        cache.insert("k", 2);
        assert_eq!(cache.get(&"k"), Some(&2));
    }

    #[test]
    fn test_insert_refreshes_timestamp() {
        let clock = Arc::new(ManualClock::new());
        let mut cache = TtlCache::with_clock(Duration::from_secs(60), clock.clone());

        cache.insert("k", 1);
        clock.advance(Duration::from_secs(45));
        cache.insert("k", 2);
        clock.advance(Duration::from_secs(45));

        // 90s after the first insert but only 45s after the second
        assert_eq!(cache.get(&"k"), Some(&2));
    }

    #[test]
    fn test_distinct_keys_are_independent() {
        let mut cache = TtlCache::new(Duration::from_secs(60));
        cache.insert(("top_rated", 1000, 10), "a");
        cache.insert(("top_rated", 1000, 20), "b");

        assert_eq!(cache.get(&("top_rated", 1000, 10)), Some(&"a"));
        assert_eq!(cache.get(&("top_rated", 1000, 20)), Some(&"b"));
        assert_eq!(cache.len(), 2);
    }
}
