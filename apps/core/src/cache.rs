//! Small in-process cache for per-tenant data, mainly the approved
//! vocabulary. LRU-bounded with per-entry TTL; a stale hit counts as a miss
//! and is evicted on read.

use lru::LruCache;
use std::num::NonZeroUsize;
use std::sync::Mutex;
use std::time::{Duration, Instant};

/// Maximum number of cached entries across all tenants.
const CACHE_CAPACITY: usize = 256;

struct CachedValue {
    value: String,
    expires_at: Instant,
}

/// Keyed by (tenant, key) so one tenant's refresh never touches another's
/// entries and a whole tenant can be dropped at once.
pub struct TenantCache {
    entries: Mutex<LruCache<(String, String), CachedValue>>,
}

impl Default for TenantCache {
    fn default() -> Self {
        Self::new()
    }
}

impl TenantCache {
    pub fn new() -> Self {
        let capacity = NonZeroUsize::new(CACHE_CAPACITY).unwrap_or(NonZeroUsize::MIN);
        Self {
            entries: Mutex::new(LruCache::new(capacity)),
        }
    }

    /// Returns the cached value if present and not expired.
    pub fn get(&self, tenant: &str, key: &str) -> Option<String> {
        let mut entries = match self.entries.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        };
        let cache_key = (tenant.to_string(), key.to_string());
        match entries.get(&cache_key) {
            Some(cached) if cached.expires_at > Instant::now() => Some(cached.value.clone()),
            Some(_) => {
                entries.pop(&cache_key);
                None
            }
            None => None,
        }
    }

    pub fn set(&self, tenant: &str, key: &str, value: String, ttl: Duration) {
        let mut entries = match self.entries.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        };
        entries.put(
            (tenant.to_string(), key.to_string()),
            CachedValue {
                value,
                expires_at: Instant::now() + ttl,
            },
        );
    }

    /// Drops all entries of one tenant, or everything when `tenant` is None.
    pub fn clear(&self, tenant: Option<&str>) {
        let mut entries = match self.entries.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        };
        match tenant {
            Some(tenant) => {
                let stale: Vec<(String, String)> = entries
                    .iter()
                    .filter(|((t, _), _)| t == tenant)
                    .map(|(k, _)| k.clone())
                    .collect();
                for key in stale {
                    entries.pop(&key);
                }
            }
            None => entries.clear(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_set_then_get() {
        let cache = TenantCache::new();
        cache.set("t1", "vocab", "{}".to_string(), Duration::from_secs(60));

        assert_eq!(cache.get("t1", "vocab").as_deref(), Some("{}"));
        assert!(cache.get("t2", "vocab").is_none());
    }

    #[test]
    fn test_expired_entry_is_a_miss() {
        let cache = TenantCache::new();
        cache.set("t1", "vocab", "{}".to_string(), Duration::from_millis(0));

        std::thread::sleep(Duration::from_millis(5));
        assert!(cache.get("t1", "vocab").is_none());
    }

    #[test]
    fn test_clear_single_tenant() {
        let cache = TenantCache::new();
        cache.set("t1", "vocab", "a".to_string(), Duration::from_secs(60));
        cache.set("t2", "vocab", "b".to_string(), Duration::from_secs(60));

        cache.clear(Some("t1"));
        assert!(cache.get("t1", "vocab").is_none());
        assert_eq!(cache.get("t2", "vocab").as_deref(), Some("b"));
    }

    #[test]
    fn test_clear_all() {
        let cache = TenantCache::new();
        cache.set("t1", "vocab", "a".to_string(), Duration::from_secs(60));
        cache.set("t2", "vocab", "b".to_string(), Duration::from_secs(60));

        cache.clear(None);
        assert!(cache.get("t1", "vocab").is_none());
        assert!(cache.get("t2", "vocab").is_none());
    }
}
