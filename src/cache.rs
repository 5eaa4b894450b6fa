//! Time-bounded storage for described field sets.

use crate::config::ObjectType;
use crate::response::FieldSet;
use parking_lot::Mutex;
use std::collections::HashMap;
use std::time::{Duration, Instant};

/// How long a described field set is served from cache.
pub const FIELDS_CACHE_TTL: Duration = Duration::from_secs(60 * 60);

/// Cache key for the fields of one object type of one integration.
pub fn fields_cache_key(integration_id: u64, object_type: ObjectType) -> String {
    format!("{}_{}_fields", integration_id, object_type)
}

/// Keyed store for field sets with per-entry expiry.
///
/// Implementations may be shared by many clients; concurrent writers to the same key
/// simply overwrite each other.
pub trait FieldCache: Send + Sync {
    /// Return the entry for `key` if it was stored less than its TTL ago.
    fn get(&self, key: &str) -> Option<FieldSet>;

    fn put(&self, key: &str, fields: FieldSet, ttl: Duration);
}

struct CacheEntry {
    fields: FieldSet,
    expires_at: Option<Instant>,
}

impl CacheEntry {
    fn is_expired(&self, now: Instant) -> bool {
        match self.expires_at {
            Some(expires_at) => now >= expires_at,
            None => false,
        }
    }
}

/// In-process `FieldCache`.
#[derive(Default)]
pub struct MemoryFieldCache {
    entries: Mutex<HashMap<String, CacheEntry>>,
}

impl MemoryFieldCache {
    pub fn new() -> MemoryFieldCache {
        MemoryFieldCache::default()
    }

    /// Number of stored entries, expired ones included until they are purged.
    pub fn len(&self) -> usize {
        self.entries.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.lock().is_empty()
    }

    /// Drop every expired entry.
    pub fn purge_expired(&self) {
        let now = Instant::now();

        self.entries.lock().retain(|_, entry| !entry.is_expired(now));
    }
}

impl FieldCache for MemoryFieldCache {
    fn get(&self, key: &str) -> Option<FieldSet> {
        let mut entries = self.entries.lock();

        let expired = entries.get(key)?.is_expired(Instant::now());
        if expired {
            entries.remove(key);
            return None;
        }

        entries.get(key).map(|entry| entry.fields.clone())
    }

    fn put(&self, key: &str, fields: FieldSet, ttl: Duration) {
        // An unrepresentable deadline never expires.
        let expires_at = Instant::now().checked_add(ttl);

        self.entries
            .lock()
            .insert(key.to_string(), CacheEntry { fields, expires_at });
    }
}

#[cfg(test)]
mod tests {
    use super::{fields_cache_key, FieldCache, MemoryFieldCache, FIELDS_CACHE_TTL};
    use crate::config::ObjectType;
    use crate::response::FieldSet;
    use std::time::Duration;

    fn get_fields() -> FieldSet {
        let mut fields = FieldSet::default();
        fields.default.insert(String::from("Email"), String::from("Email Address"));
        fields
    }

    #[test]
    fn keys_separate_integrations_and_object_types() {
        assert_eq!(fields_cache_key(42, ObjectType::Contact), "42_Contact_fields");
        assert_ne!(
            fields_cache_key(42, ObjectType::Contact),
            fields_cache_key(42, ObjectType::Lead)
        );
        assert_ne!(
            fields_cache_key(4, ObjectType::Lead),
            fields_cache_key(42, ObjectType::Lead)
        );
    }

    #[test]
    fn returns_fresh_entry() {
        let cache = MemoryFieldCache::new();
        cache.put("42_Contact_fields", get_fields(), FIELDS_CACHE_TTL);

        assert_eq!(cache.get("42_Contact_fields"), Some(get_fields()));
        assert_eq!(cache.get("43_Contact_fields"), None);
    }

    #[test]
    fn expired_entry_is_a_miss_and_removed() {
        let cache = MemoryFieldCache::new();
        cache.put("42_Contact_fields", get_fields(), Duration::from_secs(0));

        assert_eq!(cache.get("42_Contact_fields"), None);
        assert!(cache.is_empty());
    }

    #[test]
    fn later_put_overwrites() {
        let cache = MemoryFieldCache::new();
        cache.put("key", FieldSet::default(), FIELDS_CACHE_TTL);
        cache.put("key", get_fields(), FIELDS_CACHE_TTL);

        assert_eq!(cache.get("key"), Some(get_fields()));
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn purge_drops_only_expired_entries() {
        let cache = MemoryFieldCache::new();
        cache.put("stale", get_fields(), Duration::from_secs(0));
        cache.put("fresh", get_fields(), FIELDS_CACHE_TTL);

        cache.purge_expired();

        assert_eq!(cache.len(), 1);
        assert!(cache.get("fresh").is_some());
    }

    #[test]
    fn huge_ttl_never_expires() {
        let cache = MemoryFieldCache::new();
        cache.put("key", get_fields(), Duration::MAX);

        assert!(cache.get("key").is_some());
    }
}
