//! Per-call cache directives.

use std::time::Duration;

use relcache_core::Key;

/// Directives for the next cache-eligible call, carried on the request
/// context and read once by the driver. Caching is strictly opt-in:
/// the default carrier leaves it disabled, [`CacheOptions::new`] enables
/// it.
///
/// Composition rules: `cache_only` + `evict` invalidates the key without
/// ever executing the underlying query; `evict` alone executes and caches
/// as usual, then invalidates, so the key ends up absent regardless of
/// the fresh write.
#[derive(Debug, Clone, Default)]
pub struct CacheOptions {
    enabled: bool,
    evict: bool,
    cache_only: bool,
    key: Option<Key>,
    ttl: Option<Duration>,
}

impl CacheOptions {
    /// Options with caching enabled and no further directives.
    pub fn new() -> Self {
        Self {
            enabled: true,
            ..Self::default()
        }
    }

    /// Invalidate the entry for the call's key, after any fresh write.
    pub fn evict(mut self) -> Self {
        self.evict = true;
        self
    }

    /// Serve strictly from cache; never execute the underlying query.
    pub fn cache_only(mut self) -> Self {
        self.cache_only = true;
        self
    }

    /// Use `key` instead of one derived from the statement and its
    /// arguments. Required when a single logical call issues more than
    /// one underlying query.
    pub fn with_key(mut self, key: impl Into<Key>) -> Self {
        self.key = Some(key.into());
        self
    }

    /// Override the driver's default TTL for this call's write.
    pub fn with_ttl(mut self, ttl: Duration) -> Self {
        self.ttl = Some(ttl);
        self
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    pub fn is_evict(&self) -> bool {
        self.evict
    }

    pub fn is_cache_only(&self) -> bool {
        self.cache_only
    }

    pub fn key(&self) -> Option<&Key> {
        self.key.as_ref()
    }

    pub fn ttl(&self) -> Option<Duration> {
        self.ttl
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_disabled() {
        let options = CacheOptions::default();
        assert!(!options.is_enabled());
        assert!(!options.is_evict());
        assert!(!options.is_cache_only());
        assert!(options.key().is_none());
        assert!(options.ttl().is_none());
    }

    #[test]
    fn test_new_enables_caching() {
        assert!(CacheOptions::new().is_enabled());
    }

    #[test]
    fn test_builder_composition() {
        let options = CacheOptions::new()
            .evict()
            .cache_only()
            .with_key("users:all")
            .with_ttl(Duration::from_secs(60));

        assert!(options.is_enabled());
        assert!(options.is_evict());
        assert!(options.is_cache_only());
        assert_eq!(options.key(), Some(&Key::from("users:all")));
        assert_eq!(options.ttl(), Some(Duration::from_secs(60)));
    }
}
