//! Bounded in-memory LRU cache level.

use std::num::NonZeroUsize;
use std::time::{Duration, Instant};

use async_trait::async_trait;
use lru::LruCache;
use parking_lot::Mutex;
use relcache_core::{CacheError, Entry, Key, Result, codec};

use crate::context::RequestContext;
use crate::store::CacheStore;

/// A cached entry, optionally wrapped with an absolute expiry instant.
#[derive(Debug)]
enum Stored {
    Plain(Entry),
    Expiring(Entry, Instant),
}

/// In-process, capacity-bounded cache level.
///
/// Eviction is least-recently-used; both reads and writes refresh
/// recency. Expiry is lazy: an expired entry is removed by the first
/// `get` that observes it, not by a background sweep — unread expired
/// entries simply occupy LRU slots until evicted naturally.
pub struct MemoryStore {
    // `None` is the discard variant: writes are accepted and dropped.
    inner: Option<Mutex<LruCache<Key, Stored>>>,
}

impl MemoryStore {
    /// Create a store holding at most `max_entries` entries.
    /// Zero means no limit.
    pub fn new(max_entries: usize) -> Self {
        let cache = match NonZeroUsize::new(max_entries) {
            Some(cap) => LruCache::new(cap),
            None => LruCache::unbounded(),
        };
        Self {
            inner: Some(Mutex::new(cache)),
        }
    }

    /// Create a store that silently discards every write and never
    /// reports a hit. Useful as a disabled slot in a level list.
    pub fn discard() -> Self {
        Self { inner: None }
    }

    /// Current number of stored entries, expired ones included.
    pub fn len(&self) -> usize {
        match &self.inner {
            Some(inner) => inner.lock().len(),
            None => 0,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[async_trait]
impl CacheStore for MemoryStore {
    async fn add(
        &self,
        _ctx: &RequestContext,
        key: &Key,
        entry: &Entry,
        ttl: Option<Duration>,
    ) -> Result<()> {
        let Some(inner) = &self.inner else {
            return Ok(());
        };
        // Deep-copy through the codec so later caller-side mutation of the
        // original entry cannot reach the cached copy. This also surfaces
        // malformed entries at add time, and keeps encoding out of the
        // critical section.
        let copy = codec::decode(&codec::encode(entry)?)?;
        let stored = match ttl {
            None => Stored::Plain(copy),
            Some(d) => Stored::Expiring(copy, Instant::now() + d),
        };
        inner.lock().put(key.clone(), stored);
        Ok(())
    }

    async fn get(&self, _ctx: &RequestContext, key: &Key) -> Result<Entry> {
        let Some(inner) = &self.inner else {
            return Err(CacheError::NotFound);
        };
        let mut cache = inner.lock();
        match cache.get(key) {
            None => return Err(CacheError::NotFound),
            Some(Stored::Plain(entry)) => return Ok(entry.clone()),
            Some(Stored::Expiring(entry, deadline)) => {
                if Instant::now() < *deadline {
                    return Ok(entry.clone());
                }
            }
        }
        // Expired: remove on observation and report a miss.
        cache.pop(key);
        Err(CacheError::NotFound)
    }

    async fn del(&self, _ctx: &RequestContext, key: &Key) -> Result<()> {
        if let Some(inner) = &self.inner {
            inner.lock().pop(key);
        }
        Ok(())
    }
}

impl std::fmt::Debug for MemoryStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MemoryStore")
            .field("discard", &self.inner.is_none())
            .field("len", &self.len())
            .finish()
    }
}
