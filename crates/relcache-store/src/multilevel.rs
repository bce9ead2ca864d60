//! Multi-level cache composition.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use relcache_core::{CacheError, Entry, Key, Result};

use crate::context::RequestContext;
use crate::memory::MemoryStore;
use crate::store::CacheStore;

/// An ordered list of levels presented as one logical store.
///
/// Callers list cheapest levels first so common-case hits avoid network
/// calls; the order is fixed for the composer's lifetime. Levels are
/// independent caches, not a transaction: a failed write stops the
/// fan-out but does not roll back earlier levels.
pub struct MultiLevel {
    levels: Vec<Arc<dyn CacheStore>>,
}

impl MultiLevel {
    pub fn new(levels: Vec<Arc<dyn CacheStore>>) -> Self {
        Self { levels }
    }

    pub fn level_count(&self) -> usize {
        self.levels.len()
    }
}

/// Compose a level list into a single store: an empty list yields a fresh
/// unbounded [`MemoryStore`], a single level is used directly, and more
/// than one is wrapped in a [`MultiLevel`].
pub fn compose(mut levels: Vec<Arc<dyn CacheStore>>) -> Arc<dyn CacheStore> {
    match levels.len() {
        0 => Arc::new(MemoryStore::new(0)),
        1 => levels.remove(0),
        _ => Arc::new(MultiLevel::new(levels)),
    }
}

#[async_trait]
impl CacheStore for MultiLevel {
    async fn add(
        &self,
        ctx: &RequestContext,
        key: &Key,
        entry: &Entry,
        ttl: Option<Duration>,
    ) -> Result<()> {
        for level in &self.levels {
            level.add(ctx, key, entry, ttl).await?;
        }
        Ok(())
    }

    async fn get(&self, ctx: &RequestContext, key: &Key) -> Result<Entry> {
        for level in &self.levels {
            match level.get(ctx, key).await {
                // First hit wins; no backfill into earlier levels.
                Ok(entry) => return Ok(entry),
                Err(err) if err.is_not_found() => continue,
                Err(err) => return Err(err),
            }
        }
        Err(CacheError::NotFound)
    }

    async fn del(&self, ctx: &RequestContext, key: &Key) -> Result<()> {
        for level in &self.levels {
            level.del(ctx, key).await?;
        }
        Ok(())
    }
}
