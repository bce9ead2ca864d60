//! Request-scoped store binding.
//!
//! [`RequestContext`] is the explicit unit-of-work value threaded through
//! every store call. It can bind a store instance for the duration of one
//! logical request, and carries the per-call [`CacheOptions`] the driver
//! reads. [`ContextStore`] defers store selection to the context, so a
//! driver configured with it caches into whatever the current request
//! bound — or nothing at all.

use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use relcache_core::{CacheError, Entry, Key, Result};

use crate::multilevel::compose;
use crate::options::CacheOptions;
use crate::store::CacheStore;

/// The unit-of-work value accompanying every cache operation.
///
/// A context is owned by the caller that initiates the unit of work and
/// is not shared across concurrent calls; cloning is cheap (the bound
/// store is shared by reference).
#[derive(Clone, Default)]
pub struct RequestContext {
    store: Option<Arc<dyn CacheStore>>,
    options: CacheOptions,
}

impl RequestContext {
    /// A context with no bound store and caching disabled.
    pub fn new() -> Self {
        Self::default()
    }

    /// A context bound to the composition of `levels`: zero levels bind a
    /// fresh unbounded in-memory store, one level is used directly, more
    /// are wrapped in a multi-level composer.
    pub fn with_levels(levels: Vec<Arc<dyn CacheStore>>) -> Self {
        Self {
            store: Some(compose(levels)),
            options: CacheOptions::default(),
        }
    }

    /// A context bound to a specific store.
    pub fn with_store(store: Arc<dyn CacheStore>) -> Self {
        Self {
            store: Some(store),
            options: CacheOptions::default(),
        }
    }

    /// Attach the cache directives for the next cache-eligible call.
    pub fn with_options(mut self, options: CacheOptions) -> Self {
        self.options = options;
        self
    }

    /// The store bound to this unit of work, if any.
    pub fn store(&self) -> Option<&Arc<dyn CacheStore>> {
        self.store.as_ref()
    }

    pub fn options(&self) -> &CacheOptions {
        &self.options
    }
}

impl fmt::Debug for RequestContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RequestContext")
            .field("bound", &self.store.is_some())
            .field("options", &self.options)
            .finish()
    }
}

/// A store that resolves, at call time, to whatever store the request
/// context binds. With nothing bound, `get` reports not-found and
/// `add`/`del` succeed as silent no-ops.
#[derive(Debug, Default, Clone, Copy)]
pub struct ContextStore;

impl ContextStore {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl CacheStore for ContextStore {
    async fn add(
        &self,
        ctx: &RequestContext,
        key: &Key,
        entry: &Entry,
        ttl: Option<Duration>,
    ) -> Result<()> {
        match ctx.store() {
            Some(store) => store.add(ctx, key, entry, ttl).await,
            None => Ok(()),
        }
    }

    async fn get(&self, ctx: &RequestContext, key: &Key) -> Result<Entry> {
        match ctx.store() {
            Some(store) => store.get(ctx, key).await,
            None => Err(CacheError::NotFound),
        }
    }

    async fn del(&self, ctx: &RequestContext, key: &Key) -> Result<()> {
        match ctx.store() {
            Some(store) => store.del(ctx, key).await,
            None => Ok(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::memory::MemoryStore;
    use relcache_core::Value;

    fn entry(id: i64) -> Entry {
        Entry::new(vec!["id".to_string()], vec![vec![Value::Int(id)]])
    }

    #[tokio::test]
    async fn test_unbound_context() {
        let store = ContextStore::new();
        let ctx = RequestContext::new();
        let key = Key::from("k");

        // Nothing to cache into: add and del succeed, get never hits.
        store.add(&ctx, &key, &entry(1), None).await.unwrap();
        assert!(store.get(&ctx, &key).await.unwrap_err().is_not_found());
        store.del(&ctx, &key).await.unwrap();
    }

    #[tokio::test]
    async fn test_bound_store_is_used() {
        let bound = Arc::new(MemoryStore::new(10));
        let ctx = RequestContext::with_store(bound.clone());
        let store = ContextStore::new();
        let key = Key::from("k");

        store.add(&ctx, &key, &entry(1), None).await.unwrap();
        assert_eq!(store.get(&ctx, &key).await.unwrap(), entry(1));
        assert_eq!(bound.get(&ctx, &key).await.unwrap(), entry(1));

        store.del(&ctx, &key).await.unwrap();
        assert!(bound.get(&ctx, &key).await.unwrap_err().is_not_found());
    }

    #[tokio::test]
    async fn test_zero_levels_bind_fresh_store() {
        let ctx = RequestContext::with_levels(vec![]);
        let store = ContextStore::new();
        let key = Key::from("k");

        store.add(&ctx, &key, &entry(1), None).await.unwrap();
        assert_eq!(store.get(&ctx, &key).await.unwrap(), entry(1));
    }

    #[tokio::test]
    async fn test_contexts_do_not_share_entries() {
        let store = ContextStore::new();
        let key = Key::from("k");

        let ctx1 = RequestContext::with_levels(vec![]);
        store.add(&ctx1, &key, &entry(1), None).await.unwrap();

        // A second unit of work gets its own request-lived cache.
        let ctx2 = RequestContext::with_levels(vec![]);
        assert!(store.get(&ctx2, &key).await.unwrap_err().is_not_found());
        assert_eq!(store.get(&ctx1, &key).await.unwrap(), entry(1));
    }

    #[tokio::test]
    async fn test_multiple_levels_compose() {
        let l0 = Arc::new(MemoryStore::new(10));
        let l1 = Arc::new(MemoryStore::new(10));
        let ctx = RequestContext::with_levels(vec![
            l0.clone() as Arc<dyn CacheStore>,
            l1.clone() as Arc<dyn CacheStore>,
        ]);
        let store = ContextStore::new();
        let key = Key::from("k");

        store.add(&ctx, &key, &entry(1), None).await.unwrap();
        assert_eq!(l0.get(&ctx, &key).await.unwrap(), entry(1));
        assert_eq!(l1.get(&ctx, &key).await.unwrap(), entry(1));
    }
}
