use std::time::Duration;

use async_trait::async_trait;
use relcache_core::{Entry, Key, Result};

use crate::context::RequestContext;

/// Capability interface implemented by every cache level.
///
/// A `ttl` of `None` stores the entry without expiry; `Some(d)` makes it
/// unreadable once `d` has elapsed. Implementations are safe for
/// concurrent use and never block indefinitely: cancellation is the
/// caller dropping the operation future.
#[async_trait]
pub trait CacheStore: Send + Sync {
    /// Store an entry under `key`, overwriting any existing entry.
    async fn add(
        &self,
        ctx: &RequestContext,
        key: &Key,
        entry: &Entry,
        ttl: Option<Duration>,
    ) -> Result<()>;

    /// Fetch the entry stored under `key`.
    ///
    /// Reports [`CacheError::NotFound`] when no usable entry exists;
    /// every other error is a real failure.
    ///
    /// [`CacheError::NotFound`]: relcache_core::CacheError::NotFound
    async fn get(&self, ctx: &RequestContext, key: &Key) -> Result<Entry>;

    /// Remove the entry stored under `key`. Absence is not an error.
    async fn del(&self, ctx: &RequestContext, key: &Key) -> Result<()>;
}
