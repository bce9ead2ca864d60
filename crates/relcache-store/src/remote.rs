//! Redis-backed remote cache level.
//!
//! A shared, cross-process level: entries are keyed by the stringified
//! cache key and stored in their encoded byte form, with expiry enforced
//! natively by the server. Consistency is whatever the server offers
//! (per-key atomicity); remote levels are eventually consistent across
//! processes.

use std::time::Duration;

use async_trait::async_trait;
use deadpool_redis::Pool;
use redis::AsyncCommands;
use relcache_core::{CacheError, Entry, Key, Result, codec};

use crate::context::RequestContext;
use crate::store::CacheStore;

/// Remote cache level backed by a Redis connection pool.
pub struct RedisStore {
    pool: Pool,
}

impl RedisStore {
    /// Create a remote level from a connected pool.
    pub fn new(pool: Pool) -> Self {
        Self { pool }
    }
}

fn backend(err: impl std::fmt::Display) -> CacheError {
    CacheError::Backend(err.to_string())
}

#[async_trait]
impl CacheStore for RedisStore {
    async fn add(
        &self,
        _ctx: &RequestContext,
        key: &Key,
        entry: &Entry,
        ttl: Option<Duration>,
    ) -> Result<()> {
        let key = key.to_string();
        if key.is_empty() {
            // The do-not-cache sentinel: succeed without a network call.
            return Ok(());
        }
        let buf = codec::encode(entry)?;
        let mut conn = self.pool.get().await.map_err(backend)?;
        match ttl {
            Some(d) if !d.is_zero() => {
                let ms = d.as_millis().max(1) as u64;
                conn.pset_ex::<_, _, ()>(&key, buf, ms).await.map_err(backend)?;
            }
            _ => {
                conn.set::<_, _, ()>(&key, buf).await.map_err(backend)?;
            }
        }
        tracing::debug!(key = %key, "remote cache set");
        Ok(())
    }

    async fn get(&self, _ctx: &RequestContext, key: &Key) -> Result<Entry> {
        let key = key.to_string();
        if key.is_empty() {
            return Err(CacheError::NotFound);
        }
        let mut conn = self.pool.get().await.map_err(backend)?;
        let buf: Option<Vec<u8>> = conn.get(&key).await.map_err(backend)?;
        match buf {
            // A missing or empty reply covers both "never written" and
            // "expired at the server"; both are plain misses. A payload
            // that fails to decode is corruption and propagates.
            Some(buf) if !buf.is_empty() => {
                tracing::debug!(key = %key, "remote cache hit");
                codec::decode(&buf)
            }
            _ => Err(CacheError::NotFound),
        }
    }

    async fn del(&self, _ctx: &RequestContext, key: &Key) -> Result<()> {
        let key = key.to_string();
        if key.is_empty() {
            return Ok(());
        }
        let mut conn = self.pool.get().await.map_err(backend)?;
        conn.del::<_, ()>(&key).await.map_err(backend)?;
        tracing::debug!(key = %key, "remote cache del");
        Ok(())
    }
}

impl std::fmt::Debug for RedisStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RedisStore").finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use relcache_core::Value;

    // A pool pointed at a port nothing listens on. Pool creation is lazy,
    // so these tests fail with a backend error the moment a network call
    // is attempted; the empty-key guard must never get that far.
    fn offline_store() -> RedisStore {
        let pool = deadpool_redis::Config::from_url("redis://127.0.0.1:1/")
            .create_pool(Some(deadpool_redis::Runtime::Tokio1))
            .expect("pool config");
        RedisStore::new(pool)
    }

    fn entry() -> Entry {
        Entry::new(vec!["id".to_string()], vec![vec![Value::Int(1)]])
    }

    #[tokio::test]
    async fn test_empty_key_add_is_noop() {
        let store = offline_store();
        let ctx = RequestContext::new();
        store
            .add(&ctx, &Key::from(""), &entry(), None)
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn test_empty_key_get_is_not_found() {
        let store = offline_store();
        let ctx = RequestContext::new();
        assert!(
            store
                .get(&ctx, &Key::from(""))
                .await
                .unwrap_err()
                .is_not_found()
        );
    }

    #[tokio::test]
    async fn test_empty_key_del_is_noop() {
        let store = offline_store();
        let ctx = RequestContext::new();
        store.del(&ctx, &Key::from("")).await.unwrap();
    }

    #[tokio::test]
    async fn test_malformed_entry_fails_before_network() {
        let store = offline_store();
        let ctx = RequestContext::new();
        let bad = Entry::new(
            vec!["a".to_string(), "b".to_string()],
            vec![vec![Value::Int(1)]],
        );
        // Encoding runs before the connection is taken, so even against an
        // unreachable server this reports corruption, not a backend error.
        assert!(matches!(
            store.add(&ctx, &Key::from("k"), &bad, None).await,
            Err(CacheError::Corrupt { .. })
        ));
    }
}
