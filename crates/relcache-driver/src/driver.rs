//! Caching wrapper around a query source.

use std::hash::{Hash, Hasher};
use std::sync::Arc;
use std::time::Duration;

use ahash::AHasher;
use relcache_core::{Entry, Key, Result, Value};
use relcache_store::{CacheStore, MemoryStore, RequestContext, compose};

use crate::source::QuerySource;
use crate::stats::CacheStats;

/// Custom key-derivation function: maps a statement and its arguments to
/// a cache key. Any collision makes two distinct queries share an entry,
/// so the function owns collision avoidance.
pub type HashFn = dyn Fn(&str, &[Value]) -> Key + Send + Sync;

/// A query source with transparent result caching.
///
/// Read statements on cache-enabled calls are keyed and looked up in the
/// configured store before execution; fresh results are written back with
/// the effective TTL. Everything else passes straight through to the
/// wrapped source.
pub struct CachedSource<S> {
    source: S,
    store: Arc<dyn CacheStore>,
    default_ttl: Option<Duration>,
    hash: Option<Arc<HashFn>>,
    stats: Arc<CacheStats>,
}

impl<S: QuerySource> CachedSource<S> {
    /// Wrap a source with a fresh unbounded in-memory store.
    pub fn new(source: S) -> Self {
        Self {
            source,
            store: Arc::new(MemoryStore::new(0)),
            default_ttl: None,
            hash: None,
            stats: Arc::new(CacheStats::new()),
        }
    }

    /// Use a specific store instead of the default in-memory one.
    pub fn with_store(mut self, store: Arc<dyn CacheStore>) -> Self {
        self.store = store;
        self
    }

    /// Use the composition of `levels` as the store (first level probed
    /// first).
    pub fn with_levels(mut self, levels: Vec<Arc<dyn CacheStore>>) -> Self {
        self.store = compose(levels);
        self
    }

    /// TTL applied to writes when the call does not override it.
    pub fn with_default_ttl(mut self, ttl: Duration) -> Self {
        self.default_ttl = Some(ttl);
        self
    }

    /// Replace the built-in statement hash with a custom derivation.
    pub fn with_hash(
        mut self,
        hash: impl Fn(&str, &[Value]) -> Key + Send + Sync + 'static,
    ) -> Self {
        self.hash = Some(Arc::new(hash));
        self
    }

    /// The store this driver caches into.
    pub fn store(&self) -> &Arc<dyn CacheStore> {
        &self.store
    }

    /// Get cache statistics.
    pub fn stats(&self) -> Arc<CacheStats> {
        Arc::clone(&self.stats)
    }

    /// Execute a statement, consulting the cache according to the
    /// directives carried on `ctx`.
    pub async fn query(&self, ctx: &RequestContext, sql: &str, args: &[Value]) -> Result<Entry> {
        let options = ctx.options();
        if !options.is_enabled() || !is_read_statement(sql) {
            return self.source.query(sql, args).await;
        }
        let key = match options.key() {
            Some(key) => key.clone(),
            None => self.derive_key(sql, args),
        };
        let ttl = options.ttl().or(self.default_ttl);
        self.stats.record_get();

        if options.is_cache_only() && options.is_evict() {
            // Pure invalidation: the source is never touched.
            self.store.del(ctx, &key).await?;
            return Ok(Entry::empty());
        }
        if options.is_evict() {
            // Execute and cache as usual, then invalidate. Eviction comes
            // after the fresh write so it is unconditionally observable.
            let entry = normalize_columns(self.source.query(sql, args).await?);
            self.store.add(ctx, &key, &entry, ttl).await?;
            self.store.del(ctx, &key).await?;
            return Ok(entry);
        }
        match self.store.get(ctx, &key).await {
            Ok(entry) => {
                self.stats.record_hit();
                return Ok(entry);
            }
            Err(err) if err.is_not_found() => {}
            Err(err) => return Err(err),
        }
        if options.is_cache_only() {
            return Ok(Entry::empty());
        }
        let entry = normalize_columns(self.source.query(sql, args).await?);
        self.store.add(ctx, &key, &entry, ttl).await?;
        Ok(entry)
    }

    fn derive_key(&self, sql: &str, args: &[Value]) -> Key {
        if let Some(hash) = &self.hash {
            return hash(sql, args);
        }
        let mut hasher = AHasher::default();
        sql.hash(&mut hasher);
        hash_args(&mut hasher, args);
        Key::Hash(hasher.finish())
    }
}

/// Only read statements are cache-eligible; everything else (DML, DDL)
/// bypasses the cache entirely.
fn is_read_statement(sql: &str) -> bool {
    let first = sql.split_whitespace().next().unwrap_or("");
    first.eq_ignore_ascii_case("SELECT") || first.eq_ignore_ascii_case("WITH")
}

/// Synthesize positional column names when the source could not report
/// real ones, so the stored entry always round-trips with a usable shape.
fn normalize_columns(mut entry: Entry) -> Entry {
    if entry.columns.is_empty() {
        if let Some(row) = entry.values.first() {
            entry.columns = (0..row.len()).map(|i| format!("column_{i}")).collect();
        }
    }
    entry
}

fn hash_args(hasher: &mut impl Hasher, args: &[Value]) {
    args.len().hash(hasher);
    for arg in args {
        std::mem::discriminant(arg).hash(hasher);
        match arg {
            Value::Null => {}
            Value::Bool(v) => v.hash(hasher),
            Value::Int(v) => v.hash(hasher),
            Value::Float(v) => v.to_bits().hash(hasher),
            Value::Text(v) => v.hash(hasher),
            Value::Bytes(v) => v.hash(hasher),
            Value::Time(v) => v.unix_timestamp_nanos().hash(hasher),
        }
    }
}
