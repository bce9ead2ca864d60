//! Tiered Cache Example
//!
//! Demonstrates multi-level composition, request-scoped caches and
//! explicit invalidation.

use anyhow::Result;
use async_trait::async_trait;
use relcache_core::{Entry, Value};
use relcache_driver::{CachedSource, QuerySource};
use relcache_store::{CacheOptions, CacheStore, ContextStore, MemoryStore, RequestContext};
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

struct OrdersTable {
    executions: Arc<AtomicUsize>,
}

#[async_trait]
impl QuerySource for OrdersTable {
    async fn query(&self, _sql: &str, _args: &[Value]) -> relcache_core::Result<Entry> {
        self.executions.fetch_add(1, Ordering::SeqCst);
        Ok(Entry::new(
            vec!["id".to_string(), "total".to_string()],
            vec![
                vec![Value::Int(1), Value::Float(9.99)],
                vec![Value::Int(2), Value::Float(24.50)],
            ],
        ))
    }
}

fn orders() -> (OrdersTable, Arc<AtomicUsize>) {
    let executions = Arc::new(AtomicUsize::new(0));
    (
        OrdersTable {
            executions: Arc::clone(&executions),
        },
        executions,
    )
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt::init();

    println!("=== Tiered Cache Example ===\n");

    two_level_cache().await?;
    request_scoped_cache().await?;
    explicit_invalidation().await?;

    println!("\n=== All tiered examples completed! ===");
    Ok(())
}

/// Example 1: a small fast level in front of a large one
async fn two_level_cache() -> Result<()> {
    println!("--- Example 1: Two-Level Cache ---\n");

    // Cheapest level first; in production the second level would be a
    // RedisStore shared between processes.
    let l0 = Arc::new(MemoryStore::new(128));
    let l1 = Arc::new(MemoryStore::new(0));
    let (table, executions) = orders();
    let driver = CachedSource::new(table).with_levels(vec![
        l0.clone() as Arc<dyn CacheStore>,
        l1.clone() as Arc<dyn CacheStore>,
    ]);

    let ctx = RequestContext::new().with_options(CacheOptions::new());
    driver.query(&ctx, "SELECT id, total FROM orders", &[]).await?;
    driver.query(&ctx, "SELECT id, total FROM orders", &[]).await?;

    println!("Source executions: {}", executions.load(Ordering::SeqCst));
    println!("Fast level entries: {}", l0.len());
    println!("Shared level entries: {}\n", l1.len());

    Ok(())
}

/// Example 2: a cache that lives for one request only
async fn request_scoped_cache() -> Result<()> {
    println!("--- Example 2: Request-Scoped Cache ---\n");

    let (table, executions) = orders();
    let driver = CachedSource::new(table).with_store(Arc::new(ContextStore::new()));
    let sql = "SELECT id, total FROM orders WHERE open";

    // Each request binds its own short-lived store.
    for request in 1..=2 {
        let ctx = RequestContext::with_levels(vec![]).with_options(CacheOptions::new());
        driver.query(&ctx, sql, &[]).await?;
        driver.query(&ctx, sql, &[]).await?;
        println!(
            "Request {}: {} execution(s) so far",
            request,
            executions.load(Ordering::SeqCst)
        );
    }

    println!();
    Ok(())
}

/// Example 3: evict and cache-only directives
async fn explicit_invalidation() -> Result<()> {
    println!("--- Example 3: Explicit Invalidation ---\n");

    let (table, executions) = orders();
    let driver = CachedSource::new(table);
    let sql = "SELECT id, total FROM orders";

    let ctx = RequestContext::new().with_options(CacheOptions::new());
    driver.query(&ctx, sql, &[]).await?;
    println!("Seeded the cache ({} execution)", executions.load(Ordering::SeqCst));

    // Invalidate without touching the database.
    let evict = RequestContext::new().with_options(CacheOptions::new().cache_only().evict());
    driver.query(&evict, sql, &[]).await?;
    println!(
        "Evicted without execution (still {} execution)",
        executions.load(Ordering::SeqCst)
    );

    driver.query(&ctx, sql, &[]).await?;
    println!(
        "Next read executed again ({} executions)",
        executions.load(Ordering::SeqCst)
    );

    Ok(())
}
