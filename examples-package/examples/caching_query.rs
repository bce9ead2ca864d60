//! Result Caching Example
//!
//! Demonstrates transparent query-result caching with TTL and statistics.

use anyhow::Result;
use async_trait::async_trait;
use relcache_core::{Entry, Value};
use relcache_driver::{CachedSource, QuerySource};
use relcache_store::{CacheOptions, RequestContext};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

/// A stand-in for a real database: serves a fixed result set and counts
/// how often it is actually queried.
struct UsersTable {
    executions: AtomicUsize,
}

impl UsersTable {
    fn new() -> Self {
        Self {
            executions: AtomicUsize::new(0),
        }
    }
}

#[async_trait]
impl QuerySource for UsersTable {
    async fn query(&self, _sql: &str, _args: &[Value]) -> relcache_core::Result<Entry> {
        self.executions.fetch_add(1, Ordering::SeqCst);
        Ok(Entry::new(
            vec!["id".to_string(), "name".to_string()],
            vec![
                vec![Value::Int(1), Value::from("Alice")],
                vec![Value::Int(2), Value::from("Bob")],
                vec![Value::Int(3), Value::from("Charlie")],
            ],
        ))
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt::init();

    println!("=== Result Caching Example ===\n");

    basic_caching().await?;
    cache_with_ttl().await?;
    cache_statistics().await?;

    println!("\n=== All caching examples completed! ===");
    Ok(())
}

/// Example 1: repeated reads are served from cache
async fn basic_caching() -> Result<()> {
    println!("--- Example 1: Basic Caching ---\n");

    let driver = CachedSource::new(UsersTable::new());
    let sql = "SELECT id, name FROM users WHERE active = true";
    let ctx = RequestContext::new().with_options(CacheOptions::new());

    println!("Executing query: {}", sql);
    let first = driver.query(&ctx, sql, &[]).await?;
    println!("  Rows returned: {}", first.row_count());

    println!("Executing the same query again...");
    let second = driver.query(&ctx, sql, &[]).await?;
    println!("  Rows returned: {} (served from cache)", second.row_count());
    println!("  Hits so far: {}\n", driver.stats().hits());

    Ok(())
}

/// Example 2: entries expire after their TTL
async fn cache_with_ttl() -> Result<()> {
    println!("--- Example 2: Cache with TTL ---\n");

    let driver = CachedSource::new(UsersTable::new()).with_default_ttl(Duration::from_millis(100));
    let sql = "SELECT id, name FROM users";
    let ctx = RequestContext::new().with_options(CacheOptions::new());

    driver.query(&ctx, sql, &[]).await?;
    driver.query(&ctx, sql, &[]).await?;
    println!("Two queries within the TTL: {} hit(s)", driver.stats().hits());

    tokio::time::sleep(Duration::from_millis(200)).await;
    driver.query(&ctx, sql, &[]).await?;
    println!("After the TTL elapsed the query ran again\n");

    Ok(())
}

/// Example 3: gets/hits statistics
async fn cache_statistics() -> Result<()> {
    println!("--- Example 3: Cache Statistics ---\n");

    let driver = CachedSource::new(UsersTable::new());
    let ctx = RequestContext::new().with_options(CacheOptions::new());

    for i in 0..4 {
        let sql = format!("SELECT id, name FROM users LIMIT {}", i % 2 + 1);
        driver.query(&ctx, &sql, &[]).await?;
    }

    let stats = driver.stats();
    println!("Gets:     {}", stats.gets());
    println!("Hits:     {}", stats.hits());
    println!("Hit rate: {:.0}%", stats.hit_rate() * 100.0);

    Ok(())
}
