use async_trait::async_trait;
use relcache_core::{Entry, Result, Value};

/// A tabular query source: anything that executes a statement with bound
/// arguments and produces a result set.
#[async_trait]
pub trait QuerySource: Send + Sync {
    async fn query(&self, sql: &str, args: &[Value]) -> Result<Entry>;
}
