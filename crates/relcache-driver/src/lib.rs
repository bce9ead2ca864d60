//! Transparent caching driver for tabular query sources
//!
//! Wraps any [`QuerySource`] with a cache store: read statements are
//! intercepted, keyed by a hash of the statement text and its bound
//! arguments, and served from the configured store when possible.
//! Caching is strictly opt-in per call via the request context's
//! [`CacheOptions`].
//!
//! [`CacheOptions`]: relcache_store::CacheOptions

pub mod driver;
pub mod source;
pub mod stats;

pub use driver::CachedSource;
pub use source::QuerySource;
pub use stats::CacheStats;
