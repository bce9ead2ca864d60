//! Cache store levels for relcache
//!
//! This crate provides the store abstraction the result cache is built
//! from: one capability trait and a set of interchangeable levels.
//!
//! # Levels
//!
//! - [`MemoryStore`]: bounded in-process LRU with optional per-entry expiry
//! - [`RedisStore`]: shared remote level with native TTL support
//! - [`MultiLevel`]: ordered list of levels acting as one logical store
//! - [`ContextStore`]: resolves to whatever store the current request
//!   context binds, enabling request-lived caches
//!
//! # Example
//!
//! ```ignore
//! use relcache_store::{CacheStore, MemoryStore, RequestContext};
//! use std::sync::Arc;
//!
//! let store = Arc::new(MemoryStore::new(1000));
//! let ctx = RequestContext::new();
//!
//! store.add(&ctx, &key, &entry, None).await?;
//! let cached = store.get(&ctx, &key).await?;
//! ```
//!
//! Writes fan out to every level of a [`MultiLevel`]; reads return the
//! first hit. A hit at a later level does not backfill earlier levels.

pub mod context;
pub mod memory;
pub mod multilevel;
pub mod options;
pub mod remote;
pub mod store;

pub use context::{ContextStore, RequestContext};
pub use memory::MemoryStore;
pub use multilevel::{MultiLevel, compose};
pub use options::CacheOptions;
pub use remote::RedisStore;
pub use store::CacheStore;
