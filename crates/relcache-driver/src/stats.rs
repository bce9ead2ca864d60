//! Cache access statistics.

use std::sync::atomic::{AtomicU64, Ordering};

/// Running tally of cache consultations and hits, maintained by the
/// driver for observability. Gets count once per cache-eligible call.
#[derive(Debug, Default)]
pub struct CacheStats {
    gets: AtomicU64,
    hits: AtomicU64,
}

impl CacheStats {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record_get(&self) {
        self.gets.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_hit(&self) {
        self.hits.fetch_add(1, Ordering::Relaxed);
    }

    pub fn gets(&self) -> u64 {
        self.gets.load(Ordering::Relaxed)
    }

    pub fn hits(&self) -> u64 {
        self.hits.load(Ordering::Relaxed)
    }

    /// Hit rate over all cache-eligible calls (0.0 to 1.0).
    pub fn hit_rate(&self) -> f64 {
        let gets = self.gets() as f64;
        if gets == 0.0 {
            0.0
        } else {
            self.hits() as f64 / gets
        }
    }

    /// Reset both counters.
    pub fn reset(&self) {
        self.gets.store(0, Ordering::Relaxed);
        self.hits.store(0, Ordering::Relaxed);
    }
}
