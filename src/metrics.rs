// src/metrics.rs

//! Run-level observable counters.

use std::sync::atomic::{AtomicU64, Ordering};

/// Monotonically increasing count of posts successfully fetched.
#[derive(Debug, Default)]
pub struct PostCounter {
    fetched: AtomicU64,
}

impl PostCounter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add fetched posts to the running total.
    pub fn add(&self, count: u64) {
        self.fetched.fetch_add(count, Ordering::Relaxed);
    }

    /// Current total.
    pub fn total(&self) -> u64 {
        self.fetched.load(Ordering::Relaxed)
    }
}
