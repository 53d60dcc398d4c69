//! Metrics registry
//!
//! - Counters only
//! - Monotonic increase
//! - Reset only on process start

use std::sync::atomic::{AtomicU64, Ordering};

use serde::Serialize;

/// Review lifecycle and catalog counters
///
/// All counters use Relaxed atomics; exact ordering between counters is not
/// needed.
#[derive(Debug, Default)]
pub struct MetricsRegistry {
    reviews_added: AtomicU64,
    reviews_removed: AtomicU64,
    reviews_rejected: AtomicU64,
    /// Review stored on the user but not on the professor
    dual_write_incomplete: AtomicU64,
    aggregate_recomputations: AtomicU64,
    professors_created: AtomicU64,
    professors_removed: AtomicU64,
    users_registered: AtomicU64,
}

impl MetricsRegistry {
    /// Create a new metrics registry with all counters at zero
    pub fn new() -> Self {
        Self::default()
    }

    pub fn increment_reviews_added(&self) {
        self.reviews_added.fetch_add(1, Ordering::Relaxed);
    }

    pub fn increment_reviews_removed(&self) {
        self.reviews_removed.fetch_add(1, Ordering::Relaxed);
    }

    pub fn increment_reviews_rejected(&self) {
        self.reviews_rejected.fetch_add(1, Ordering::Relaxed);
    }

    pub fn increment_dual_write_incomplete(&self) {
        self.dual_write_incomplete.fetch_add(1, Ordering::Relaxed);
    }

    pub fn increment_aggregate_recomputations(&self) {
        self.aggregate_recomputations.fetch_add(1, Ordering::Relaxed);
    }

    pub fn increment_professors_created(&self) {
        self.professors_created.fetch_add(1, Ordering::Relaxed);
    }

    pub fn increment_professors_removed(&self) {
        self.professors_removed.fetch_add(1, Ordering::Relaxed);
    }

    pub fn increment_users_registered(&self) {
        self.users_registered.fetch_add(1, Ordering::Relaxed);
    }

    /// Get all metrics as a snapshot
    pub fn snapshot(&self) -> MetricsSnapshot {
        MetricsSnapshot {
            reviews_added: self.reviews_added.load(Ordering::Relaxed),
            reviews_removed: self.reviews_removed.load(Ordering::Relaxed),
            reviews_rejected: self.reviews_rejected.load(Ordering::Relaxed),
            dual_write_incomplete: self.dual_write_incomplete.load(Ordering::Relaxed),
            aggregate_recomputations: self.aggregate_recomputations.load(Ordering::Relaxed),
            professors_created: self.professors_created.load(Ordering::Relaxed),
            professors_removed: self.professors_removed.load(Ordering::Relaxed),
            users_registered: self.users_registered.load(Ordering::Relaxed),
        }
    }
}

/// A point-in-time snapshot of all metrics
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MetricsSnapshot {
    pub reviews_added: u64,
    pub reviews_removed: u64,
    pub reviews_rejected: u64,
    pub dual_write_incomplete: u64,
    pub aggregate_recomputations: u64,
    pub professors_created: u64,
    pub professors_removed: u64,
    pub users_registered: u64,
}
