//! Named event counters.
//!
//! Counters are created on first increment and never decrease except
//! through [`StatisticsTracker::reset`]. Unknown names read as zero.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Well-known counter names.
pub mod counters {
    pub const TOTAL_ENROLLMENTS: &str = "total_enrollments";
    pub const ENROLLMENTS_FACE: &str = "enrollments_face";
    pub const ENROLLMENTS_VOICE: &str = "enrollments_voice";
    pub const SUCCESSFUL_AUTHENTICATIONS: &str = "successful_authentications";
    pub const FAILED_AUTHENTICATIONS: &str = "failed_authentications";
    pub const MALFORMED_AUTHENTICATIONS: &str = "malformed_authentications";
    pub const ATTACKS_BLOCKED: &str = "attacks_blocked";
    pub const ATTACKS_SUCCEEDED: &str = "attacks_succeeded";
}

/// Monotonic counters keyed by name, persisted as a flat JSON object.
///
/// # Examples
///
/// ```
/// use biogate_storage::{StatisticsTracker, statistics::counters};
///
/// let mut stats = StatisticsTracker::new();
/// assert_eq!(stats.get(counters::TOTAL_ENROLLMENTS), 0);
/// stats.increment(counters::TOTAL_ENROLLMENTS);
/// assert_eq!(stats.get(counters::TOTAL_ENROLLMENTS), 1);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StatisticsTracker {
    counters: BTreeMap<String, u64>,
}

impl StatisticsTracker {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add one to `name`, returning the new value.
    pub fn increment(&mut self, name: &str) -> u64 {
        let counter = self.counters.entry(name.to_string()).or_insert(0);
        *counter = counter.saturating_add(1);
        *counter
    }

    #[must_use]
    pub fn get(&self, name: &str) -> u64 {
        self.counters.get(name).copied().unwrap_or(0)
    }

    /// All counters in name order.
    #[must_use]
    pub fn all(&self) -> &BTreeMap<String, u64> {
        &self.counters
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.counters.is_empty()
    }

    pub fn reset(&mut self) {
        self.counters.clear();
    }
}
