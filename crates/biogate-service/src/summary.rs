use biogate_core::BiometricModality;
use biogate_storage::Settings;
use std::collections::BTreeMap;

/// Snapshot of system totals for the statistics view.
///
/// Percentages are `None` when their total is zero.
#[derive(Debug, Clone, PartialEq)]
pub struct StatisticsSummary {
    pub users: usize,
    pub users_by_modality: BTreeMap<BiometricModality, usize>,
    pub devices: usize,
    pub active_devices: usize,
    pub successful_authentications: u64,
    pub failed_authentications: u64,
    pub malformed_authentications: u64,
    pub attacks_blocked: u64,
    pub attacks_succeeded: u64,
    pub enrollments: u64,
    pub log_entries: usize,
    pub settings: Settings,
}

impl StatisticsSummary {
    #[must_use]
    pub fn total_authentications(&self) -> u64 {
        self.successful_authentications + self.failed_authentications
    }

    #[must_use]
    pub fn success_percentage(&self) -> Option<f64> {
        ratio(self.successful_authentications, self.total_authentications())
    }

    #[must_use]
    pub fn total_attacks(&self) -> u64 {
        self.attacks_blocked + self.attacks_succeeded
    }

    #[must_use]
    pub fn block_percentage(&self) -> Option<f64> {
        ratio(self.attacks_blocked, self.total_attacks())
    }
}

fn ratio(part: u64, total: u64) -> Option<f64> {
    (total > 0).then(|| part as f64 / total as f64 * 100.0)
}
