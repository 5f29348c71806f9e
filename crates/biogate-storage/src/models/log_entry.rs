use biogate_core::AccessResult;
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// One security event, as persisted in `logs.json`.
///
/// `user` holds the acting user ID, or `SYSTEM` / `ATTACKER` for events
/// without a user behind them. Entries are never edited once written.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LogEntry {
    #[serde(with = "super::timestamp")]
    pub time: NaiveDateTime,
    pub user: String,
    pub device: String,
    pub result: AccessResult,
    pub notes: String,
}

impl LogEntry {
    pub fn new(
        time: NaiveDateTime,
        user: impl Into<String>,
        device: impl Into<String>,
        result: AccessResult,
        notes: impl Into<String>,
    ) -> Self {
        Self {
            time,
            user: user.into(),
            device: device.into(),
            result,
            notes: notes.into(),
        }
    }

    /// Timestamp in the persisted text format.
    #[must_use]
    pub fn formatted_time(&self) -> String {
        super::timestamp::format(&self.time)
    }
}
