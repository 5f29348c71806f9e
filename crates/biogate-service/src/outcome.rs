//! Values returned by the top-level operations.

use biogate_biometric::AttackReport;
use biogate_core::{DeviceId, UserId};
use biogate_storage::messages::percent;
use std::fmt;

/// Identifiers created by a successful enrollment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Enrollment {
    pub name: String,
    pub user_id: UserId,
    pub device_id: DeviceId,
}

impl fmt::Display for Enrollment {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "Success: {} enrolled! User ID: {} Device ID: {}",
            self.name, self.user_id, self.device_id
        )
    }
}

/// Why an authentication attempt was refused.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FailureReason {
    UserNotFound,
    DeviceNotFound,
    /// Matching ran and did not grant access.
    Mismatch { score: f64 },
}

/// Result of an authentication attempt or attack simulation.
///
/// The display form starts with `SUCCESS`, `FAILED`, `BLOCKED` or `ALERT`.
#[derive(Debug, Clone, PartialEq)]
pub enum AuthOutcome {
    Success {
        user_name: String,
        device_name: String,
        score: f64,
    },
    Failed(FailureReason),
    /// Attack detected; the device stays Active.
    Blocked(AttackReport),
    /// Attack missed; the device is now Under Attack.
    Compromised(AttackReport),
}

impl AuthOutcome {
    #[must_use]
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success { .. })
    }

    /// Similarity score when matching ran.
    #[must_use]
    pub fn score(&self) -> Option<f64> {
        match self {
            Self::Success { score, .. } | Self::Failed(FailureReason::Mismatch { score }) => {
                Some(*score)
            }
            _ => None,
        }
    }
}

impl fmt::Display for AuthOutcome {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Self::Success {
                user_name,
                device_name,
                score,
            } => write!(
                f,
                "SUCCESS: {user_name} authenticated on {device_name} (Match: {})",
                percent(*score)
            ),
            Self::Failed(FailureReason::UserNotFound) => write!(f, "FAILED: User not found"),
            Self::Failed(FailureReason::DeviceNotFound) => write!(f, "FAILED: Device not found"),
            Self::Failed(FailureReason::Mismatch { score }) => {
                write!(f, "FAILED: Biometric mismatch (Match: {})", percent(*score))
            }
            Self::Blocked(report) | Self::Compromised(report) => f.write_str(&report.message),
        }
    }
}

/// What `clear_all` removed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ClearedData {
    pub users: usize,
    pub devices: usize,
    pub log_entries: usize,
}
