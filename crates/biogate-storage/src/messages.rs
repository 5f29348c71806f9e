//! Note texts written to the security log.

use biogate_core::BiometricModality;

/// Notes recorded alongside each log entry.
///
/// Fixed notes are constants; notes that carry a value are built by the
/// associated functions so the wording stays in one place.
pub struct LogNotes;

impl LogNotes {
    /// Authentication named an unknown user
    pub const USER_NOT_FOUND: &'static str = "User not found";

    /// Authentication named an unknown device
    pub const DEVICE_NOT_FOUND: &'static str = "Device not found";

    /// Attack attempt was caught before matching
    pub const ATTACK_DETECTED: &'static str = "Attack detected";

    #[must_use]
    pub fn enrolled(modality: BiometricModality) -> String {
        format!("User enrolled with {modality}")
    }

    #[must_use]
    pub fn match_success(score: f64) -> String {
        format!("Authentication successful (match: {})", percent(score))
    }

    #[must_use]
    pub fn match_failure(score: f64) -> String {
        format!("Biometric mismatch (match: {})", percent(score))
    }

    /// Undetected attack, e.g. `Firmware Tampering on IoT Device DEV1234`.
    #[must_use]
    pub fn attack(kind: impl std::fmt::Display, device_name: &str) -> String {
        format!("{kind} on {device_name}")
    }
}

/// Score rendered as a percentage with two decimals, e.g. `87.65%`.
#[must_use]
pub fn percent(score: f64) -> String {
    format!("{:.2}%", score * 100.0)
}
