use biogate_core::{
    Result,
    constants::{DEFAULT_ATTACK_DETECTION_RATE, DEFAULT_AUTH_SUCCESS_RATE, DEFAULT_MATCH_THRESHOLD},
    validation::validate_rate,
};
use serde::{Deserialize, Serialize};

/// Tunable rates, as persisted in `settings.json`.
///
/// Missing keys fall back to the built-in defaults.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub auth_success_rate: f64,
    pub attack_detection_rate: f64,
    pub biometric_threshold: f64,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            auth_success_rate: DEFAULT_AUTH_SUCCESS_RATE,
            attack_detection_rate: DEFAULT_ATTACK_DETECTION_RATE,
            biometric_threshold: DEFAULT_MATCH_THRESHOLD,
        }
    }
}

impl Settings {
    /// Check that every rate lies in `[0, 1]`.
    ///
    /// # Errors
    /// Returns `Error::Validation` naming the first offending rate.
    pub fn validate(&self) -> Result<()> {
        validate_rate(self.auth_success_rate, "Authentication success rate")?;
        validate_rate(self.attack_detection_rate, "Attack detection rate")?;
        validate_rate(self.biometric_threshold, "Biometric match threshold")?;
        Ok(())
    }
}
