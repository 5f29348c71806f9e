use biogate_core::Error;
use std::{fmt, str::FromStr};

/// A tunable rate, as named on the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RateKind {
    AuthSuccessRate,
    AttackDetectionRate,
    BiometricThreshold,
}

impl RateKind {
    pub const ALL: [RateKind; 3] = [
        RateKind::AuthSuccessRate,
        RateKind::AttackDetectionRate,
        RateKind::BiometricThreshold,
    ];

    /// Human-readable name used in validation messages.
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            RateKind::AuthSuccessRate => "Authentication success rate",
            RateKind::AttackDetectionRate => "Attack detection rate",
            RateKind::BiometricThreshold => "Biometric match threshold",
        }
    }
}

impl fmt::Display for RateKind {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            RateKind::AuthSuccessRate => write!(f, "auth-success-rate"),
            RateKind::AttackDetectionRate => write!(f, "attack-detection-rate"),
            RateKind::BiometricThreshold => write!(f, "biometric-threshold"),
        }
    }
}

impl FromStr for RateKind {
    type Err = Error;

    /// Accepts the kebab-case name, with `_` or `-` separators, any case.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_ascii_lowercase().replace('_', "-");
        RateKind::ALL
            .into_iter()
            .find(|kind| kind.to_string() == normalized)
            .ok_or_else(|| {
                Error::validation(format!(
                    "Unknown setting '{}' (expected auth-success-rate, attack-detection-rate or biometric-threshold)",
                    s.trim()
                ))
            })
    }
}
