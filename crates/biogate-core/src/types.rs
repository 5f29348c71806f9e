use crate::{
    Result,
    error::Error,
    validation::{validate_device_id, validate_user_id},
};
use serde::{Deserialize, Serialize};
use std::fmt;

/// User identifier (6 uppercase alphanumerics, or 8 hex chars from the UUID fallback)
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct UserId(String);

impl UserId {
    /// Create a user ID with validation.
    ///
    /// The input is trimmed and uppercased before validation.
    ///
    /// # Errors
    /// Returns `Error::Validation` if the ID does not match either accepted format.
    pub fn new(id: &str) -> Result<Self> {
        validate_user_id(id).map(UserId)
    }

    /// Get the user ID as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl std::str::FromStr for UserId {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        UserId::new(s)
    }
}

impl TryFrom<String> for UserId {
    type Error = Error;

    fn try_from(value: String) -> Result<Self> {
        UserId::new(&value)
    }
}

impl From<UserId> for String {
    fn from(id: UserId) -> String {
        id.0
    }
}

/// Device identifier (`DEV` + 4 digits, or `DEV` + 4 hex chars from the UUID fallback)
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct DeviceId(String);

impl DeviceId {
    /// Create a device ID with validation.
    ///
    /// # Errors
    /// Returns `Error::Validation` if the ID does not match either accepted format.
    pub fn new(id: &str) -> Result<Self> {
        validate_device_id(id).map(DeviceId)
    }

    /// Get the device ID as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for DeviceId {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl std::str::FromStr for DeviceId {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        DeviceId::new(s)
    }
}

impl TryFrom<String> for DeviceId {
    type Error = Error;

    fn try_from(value: String) -> Result<Self> {
        DeviceId::new(&value)
    }
}

impl From<DeviceId> for String {
    fn from(id: DeviceId) -> String {
        id.0
    }
}

/// Biometric modality captured at enrollment
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum BiometricModality {
    Face,
    Voice,
}

impl BiometricModality {
    /// All modalities, in menu order.
    pub const ALL: [BiometricModality; 2] = [BiometricModality::Face, BiometricModality::Voice];

    /// Name of the statistics counter tracking enrollments with this modality.
    #[must_use]
    pub fn enrollment_counter(self) -> &'static str {
        match self {
            BiometricModality::Face => "enrollments_face",
            BiometricModality::Voice => "enrollments_voice",
        }
    }
}

impl fmt::Display for BiometricModality {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            BiometricModality::Face => write!(f, "Face"),
            BiometricModality::Voice => write!(f, "Voice"),
        }
    }
}

impl std::str::FromStr for BiometricModality {
    type Err = Error;

    /// Parse a modality name, case-insensitively.
    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "face" => Ok(BiometricModality::Face),
            "voice" => Ok(BiometricModality::Voice),
            other => Err(Error::validation(format!(
                "Invalid biometric type '{other}' (expected Face or Voice)"
            ))),
        }
    }
}

/// Operational status of an IoT device
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum DeviceStatus {
    #[default]
    Active,
    #[serde(rename = "Under Attack")]
    UnderAttack,
}

impl DeviceStatus {
    /// Returns `true` if the device is Active.
    #[inline]
    #[must_use]
    pub fn is_active(self) -> bool {
        matches!(self, DeviceStatus::Active)
    }

    /// Returns `true` if an undetected attack compromised the device.
    #[inline]
    #[must_use]
    pub fn is_under_attack(self) -> bool {
        matches!(self, DeviceStatus::UnderAttack)
    }
}

impl fmt::Display for DeviceStatus {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            DeviceStatus::Active => write!(f, "Active"),
            DeviceStatus::UnderAttack => write!(f, "Under Attack"),
        }
    }
}

/// Result recorded for a security log entry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AccessResult {
    Enrolled,
    Success,
    Failed,
    Blocked,
    Attack,
}

impl fmt::Display for AccessResult {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let name = match self {
            AccessResult::Enrolled => "Enrolled",
            AccessResult::Success => "Success",
            AccessResult::Failed => "Failed",
            AccessResult::Blocked => "Blocked",
            AccessResult::Attack => "Attack",
        };
        f.write_str(name)
    }
}

impl std::str::FromStr for AccessResult {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "enrolled" => Ok(AccessResult::Enrolled),
            "success" => Ok(AccessResult::Success),
            "failed" => Ok(AccessResult::Failed),
            "blocked" => Ok(AccessResult::Blocked),
            "attack" => Ok(AccessResult::Attack),
            other => Err(Error::validation(format!("Invalid log result: {other}"))),
        }
    }
}

/// Synthetic biometric feature vector.
///
/// Templates produced by the generator always have
/// [`TEMPLATE_LEN`](crate::constants::TEMPLATE_LEN) features in `[0, 1)`,
/// but templates loaded from older records are accepted as-is; the match
/// engine scores mismatched lengths as 0.0.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Template(Vec<f64>);

impl Template {
    /// Wrap raw feature values.
    #[must_use]
    pub fn new(features: Vec<f64>) -> Self {
        Template(features)
    }

    /// Get the features as a slice.
    #[must_use]
    pub fn as_slice(&self) -> &[f64] {
        &self.0
    }

    /// Number of features.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns `true` if the template has no features.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Canonical text form used for fingerprinting: `[v0, v1, ...]`.
    ///
    /// Each value uses its shortest round-trip form. Values below `1e-4`
    /// switch to exponent notation with a signed exponent of at least two
    /// digits (`1.2e-05`), so fingerprints of stored records reproduce.
    #[must_use]
    pub fn canonical(&self) -> String {
        let values: Vec<String> = self.0.iter().copied().map(canonical_float).collect();
        format!("[{}]", values.join(", "))
    }
}

impl From<Vec<f64>> for Template {
    fn from(features: Vec<f64>) -> Self {
        Template(features)
    }
}

fn canonical_float(value: f64) -> String {
    if value.is_nan() {
        return "nan".to_string();
    }

    let text = format!("{value:?}");
    match text.split_once('e') {
        Some((mantissa, exponent)) => {
            let (sign, digits) = match exponent.strip_prefix('-') {
                Some(digits) => ('-', digits),
                None => ('+', exponent),
            };
            format!("{mantissa}e{sign}{digits:0>2}")
        }
        None => text,
    }
}
