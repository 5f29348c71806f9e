//! Attack simulation and detection.
//!
//! A simulated attack bypasses biometric matching entirely. The simulator
//! picks one [`AttackKind`] uniformly at random and then rolls detection
//! against `detection_rate`. Detection is a fixed-probability coin flip;
//! there is no anomaly model behind it.
//!
//! The simulator only reports. Applying the consequences (keeping the
//! device Active and logging "Blocked", or marking it Under Attack and
//! logging "Attack") is the caller's job.

use crate::random;
use biogate_core::{
    Result, constants::DEFAULT_ATTACK_DETECTION_RATE, validation::validate_rate,
};
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Category of a simulated attack
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AttackKind {
    UnauthorizedAccess,
    FirmwareTampering,
    NetworkIntrusion,
}

impl AttackKind {
    /// Every attack kind, in selection order.
    pub const ALL: [AttackKind; 3] = [
        AttackKind::UnauthorizedAccess,
        AttackKind::FirmwareTampering,
        AttackKind::NetworkIntrusion,
    ];
}

impl fmt::Display for AttackKind {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            AttackKind::UnauthorizedAccess => write!(f, "Unauthorized Access"),
            AttackKind::FirmwareTampering => write!(f, "Firmware Tampering"),
            AttackKind::NetworkIntrusion => write!(f, "Network Intrusion"),
        }
    }
}

/// Result of one simulated attack.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttackReport {
    pub detected: bool,
    pub kind: AttackKind,
    /// Operator-facing description of what happened.
    pub message: String,
}

/// Picks an attack kind and rolls whether it is detected.
///
/// # Examples
///
/// ```
/// use biogate_biometric::{AttackSimulator, random};
///
/// let always = AttackSimulator::new(1.0).unwrap();
/// let report = always.simulate("IoT Device DEV1234", &mut random::seeded(4));
/// assert!(report.detected);
/// assert!(report.message.starts_with("BLOCKED"));
///
/// let never = AttackSimulator::new(0.0).unwrap();
/// let report = never.simulate("IoT Device DEV1234", &mut random::seeded(4));
/// assert!(!report.detected);
/// assert!(report.message.starts_with("ALERT"));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AttackSimulator {
    detection_rate: f64,
}

impl Default for AttackSimulator {
    fn default() -> Self {
        Self {
            detection_rate: DEFAULT_ATTACK_DETECTION_RATE,
        }
    }
}

impl AttackSimulator {
    /// Create a simulator with the given detection rate.
    ///
    /// # Errors
    /// Returns `Error::Validation` if `detection_rate` is outside `[0, 1]`.
    pub fn new(detection_rate: f64) -> Result<Self> {
        Ok(Self {
            detection_rate: validate_rate(detection_rate, "Attack detection rate")?,
        })
    }

    /// Probability that an attack is detected.
    #[must_use]
    pub fn detection_rate(&self) -> f64 {
        self.detection_rate
    }

    /// Set the detection rate.
    ///
    /// # Errors
    /// Returns `Error::Validation` if `rate` is outside `[0, 1]`; the
    /// current value is left unchanged.
    pub fn set_detection_rate(&mut self, rate: f64) -> Result<()> {
        self.detection_rate = validate_rate(rate, "Attack detection rate")?;
        Ok(())
    }

    /// Simulate an attack against the named device.
    ///
    /// Consumes two draws from `rng`: one for the kind, one for detection.
    pub fn simulate<R: Rng>(&self, device_name: &str, rng: &mut R) -> AttackReport {
        let kind = AttackKind::ALL[random::index(rng, AttackKind::ALL.len())];
        let detected = random::unit(rng) < self.detection_rate;

        let message = if detected {
            format!("BLOCKED: Security attack detected! {kind} on {device_name}")
        } else {
            format!("ALERT: {kind} detected on {device_name}!")
        };

        AttackReport {
            detected,
            kind,
            message,
        }
    }
}
