//! Core constants for the BioGate access control simulation.
//!
//! This module defines the identifier formats, template dimensions and
//! default rates shared by every BioGate crate. Keeping them in one place
//! ensures records written by one component are accepted by the others.
//!
//! # Identifier Formats
//!
//! | Kind   | Primary format             | Fallback format                 |
//! |--------|----------------------------|---------------------------------|
//! | User   | 6 uppercase alphanumerics  | 8 uppercase hex chars (UUID)    |
//! | Device | `DEV` + 4 digits           | `DEV` + 4 uppercase hex chars   |
//!
//! The fallback formats are only produced when random generation keeps
//! colliding with existing identifiers.
//!
//! # Usage
//!
//! ```
//! use biogate_core::constants::*;
//!
//! assert_eq!(TEMPLATE_LEN, 10);
//! assert_eq!(DEVICE_ID_PREFIX, "DEV");
//! assert!(DEFAULT_MATCH_THRESHOLD <= 1.0);
//! ```

// ============================================================================
// Biometric Templates
// ============================================================================

/// Number of features in a synthetic biometric template.
pub const TEMPLATE_LEN: usize = 10;

/// Decimal places kept for each template feature.
///
/// Features are truncated (not rounded) so they stay strictly below 1.0.
pub const TEMPLATE_PRECISION: i32 = 6;

/// Decimal places kept for similarity scores.
pub const SCORE_PRECISION: i32 = 4;

// ============================================================================
// Identifiers
// ============================================================================

/// Length of a regular user identifier.
pub const USER_ID_LEN: usize = 6;

/// Length of a user identifier produced by the UUID fallback.
pub const USER_ID_FALLBACK_LEN: usize = 8;

/// Prefix shared by every device identifier.
pub const DEVICE_ID_PREFIX: &str = "DEV";

/// Number of characters after [`DEVICE_ID_PREFIX`].
pub const DEVICE_ID_SUFFIX_LEN: usize = 4;

/// Smallest numeric suffix drawn for a device identifier.
pub const DEVICE_ID_MIN: u16 = 1000;

/// Largest numeric suffix drawn for a device identifier.
pub const DEVICE_ID_MAX: u16 = 9999;

/// Random draws attempted before falling back to a UUID-derived identifier.
pub const ID_GENERATION_ATTEMPTS: usize = 1000;

/// Alphabet used for regular user identifiers.
pub const USER_ID_ALPHABET: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789";

// ============================================================================
// Log Actors
// ============================================================================

/// Actor recorded for events the system itself raises (undetected attacks).
pub const SYSTEM_ACTOR: &str = "SYSTEM";

/// Actor recorded when an attack is launched directly against a device.
pub const ATTACKER_ACTOR: &str = "ATTACKER";

// ============================================================================
// Default Rates
// ============================================================================

/// Default probability that a qualifying authentication is granted.
pub const DEFAULT_AUTH_SUCCESS_RATE: f64 = 0.8;

/// Default probability that a simulated attack is detected.
pub const DEFAULT_ATTACK_DETECTION_RATE: f64 = 0.7;

/// Default minimum similarity for a biometric match.
pub const DEFAULT_MATCH_THRESHOLD: f64 = 0.6;

// ============================================================================
// Administration
// ============================================================================

/// Token that must be supplied to wipe all persisted state.
pub const CLEAR_ALL_CONFIRMATION: &str = "DELETE";

/// Default number of log entries per page.
pub const DEFAULT_PAGE_SIZE: usize = 10;

/// Timestamp format used for enrollment dates and log entries.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";
