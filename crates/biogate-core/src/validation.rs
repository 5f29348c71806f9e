//! Input validation for identifiers, rates and free-text fields.
//!
//! Every value that crosses from a caller into the core passes through one
//! of these functions first. Identifiers are normalized (trimmed and
//! uppercased) before their format is checked, so `" abc123 "` and
//! `"ABC123"` refer to the same user.
//!
//! Validation failures are reported as [`Error::Validation`] and never
//! consult stored records.
//!
//! # Examples
//!
//! ```
//! use biogate_core::validation::{validate_device_id, validate_rate, validate_user_id};
//!
//! assert_eq!(validate_user_id(" ab12cd ").unwrap(), "AB12CD");
//! assert!(validate_user_id("ABC").is_err());
//!
//! assert_eq!(validate_device_id("dev1234").unwrap(), "DEV1234");
//! assert!(validate_device_id("XYZ1234").is_err());
//!
//! assert!(validate_rate(0.5, "Attack detection rate").is_ok());
//! assert!(validate_rate(1.5, "Attack detection rate").is_err());
//! ```

use crate::{
    Error, Result,
    constants::{DEVICE_ID_PREFIX, DEVICE_ID_SUFFIX_LEN, USER_ID_FALLBACK_LEN, USER_ID_LEN},
};

/// Validate and normalize a user identifier.
///
/// Accepts 6 ASCII alphanumerics, or the 8-character hex shape produced by
/// the UUID fallback.
///
/// # Errors
/// Returns `Error::Validation` if the identifier is empty, has the wrong
/// length, or contains non-alphanumeric characters.
pub fn validate_user_id(raw: &str) -> Result<String> {
    let id = raw.trim().to_uppercase();

    if id.is_empty() {
        return Err(Error::validation("User ID cannot be empty"));
    }

    match id.len() {
        USER_ID_LEN => {
            if !id.chars().all(|c| c.is_ascii_alphanumeric()) {
                return Err(Error::validation("User ID must be alphanumeric"));
            }
        }
        USER_ID_FALLBACK_LEN if id.chars().all(|c| c.is_ascii_hexdigit()) => {}
        _ => {
            return Err(Error::validation(format!(
                "User ID must be {USER_ID_LEN} characters"
            )));
        }
    }

    Ok(id)
}

/// Validate and normalize a device identifier.
///
/// Accepts `DEV` followed by 4 digits, or by 4 hex characters for
/// identifiers produced by the UUID fallback.
///
/// # Errors
/// Returns `Error::Validation` if the prefix, length or suffix is wrong.
pub fn validate_device_id(raw: &str) -> Result<String> {
    let id = raw.trim().to_uppercase();

    if id.is_empty() {
        return Err(Error::validation("Device ID cannot be empty"));
    }

    if !id.starts_with(DEVICE_ID_PREFIX) {
        return Err(Error::validation(format!(
            "Device ID must start with '{DEVICE_ID_PREFIX}'"
        )));
    }

    let expected_len = DEVICE_ID_PREFIX.len() + DEVICE_ID_SUFFIX_LEN;
    if id.len() != expected_len {
        return Err(Error::validation(format!(
            "Device ID must be {expected_len} characters ({DEVICE_ID_PREFIX} + {DEVICE_ID_SUFFIX_LEN} digits)"
        )));
    }

    if !id[DEVICE_ID_PREFIX.len()..]
        .chars()
        .all(|c| c.is_ascii_hexdigit())
    {
        return Err(Error::validation(format!(
            "Device ID must have {DEVICE_ID_SUFFIX_LEN} digits after '{DEVICE_ID_PREFIX}'"
        )));
    }

    Ok(id)
}

/// Validate a probability-like rate in `[0.0, 1.0]`.
///
/// Out-of-range values are rejected, never clamped.
///
/// # Errors
/// Returns `Error::Validation` if `value` is NaN or outside `[0.0, 1.0]`.
pub fn validate_rate(value: f64, rate_name: &str) -> Result<f64> {
    if (0.0..=1.0).contains(&value) {
        Ok(value)
    } else {
        Err(Error::validation(format!(
            "{rate_name} must be between 0.0 and 1.0"
        )))
    }
}

/// Parse and validate a rate supplied as text.
///
/// # Errors
/// Returns `Error::Validation` if the text is not a number or the number
/// is outside `[0.0, 1.0]`.
pub fn parse_rate(raw: &str, rate_name: &str) -> Result<f64> {
    let value: f64 = raw
        .trim()
        .parse()
        .map_err(|_| Error::validation(format!("Please enter a valid number for {rate_name}")))?;
    validate_rate(value, rate_name)
}

/// Validate a display name, returning it trimmed.
///
/// # Errors
/// Returns `Error::Validation` if the name is empty after trimming.
pub fn validate_name(raw: &str) -> Result<String> {
    let name = raw.trim();
    if name.is_empty() {
        return Err(Error::validation("Name cannot be empty"));
    }
    Ok(name.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("ABC123", "ABC123")]
    #[case(" abc123 ", "ABC123")]
    #[case("ZZZZZZ", "ZZZZZZ")]
    #[case("1A2B3C4D", "1A2B3C4D")] // UUID fallback shape
    fn test_user_id_valid(#[case] input: &str, #[case] expected: &str) {
        assert_eq!(validate_user_id(input).unwrap(), expected);
    }

    #[rstest]
    #[case("", "cannot be empty")]
    #[case("   ", "cannot be empty")]
    #[case("ABC12", "must be 6 characters")]
    #[case("ABC1234", "must be 6 characters")]
    #[case("ATTACKER", "must be 6 characters")] // 8 chars but not hex
    #[case("AB-123", "must be alphanumeric")]
    fn test_user_id_invalid(#[case] input: &str, #[case] message: &str) {
        let err = validate_user_id(input).unwrap_err();
        assert!(err.to_string().contains(message), "{err}");
    }

    #[rstest]
    #[case("DEV1234", "DEV1234")]
    #[case("dev0042", "DEV0042")]
    #[case(" DEV9999 ", "DEV9999")]
    #[case("DEV3FA9", "DEV3FA9")] // UUID fallback shape
    fn test_device_id_valid(#[case] input: &str, #[case] expected: &str) {
        assert_eq!(validate_device_id(input).unwrap(), expected);
    }

    #[rstest]
    #[case("", "cannot be empty")]
    #[case("ABC1234", "must start with 'DEV'")]
    #[case("DEV123", "must be 7 characters")]
    #[case("DEV12345", "must be 7 characters")]
    #[case("DEV12X4", "4 digits after 'DEV'")]
    fn test_device_id_invalid(#[case] input: &str, #[case] message: &str) {
        let err = validate_device_id(input).unwrap_err();
        assert!(err.to_string().contains(message), "{err}");
    }

    #[rstest]
    #[case(0.0)]
    #[case(0.5)]
    #[case(1.0)]
    fn test_rate_valid(#[case] value: f64) {
        assert_eq!(validate_rate(value, "Rate").unwrap(), value);
    }

    #[rstest]
    #[case(-0.01)]
    #[case(1.01)]
    #[case(f64::NAN)]
    #[case(f64::INFINITY)]
    fn test_rate_invalid(#[case] value: f64) {
        assert!(validate_rate(value, "Rate").is_err());
    }

    #[test]
    fn test_parse_rate() {
        assert_eq!(parse_rate(" 0.75 ", "Rate").unwrap(), 0.75);
        let err = parse_rate("abc", "Authentication success rate").unwrap_err();
        assert!(err.to_string().contains("valid number"));
        assert!(parse_rate("2", "Rate").is_err());
    }

    #[test]
    fn test_validate_name() {
        assert_eq!(validate_name("  Alice ").unwrap(), "Alice");
        assert!(validate_name("   ").is_err());
    }
}
