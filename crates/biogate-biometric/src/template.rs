//! Synthetic template, fingerprint and identifier generation.
//!
//! Templates stand in for captured biometric samples: [`TEMPLATE_LEN`]
//! independent uniform features in `[0, 1)`, truncated to
//! [`TEMPLATE_PRECISION`] decimal places so they survive a JSON round trip
//! unchanged.
//!
//! # Identifier Collisions
//!
//! Identifier generation retries up to [`ID_GENERATION_ATTEMPTS`] random
//! draws while the candidate is already taken, then switches to a
//! UUID-derived shape. The UUID bytes come from the same injected source,
//! so fallback identifiers are reproducible under a seeded source as well.
//!
//! The generators never return a taken identifier. If even the fallback
//! keeps colliding, generation fails with `Error::InvariantViolation`.

use crate::random;
use biogate_core::{
    DeviceId, Error, Result, Template, UserId,
    constants::{
        DEVICE_ID_MAX, DEVICE_ID_MIN, DEVICE_ID_PREFIX, DEVICE_ID_SUFFIX_LEN,
        ID_GENERATION_ATTEMPTS, TEMPLATE_LEN, TEMPLATE_PRECISION, USER_ID_ALPHABET,
        USER_ID_FALLBACK_LEN, USER_ID_LEN,
    },
};
use rand::Rng;
use sha2::{Digest, Sha256};

/// Generator for synthetic templates, fingerprints and identifiers.
///
/// All methods are associated functions; the generator holds no state of
/// its own beyond the randomness source it is handed.
///
/// # Examples
///
/// ```
/// use biogate_biometric::{TemplateGenerator, random};
/// use std::collections::HashSet;
///
/// let mut rng = random::seeded(3);
///
/// let template = TemplateGenerator::generate_template(&mut rng);
/// assert_eq!(template.len(), 10);
///
/// let hash = TemplateGenerator::fingerprint(&template);
/// assert_eq!(hash.len(), 64);
///
/// let taken: HashSet<biogate_core::UserId> = HashSet::new();
/// let user_id = TemplateGenerator::generate_user_id(&mut rng, |id| taken.contains(id)).unwrap();
/// assert_eq!(user_id.as_str().len(), 6);
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct TemplateGenerator;

impl TemplateGenerator {
    /// Generate a fresh template of [`TEMPLATE_LEN`] features in `[0, 1)`.
    ///
    /// Consumes exactly [`TEMPLATE_LEN`] draws from `rng`.
    pub fn generate_template<R: Rng>(rng: &mut R) -> Template {
        let scale = 10f64.powi(TEMPLATE_PRECISION);
        let features = (0..TEMPLATE_LEN)
            .map(|_| (random::unit(rng) * scale).floor() / scale)
            .collect();
        Template::new(features)
    }

    /// SHA-256 content fingerprint of the template's canonical form, hex encoded.
    ///
    /// Used for integrity display only; it is not a security primitive.
    #[must_use]
    pub fn fingerprint(template: &Template) -> String {
        let digest = Sha256::digest(template.canonical().as_bytes());
        hex::encode(digest)
    }

    /// Generate a user ID for which `is_taken` returns `false`.
    ///
    /// # Errors
    /// Returns `Error::InvariantViolation` if both the random draws and the
    /// UUID fallback are exhausted.
    pub fn generate_user_id<R, F>(rng: &mut R, is_taken: F) -> Result<UserId>
    where
        R: Rng,
        F: Fn(&UserId) -> bool,
    {
        for _ in 0..ID_GENERATION_ATTEMPTS {
            let code: String = (0..USER_ID_LEN)
                .map(|_| USER_ID_ALPHABET[random::index(rng, USER_ID_ALPHABET.len())] as char)
                .collect();
            let id = UserId::new(&code)?;
            if !is_taken(&id) {
                return Ok(id);
            }
        }

        for _ in 0..ID_GENERATION_ATTEMPTS {
            let id = UserId::new(&uuid_prefix(rng, USER_ID_FALLBACK_LEN))?;
            if !is_taken(&id) {
                return Ok(id);
            }
        }

        Err(Error::InvariantViolation(
            "user ID space exhausted after UUID fallback".to_string(),
        ))
    }

    /// Generate a device ID for which `is_taken` returns `false`.
    ///
    /// # Errors
    /// Returns `Error::InvariantViolation` if both the random draws and the
    /// UUID fallback are exhausted.
    pub fn generate_device_id<R, F>(rng: &mut R, is_taken: F) -> Result<DeviceId>
    where
        R: Rng,
        F: Fn(&DeviceId) -> bool,
    {
        for _ in 0..ID_GENERATION_ATTEMPTS {
            let suffix = rng.gen_range(DEVICE_ID_MIN..=DEVICE_ID_MAX);
            let id = DeviceId::new(&format!("{DEVICE_ID_PREFIX}{suffix}"))?;
            if !is_taken(&id) {
                return Ok(id);
            }
        }

        for _ in 0..ID_GENERATION_ATTEMPTS {
            let suffix = uuid_prefix(rng, DEVICE_ID_SUFFIX_LEN);
            let id = DeviceId::new(&format!("{DEVICE_ID_PREFIX}{suffix}"))?;
            if !is_taken(&id) {
                return Ok(id);
            }
        }

        Err(Error::InvariantViolation(
            "device ID space exhausted after UUID fallback".to_string(),
        ))
    }
}

/// First `len` hex characters of a v4 UUID built from `rng`, uppercased.
fn uuid_prefix<R: Rng>(rng: &mut R, len: usize) -> String {
    let mut bytes = [0u8; 16];
    rng.fill(&mut bytes);
    let uuid = uuid::Builder::from_random_bytes(bytes).into_uuid();
    uuid.simple().to_string()[..len].to_uppercase()
}
