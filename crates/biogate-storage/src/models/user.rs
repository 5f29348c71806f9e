use biogate_biometric::TemplateGenerator;
use biogate_core::{BiometricModality, Template};
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use subtle::ConstantTimeEq;

/// Enrolled user, as persisted in `users.json` keyed by user ID.
///
/// # Fields
///
/// * `name` - Display name given at enrollment
/// * `modality` - Biometric modality (`bio_type` on disk)
/// * `bio_hash` - SHA-256 fingerprint of the enrollment template
/// * `enrollment_date` - When the user was enrolled
/// * `access_attempts` - Authentication attempts that reached matching
/// * `original_biometric` - Enrollment template; absent on legacy records
///
/// The template and its fingerprint are set together at enrollment and
/// never change afterwards, so `bio_hash` always describes
/// `original_biometric` for records created by this crate.
///
/// # Examples
///
/// ```
/// use biogate_core::{BiometricModality, Template};
/// use biogate_storage::models::UserRecord;
/// use chrono::NaiveDate;
///
/// let enrolled = NaiveDate::from_ymd_opt(2024, 1, 2)
///     .and_then(|d| d.and_hms_opt(3, 4, 5))
///     .unwrap();
/// let template = Template::new(vec![0.5; 10]);
/// let user = UserRecord::enroll("Ada", BiometricModality::Face, template, enrolled);
///
/// assert!(user.template().is_some());
/// assert!(user.template_intact());
/// assert_eq!(user.bio_hash.len(), 64);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserRecord {
    pub name: String,

    #[serde(rename = "bio_type")]
    pub modality: BiometricModality,

    pub bio_hash: String,

    #[serde(with = "super::timestamp")]
    pub enrollment_date: NaiveDateTime,

    #[serde(default)]
    pub access_attempts: u64,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    original_biometric: Option<Template>,
}

impl UserRecord {
    /// Create a record for a fresh enrollment, fingerprinting `template`.
    pub fn enroll(
        name: impl Into<String>,
        modality: BiometricModality,
        template: Template,
        enrollment_date: NaiveDateTime,
    ) -> Self {
        Self {
            name: name.into(),
            modality,
            bio_hash: TemplateGenerator::fingerprint(&template),
            enrollment_date,
            access_attempts: 0,
            original_biometric: Some(template),
        }
    }

    /// Create a record without a stored template.
    ///
    /// Such records authenticate through the legacy gate-only path.
    pub fn legacy(
        name: impl Into<String>,
        modality: BiometricModality,
        bio_hash: impl Into<String>,
        enrollment_date: NaiveDateTime,
    ) -> Self {
        Self {
            name: name.into(),
            modality,
            bio_hash: bio_hash.into(),
            enrollment_date,
            access_attempts: 0,
            original_biometric: None,
        }
    }

    /// Enrollment template, if one was stored.
    #[must_use]
    pub fn template(&self) -> Option<&Template> {
        self.original_biometric.as_ref()
    }

    /// Returns `true` for records enrolled before templates were stored.
    #[must_use]
    pub fn is_legacy(&self) -> bool {
        self.original_biometric.is_none()
    }

    /// Check that `bio_hash` still fingerprints the stored template.
    ///
    /// Legacy records have nothing to check and report `true`. The
    /// comparison is constant-time over the hex digests.
    #[must_use]
    pub fn template_intact(&self) -> bool {
        match &self.original_biometric {
            Some(template) => {
                let expected = TemplateGenerator::fingerprint(template);
                expected.as_bytes().ct_eq(self.bio_hash.as_bytes()).into()
            }
            None => true,
        }
    }

    /// Count one more authentication attempt.
    pub fn record_attempt(&mut self) {
        self.access_attempts = self.access_attempts.saturating_add(1);
    }
}
