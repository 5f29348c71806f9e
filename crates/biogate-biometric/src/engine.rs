//! Accept/reject decisions for authentication attempts.
//!
//! An attempt is accepted when the sample template is similar enough to the
//! stored template *and* a probabilistic gate passes. The gate models
//! sensor and environmental noise: even a perfect match is granted only
//! with probability `success_rate`.
//!
//! # Legacy Records
//!
//! Users enrolled before templates were stored have no template to match
//! against. For those records the decision falls back to the gate alone
//! (never granting an attack attempt) and reports a score of 0.0. This
//! path is kept so previously persisted records remain usable.

use crate::{matching::MatchEngine, random};
use biogate_core::{
    Result, Template,
    constants::{DEFAULT_AUTH_SUCCESS_RATE, DEFAULT_MATCH_THRESHOLD},
    validation::validate_rate,
};
use rand::Rng;
use serde::{Deserialize, Serialize};

/// Which decision path produced an [`AuthDecision`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MatchPath {
    /// Stored template compared against the sample.
    Template,
    /// No stored template; gate-only legacy decision.
    Legacy,
}

/// Outcome of a single authentication decision.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AuthDecision {
    pub accepted: bool,
    /// Similarity score, 0.0 on the legacy path.
    pub score: f64,
    pub path: MatchPath,
}

/// Threshold plus probabilistic gate.
///
/// # Examples
///
/// ```
/// use biogate_biometric::{AuthenticationEngine, TemplateGenerator, random};
///
/// let mut engine = AuthenticationEngine::default();
/// assert_eq!(engine.threshold(), 0.6);
/// assert_eq!(engine.success_rate(), 0.8);
///
/// // Rates outside [0, 1] are rejected rather than clamped
/// assert!(engine.set_threshold(1.2).is_err());
/// assert_eq!(engine.threshold(), 0.6);
///
/// engine.set_success_rate(0.0).unwrap();
/// let mut rng = random::seeded(1);
/// let template = TemplateGenerator::generate_template(&mut rng);
/// let decision = engine.authenticate(Some(&template), &template, false, &mut rng);
/// assert!(!decision.accepted);
/// assert_eq!(decision.score, 1.0);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AuthenticationEngine {
    threshold: f64,
    success_rate: f64,
}

impl Default for AuthenticationEngine {
    fn default() -> Self {
        Self {
            threshold: DEFAULT_MATCH_THRESHOLD,
            success_rate: DEFAULT_AUTH_SUCCESS_RATE,
        }
    }
}

impl AuthenticationEngine {
    /// Create an engine with the given threshold and success rate.
    ///
    /// # Errors
    /// Returns `Error::Validation` if either value is outside `[0, 1]`.
    pub fn new(threshold: f64, success_rate: f64) -> Result<Self> {
        Ok(Self {
            threshold: validate_rate(threshold, "Biometric match threshold")?,
            success_rate: validate_rate(success_rate, "Authentication success rate")?,
        })
    }

    /// Minimum similarity an attempt needs to be considered.
    #[must_use]
    pub fn threshold(&self) -> f64 {
        self.threshold
    }

    /// Probability that a qualifying attempt is granted.
    #[must_use]
    pub fn success_rate(&self) -> f64 {
        self.success_rate
    }

    /// Set the match threshold.
    ///
    /// # Errors
    /// Returns `Error::Validation` if `threshold` is outside `[0, 1]`; the
    /// current value is left unchanged.
    pub fn set_threshold(&mut self, threshold: f64) -> Result<()> {
        self.threshold = validate_rate(threshold, "Biometric match threshold")?;
        Ok(())
    }

    /// Set the success rate.
    ///
    /// # Errors
    /// Returns `Error::Validation` if `rate` is outside `[0, 1]`; the
    /// current value is left unchanged.
    pub fn set_success_rate(&mut self, rate: f64) -> Result<()> {
        self.success_rate = validate_rate(rate, "Authentication success rate")?;
        Ok(())
    }

    /// Decide an authentication attempt.
    ///
    /// With a stored template: `accepted = score >= threshold && draw < success_rate`.
    /// Without one (legacy record): `accepted = !is_attack && draw < success_rate`
    /// and the score is 0.0.
    ///
    /// Consumes exactly one draw from `rng` on either path.
    pub fn authenticate<R: Rng>(
        &self,
        stored: Option<&Template>,
        sample: &Template,
        is_attack: bool,
        rng: &mut R,
    ) -> AuthDecision {
        let gate_open = random::unit(rng) < self.success_rate;

        match stored {
            Some(stored) => {
                let score = MatchEngine::similarity(stored.as_slice(), sample.as_slice());
                AuthDecision {
                    accepted: score >= self.threshold && gate_open,
                    score,
                    path: MatchPath::Template,
                }
            }
            None => AuthDecision {
                accepted: !is_attack && gate_open,
                score: 0.0,
                path: MatchPath::Legacy,
            },
        }
    }
}
