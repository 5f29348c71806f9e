//! Template similarity scoring.

use biogate_core::constants::SCORE_PRECISION;

/// Scores how closely two templates agree.
///
/// The score is the inverse Euclidean distance normalized by the largest
/// distance two vectors of unit-interval features can have:
///
/// ```text
/// d     = sqrt(Σ (aᵢ - bᵢ)²)
/// score = max(0, 1 - d / sqrt(n))
/// ```
///
/// rounded to 4 decimal places.
#[derive(Debug, Clone, Copy, Default)]
pub struct MatchEngine;

impl MatchEngine {
    /// Similarity of `a` and `b` in `[0, 1]`.
    ///
    /// Returns 0.0 when the lengths differ or both vectors are empty.
    /// Symmetric, and exactly 1.0 for identical vectors.
    ///
    /// # Examples
    ///
    /// ```
    /// use biogate_biometric::MatchEngine;
    ///
    /// let a = [0.2, 0.4, 0.6];
    /// assert_eq!(MatchEngine::similarity(&a, &a), 1.0);
    /// assert_eq!(MatchEngine::similarity(&a, &[0.2, 0.4]), 0.0);
    /// assert_eq!(MatchEngine::similarity(&[0.0; 10], &[1.0; 10]), 0.0);
    /// ```
    #[must_use]
    pub fn similarity(a: &[f64], b: &[f64]) -> f64 {
        if a.len() != b.len() || a.is_empty() {
            return 0.0;
        }

        let distance = a
            .iter()
            .zip(b)
            .map(|(x, y)| (x - y).powi(2))
            .sum::<f64>()
            .sqrt();
        let max_distance = (a.len() as f64).sqrt();

        round_to((1.0 - distance / max_distance).max(0.0), SCORE_PRECISION)
    }
}

/// Round `value` to `places` decimal places.
#[must_use]
pub fn round_to(value: f64, places: i32) -> f64 {
    let scale = 10f64.powi(places);
    (value * scale).round() / scale
}
