//! Property-based tests for similarity scoring and identifier generation.
//!
//! These tests use proptest to generate random templates and exclusion sets
//! and verify that the scoring and generation invariants hold for all of them.

use biogate_biometric::{MatchEngine, TemplateGenerator, random};
use biogate_core::{DeviceId, UserId};
use proptest::prelude::*;
use std::collections::HashSet;

/// Strategy for generating templates with features in the unit interval.
fn unit_template(len: usize) -> impl Strategy<Value = Vec<f64>> {
    prop::collection::vec(0.0f64..1.0, len)
}

/// Strategy for generating pairs of equal-length templates.
fn template_pair() -> impl Strategy<Value = (Vec<f64>, Vec<f64>)> {
    (1usize..=32).prop_flat_map(|len| (unit_template(len), unit_template(len)))
}

/// Strategy for generating sets of already-taken user IDs.
fn taken_user_ids() -> impl Strategy<Value = HashSet<UserId>> {
    prop::collection::hash_set(
        prop::string::string_regex("[A-Z0-9]{6}")
            .expect("Failed to create user id regex strategy")
            .prop_map(|s| UserId::new(&s).expect("regex produces valid user ids")),
        0..200,
    )
}

/// Strategy for generating sets of already-taken device IDs.
fn taken_device_ids() -> impl Strategy<Value = HashSet<DeviceId>> {
    prop::collection::hash_set(
        (1000u16..=9999).prop_map(|n| DeviceId::new(&format!("DEV{n}")).expect("valid device id")),
        0..500,
    )
}

proptest! {
    /// Property: every template matches itself perfectly.
    #[test]
    fn prop_similarity_identity(v in unit_template(10)) {
        prop_assert_eq!(MatchEngine::similarity(&v, &v), 1.0);
    }

    /// Property: similarity does not depend on argument order.
    #[test]
    fn prop_similarity_symmetric((a, b) in template_pair()) {
        prop_assert_eq!(MatchEngine::similarity(&a, &b), MatchEngine::similarity(&b, &a));
    }

    /// Property: similarity always lies in [0, 1].
    #[test]
    fn prop_similarity_bounded((a, b) in template_pair()) {
        let score = MatchEngine::similarity(&a, &b);
        prop_assert!((0.0..=1.0).contains(&score));
    }

    /// Property: vectors of different lengths never match.
    #[test]
    fn prop_similarity_length_mismatch(a in unit_template(10), b in unit_template(9)) {
        prop_assert_eq!(MatchEngine::similarity(&a, &b), 0.0);
    }

    /// Property: generated user IDs are never in the exclusion set.
    #[test]
    fn prop_user_id_not_taken(taken in taken_user_ids(), seed in any::<u64>()) {
        let mut rng = random::seeded(seed);
        let id = TemplateGenerator::generate_user_id(&mut rng, |id| taken.contains(id)).unwrap();
        prop_assert!(!taken.contains(&id));
        prop_assert_eq!(id.as_str().len(), 6);
    }

    /// Property: generated device IDs are never in the exclusion set.
    #[test]
    fn prop_device_id_not_taken(taken in taken_device_ids(), seed in any::<u64>()) {
        let mut rng = random::seeded(seed);
        let id = TemplateGenerator::generate_device_id(&mut rng, |id| taken.contains(id)).unwrap();
        prop_assert!(!taken.contains(&id));
        prop_assert!(id.as_str().starts_with("DEV"));
    }

    /// Property: fingerprints depend only on template content.
    #[test]
    fn prop_fingerprint_deterministic(seed in any::<u64>()) {
        let template = TemplateGenerator::generate_template(&mut random::seeded(seed));
        let again = TemplateGenerator::generate_template(&mut random::seeded(seed));
        prop_assert_eq!(
            TemplateGenerator::fingerprint(&template),
            TemplateGenerator::fingerprint(&again)
        );
    }
}

#[test]
fn test_device_ids_when_every_numeric_id_is_taken() {
    let taken: HashSet<DeviceId> = (1000u16..=9999)
        .map(|n| DeviceId::new(&format!("DEV{n}")).unwrap())
        .collect();
    let mut rng = random::seeded(77);

    let id = TemplateGenerator::generate_device_id(&mut rng, |id| taken.contains(id)).unwrap();
    assert!(!taken.contains(&id));
    assert_eq!(id.as_str().len(), 7);
}
