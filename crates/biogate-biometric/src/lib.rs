//! Biometric decision pipeline for the BioGate access control simulation.
//!
//! This crate holds the pieces of BioGate that make decisions. None of them
//! touch storage:
//!
//! - [`TemplateGenerator`] - synthetic templates, fingerprints and identifiers
//! - [`MatchEngine`] - normalized inverse Euclidean similarity
//! - [`AuthenticationEngine`] - threshold plus probabilistic accept gate
//! - [`AttackSimulator`] - attack category selection and detection roll
//!
//! # Randomness
//!
//! Every operation that needs randomness takes the source as an explicit
//! `&mut R where R: rand::Rng` argument. Production code passes an
//! entropy-seeded [`rand::rngs::StdRng`]; tests pass [`random::seeded`] so
//! accept/reject and detect/miss outcomes are reproducible.
//!
//! # Examples
//!
//! ```
//! use biogate_biometric::{AuthenticationEngine, MatchEngine, TemplateGenerator, random};
//!
//! let mut rng = random::seeded(7);
//! let stored = TemplateGenerator::generate_template(&mut rng);
//!
//! // A template always matches itself perfectly
//! assert_eq!(MatchEngine::similarity(stored.as_slice(), stored.as_slice()), 1.0);
//!
//! // With a zero threshold and certain success, a self-match is always accepted
//! let engine = AuthenticationEngine::new(0.0, 1.0).unwrap();
//! let decision = engine.authenticate(Some(&stored), &stored, false, &mut rng);
//! assert!(decision.accepted);
//! ```

pub mod attack;
pub mod engine;
pub mod matching;
pub mod random;
pub mod template;

pub use attack::{AttackKind, AttackReport, AttackSimulator};
pub use engine::{AuthDecision, AuthenticationEngine, MatchPath};
pub use matching::MatchEngine;
pub use template::TemplateGenerator;
