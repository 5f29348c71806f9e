//! Orchestration layer for BioGate.
//!
//! [`BioGate`] ties the biometric engines to the persisted state: it
//! enrolls users with their devices, runs authentication attempts and
//! attack simulations, keeps the security log and counters, and exposes
//! the administrative queries used by the CLI.
//!
//! Configuration lives in [`BioGateConfig`], which layers a TOML file and
//! `BIOGATE_*` environment variables over built-in defaults.
//!
//! # Examples
//!
//! ```
//! use biogate_biometric::random;
//! use biogate_core::{AccessResult, BiometricModality};
//! use biogate_service::{BioGate, CorruptionPolicy, RateKind};
//! use biogate_storage::{LogFilter, MemoryStore, Settings};
//!
//! let mut gate = BioGate::open(
//!     MemoryStore::new(),
//!     random::seeded(7),
//!     CorruptionPolicy::Reset,
//!     Settings::default(),
//! )
//! .unwrap();
//!
//! let alice = gate.enroll("Alice", BiometricModality::Voice).unwrap();
//!
//! // Every attack is caught
//! gate.configure(RateKind::AttackDetectionRate, 1.0).unwrap();
//! let outcome = gate.simulate_attack(alice.device_id.as_str()).unwrap();
//! assert!(outcome.to_string().starts_with("BLOCKED"));
//!
//! let blocked = gate
//!     .show_logs(&LogFilter::new().result(AccessResult::Blocked), 1, 10)
//!     .unwrap();
//! assert_eq!(blocked.total_items, 1);
//! ```

pub mod config;
pub mod gate;
pub mod outcome;
pub mod rate;
pub mod summary;

pub use config::{BioGateConfig, ConfigError, CorruptionPolicy, LogFormat};
pub use gate::BioGate;
pub use outcome::{AuthOutcome, ClearedData, Enrollment, FailureReason};
pub use rate::RateKind;
pub use summary::StatisticsSummary;
