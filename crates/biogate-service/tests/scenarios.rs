//! End-to-end scenarios for enrollment, authentication and attacks.
//!
//! Run with: cargo test --package biogate-service --test scenarios

mod common;

use biogate_biometric::{MatchEngine, TemplateGenerator, random};
use biogate_core::{AccessResult, BiometricModality, DeviceStatus, Error};
use biogate_service::{AuthOutcome, FailureReason, RateKind};
use biogate_storage::{LogFilter, Store, statistics::counters};
use common::{assert_last_entry, default_gate, enroll, gate, settings};
use rstest::rstest;

// ============================================================================
// Enrollment
// ============================================================================

#[test]
fn test_enroll_creates_user_device_and_log() {
    let mut gate = default_gate(1);
    let alice = enroll(&mut gate, "Alice");

    assert_eq!(alice.user_id.as_str().len(), 6);
    let device = alice.device_id.as_str();
    assert!(device.starts_with("DEV"));
    assert!(device[3..].chars().all(|c| c.is_ascii_digit()));

    let user = &gate.users()[&alice.user_id];
    assert_eq!(user.name, "Alice");
    assert_eq!(user.modality, BiometricModality::Face);
    assert_eq!(user.access_attempts, 0);
    assert!(user.template_intact());
    assert_eq!(user.template().map(|t| t.len()), Some(10));

    let device = &gate.devices()[&alice.device_id];
    assert_eq!(device.name, format!("IoT Device {}", alice.device_id));
    assert_eq!(device.status, DeviceStatus::Active);

    assert_last_entry(
        &gate,
        alice.user_id.as_str(),
        AccessResult::Enrolled,
        "User enrolled with Face",
    );
    assert_eq!(gate.statistics().get(counters::TOTAL_ENROLLMENTS), 1);
    assert_eq!(gate.statistics().get(counters::ENROLLMENTS_FACE), 1);
}

#[test]
fn test_enroll_persists_before_returning() {
    let mut gate = default_gate(2);
    let bob = gate.enroll("  Bob ", BiometricModality::Voice).unwrap();
    assert_eq!(bob.name, "Bob");

    let store = gate.store();
    assert!(store.load_users().unwrap().contains_key(&bob.user_id));
    assert!(store.load_devices().unwrap().contains_key(&bob.device_id));
    assert_eq!(store.load_log().unwrap().len(), 1);
    assert_eq!(
        store.load_statistics().unwrap().get(counters::ENROLLMENTS_VOICE),
        1
    );
}

#[rstest]
#[case("")]
#[case("   ")]
fn test_enroll_rejects_blank_name(#[case] name: &str) {
    let mut gate = default_gate(3);
    let err = gate.enroll(name, BiometricModality::Face).unwrap_err();
    assert!(matches!(err, Error::Validation { .. }));
    assert!(gate.users().is_empty());
    assert!(gate.log().is_empty());
}

#[test]
fn test_enrollments_get_distinct_ids() {
    let mut gate = default_gate(4);
    let ids: Vec<_> = (0..50).map(|i| enroll(&mut gate, &format!("User {i}"))).collect();
    assert_eq!(gate.users().len(), 50);
    assert_eq!(gate.devices().len(), 50);
    assert_eq!(ids.len(), 50);
}

// ============================================================================
// Authentication
// ============================================================================

#[test]
fn test_unknown_user_is_logged_failure() {
    let mut gate = default_gate(5);
    let alice = enroll(&mut gate, "Alice");
    let devices_before = gate.devices().clone();

    let outcome = gate
        .authenticate("ZZZZZZ", alice.device_id.as_str(), false)
        .unwrap();

    assert_eq!(outcome, AuthOutcome::Failed(FailureReason::UserNotFound));
    assert_eq!(outcome.to_string(), "FAILED: User not found");
    assert_last_entry(&gate, "ZZZZZZ", AccessResult::Failed, "User not found");
    assert_eq!(gate.statistics().get(counters::FAILED_AUTHENTICATIONS), 1);
    assert_eq!(gate.devices(), &devices_before);
}

#[test]
fn test_unknown_device_is_logged_failure() {
    let mut gate = default_gate(6);
    let alice = enroll(&mut gate, "Alice");

    let outcome = gate
        .authenticate(alice.user_id.as_str(), "DEV0000", false)
        .unwrap();

    assert_eq!(outcome, AuthOutcome::Failed(FailureReason::DeviceNotFound));
    assert_last_entry(
        &gate,
        alice.user_id.as_str(),
        AccessResult::Failed,
        "Device not found",
    );
    assert_eq!(gate.users()[&alice.user_id].access_attempts, 0);
}

#[rstest]
#[case("ABC", "DEV1234")]
#[case("ABC123", "XYZ1234")]
#[case("AB#123", "DEV1234")]
#[case("ABC123", "DEV12")]
fn test_malformed_ids_are_rejected_without_logging(#[case] user: &str, #[case] device: &str) {
    let mut gate = default_gate(7);
    enroll(&mut gate, "Alice");
    let log_len = gate.log().len();

    let err = gate.authenticate(user, device, false).unwrap_err();

    assert!(matches!(err, Error::Validation { .. }));
    assert_eq!(gate.log().len(), log_len);
    assert_eq!(gate.statistics().get(counters::FAILED_AUTHENTICATIONS), 0);
    assert_eq!(gate.statistics().get(counters::MALFORMED_AUTHENTICATIONS), 1);
    assert_eq!(
        gate.store()
            .load_statistics()
            .unwrap()
            .get(counters::MALFORMED_AUTHENTICATIONS),
        1
    );
}

#[test]
fn test_ids_are_normalized() {
    let mut gate = gate(8, settings(1.0, 0.7, 0.0));
    let alice = enroll(&mut gate, "Alice");

    let user = format!(" {} ", alice.user_id.as_str().to_lowercase());
    let device = alice.device_id.as_str().to_lowercase();
    let outcome = gate.authenticate(&user, &device, false).unwrap();
    assert!(outcome.is_success());
}

#[test]
fn test_seeded_success_reports_sample_similarity() {
    let seed = 2024;
    let mut gate = gate(seed, settings(1.0, 0.7, 0.0));
    let alice = enroll(&mut gate, "Alice");

    // Replay the same draws: user id, device id, enrollment template, sample
    let mut replay = random::seeded(seed);
    TemplateGenerator::generate_user_id(&mut replay, |_| false).unwrap();
    TemplateGenerator::generate_device_id(&mut replay, |_| false).unwrap();
    let stored = TemplateGenerator::generate_template(&mut replay);
    let sample = TemplateGenerator::generate_template(&mut replay);
    assert_eq!(gate.users()[&alice.user_id].template(), Some(&stored));

    let outcome = gate
        .authenticate(alice.user_id.as_str(), alice.device_id.as_str(), false)
        .unwrap();

    let expected = MatchEngine::similarity(stored.as_slice(), sample.as_slice());
    assert!(outcome.is_success());
    assert_eq!(outcome.score(), Some(expected));
    assert!(outcome.to_string().starts_with("SUCCESS: Alice authenticated on IoT Device"));
    assert_last_entry(
        &gate,
        alice.user_id.as_str(),
        AccessResult::Success,
        "Authentication successful (match: ",
    );
    assert_eq!(gate.statistics().get(counters::SUCCESSFUL_AUTHENTICATIONS), 1);
    assert_eq!(gate.users()[&alice.user_id].access_attempts, 1);
}

#[test]
fn test_closed_gate_reports_mismatch() {
    let mut gate = gate(9, settings(0.0, 0.7, 0.0));
    let alice = enroll(&mut gate, "Alice");

    let outcome = gate
        .authenticate(alice.user_id.as_str(), alice.device_id.as_str(), false)
        .unwrap();

    assert!(matches!(
        outcome,
        AuthOutcome::Failed(FailureReason::Mismatch { .. })
    ));
    assert!(outcome.to_string().starts_with("FAILED: Biometric mismatch (Match: "));
    assert_last_entry(
        &gate,
        alice.user_id.as_str(),
        AccessResult::Failed,
        "Biometric mismatch (match: ",
    );
    assert_eq!(gate.statistics().get(counters::FAILED_AUTHENTICATIONS), 1);
}

#[test]
fn test_access_attempts_count_matching_and_attacks() {
    let mut gate = default_gate(10);
    let alice = enroll(&mut gate, "Alice");
    let (user, device) = (alice.user_id.as_str(), alice.device_id.as_str());

    gate.authenticate(user, device, false).unwrap();
    gate.authenticate(user, device, true).unwrap();
    gate.authenticate(user, "DEV0000", false).unwrap();

    assert_eq!(gate.users()[&alice.user_id].access_attempts, 2);
}

// ============================================================================
// Attacks
// ============================================================================

#[test]
fn test_detected_attack_is_blocked() {
    let mut gate = gate(11, settings(0.8, 1.0, 0.6));
    let alice = enroll(&mut gate, "Alice");

    let outcome = gate
        .authenticate(alice.user_id.as_str(), alice.device_id.as_str(), true)
        .unwrap();

    assert!(matches!(outcome, AuthOutcome::Blocked(_)));
    assert!(outcome.to_string().starts_with("BLOCKED: Security attack detected!"));
    assert_eq!(gate.devices()[&alice.device_id].status, DeviceStatus::Active);
    assert_last_entry(
        &gate,
        alice.user_id.as_str(),
        AccessResult::Blocked,
        "Attack detected",
    );
    assert_eq!(
        gate.log()
            .query(&LogFilter::new().result(AccessResult::Blocked))
            .len(),
        1
    );
    assert_eq!(gate.statistics().get(counters::ATTACKS_BLOCKED), 1);
}

#[test]
fn test_undetected_attack_compromises_device_until_next_attempt() {
    let mut gate = gate(12, settings(1.0, 0.0, 0.0));
    let alice = enroll(&mut gate, "Alice");
    let (user, device) = (alice.user_id.as_str(), alice.device_id.as_str());

    let outcome = gate.authenticate(user, device, true).unwrap();

    let AuthOutcome::Compromised(report) = &outcome else {
        panic!("expected compromise, got {outcome:?}");
    };
    assert!(outcome.to_string().starts_with("ALERT: "));
    assert_eq!(
        gate.devices()[&alice.device_id].status,
        DeviceStatus::UnderAttack
    );
    let device_name = gate.devices()[&alice.device_id].name.clone();
    assert_last_entry(
        &gate,
        "SYSTEM",
        AccessResult::Attack,
        &format!("{} on {}", report.kind, device_name),
    );
    assert_eq!(gate.statistics().get(counters::ATTACKS_SUCCEEDED), 1);
    assert_eq!(
        gate.store().load_devices().unwrap()[&alice.device_id].status,
        DeviceStatus::UnderAttack
    );

    let next = gate.authenticate(user, device, false).unwrap();
    assert!(next.is_success());
    assert_eq!(gate.devices()[&alice.device_id].status, DeviceStatus::Active);
}

#[test]
fn test_attack_skips_matching() {
    // Attack path ends before matching, so neither match counter moves
    let mut gate = gate(13, settings(1.0, 1.0, 0.0));
    let alice = enroll(&mut gate, "Alice");

    gate.authenticate(alice.user_id.as_str(), alice.device_id.as_str(), true)
        .unwrap();

    assert_eq!(gate.statistics().get(counters::SUCCESSFUL_AUTHENTICATIONS), 0);
    assert_eq!(gate.statistics().get(counters::FAILED_AUTHENTICATIONS), 0);
}

#[test]
fn test_simulate_attack_by_device() {
    let mut gate = gate(14, settings(0.8, 1.0, 0.6));
    let alice = enroll(&mut gate, "Alice");

    let outcome = gate.simulate_attack(alice.device_id.as_str()).unwrap();
    assert!(matches!(outcome, AuthOutcome::Blocked(_)));
    assert_last_entry(&gate, "ATTACKER", AccessResult::Blocked, "Attack detected");

    gate.configure(RateKind::AttackDetectionRate, 0.0).unwrap();
    let outcome = gate.simulate_attack(alice.device_id.as_str()).unwrap();
    assert!(matches!(outcome, AuthOutcome::Compromised(_)));
    assert_last_entry(&gate, "SYSTEM", AccessResult::Attack, "");
    assert!(gate.devices()[&alice.device_id].status.is_under_attack());
}

#[test]
fn test_simulate_attack_on_unknown_device() {
    let mut gate = default_gate(15);
    enroll(&mut gate, "Alice");
    let log_len = gate.log().len();

    assert!(matches!(
        gate.simulate_attack("DEV0000"),
        Err(Error::NotFound { .. })
    ));
    assert!(matches!(
        gate.simulate_attack("nope"),
        Err(Error::Validation { .. })
    ));
    assert_eq!(gate.log().len(), log_len);
}

// ============================================================================
// Administration
// ============================================================================

#[test]
fn test_reset_device_statuses() {
    let mut gate = gate(16, settings(0.8, 0.0, 0.6));
    let a = enroll(&mut gate, "A");
    let b = enroll(&mut gate, "B");
    enroll(&mut gate, "C");

    gate.simulate_attack(a.device_id.as_str()).unwrap();
    gate.simulate_attack(b.device_id.as_str()).unwrap();
    assert_eq!(gate.statistics_summary().active_devices, 1);

    assert_eq!(gate.reset_device_statuses().unwrap(), 2);
    assert_eq!(gate.statistics_summary().active_devices, 3);
    assert!(
        gate.store()
            .load_devices()
            .unwrap()
            .values()
            .all(|d| d.status.is_active())
    );

    let saves = gate.store().save_count();
    assert_eq!(gate.reset_device_statuses().unwrap(), 0);
    assert_eq!(gate.store().save_count(), saves);
}

#[test]
fn test_configure_validates_and_persists() {
    let mut gate = default_gate(17);

    let err = gate.configure(RateKind::BiometricThreshold, 1.5).unwrap_err();
    assert!(matches!(err, Error::Validation { .. }));
    assert_eq!(gate.settings().biometric_threshold, 0.6);
    assert!(gate.store().load_settings().unwrap().is_none());

    let settings = gate.configure(RateKind::AuthSuccessRate, 0.25).unwrap();
    assert_eq!(settings.auth_success_rate, 0.25);
    assert_eq!(gate.store().load_settings().unwrap(), Some(settings));
}

#[test]
fn test_clear_all_requires_token() {
    let mut gate = default_gate(18);
    enroll(&mut gate, "Alice");
    gate.configure(RateKind::AuthSuccessRate, 0.5).unwrap();

    for token in ["", "delete", "yes"] {
        assert!(matches!(
            gate.clear_all(token),
            Err(Error::Validation { .. })
        ));
    }
    assert_eq!(gate.users().len(), 1);

    let cleared = gate.clear_all("DELETE").unwrap();
    assert_eq!((cleared.users, cleared.devices, cleared.log_entries), (1, 1, 1));
    assert!(gate.users().is_empty());
    assert!(gate.devices().is_empty());
    assert!(gate.log().is_empty());
    assert!(gate.statistics().is_empty());
    assert!(gate.store().load_users().unwrap().is_empty());
    assert_eq!(gate.settings().auth_success_rate, 0.5);
}

#[test]
fn test_queries() {
    let mut gate = default_gate(19);
    enroll(&mut gate, "Alice Smith");
    enroll(&mut gate, "Bob");
    gate.enroll("alicia", BiometricModality::Voice).unwrap();

    let users = gate.list_users();
    assert_eq!(users.len(), 3);
    assert!(users.windows(2).all(|w| w[0].0 < w[1].0));
    assert_eq!(gate.list_devices().len(), 3);

    let found: Vec<_> = gate
        .search_users(" ALI ")
        .unwrap()
        .into_iter()
        .map(|(_, u)| u.name.as_str())
        .collect();
    assert_eq!(found.len(), 2);
    assert!(found.contains(&"Alice Smith") && found.contains(&"alicia"));
    assert!(gate.search_users("zed").unwrap().is_empty());
    assert!(gate.search_users("  ").is_err());

    let summary = gate.statistics_summary();
    assert_eq!(summary.users, 3);
    assert_eq!(summary.users_by_modality[&BiometricModality::Face], 2);
    assert_eq!(summary.users_by_modality[&BiometricModality::Voice], 1);
    assert_eq!(summary.enrollments, 3);
    assert_eq!(summary.log_entries, 3);
    assert_eq!(summary.success_percentage(), None);
}

#[test]
fn test_show_logs_pages_and_filters() {
    let mut gate = default_gate(20);
    let alice = enroll(&mut gate, "Alice");
    for _ in 0..14 {
        gate.authenticate(alice.user_id.as_str(), alice.device_id.as_str(), false)
            .unwrap();
    }

    let all = gate.show_logs(&LogFilter::new(), 1, 10).unwrap();
    assert_eq!((all.total_items, all.total_pages), (15, 2));
    assert_eq!(all.items[0].result, AccessResult::Enrolled);

    let last = gate.show_logs(&LogFilter::new(), 9, 10).unwrap();
    assert_eq!(last.page, 2);
    assert_eq!(last.items.len(), 5);

    let enrolled = gate
        .show_logs(
            &LogFilter::new()
                .user(alice.user_id.as_str())
                .device(alice.device_id.as_str())
                .result(AccessResult::Enrolled),
            1,
            10,
        )
        .unwrap();
    assert_eq!(enrolled.total_items, 1);

    assert!(gate.show_logs(&LogFilter::new(), 1, 0).is_err());
}
