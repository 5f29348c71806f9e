//! The BioGate orchestrator.
//!
//! [`BioGate`] owns the in-memory users, devices, event log and counters,
//! a randomness source, and a [`Store`]. Every top-level operation takes
//! `&mut self`, mutates in memory, and saves through the store before it
//! returns.
//!
//! # Authentication Flow
//!
//! 1. **Format check**: malformed IDs are rejected with a validation error
//!    and counted under `malformed_authentications`; nothing is logged
//! 2. **User lookup**: unknown user → Failed / "User not found"
//! 3. **Device lookup**: unknown device → Failed / "Device not found"
//! 4. **Attempt count**: the user's `access_attempts` is incremented
//! 5. **Device recovery**: an Under Attack device is reset to Active
//! 6. **Attack branch**: when requested, the attack simulator decides
//!    Blocked or Attack and no matching happens
//! 7. **Matching**: a fresh sample is scored against the stored template
//!    and the probabilistic gate decides Success or Failed
//!
//! # Randomness
//!
//! A normal attempt draws 10 values for the sample and then 1 for the gate.
//! An attack draws 1 value for the kind and then 1 for detection.
//!
//! # Persistence
//!
//! Operations change the in-memory state first and then write users,
//! devices, the log and statistics from it. If any write fails the
//! in-memory state is rolled back to where the operation started, so a
//! failed call leaves nothing half-applied in memory.

use crate::{
    config::{BioGateConfig, CorruptionPolicy},
    outcome::{AuthOutcome, ClearedData, Enrollment, FailureReason},
    rate::RateKind,
    summary::StatisticsSummary,
};
use biogate_biometric::{AttackSimulator, AuthenticationEngine, TemplateGenerator};
use biogate_core::{
    AccessResult, BiometricModality, DeviceId, Error, Result, UserId,
    constants::{ATTACKER_ACTOR, CLEAR_ALL_CONFIRMATION, SYSTEM_ACTOR},
    validation::validate_name,
};
use biogate_storage::{
    DeviceMap, DeviceRecord, EventLog, JsonFileStore, LogEntry, LogFilter, LogNotes, Page,
    Settings, StatisticsTracker, Store, StorageResult, UserMap, UserRecord,
    models::timestamp,
    paginate,
    statistics::counters,
};
use rand::RngCore;
use std::collections::BTreeMap;
use tracing::{debug, info, warn};

/// Biometric access gate over a store and a randomness source.
///
/// # Examples
///
/// ```
/// use biogate_biometric::random;
/// use biogate_core::BiometricModality;
/// use biogate_service::{BioGate, CorruptionPolicy};
/// use biogate_storage::{MemoryStore, Settings};
///
/// let mut gate = BioGate::open(
///     MemoryStore::new(),
///     random::seeded(42),
///     CorruptionPolicy::Reset,
///     Settings::default(),
/// )
/// .unwrap();
///
/// let enrollment = gate.enroll("Alice", BiometricModality::Face).unwrap();
/// let outcome = gate
///     .authenticate(enrollment.user_id.as_str(), enrollment.device_id.as_str(), false)
///     .unwrap();
///
/// let text = outcome.to_string();
/// assert!(text.starts_with("SUCCESS") || text.starts_with("FAILED"));
/// ```
#[derive(Debug)]
pub struct BioGate<S: Store, R: RngCore> {
    store: S,
    rng: R,
    policy: CorruptionPolicy,
    users: UserMap,
    devices: DeviceMap,
    log: EventLog,
    statistics: StatisticsTracker,
    engine: AuthenticationEngine,
    simulator: AttackSimulator,
}

impl<R: RngCore> BioGate<JsonFileStore, R> {
    /// Open the JSON data directory named by `config`.
    ///
    /// # Errors
    /// Returns `Error::Validation` for an invalid configuration and
    /// `Error::Persistence` if the data directory is unusable.
    pub fn from_config(config: &BioGateConfig, rng: R) -> Result<Self> {
        config
            .validate()
            .map_err(|e| Error::validation(e.to_string()))?;
        let store = JsonFileStore::open(&config.data_dir)?;
        Self::open(store, rng, config.corruption_policy, config.defaults)
    }
}

impl<S: Store, R: RngCore> BioGate<S, R> {
    /// Load all state from `store`.
    ///
    /// `defaults` supplies the rates until settings have been saved.
    /// Unreadable files are recovered according to `policy`.
    ///
    /// # Errors
    /// Returns `Error::Validation` if `defaults` holds an out-of-range rate,
    /// or `Error::Persistence` if a `Reset` rewrite fails.
    pub fn open(store: S, rng: R, policy: CorruptionPolicy, defaults: Settings) -> Result<Self> {
        defaults.validate()?;

        let mut gate = Self {
            store,
            rng,
            policy,
            users: UserMap::new(),
            devices: DeviceMap::new(),
            log: EventLog::new(),
            statistics: StatisticsTracker::new(),
            engine: AuthenticationEngine::new(
                defaults.biometric_threshold,
                defaults.auth_success_rate,
            )?,
            simulator: AttackSimulator::new(defaults.attack_detection_rate)?,
        };
        gate.reload()?;

        info!(
            "Loaded {} users, {} devices, {} log entries",
            gate.users.len(),
            gate.devices.len(),
            gate.log.len()
        );
        Ok(gate)
    }

    /// Re-read every collection from the store.
    ///
    /// A file that cannot be decoded is handled by the corruption policy.
    /// A file that cannot be read at all keeps the current in-memory state
    /// and is never rewritten here.
    ///
    /// # Errors
    /// Returns `Error::Persistence` if a `Reset` rewrite fails.
    pub fn reload(&mut self) -> Result<()> {
        let policy = self.policy;

        if recover(policy, "users", self.store.load_users(), &mut self.users) {
            self.store.save_users(&self.users)?;
        }

        if recover(policy, "devices", self.store.load_devices(), &mut self.devices) {
            self.store.save_devices(&self.devices)?;
        }

        let mut entries = self.log.entries().to_vec();
        if recover(policy, "log", self.store.load_log(), &mut entries) {
            self.store.save_log(&entries)?;
        }
        self.log = EventLog::from_entries(entries);

        if recover(
            policy,
            "statistics",
            self.store.load_statistics(),
            &mut self.statistics,
        ) {
            self.store.save_statistics(&self.statistics)?;
        }

        let mut saved = None;
        if recover(policy, "settings", self.store.load_settings(), &mut saved) {
            self.store.save_settings(&self.settings())?;
        }
        if let Some(settings) = saved {
            self.apply_settings(settings);
        }

        Ok(())
    }

    // ---------------------------------------------------------------------
    // Enrollment and authentication
    // ---------------------------------------------------------------------

    /// Enroll a new user together with a fresh device.
    ///
    /// # Errors
    /// Returns `Error::Validation` for an empty name,
    /// `Error::InvariantViolation` if no free identifier can be found, or
    /// `Error::Persistence` if saving fails.
    pub fn enroll(&mut self, name: &str, modality: BiometricModality) -> Result<Enrollment> {
        let name = validate_name(name)?;

        let enrollment = self.transaction(|gate| {
            let user_id = TemplateGenerator::generate_user_id(&mut gate.rng, |id| {
                gate.users.contains_key(id)
            })?;
            let device_id = TemplateGenerator::generate_device_id(&mut gate.rng, |id| {
                gate.devices.contains_key(id)
            })?;

            gate.devices
                .insert(device_id.clone(), DeviceRecord::register(&device_id));

            let template = TemplateGenerator::generate_template(&mut gate.rng);
            gate.users.insert(
                user_id.clone(),
                UserRecord::enroll(name.clone(), modality, template, timestamp::now()),
            );

            gate.record(
                user_id.as_str(),
                device_id.as_str(),
                AccessResult::Enrolled,
                LogNotes::enrolled(modality),
            );
            gate.statistics.increment(counters::TOTAL_ENROLLMENTS);
            gate.statistics.increment(modality.enrollment_counter());

            Ok(Enrollment {
                name,
                user_id,
                device_id,
            })
        })?;

        info!(
            "Enrolled {} as {} on {} ({})",
            enrollment.name, enrollment.user_id, enrollment.device_id, modality
        );
        Ok(enrollment)
    }

    /// Authenticate a user on a device, or simulate an attack through them.
    ///
    /// Unknown users and devices are not errors: they are logged as Failed
    /// and reported through [`AuthOutcome::Failed`].
    ///
    /// # Errors
    /// Returns `Error::Validation` if either ID is malformed, or
    /// `Error::Persistence` if saving fails.
    pub fn authenticate(
        &mut self,
        user_id: &str,
        device_id: &str,
        simulate_attack: bool,
    ) -> Result<AuthOutcome> {
        let ids = UserId::new(user_id).and_then(|user| Ok((user, DeviceId::new(device_id)?)));
        let (user_id, device_id) = match ids {
            Ok(ids) => ids,
            Err(err) => {
                self.transaction(|gate| {
                    gate.statistics.increment(counters::MALFORMED_AUTHENTICATIONS);
                    Ok(())
                })?;
                debug!("Rejected malformed authentication request: {}", err);
                return Err(err);
            }
        };

        self.transaction(|gate| gate.attempt(&user_id, &device_id, simulate_attack))
    }

    /// Simulate an attack on a device without a user behind it.
    ///
    /// Detected attacks are logged under `ATTACKER`.
    ///
    /// # Errors
    /// Returns `Error::Validation` for a malformed device ID,
    /// `Error::NotFound` for an unknown device (nothing is logged), or
    /// `Error::Persistence` if saving fails.
    pub fn simulate_attack(&mut self, device_id: &str) -> Result<AuthOutcome> {
        let device_id = DeviceId::new(device_id)?;
        if !self.devices.contains_key(&device_id) {
            return Err(Error::not_found("Device", device_id.as_str()));
        }

        self.transaction(|gate| {
            gate.restore_device(&device_id)?;
            gate.run_attack(ATTACKER_ACTOR, &device_id)
        })
    }

    fn attempt(
        &mut self,
        user_id: &UserId,
        device_id: &DeviceId,
        simulate_attack: bool,
    ) -> Result<AuthOutcome> {
        if !self.users.contains_key(user_id) {
            return Ok(self.refuse(user_id, device_id, FailureReason::UserNotFound));
        }
        if !self.devices.contains_key(device_id) {
            return Ok(self.refuse(user_id, device_id, FailureReason::DeviceNotFound));
        }

        let user = self.user_mut(user_id)?;
        user.record_attempt();
        if !user.template_intact() {
            warn!("Stored template for {} does not match its fingerprint", user_id);
        }

        self.restore_device(device_id)?;

        if simulate_attack {
            self.run_attack(user_id.as_str(), device_id)
        } else {
            self.run_match(user_id, device_id)
        }
    }

    fn refuse(
        &mut self,
        user_id: &UserId,
        device_id: &DeviceId,
        reason: FailureReason,
    ) -> AuthOutcome {
        let note = match reason {
            FailureReason::UserNotFound => LogNotes::USER_NOT_FOUND.to_string(),
            FailureReason::DeviceNotFound => LogNotes::DEVICE_NOT_FOUND.to_string(),
            FailureReason::Mismatch { score } => LogNotes::match_failure(score),
        };
        self.record(user_id.as_str(), device_id.as_str(), AccessResult::Failed, note);
        self.statistics.increment(counters::FAILED_AUTHENTICATIONS);

        info!("Refused {} on {}: {:?}", user_id, device_id, reason);
        AuthOutcome::Failed(reason)
    }

    fn run_match(&mut self, user_id: &UserId, device_id: &DeviceId) -> Result<AuthOutcome> {
        let sample = TemplateGenerator::generate_template(&mut self.rng);
        let user = self
            .users
            .get(user_id)
            .ok_or_else(|| vanished("user", user_id))?;
        let decision = self
            .engine
            .authenticate(user.template(), &sample, false, &mut self.rng);
        let user_name = user.name.clone();

        debug!(
            "Matched {} on {}: score {:.4}, path {:?}",
            user_id, device_id, decision.score, decision.path
        );

        if !decision.accepted {
            return Ok(self.refuse(
                user_id,
                device_id,
                FailureReason::Mismatch {
                    score: decision.score,
                },
            ));
        }

        let device = self.device_mut(device_id)?;
        device.restore();
        let device_name = device.name.clone();

        self.record(
            user_id.as_str(),
            device_id.as_str(),
            AccessResult::Success,
            LogNotes::match_success(decision.score),
        );
        self.statistics
            .increment(counters::SUCCESSFUL_AUTHENTICATIONS);

        info!("Granted {} on {}", user_id, device_id);
        Ok(AuthOutcome::Success {
            user_name,
            device_name,
            score: decision.score,
        })
    }

    fn run_attack(&mut self, actor: &str, device_id: &DeviceId) -> Result<AuthOutcome> {
        let device_name = self.device(device_id)?.name.clone();
        let report = self.simulator.simulate(&device_name, &mut self.rng);

        if report.detected {
            self.record(
                actor,
                device_id.as_str(),
                AccessResult::Blocked,
                LogNotes::ATTACK_DETECTED,
            );
            self.statistics.increment(counters::ATTACKS_BLOCKED);
            info!("Blocked {} on {}", report.kind, device_id);
            return Ok(AuthOutcome::Blocked(report));
        }

        self.device_mut(device_id)?.mark_under_attack();
        self.record(
            SYSTEM_ACTOR,
            device_id.as_str(),
            AccessResult::Attack,
            LogNotes::attack(report.kind, &device_name),
        );
        self.statistics.increment(counters::ATTACKS_SUCCEEDED);
        warn!("{} on {} went undetected", report.kind, device_id);
        Ok(AuthOutcome::Compromised(report))
    }

    fn restore_device(&mut self, device_id: &DeviceId) -> Result<()> {
        if self.device_mut(device_id)?.restore() {
            info!("Device {} status reset to Active", device_id);
        }
        Ok(())
    }

    // ---------------------------------------------------------------------
    // Administration
    // ---------------------------------------------------------------------

    /// Set one tunable rate and save the settings.
    ///
    /// # Errors
    /// Returns `Error::Validation` if `value` is outside `[0, 1]`, or
    /// `Error::Persistence` if saving fails; nothing changes in either case.
    pub fn configure(&mut self, rate: RateKind, value: f64) -> Result<Settings> {
        let (engine, simulator) = (self.engine, self.simulator);
        match rate {
            RateKind::AuthSuccessRate => self.engine.set_success_rate(value)?,
            RateKind::AttackDetectionRate => self.simulator.set_detection_rate(value)?,
            RateKind::BiometricThreshold => self.engine.set_threshold(value)?,
        }

        let settings = self.settings();
        if let Err(e) = self.store.save_settings(&settings) {
            self.engine = engine;
            self.simulator = simulator;
            return Err(e.into());
        }
        info!("Set {} to {}", rate, value);
        Ok(settings)
    }

    /// Return every Under Attack device to Active.
    ///
    /// Saves only when at least one device changed.
    ///
    /// # Errors
    /// Returns `Error::Persistence` if saving fails.
    pub fn reset_device_statuses(&mut self) -> Result<usize> {
        let before = self.devices.clone();
        let restored = self
            .devices
            .values_mut()
            .map(DeviceRecord::restore)
            .filter(|changed| *changed)
            .count();

        if restored > 0 {
            if let Err(e) = self.store.save_devices(&self.devices) {
                self.devices = before;
                return Err(e.into());
            }
            info!("Reset {} devices to Active", restored);
        }
        Ok(restored)
    }

    /// Delete users, devices, log and statistics. Settings are kept.
    ///
    /// # Errors
    /// Returns `Error::Validation` unless `confirmation` is exactly
    /// `DELETE` (surrounding whitespace ignored); nothing is removed then.
    pub fn clear_all(&mut self, confirmation: &str) -> Result<ClearedData> {
        if confirmation.trim() != CLEAR_ALL_CONFIRMATION {
            return Err(Error::validation(format!(
                "Type {CLEAR_ALL_CONFIRMATION} to confirm; no data was cleared"
            )));
        }

        let cleared = ClearedData {
            users: self.users.len(),
            devices: self.devices.len(),
            log_entries: self.log.len(),
        };

        self.store.clear_all()?;
        self.users.clear();
        self.devices.clear();
        self.log.clear();
        self.statistics.reset();

        warn!(
            "Cleared {} users, {} devices, {} log entries",
            cleared.users, cleared.devices, cleared.log_entries
        );
        Ok(cleared)
    }

    // ---------------------------------------------------------------------
    // Queries
    // ---------------------------------------------------------------------

    /// All users in ID order.
    #[must_use]
    pub fn list_users(&self) -> Vec<(&UserId, &UserRecord)> {
        self.users.iter().collect()
    }

    /// All devices in ID order.
    #[must_use]
    pub fn list_devices(&self) -> Vec<(&DeviceId, &DeviceRecord)> {
        self.devices.iter().collect()
    }

    /// Users whose name contains `term`, ignoring case.
    ///
    /// # Errors
    /// Returns `Error::Validation` if `term` is blank.
    pub fn search_users(&self, term: &str) -> Result<Vec<(&UserId, &UserRecord)>> {
        let needle = term.trim().to_lowercase();
        if needle.is_empty() {
            return Err(Error::validation("Search term cannot be empty"));
        }

        Ok(self
            .users
            .iter()
            .filter(|(_, user)| user.name.to_lowercase().contains(&needle))
            .collect())
    }

    /// One page of log entries matching `filter`, oldest first.
    ///
    /// # Errors
    /// Returns `Error::Validation` if `page_size` is zero.
    pub fn show_logs(
        &self,
        filter: &LogFilter,
        page: usize,
        page_size: usize,
    ) -> Result<Page<&LogEntry>> {
        paginate(&self.log.query(filter), page, page_size)
    }

    /// Totals for the statistics view.
    #[must_use]
    pub fn statistics_summary(&self) -> StatisticsSummary {
        let mut users_by_modality = BTreeMap::new();
        for user in self.users.values() {
            *users_by_modality.entry(user.modality).or_insert(0) += 1;
        }

        StatisticsSummary {
            users: self.users.len(),
            users_by_modality,
            devices: self.devices.len(),
            active_devices: self
                .devices
                .values()
                .filter(|d| d.status.is_active())
                .count(),
            successful_authentications: self
                .statistics
                .get(counters::SUCCESSFUL_AUTHENTICATIONS),
            failed_authentications: self.statistics.get(counters::FAILED_AUTHENTICATIONS),
            malformed_authentications: self.statistics.get(counters::MALFORMED_AUTHENTICATIONS),
            attacks_blocked: self.statistics.get(counters::ATTACKS_BLOCKED),
            attacks_succeeded: self.statistics.get(counters::ATTACKS_SUCCEEDED),
            enrollments: self.statistics.get(counters::TOTAL_ENROLLMENTS),
            log_entries: self.log.len(),
            settings: self.settings(),
        }
    }

    /// Current rates.
    #[must_use]
    pub fn settings(&self) -> Settings {
        Settings {
            auth_success_rate: self.engine.success_rate(),
            attack_detection_rate: self.simulator.detection_rate(),
            biometric_threshold: self.engine.threshold(),
        }
    }

    #[must_use]
    pub fn users(&self) -> &UserMap {
        &self.users
    }

    #[must_use]
    pub fn devices(&self) -> &DeviceMap {
        &self.devices
    }

    #[must_use]
    pub fn log(&self) -> &EventLog {
        &self.log
    }

    #[must_use]
    pub fn statistics(&self) -> &StatisticsTracker {
        &self.statistics
    }

    #[must_use]
    pub fn store(&self) -> &S {
        &self.store
    }

    // ---------------------------------------------------------------------
    // Internals
    // ---------------------------------------------------------------------

    fn apply_settings(&mut self, settings: Settings) {
        // Each rate is validated on its own so one bad value keeps the others
        if let Err(e) = self.engine.set_success_rate(settings.auth_success_rate) {
            warn!("Ignoring saved success rate: {}", e);
        }
        if let Err(e) = self.engine.set_threshold(settings.biometric_threshold) {
            warn!("Ignoring saved threshold: {}", e);
        }
        if let Err(e) = self.simulator.set_detection_rate(settings.attack_detection_rate) {
            warn!("Ignoring saved detection rate: {}", e);
        }
    }

    fn record(&mut self, user: &str, device: &str, result: AccessResult, notes: impl Into<String>) {
        self.log
            .append(LogEntry::new(timestamp::now(), user, device, result, notes));
    }

    /// Run `op` against the in-memory state and persist the result.
    ///
    /// On any error the in-memory state goes back to its starting point and
    /// the store is rewritten from it where possible.
    fn transaction<T>(&mut self, op: impl FnOnce(&mut Self) -> Result<T>) -> Result<T> {
        let snapshot = Snapshot {
            users: self.users.clone(),
            devices: self.devices.clone(),
            log_len: self.log.len(),
            statistics: self.statistics.clone(),
        };

        let result = op(self).and_then(|value| {
            self.persist()?;
            Ok(value)
        });

        if let Err(e) = &result {
            warn!("Operation failed, rolling back: {}", e);
            self.users = snapshot.users;
            self.devices = snapshot.devices;
            self.log.truncate(snapshot.log_len);
            self.statistics = snapshot.statistics;
            if let Err(e) = self.persist() {
                warn!("Could not rewrite data files after rollback: {}", e);
            }
        }
        result
    }

    fn persist(&mut self) -> Result<()> {
        self.store.save_log(self.log.entries())?;
        self.store.save_users(&self.users)?;
        self.store.save_devices(&self.devices)?;
        self.store.save_statistics(&self.statistics)?;
        Ok(())
    }

    fn user_mut(&mut self, id: &UserId) -> Result<&mut UserRecord> {
        self.users.get_mut(id).ok_or_else(|| vanished("user", id))
    }

    fn device(&self, id: &DeviceId) -> Result<&DeviceRecord> {
        self.devices.get(id).ok_or_else(|| vanished("device", id))
    }

    fn device_mut(&mut self, id: &DeviceId) -> Result<&mut DeviceRecord> {
        self.devices.get_mut(id).ok_or_else(|| vanished("device", id))
    }
}

/// In-memory state captured before an operation runs.
struct Snapshot {
    users: UserMap,
    devices: DeviceMap,
    log_len: usize,
    statistics: StatisticsTracker,
}

fn vanished(entity: &str, id: impl std::fmt::Display) -> Error {
    Error::InvariantViolation(format!("{entity} {id} vanished mid-operation"))
}

/// Apply a load result to `slot`.
///
/// Returns `true` when the caller must write `slot` back to replace a
/// damaged file. Only undecodable files are reset; read failures keep the
/// current state so a healthy file is never overwritten with empty data.
fn recover<T: Default>(
    policy: CorruptionPolicy,
    what: &str,
    loaded: StorageResult<T>,
    slot: &mut T,
) -> bool {
    match loaded {
        Ok(value) => {
            *slot = value;
            false
        }
        Err(e) if e.is_corruption() && policy == CorruptionPolicy::Reset => {
            warn!("Could not load {}: {}. Resetting to empty", what, e);
            *slot = T::default();
            true
        }
        Err(e) => {
            warn!("Could not load {}: {}. Keeping current state", what, e);
            false
        }
    }
}
