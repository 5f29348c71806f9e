//! Common test utilities for service integration tests.
//!
//! Helpers build a [`BioGate`] over a [`MemoryStore`] with a seeded
//! randomness source, so every scenario is reproducible.

#![allow(dead_code)]

use biogate_biometric::random;
use biogate_core::{AccessResult, BiometricModality};
use biogate_service::{BioGate, CorruptionPolicy, Enrollment};
use biogate_storage::{
    DeviceMap, LogEntry, MemoryStore, Settings, StatisticsTracker, StorageError, StorageResult,
    Store, UserMap,
};
use rand::rngs::StdRng;
use std::{cell::Cell, io, path::PathBuf, rc::Rc};

pub type TestGate = BioGate<MemoryStore, StdRng>;

/// Settings with explicit rates.
pub fn settings(success: f64, detection: f64, threshold: f64) -> Settings {
    Settings {
        auth_success_rate: success,
        attack_detection_rate: detection,
        biometric_threshold: threshold,
    }
}

/// Gate over an empty in-memory store.
pub fn gate(seed: u64, settings: Settings) -> TestGate {
    BioGate::open(
        MemoryStore::new(),
        random::seeded(seed),
        CorruptionPolicy::Reset,
        settings,
    )
    .expect("in-memory gate opens")
}

/// Gate with default rates.
pub fn default_gate(seed: u64) -> TestGate {
    gate(seed, Settings::default())
}

/// Enroll `name` with a Face template.
pub fn enroll(gate: &mut TestGate, name: &str) -> Enrollment {
    gate.enroll(name, BiometricModality::Face)
        .expect("enrollment succeeds")
}

/// Most recent log entry.
pub fn last_entry(gate: &TestGate) -> &LogEntry {
    gate.log().entries().last().expect("log is not empty")
}

/// Assert the newest log entry's actor, result and note prefix.
pub fn assert_last_entry(gate: &TestGate, user: &str, result: AccessResult, note_prefix: &str) {
    let entry = last_entry(gate);
    assert_eq!(entry.user, user, "unexpected actor in {entry:?}");
    assert_eq!(entry.result, result, "unexpected result in {entry:?}");
    assert!(
        entry.notes.starts_with(note_prefix),
        "note {:?} does not start with {:?}",
        entry.notes,
        note_prefix
    );
}

/// In-memory store whose writes fail while its switch is on.
#[derive(Debug, Default)]
pub struct FlakyStore {
    inner: MemoryStore,
    failing: Rc<Cell<bool>>,
}

impl FlakyStore {
    fn check(&self) -> StorageResult<()> {
        if self.failing.get() {
            return Err(StorageError::Io {
                path: PathBuf::from("flaky"),
                source: io::Error::other("disk unavailable"),
            });
        }
        Ok(())
    }
}

impl Store for FlakyStore {
    fn load_users(&self) -> StorageResult<UserMap> {
        self.inner.load_users()
    }

    fn save_users(&mut self, users: &UserMap) -> StorageResult<()> {
        self.check()?;
        self.inner.save_users(users)
    }

    fn load_devices(&self) -> StorageResult<DeviceMap> {
        self.inner.load_devices()
    }

    fn save_devices(&mut self, devices: &DeviceMap) -> StorageResult<()> {
        self.check()?;
        self.inner.save_devices(devices)
    }

    fn load_log(&self) -> StorageResult<Vec<LogEntry>> {
        self.inner.load_log()
    }

    fn append_log(&mut self, entry: &LogEntry) -> StorageResult<()> {
        self.check()?;
        self.inner.append_log(entry)
    }

    fn save_log(&mut self, entries: &[LogEntry]) -> StorageResult<()> {
        self.check()?;
        self.inner.save_log(entries)
    }

    fn load_statistics(&self) -> StorageResult<StatisticsTracker> {
        self.inner.load_statistics()
    }

    fn save_statistics(&mut self, stats: &StatisticsTracker) -> StorageResult<()> {
        self.check()?;
        self.inner.save_statistics(stats)
    }

    fn load_settings(&self) -> StorageResult<Option<Settings>> {
        self.inner.load_settings()
    }

    fn save_settings(&mut self, settings: &Settings) -> StorageResult<()> {
        self.check()?;
        self.inner.save_settings(settings)
    }

    fn clear_all(&mut self) -> StorageResult<()> {
        self.check()?;
        self.inner.clear_all()
    }
}

/// Gate over a [`FlakyStore`], plus the switch that makes its writes fail.
pub fn flaky_gate(seed: u64) -> (BioGate<FlakyStore, StdRng>, Rc<Cell<bool>>) {
    let failing = Rc::new(Cell::new(false));
    let store = FlakyStore {
        inner: MemoryStore::new(),
        failing: Rc::clone(&failing),
    };
    let gate = BioGate::open(
        store,
        random::seeded(seed),
        CorruptionPolicy::Reset,
        Settings::default(),
    )
    .expect("flaky gate opens");
    (gate, failing)
}
