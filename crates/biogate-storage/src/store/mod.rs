//! Persistence collaborator.
//!
//! [`Store`] is the seam between the service layer and durable state. The
//! service owns the in-memory records and calls `save_*` after every
//! mutation. Loads report missing data as empty collections and damaged
//! data as [`StorageError::Corrupt`](crate::StorageError::Corrupt), leaving
//! recovery to the caller.

pub mod json;
pub mod memory;

use crate::{
    StorageResult, StatisticsTracker,
    models::{DeviceRecord, LogEntry, Settings, UserRecord},
};
use biogate_core::{DeviceId, UserId};
use std::collections::BTreeMap;

pub use json::JsonFileStore;
pub use memory::MemoryStore;

/// Users keyed by ID, iterated in ID order.
pub type UserMap = BTreeMap<UserId, UserRecord>;

/// Devices keyed by ID, iterated in ID order.
pub type DeviceMap = BTreeMap<DeviceId, DeviceRecord>;

/// Durable storage for every piece of BioGate state.
///
/// Implementations must treat absent data as empty (or `None` for
/// settings) rather than as an error.
pub trait Store {
    /// Load all users.
    fn load_users(&self) -> StorageResult<UserMap>;

    /// Replace all users.
    fn save_users(&mut self, users: &UserMap) -> StorageResult<()>;

    /// Load all devices.
    fn load_devices(&self) -> StorageResult<DeviceMap>;

    /// Replace all devices.
    fn save_devices(&mut self, devices: &DeviceMap) -> StorageResult<()>;

    /// Load the event log, oldest entry first.
    fn load_log(&self) -> StorageResult<Vec<LogEntry>>;

    /// Persist one new entry after the existing ones.
    fn append_log(&mut self, entry: &LogEntry) -> StorageResult<()>;

    /// Replace the whole event log.
    fn save_log(&mut self, entries: &[LogEntry]) -> StorageResult<()>;

    /// Load statistics counters.
    fn load_statistics(&self) -> StorageResult<StatisticsTracker>;

    /// Replace statistics counters.
    fn save_statistics(&mut self, stats: &StatisticsTracker) -> StorageResult<()>;

    /// Load saved settings, `None` if never saved.
    fn load_settings(&self) -> StorageResult<Option<Settings>>;

    /// Replace saved settings.
    fn save_settings(&mut self, settings: &Settings) -> StorageResult<()>;

    /// Remove users, devices, log and statistics. Settings survive.
    fn clear_all(&mut self) -> StorageResult<()>;
}
