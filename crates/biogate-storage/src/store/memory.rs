//! In-memory store for tests and embedding.

use super::{DeviceMap, Store, UserMap};
use crate::{
    StatisticsTracker,
    error::StorageResult,
    models::{LogEntry, Settings},
};

/// Store that keeps everything in memory and never fails.
///
/// Counts saves so callers can check that an operation persisted.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    users: UserMap,
    devices: DeviceMap,
    log: Vec<LogEntry>,
    statistics: StatisticsTracker,
    settings: Option<Settings>,
    saves: usize,
}

impl MemoryStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of save calls made so far, across all collections.
    #[must_use]
    pub fn save_count(&self) -> usize {
        self.saves
    }
}

impl Store for MemoryStore {
    fn load_users(&self) -> StorageResult<UserMap> {
        Ok(self.users.clone())
    }

    fn save_users(&mut self, users: &UserMap) -> StorageResult<()> {
        self.users = users.clone();
        self.saves += 1;
        Ok(())
    }

    fn load_devices(&self) -> StorageResult<DeviceMap> {
        Ok(self.devices.clone())
    }

    fn save_devices(&mut self, devices: &DeviceMap) -> StorageResult<()> {
        self.devices = devices.clone();
        self.saves += 1;
        Ok(())
    }

    fn load_log(&self) -> StorageResult<Vec<LogEntry>> {
        Ok(self.log.clone())
    }

    fn append_log(&mut self, entry: &LogEntry) -> StorageResult<()> {
        self.log.push(entry.clone());
        self.saves += 1;
        Ok(())
    }

    fn save_log(&mut self, entries: &[LogEntry]) -> StorageResult<()> {
        self.log = entries.to_vec();
        self.saves += 1;
        Ok(())
    }

    fn load_statistics(&self) -> StorageResult<StatisticsTracker> {
        Ok(self.statistics.clone())
    }

    fn save_statistics(&mut self, stats: &StatisticsTracker) -> StorageResult<()> {
        self.statistics = stats.clone();
        self.saves += 1;
        Ok(())
    }

    fn load_settings(&self) -> StorageResult<Option<Settings>> {
        Ok(self.settings)
    }

    fn save_settings(&mut self, settings: &Settings) -> StorageResult<()> {
        self.settings = Some(*settings);
        self.saves += 1;
        Ok(())
    }

    fn clear_all(&mut self) -> StorageResult<()> {
        self.users.clear();
        self.devices.clear();
        self.log.clear();
        self.statistics.reset();
        self.saves += 1;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_starts_empty_and_counts_saves() {
        let mut store = MemoryStore::new();
        assert!(store.load_users().unwrap().is_empty());
        assert!(store.load_log().unwrap().is_empty());
        assert!(store.load_settings().unwrap().is_none());

        store.save_settings(&Settings::default()).unwrap();
        store.clear_all().unwrap();
        assert_eq!(store.save_count(), 2);
        assert!(store.load_settings().unwrap().is_some());
    }
}
