//! JSON file store, one file per collection under a data directory.
//!
//! Writes go to a sibling temporary file which is then renamed over the
//! target, so a crash mid-write leaves the previous file intact.

use super::{DeviceMap, Store, UserMap};
use crate::{
    StatisticsTracker,
    error::{StorageError, StorageResult},
    models::{LogEntry, Settings},
};
use serde::{Serialize, de::DeserializeOwned};
use std::{
    fs, io,
    path::{Path, PathBuf},
};
use tracing::debug;

const USERS_FILE: &str = "users.json";
const DEVICES_FILE: &str = "devices.json";
const LOGS_FILE: &str = "logs.json";
const STATS_FILE: &str = "stats.json";
const SETTINGS_FILE: &str = "settings.json";

/// Store backed by pretty-printed JSON files.
///
/// # Examples
///
/// ```
/// use biogate_storage::{JsonFileStore, Store};
///
/// let dir = tempfile::tempdir().unwrap();
/// let store = JsonFileStore::open(dir.path()).unwrap();
///
/// // Nothing written yet: every collection loads empty
/// assert!(store.load_users().unwrap().is_empty());
/// assert!(store.load_settings().unwrap().is_none());
/// ```
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    data_dir: PathBuf,
}

impl JsonFileStore {
    /// Use `data_dir`, creating it if needed.
    ///
    /// # Errors
    /// Returns `StorageError::Io` if the directory cannot be created.
    pub fn open(data_dir: impl Into<PathBuf>) -> StorageResult<Self> {
        let data_dir = data_dir.into();
        fs::create_dir_all(&data_dir).map_err(|e| StorageError::io(&data_dir, e))?;
        debug!(path = %data_dir.display(), "Opened JSON data directory");
        Ok(Self { data_dir })
    }

    #[must_use]
    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    fn path(&self, file: &str) -> PathBuf {
        self.data_dir.join(file)
    }

    fn read<T: DeserializeOwned>(&self, file: &str) -> StorageResult<Option<T>> {
        let path = self.path(file);
        let raw = match fs::read_to_string(&path) {
            Ok(raw) => raw,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(StorageError::io(path, e)),
        };

        serde_json::from_str(&raw)
            .map(Some)
            .map_err(|source| StorageError::Corrupt { path, source })
    }

    fn write<T: Serialize + ?Sized>(&self, file: &str, value: &T) -> StorageResult<()> {
        let path = self.path(file);
        let tmp = path.with_extension("json.tmp");
        let body = serde_json::to_string_pretty(value)?;

        fs::write(&tmp, body).map_err(|e| StorageError::io(&tmp, e))?;
        fs::rename(&tmp, &path).map_err(|e| StorageError::io(&path, e))?;
        Ok(())
    }

    fn remove(&self, file: &str) -> StorageResult<()> {
        let path = self.path(file);
        match fs::remove_file(&path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(StorageError::io(path, e)),
        }
    }
}

impl Store for JsonFileStore {
    fn load_users(&self) -> StorageResult<UserMap> {
        Ok(self.read(USERS_FILE)?.unwrap_or_default())
    }

    fn save_users(&mut self, users: &UserMap) -> StorageResult<()> {
        self.write(USERS_FILE, users)
    }

    fn load_devices(&self) -> StorageResult<DeviceMap> {
        Ok(self.read(DEVICES_FILE)?.unwrap_or_default())
    }

    fn save_devices(&mut self, devices: &DeviceMap) -> StorageResult<()> {
        self.write(DEVICES_FILE, devices)
    }

    fn load_log(&self) -> StorageResult<Vec<LogEntry>> {
        Ok(self.read(LOGS_FILE)?.unwrap_or_default())
    }

    // A JSON array has no cheap append; rewrite the file with the entry added.
    fn append_log(&mut self, entry: &LogEntry) -> StorageResult<()> {
        let mut entries = self.load_log()?;
        entries.push(entry.clone());
        self.write(LOGS_FILE, &entries)
    }

    fn save_log(&mut self, entries: &[LogEntry]) -> StorageResult<()> {
        self.write(LOGS_FILE, entries)
    }

    fn load_statistics(&self) -> StorageResult<StatisticsTracker> {
        Ok(self.read(STATS_FILE)?.unwrap_or_default())
    }

    fn save_statistics(&mut self, stats: &StatisticsTracker) -> StorageResult<()> {
        self.write(STATS_FILE, stats)
    }

    fn load_settings(&self) -> StorageResult<Option<Settings>> {
        self.read(SETTINGS_FILE)
    }

    fn save_settings(&mut self, settings: &Settings) -> StorageResult<()> {
        self.write(SETTINGS_FILE, settings)
    }

    fn clear_all(&mut self) -> StorageResult<()> {
        for file in [USERS_FILE, DEVICES_FILE, LOGS_FILE, STATS_FILE] {
            self.remove(file)?;
        }
        debug!(path = %self.data_dir.display(), "Cleared data files");
        Ok(())
    }
}
