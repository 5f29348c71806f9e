//! Persistence layer for BioGate.
//!
//! This crate holds the persisted record types, the in-memory event log
//! and statistics counters, and the [`Store`] trait through which the
//! service layer reads and writes durable state.
//!
//! # Architecture
//!
//! - [`models`] - `UserRecord`, `DeviceRecord`, `LogEntry`, `Settings`
//! - [`EventLog`] - append-only log with [`LogFilter`] queries and [`paginate`]
//! - [`StatisticsTracker`] - named monotonic counters
//! - [`Store`] - persistence seam, implemented by [`JsonFileStore`] and [`MemoryStore`]
//! - [`LogNotes`] - note texts written with each log entry
//!
//! # File Compatibility
//!
//! [`JsonFileStore`] reads and writes `users.json`, `devices.json`,
//! `logs.json` and `stats.json` in the layout used by earlier BioGate
//! releases, plus `settings.json`. User records without a stored template
//! load as legacy records and are never back-filled.
//!
//! # Examples
//!
//! ```
//! use biogate_core::AccessResult;
//! use biogate_storage::{EventLog, LogFilter, MemoryStore, Store, models::LogEntry, paginate};
//!
//! let mut store = MemoryStore::new();
//! let mut log = EventLog::new();
//!
//! let entry = LogEntry::new(
//!     chrono::NaiveDateTime::default(),
//!     "SYSTEM",
//!     "DEV1000",
//!     AccessResult::Attack,
//!     "Network Intrusion on IoT Device DEV1000",
//! );
//! store.append_log(&entry).unwrap();
//! log.append(entry);
//!
//! let attacks = log.query(&LogFilter::new().result(AccessResult::Attack));
//! let page = paginate(&attacks, 1, 10).unwrap();
//! assert_eq!(page.total_pages, 1);
//! assert_eq!(store.load_log().unwrap().len(), 1);
//! ```
//!
//! # Security Considerations
//!
//! Template integrity checks compare fingerprints in constant time via
//! the `subtle` crate. Fingerprints are integrity markers, not secrets.

pub mod error;
pub mod event_log;
pub mod messages;
pub mod models;
pub mod statistics;
pub mod store;

pub use error::{StorageError, StorageResult};
pub use event_log::{EventLog, LogFilter, Page, paginate};
pub use messages::LogNotes;
pub use models::{DeviceRecord, LogEntry, Settings, UserRecord};
pub use statistics::StatisticsTracker;
pub use store::{DeviceMap, JsonFileStore, MemoryStore, Store, UserMap};
