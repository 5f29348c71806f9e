//! Append-only security event log with filtering and pagination.
//!
//! The log keeps entries in insertion order. Queries never reorder or drop
//! entries except by the filter they are given, and pagination operates on
//! whatever slice of entries the caller hands it.

use crate::models::LogEntry;
use biogate_core::{AccessResult, Error, Result};

/// Ordered, append-only collection of [`LogEntry`] values.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EventLog {
    entries: Vec<LogEntry>,
}

impl EventLog {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Wrap previously persisted entries, keeping their order.
    #[must_use]
    pub fn from_entries(entries: Vec<LogEntry>) -> Self {
        Self { entries }
    }

    pub fn append(&mut self, entry: LogEntry) {
        self.entries.push(entry);
    }

    #[must_use]
    pub fn entries(&self) -> &[LogEntry] {
        &self.entries
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Drop every entry after the first `len`. Used to undo a failed operation.
    pub fn truncate(&mut self, len: usize) {
        self.entries.truncate(len);
    }

    /// Entries matching every criterion in `filter`, oldest first.
    #[must_use]
    pub fn query(&self, filter: &LogFilter) -> Vec<&LogEntry> {
        self.entries.iter().filter(|e| filter.matches(e)).collect()
    }
}

/// Conjunctive filter over log entries. Unset criteria match everything.
///
/// User and device values are trimmed and uppercased, matching the way
/// identifiers are normalized when they are recorded.
///
/// # Examples
///
/// ```
/// use biogate_core::AccessResult;
/// use biogate_storage::LogFilter;
///
/// let filter = LogFilter::new().user(" abc123 ").result(AccessResult::Success);
/// assert_eq!(filter.user.as_deref(), Some("ABC123"));
/// assert!(filter.device.is_none());
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LogFilter {
    pub user: Option<String>,
    pub device: Option<String>,
    pub result: Option<AccessResult>,
}

impl LogFilter {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn user(mut self, user: impl AsRef<str>) -> Self {
        self.user = Some(normalize(user.as_ref()));
        self
    }

    #[must_use]
    pub fn device(mut self, device: impl AsRef<str>) -> Self {
        self.device = Some(normalize(device.as_ref()));
        self
    }

    #[must_use]
    pub fn result(mut self, result: AccessResult) -> Self {
        self.result = Some(result);
        self
    }

    #[must_use]
    pub fn matches(&self, entry: &LogEntry) -> bool {
        self.user.as_ref().is_none_or(|u| *u == entry.user)
            && self.device.as_ref().is_none_or(|d| *d == entry.device)
            && self.result.is_none_or(|r| r == entry.result)
    }
}

fn normalize(raw: &str) -> String {
    raw.trim().to_ascii_uppercase()
}

/// One page of results.
#[derive(Debug, Clone, PartialEq)]
pub struct Page<T> {
    pub items: Vec<T>,
    /// 1-based page number.
    pub page: usize,
    /// Always at least 1, even for an empty result set.
    pub total_pages: usize,
    pub total_items: usize,
}

/// Slice `items` into the 1-based `page` of size `page_size`.
///
/// `page` is clamped into `[1, total_pages]`, so an empty input yields
/// page 1 of 1 with no items.
///
/// # Errors
/// Returns `Error::Validation` if `page_size` is zero.
pub fn paginate<T: Clone>(items: &[T], page: usize, page_size: usize) -> Result<Page<T>> {
    if page_size == 0 {
        return Err(Error::validation("Page size must be at least 1"));
    }

    let total_items = items.len();
    let total_pages = total_items.div_ceil(page_size).max(1);
    let page = page.clamp(1, total_pages);
    let start = (page - 1) * page_size;
    let end = (start + page_size).min(total_items);

    Ok(Page {
        items: items[start..end].to_vec(),
        page,
        total_pages,
        total_items,
    })
}
