use std::path::PathBuf;
use thiserror::Error;

/// Storage-specific error types for the BioGate persistence layer.
///
/// Load failures are split into I/O problems and decode problems so callers
/// can tell a missing permission apart from a damaged file. Only
/// [`StorageError::Corrupt`] is eligible for the reset/keep recovery choice.
#[derive(Debug, Error)]
pub enum StorageError {
    /// Reading or writing a file failed
    #[error("I/O error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A persisted file exists but could not be decoded
    #[error("Corrupt data in {path}: {source}")]
    Corrupt {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// In-memory state could not be encoded
    #[error("Encoding error: {0}")]
    Encode(#[from] serde_json::Error),
}

impl StorageError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    /// Returns `true` if the error came from decoding a damaged file.
    #[must_use]
    pub fn is_corruption(&self) -> bool {
        matches!(self, Self::Corrupt { .. })
    }
}

impl From<StorageError> for biogate_core::Error {
    fn from(err: StorageError) -> Self {
        biogate_core::Error::Persistence(err.to_string())
    }
}

/// Specialized result type for storage operations
pub type StorageResult<T> = Result<T, StorageError>;
