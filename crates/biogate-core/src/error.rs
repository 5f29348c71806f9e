use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    // Caller input errors
    #[error("Validation error: {message}")]
    Validation { message: String },

    #[error("{entity} not found: {id}")]
    NotFound { entity: &'static str, id: String },

    // Storage errors
    #[error("Persistence error: {0}")]
    Persistence(String),

    // Internal consistency errors
    #[error("Invariant violation: {0}")]
    InvariantViolation(String),
}

impl Error {
    /// Create a new validation error.
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }

    /// Create a new not-found error for the given entity kind.
    pub fn not_found(entity: &'static str, id: impl Into<String>) -> Self {
        Self::NotFound {
            entity,
            id: id.into(),
        }
    }

    /// Returns `true` for errors the caller can recover from by correcting input.
    #[must_use]
    pub fn is_recoverable(&self) -> bool {
        matches!(self, Self::Validation { .. } | Self::NotFound { .. })
    }
}

pub type Result<T> = std::result::Result<T, Error>;
