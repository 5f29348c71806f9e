use biogate_storage::Settings;
use serde::{Deserialize, Serialize};
use std::{
    fmt,
    path::{Path, PathBuf},
    str::FromStr,
};
use thiserror::Error;

/// Environment variable overriding the data directory
pub const ENV_DATA_DIR: &str = "BIOGATE_DATA_DIR";

/// Environment variable overriding the log filter
pub const ENV_LOG: &str = "BIOGATE_LOG";

/// Environment variable overriding the log format (`plain` or `json`)
pub const ENV_LOG_FORMAT: &str = "BIOGATE_LOG_FORMAT";

/// Errors raised while assembling a [`BioGateConfig`]
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid config file: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

/// What to do when a persisted file cannot be loaded
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CorruptionPolicy {
    /// Replace the damaged file with empty state right away
    #[default]
    Reset,
    /// Leave the file untouched and keep the in-memory state
    Keep,
}

impl FromStr for CorruptionPolicy {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "reset" => Ok(Self::Reset),
            "keep" => Ok(Self::Keep),
            other => Err(ConfigError::Invalid(format!(
                "unknown corruption policy '{other}' (expected reset or keep)"
            ))),
        }
    }
}

impl fmt::Display for CorruptionPolicy {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Self::Reset => write!(f, "reset"),
            Self::Keep => write!(f, "keep"),
        }
    }
}

/// Log output format
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Plain,
    Json,
}

impl FromStr for LogFormat {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "plain" | "text" => Ok(Self::Plain),
            "json" => Ok(Self::Json),
            other => Err(ConfigError::Invalid(format!(
                "unknown log format '{other}' (expected plain or json)"
            ))),
        }
    }
}

/// Runtime configuration for a BioGate instance.
///
/// Values are layered: built-in defaults, then an optional TOML file, then
/// `BIOGATE_*` environment variables. Command-line flags are applied last by
/// the binary through the builder setters.
///
/// The rates here are only the starting point for a fresh data directory.
/// Once `settings.json` exists, its values win.
///
/// # Examples
///
/// ```
/// use biogate_service::{BioGateConfig, CorruptionPolicy};
///
/// let config = BioGateConfig::new("/tmp/biogate")
///     .corruption_policy(CorruptionPolicy::Keep)
///     .page_size(25);
///
/// assert_eq!(config.page_size, 25);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct BioGateConfig {
    /// Directory holding the JSON data files
    pub data_dir: PathBuf,

    /// Rates used until settings are saved
    pub defaults: Settings,

    /// Recovery choice for damaged data files
    pub corruption_policy: CorruptionPolicy,

    /// `tracing` filter directive
    pub log_level: String,

    pub log_format: LogFormat,

    /// Log entries shown per page
    pub page_size: usize,
}

impl Default for BioGateConfig {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from("data"),
            defaults: Settings::default(),
            corruption_policy: CorruptionPolicy::default(),
            log_level: "biogate=info".to_string(),
            log_format: LogFormat::default(),
            page_size: biogate_core::constants::DEFAULT_PAGE_SIZE,
        }
    }
}

impl BioGateConfig {
    /// Create a configuration using the given data directory
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
            ..Default::default()
        }
    }

    /// Parse a configuration from TOML text. Missing keys keep their defaults.
    ///
    /// # Errors
    /// Returns `ConfigError::Parse` on malformed TOML or unknown keys.
    pub fn from_toml_str(raw: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(raw)?)
    }

    /// Read a configuration file.
    ///
    /// # Errors
    /// Returns `ConfigError::Io` if the file cannot be read, or
    /// `ConfigError::Parse` if it is not valid.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&raw)
    }

    /// Apply `BIOGATE_*` overrides from the process environment.
    ///
    /// # Errors
    /// Returns `ConfigError::Invalid` if an override has an unusable value.
    pub fn with_env(self) -> Result<Self, ConfigError> {
        self.with_overrides(|key| std::env::var(key).ok())
    }

    /// Apply `BIOGATE_*` overrides read through `lookup`.
    ///
    /// # Errors
    /// Returns `ConfigError::Invalid` if an override has an unusable value.
    pub fn with_overrides<F>(mut self, lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(dir) = lookup(ENV_DATA_DIR).filter(|v| !v.trim().is_empty()) {
            self.data_dir = PathBuf::from(dir);
        }
        if let Some(level) = lookup(ENV_LOG).filter(|v| !v.trim().is_empty()) {
            self.log_level = level;
        }
        if let Some(format) = lookup(ENV_LOG_FORMAT) {
            self.log_format = format.parse()?;
        }
        Ok(self)
    }

    /// Set the data directory
    pub fn data_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.data_dir = dir.into();
        self
    }

    /// Set the starting rates
    pub fn defaults(mut self, defaults: Settings) -> Self {
        self.defaults = defaults;
        self
    }

    /// Set the recovery policy for damaged files
    pub fn corruption_policy(mut self, policy: CorruptionPolicy) -> Self {
        self.corruption_policy = policy;
        self
    }

    /// Set the log filter directive
    pub fn log_level(mut self, level: impl Into<String>) -> Self {
        self.log_level = level.into();
        self
    }

    /// Set the log output format
    pub fn log_format(mut self, format: LogFormat) -> Self {
        self.log_format = format;
        self
    }

    /// Set the number of log entries per page
    pub fn page_size(mut self, size: usize) -> Self {
        self.page_size = size;
        self
    }

    /// Check rates and page size.
    ///
    /// # Errors
    /// Returns `ConfigError::Invalid` describing the first bad value.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.defaults
            .validate()
            .map_err(|e| ConfigError::Invalid(e.to_string()))?;
        if self.page_size == 0 {
            return Err(ConfigError::Invalid("page_size must be at least 1".to_string()));
        }
        Ok(())
    }
}
