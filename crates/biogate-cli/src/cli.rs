use biogate_core::{
    AccessResult, BiometricModality, DeviceId, Result, UserId, constants::ATTACKER_ACTOR,
};
use biogate_service::{CorruptionPolicy, LogFormat, RateKind};
use biogate_storage::LogFilter;
use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "biogate")]
#[command(version, about = "Biometric access gate for simulated IoT devices", long_about = None)]
pub struct Cli {
    /// TOML configuration file
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Directory holding the JSON data files
    #[arg(long, global = true)]
    pub data_dir: Option<PathBuf>,

    /// What to do with a data file that cannot be read
    #[arg(long, global = true, value_enum)]
    pub on_corrupt: Option<PolicyArg>,

    /// Log filter, e.g. `biogate=debug`
    #[arg(long, global = true)]
    pub log_level: Option<String>,

    #[arg(long, global = true, value_enum)]
    pub log_format: Option<LogFormatArg>,

    /// Seed the randomness source for reproducible runs
    #[arg(long, global = true)]
    pub seed: Option<u64>,

    #[command(subcommand)]
    pub cmd: Cmd,
}

#[derive(Subcommand, Debug)]
pub enum Cmd {
    /// Enroll a user and register a device for them
    Enroll {
        #[arg(long)]
        name: String,
        #[arg(long, value_enum, default_value_t = ModalityArg::Face)]
        modality: ModalityArg,
    },
    /// Authenticate a user on a device
    Authenticate {
        #[arg(long)]
        user: String,
        #[arg(long)]
        device: String,
        /// Run an attack simulation instead of matching
        #[arg(long)]
        attack: bool,
    },
    ListUsers,
    ListDevices,
    /// Show the security log
    ShowLogs {
        #[arg(long, default_value_t = 1)]
        page: usize,
        /// Entries per page (defaults to the configured page size)
        #[arg(long)]
        page_size: Option<usize>,
        #[arg(long)]
        user: Option<String>,
        #[arg(long)]
        device: Option<String>,
        #[arg(long, value_enum)]
        result: Option<ResultArg>,
    },
    ShowStatistics,
    /// Find users by name (case-insensitive substring)
    SearchUser { term: String },
    /// Simulate an attack against a device
    SimulateAttack {
        #[arg(long)]
        device: String,
    },
    /// Delete all users, devices, logs and statistics
    ClearAll {
        /// Confirmation token; prompted for when omitted
        #[arg(long)]
        confirm: Option<String>,
    },
    /// Change a rate: auth-success-rate, attack-detection-rate or biometric-threshold
    Configure {
        rate: RateKind,
        #[arg(allow_negative_numbers = true)]
        value: String,
    },
    /// Return every device Under Attack to Active
    ResetDevices,
}

/// Build the `show-logs` filter, validating identifiers the same way
/// `authenticate` does. `ATTACKER` is accepted as a user.
pub fn log_filter(
    user: Option<&str>,
    device: Option<&str>,
    result: Option<ResultArg>,
) -> Result<LogFilter> {
    let mut filter = LogFilter::new();
    if let Some(user) = user {
        filter = if user.trim().eq_ignore_ascii_case(ATTACKER_ACTOR) {
            filter.user(ATTACKER_ACTOR)
        } else {
            filter.user(UserId::new(user)?.as_str())
        };
    }
    if let Some(device) = device {
        filter = filter.device(DeviceId::new(device)?.as_str());
    }
    if let Some(result) = result {
        filter = filter.result(result.into());
    }
    Ok(filter)
}

#[derive(Clone, Copy, Debug, ValueEnum)]
pub enum ModalityArg {
    Face,
    Voice,
}

impl From<ModalityArg> for BiometricModality {
    fn from(arg: ModalityArg) -> Self {
        match arg {
            ModalityArg::Face => BiometricModality::Face,
            ModalityArg::Voice => BiometricModality::Voice,
        }
    }
}

#[derive(Clone, Copy, Debug, ValueEnum)]
pub enum ResultArg {
    Enrolled,
    Success,
    Failed,
    Blocked,
    Attack,
}

impl From<ResultArg> for AccessResult {
    fn from(arg: ResultArg) -> Self {
        match arg {
            ResultArg::Enrolled => AccessResult::Enrolled,
            ResultArg::Success => AccessResult::Success,
            ResultArg::Failed => AccessResult::Failed,
            ResultArg::Blocked => AccessResult::Blocked,
            ResultArg::Attack => AccessResult::Attack,
        }
    }
}

#[derive(Clone, Copy, Debug, ValueEnum)]
pub enum PolicyArg {
    Reset,
    Keep,
}

impl From<PolicyArg> for CorruptionPolicy {
    fn from(arg: PolicyArg) -> Self {
        match arg {
            PolicyArg::Reset => CorruptionPolicy::Reset,
            PolicyArg::Keep => CorruptionPolicy::Keep,
        }
    }
}

#[derive(Clone, Copy, Debug, ValueEnum)]
pub enum LogFormatArg {
    Plain,
    Json,
}

impl From<LogFormatArg> for LogFormat {
    fn from(arg: LogFormatArg) -> Self {
        match arg {
            LogFormatArg::Plain => LogFormat::Plain,
            LogFormatArg::Json => LogFormat::Json,
        }
    }
}
