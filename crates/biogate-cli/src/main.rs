//! BioGate command line.
//!
//! Each invocation loads the data directory, runs one command and exits.
//! Configuration is layered: built-in defaults, then the `--config` TOML
//! file, then `BIOGATE_*` environment variables, then command line flags.

mod cli;
mod render;

use anyhow::{Context, Result, bail};
use biogate_biometric::random;
use biogate_core::validation::parse_rate;
use biogate_service::{BioGate, BioGateConfig, LogFormat};
use biogate_storage::JsonFileStore;
use clap::Parser;
use cli::{Cli, Cmd};
use rand::rngs::StdRng;
use std::io::{self, BufRead, Write};
use tracing::{debug, error};

type Gate = BioGate<JsonFileStore, StdRng>;

fn main() {
    let cli = Cli::parse();

    let config = match load_config(&cli) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Configuration error: {e:#}");
            std::process::exit(2);
        }
    };

    init_tracing(&config);

    if let Err(e) = run(cli, &config) {
        error!("{e:#}");
        eprintln!("Error: {e:#}");
        std::process::exit(1);
    }
}

fn load_config(cli: &Cli) -> Result<BioGateConfig> {
    let mut config = match &cli.config {
        Some(path) => BioGateConfig::from_file(path)
            .with_context(|| format!("failed to load {}", path.display()))?,
        None => BioGateConfig::default(),
    }
    .with_env()?;

    if let Some(dir) = &cli.data_dir {
        config = config.data_dir(dir.clone());
    }
    if let Some(policy) = cli.on_corrupt {
        config = config.corruption_policy(policy.into());
    }
    if let Some(level) = &cli.log_level {
        config = config.log_level(level.clone());
    }
    if let Some(format) = cli.log_format {
        config = config.log_format(format.into());
    }

    config.validate()?;
    Ok(config)
}

fn init_tracing(config: &BioGateConfig) {
    use tracing_subscriber::EnvFilter;
    use tracing_subscriber::fmt;

    let filter = EnvFilter::try_new(&config.log_level)
        .unwrap_or_else(|_| EnvFilter::new("biogate=info"));

    let subscriber = fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(io::stderr);

    match config.log_format {
        LogFormat::Json => subscriber.json().init(),
        LogFormat::Plain => subscriber.init(),
    }
}

fn run(cli: Cli, config: &BioGateConfig) -> Result<()> {
    let rng = match cli.seed {
        Some(seed) => random::seeded(seed),
        None => random::from_entropy(),
    };

    debug!("Opening data directory {}", config.data_dir.display());
    let mut gate: Gate = BioGate::from_config(config, rng)?;

    match cli.cmd {
        Cmd::Enroll { name, modality } => {
            let enrollment = gate.enroll(&name, modality.into())?;
            println!("{enrollment}");
        }
        Cmd::Authenticate {
            user,
            device,
            attack,
        } => {
            let outcome = gate.authenticate(&user, &device, attack)?;
            println!("{outcome}");
        }
        Cmd::ListUsers => println!("{}", render::users(&gate.list_users())),
        Cmd::ListDevices => println!("{}", render::devices(&gate.list_devices())),
        Cmd::ShowLogs {
            page,
            page_size,
            user,
            device,
            result,
        } => {
            let filter = cli::log_filter(user.as_deref(), device.as_deref(), result)?;
            let page = gate.show_logs(&filter, page, page_size.unwrap_or(config.page_size))?;
            print!("{}", render::logs(&page, &filter));
        }
        Cmd::ShowStatistics => {
            let summary = gate.statistics_summary();
            print!(
                "{}",
                render::statistics(&summary, &gate.list_users(), &gate.list_devices())
            );
        }
        Cmd::SearchUser { term } => {
            let found = gate.search_users(&term)?;
            print!("{}", render::search_results(&term, &found));
        }
        Cmd::SimulateAttack { device } => {
            let outcome = gate.simulate_attack(&device)?;
            println!("{outcome}");
        }
        Cmd::ClearAll { confirm } => {
            let token = match confirm {
                Some(token) => token,
                None => prompt_confirmation(&gate)?,
            };
            let cleared = gate.clear_all(&token)?;
            println!("{}", render::cleared(&cleared));
        }
        Cmd::Configure { rate, value } => {
            let value = parse_rate(&value, rate.label())?;
            let settings = gate.configure(rate, value)?;
            println!("{} set to {value}", rate.label());
            debug!(?settings, "Settings updated");
        }
        Cmd::ResetDevices => {
            let restored = gate.reset_device_statuses()?;
            if restored == 0 {
                println!("No devices needed resetting.");
            } else {
                println!("Reset {restored} device(s) to Active.");
            }
        }
    }

    Ok(())
}

fn prompt_confirmation(gate: &Gate) -> Result<String> {
    let mut stdout = io::stdout();
    writeln!(
        stdout,
        "This will delete {} users, {} devices and {} log entries.",
        gate.users().len(),
        gate.devices().len(),
        gate.log().len()
    )?;
    write!(stdout, "Type 'DELETE' to confirm: ")?;
    stdout.flush()?;

    let mut line = String::new();
    if io::stdin().lock().read_line(&mut line)? == 0 {
        bail!("no confirmation given");
    }
    Ok(line)
}
