use anyhow::Result;
use clap::Parser;
use figment::providers::Serialized;
use serde::Serialize;
use std::path::PathBuf;
use logwire::config::{Config, DEFAULT_CONFIG_FILE};
use logwire::environment::EnvironmentSnapshot;
use logwire::level::Level;
use logwire::logging;
use logwire::setup::{self, Setup};

#[derive(Parser)]
#[command(name = "logwire", version, about = "Write a message through the assembled logger")]
struct Cli {
    /// TOML config file
    #[arg(long, env = "LOGWIRE_CONFIG", default_value = DEFAULT_CONFIG_FILE)]
    config: PathBuf,

    #[command(flatten)]
    overrides: Overrides,

    /// Severity of the message
    #[arg(long, default_value = "info")]
    level: Level,

    /// Message to log
    #[arg(default_value = "Started")]
    message: String,
}

/// Command-line values layered on top of file and environment config.
#[derive(clap::Args, Serialize)]
struct Overrides {
    /// Channel name
    #[arg(long)]
    #[serde(skip_serializing_if = "Option::is_none")]
    name: Option<String>,

    /// Log file path
    #[arg(long)]
    #[serde(skip_serializing_if = "Option::is_none")]
    logfile: Option<PathBuf>,

    /// Minimum level written by the handlers
    #[arg(long)]
    #[serde(skip_serializing_if = "Option::is_none")]
    loglevel: Option<Level>,

    /// Development mode (colored console output)
    #[arg(long = "dev")]
    #[serde(rename = "is_dev", skip_serializing_if = "std::ops::Not::not")]
    dev: bool,

    /// Log the process runtime on exit
    #[arg(long)]
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    log_runtime: bool,

    /// Number of rotated log files to keep (0 keeps all)
    #[arg(long = "rotations")]
    #[serde(rename = "logfile_count", skip_serializing_if = "Option::is_none")]
    rotations: Option<usize>,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let config: Config = Config::figment(&cli.config)
        .merge(Serialized::defaults(&cli.overrides))
        .extract()
        .map_err(|e| anyhow::anyhow!("Failed to load config: {}", e))?;

    let Setup { provider, runtime } = setup::setup(config, EnvironmentSnapshot::from_env());

    setup::exit_on_failure(logging::init_logging(&provider));
    let logger = setup::exit_on_failure(provider.logger());

    tracing::debug!(config = ?provider.config(), "logger ready");
    logger.log(cli.level, cli.message, serde_json::Value::Null);

    if let Some(guard) = runtime {
        setup::exit_on_failure(guard.finish());
    }

    Ok(())
}
