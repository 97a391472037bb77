/// Configuration management using figment
///
/// Loads configuration with this precedence (highest wins):
/// 1. Defaults (hardcoded)
/// 2. TOML file: logwire.toml (in working directory)
/// 3. Environment variables: prefixed LOGWIRE_ (e.g., LOGWIRE_LOGLEVEL=debug)
///
/// A `Config` is a plain value. Building one never touches the filesystem; the
/// log directory is only checked when the file handler is first requested.

use figment::{
    Figment,
    providers::{Env, Format, Toml, Serialized},
};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use crate::errors::LogwireError;
use crate::level::Level;

pub const DEFAULT_CONFIG_FILE: &str = "logwire.toml";

/// How often the log file rolls over to a new dated file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Rotation {
    #[default]
    Daily,
    Hourly,
    Never,
}

impl From<Rotation> for tracing_appender::rolling::Rotation {
    fn from(rotation: Rotation) -> Self {
        match rotation {
            Rotation::Daily => tracing_appender::rolling::Rotation::DAILY,
            Rotation::Hourly => tracing_appender::rolling::Rotation::HOURLY,
            Rotation::Never => tracing_appender::rolling::Rotation::NEVER,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Channel name attached to every record
    #[serde(default = "default_name")]
    name: String,

    /// Target log file; the directory part is created on demand
    #[serde(default = "default_logfile")]
    logfile: PathBuf,

    /// Minimum severity for both handlers
    #[serde(default = "default_loglevel")]
    loglevel: Level,

    /// Development environment: enables colored console output
    #[serde(default)]
    is_dev: bool,

    /// Emit a "Finished" record with the process runtime at shutdown
    #[serde(default)]
    log_runtime: bool,

    /// Maximum number of retained log files, 0 keeps all of them
    #[serde(default)]
    logfile_count: usize,

    #[serde(default)]
    rotation: Rotation,
}

fn default_name() -> String {
    "app".to_string()
}

fn default_logfile() -> PathBuf {
    PathBuf::from("logs/app.log")
}

fn default_loglevel() -> Level {
    Level::Info
}

impl Default for Config {
    fn default() -> Self {
        Config {
            name: default_name(),
            logfile: default_logfile(),
            loglevel: default_loglevel(),
            is_dev: false,
            log_runtime: false,
            logfile_count: 0,
            rotation: Rotation::default(),
        }
    }
}

impl Config {
    /// Build a config from explicit values.
    ///
    /// A missing or zero `logfile_count` means unlimited retention.
    pub fn new(
        name: impl Into<String>,
        logfile: impl Into<PathBuf>,
        loglevel: Level,
        is_dev: bool,
        log_runtime: bool,
        logfile_count: Option<usize>,
    ) -> Self {
        Config {
            name: name.into(),
            logfile: logfile.into(),
            loglevel,
            is_dev,
            log_runtime,
            logfile_count: logfile_count.unwrap_or(0),
            rotation: Rotation::default(),
        }
    }

    pub fn with_rotation(mut self, rotation: Rotation) -> Self {
        self.rotation = rotation;
        self
    }

    /// Load configuration from defaults, logwire.toml, and environment variables
    ///
    /// Environment variables override TOML file values.
    /// Example: LOGWIRE_LOGLEVEL=debug overrides loglevel in logwire.toml
    pub fn load() -> Result<Config, LogwireError> {
        Self::load_from(DEFAULT_CONFIG_FILE)
    }

    /// Same as [`Config::load`] with an explicit TOML file path.
    pub fn load_from(path: impl AsRef<Path>) -> Result<Config, LogwireError> {
        Ok(Self::figment(path).extract()?)
    }

    /// The layered figment behind [`Config::load_from`], for callers that
    /// merge further providers (e.g. command-line overrides) on top.
    pub fn figment(path: impl AsRef<Path>) -> Figment {
        Figment::new()
            .merge(Serialized::defaults(Config::default()))
            .merge(Toml::file(path.as_ref()))
            .merge(Env::prefixed("LOGWIRE_"))
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn logfile(&self) -> &Path {
        &self.logfile
    }

    pub fn loglevel(&self) -> Level {
        self.loglevel
    }

    pub fn is_dev(&self) -> bool {
        self.is_dev
    }

    pub fn log_runtime(&self) -> bool {
        self.log_runtime
    }

    pub fn logfile_count(&self) -> usize {
        self.logfile_count
    }

    pub fn rotation(&self) -> Rotation {
        self.rotation
    }
}
