//! logwire: a channel logger assembled lazily from a handful of settings
//!
//! `setup::setup` takes a `Config` and an `EnvironmentSnapshot` and returns a
//! `LoggerProvider` plus, when runtime logging is enabled, a `RuntimeGuard`.
//! The provider builds the rotating file handler, the console handler and the
//! environment processor on first use and hands out one shared `Logger`.

pub mod config;
pub mod environment;
pub mod errors;
pub mod handler;
pub mod level;
pub mod logger;
pub mod logging;
pub mod precondition;
pub mod processor;
pub mod provider;
pub mod runtime;
pub mod setup;

pub use config::Config;
pub use environment::EnvironmentSnapshot;
pub use errors::{LogwireError, PreconditionError};
pub use level::Level;
pub use logger::{LogRecord, Logger};
pub use provider::LoggerProvider;
pub use setup::{setup, Setup};
