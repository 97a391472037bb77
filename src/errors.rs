/// Error types for logwire
///
/// Precondition failures are fatal for the hosting process, but they are still
/// returned as values so that only the top-level setup routine decides to exit.

use std::path::PathBuf;

/// HTTP status reported when the log directory precondition fails.
pub const SERVER_ERROR_STATUS: u16 = 500;

/// The log directory is missing and cannot be created, or is not writable.
#[derive(Debug, thiserror::Error)]
pub enum PreconditionError {
    #[error("Could not create logfile directory {path:?}: {source}")]
    CreateDirectory {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Logfile directory not writeable: {path:?}")]
    NotWritable {
        path: PathBuf
    },
}

impl PreconditionError {
    /// Status code the host should report for this failure.
    pub fn status_code(&self) -> u16 {
        SERVER_ERROR_STATUS
    }

    /// Terse diagnostic meant for the response body.
    pub fn diagnostic(&self) -> &'static str {
        match self {
            PreconditionError::CreateDirectory { .. } => "Could not create logfile directory.",
            PreconditionError::NotWritable { .. } => "Logfile directory not writeable.",
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum LogwireError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error(transparent)]
    Precondition(#[from] PreconditionError),

    #[error("Log file appender error: {0}")]
    Appender(String),

    #[error("Unknown environment field: {0}")]
    UnknownField(String),

    #[error("Logging initialization error: {0}")]
    Init(String),
}

impl From<tracing_appender::rolling::InitError> for LogwireError {
    fn from(e: tracing_appender::rolling::InitError) -> Self {
        LogwireError::Appender(e.to_string())
    }
}

impl From<figment::Error> for LogwireError {
    fn from(e: figment::Error) -> Self {
        LogwireError::Config(format!("Failed to load config: {}", e))
    }
}

impl LogwireError {
    /// Status code for the host when this error ends the process.
    pub fn status_code(&self) -> u16 {
        SERVER_ERROR_STATUS
    }
}
