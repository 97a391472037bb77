/// Process-level setup
///
/// `setup` wires config, environment and the runtime recorder together.
/// `exit_on_failure` is the only place in the crate that ends the process.

use std::io::Write;
use std::sync::Arc;
use std::time::Instant;
use crate::config::Config;
use crate::environment::EnvironmentSnapshot;
use crate::errors::LogwireError;
use crate::provider::LoggerProvider;
use crate::runtime::{RuntimeGuard, RuntimeRecorder};

/// Exit code used after reporting a fatal error.
pub const FAILURE_EXIT_CODE: i32 = 1;

pub struct Setup {
    pub provider: Arc<LoggerProvider>,
    /// Present only when `log_runtime` is enabled
    pub runtime: Option<RuntimeGuard>,
}

/// Set up the logger graph, starting the runtime clock now.
pub fn setup(config: Config, environment: EnvironmentSnapshot) -> Setup {
    setup_with_start(config, environment, Instant::now())
}

/// Set up the logger graph with a start instant captured by the host.
pub fn setup_with_start(config: Config, environment: EnvironmentSnapshot, start: Instant) -> Setup {
    let recorder = RuntimeRecorder::with_start(config.log_runtime(), start);
    let provider = Arc::new(LoggerProvider::new(config, environment));
    let runtime = recorder
        .is_enabled()
        .then(|| RuntimeGuard::new(recorder, Arc::clone(&provider)));

    Setup { provider, runtime }
}

/// CGI-style response for a fatal error: status header, blank line, diagnostic.
pub fn failure_response(err: &LogwireError) -> String {
    let diagnostic = match err {
        LogwireError::Precondition(e) => e.diagnostic().to_string(),
        other => other.to_string(),
    };
    format!("Status: {} Internal Server Error\r\n\r\n{}", err.status_code(), diagnostic)
}

/// Unwrap `result`, or report the failure and terminate the process.
pub fn exit_on_failure<T>(result: Result<T, LogwireError>) -> T {
    match result {
        Ok(value) => value,
        Err(err) => {
            let mut stdout = std::io::stdout().lock();
            let _ = stdout.write_all(failure_response(&err).as_bytes());
            let _ = stdout.flush();
            eprintln!("logwire: {}", err);
            std::process::exit(FAILURE_EXIT_CODE);
        }
    }
}
