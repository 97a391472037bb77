/// Shutdown-time runtime recording
///
/// When `log_runtime` is enabled, setup arms a `RuntimeGuard`. The guard fires
/// once, either through `finish()` or when it is dropped, and logs
/// `Finished {"runtime":"<elapsed>ms"}` at info level. The logger is fetched at
/// that moment, so it is built on demand if nothing used it before.

use serde_json::json;
use std::sync::Arc;
use std::time::Instant;
use crate::errors::LogwireError;
use crate::provider::LoggerProvider;

#[derive(Debug, Clone, Copy)]
pub struct RuntimeRecorder {
    start: Instant,
    enabled: bool,
}

impl RuntimeRecorder {
    /// Start the clock now.
    pub fn capture_start(enabled: bool) -> Self {
        Self::with_start(enabled, Instant::now())
    }

    /// Use a start instant captured elsewhere (e.g. by the host at process start).
    pub fn with_start(enabled: bool, start: Instant) -> Self {
        RuntimeRecorder { start, enabled }
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    pub fn start(&self) -> Instant {
        self.start
    }

    pub fn elapsed_ms(&self) -> f64 {
        self.start.elapsed().as_secs_f64() * 1000.0
    }

    /// Log the elapsed runtime. Returns the logged value in milliseconds, or
    /// `None` when recording is disabled.
    pub fn on_shutdown(&self, provider: &LoggerProvider) -> Result<Option<f64>, LogwireError> {
        if !self.enabled {
            return Ok(None);
        }

        let runtime_ms = self.elapsed_ms();
        let logger = provider.logger()?;
        logger.info("Finished", json!({ "runtime": format!("{:.3}ms", runtime_ms) }));
        Ok(Some(runtime_ms))
    }
}

/// Armed runtime recorder; fires exactly once.
pub struct RuntimeGuard {
    recorder: RuntimeRecorder,
    provider: Arc<LoggerProvider>,
    fired: bool,
}

impl RuntimeGuard {
    pub fn new(recorder: RuntimeRecorder, provider: Arc<LoggerProvider>) -> Self {
        RuntimeGuard {
            recorder,
            provider,
            fired: false,
        }
    }

    pub fn recorder(&self) -> &RuntimeRecorder {
        &self.recorder
    }

    /// Fire now instead of on drop, surfacing any error to the caller.
    pub fn finish(mut self) -> Result<Option<f64>, LogwireError> {
        self.fire()
    }

    fn fire(&mut self) -> Result<Option<f64>, LogwireError> {
        if self.fired {
            return Ok(None);
        }
        self.fired = true;
        self.recorder.on_shutdown(&self.provider)
    }
}

impl Drop for RuntimeGuard {
    fn drop(&mut self) {
        if let Err(e) = self.fire() {
            eprintln!("logwire: could not record runtime: {}", e);
        }
    }
}
