/// Lazily built logger service graph
///
/// Every service is built on first access and cached in its own `OnceCell`, so
/// concurrent first callers block on the cell instead of racing to build a
/// duplicate. A failed build is not cached and is attempted again by the next
/// caller.
///
/// Dependency order:
/// ```text
/// Config ──> rotating_file_handler ─┐
///        └─> console_handler ───────┴─> handlers ──┐
/// Environment ─> environment_processor ─> processors ┴─> logger
/// ```

use once_cell::sync::OnceCell;
use std::sync::Arc;
use crate::config::Config;
use crate::environment::EnvironmentSnapshot;
use crate::errors::LogwireError;
use crate::handler::{ConsoleHandler, Handler, RotatingFileHandler};
use crate::logger::Logger;
use crate::precondition;
use crate::processor::{EnvironmentProcessor, Processor, ENVIRONMENT_FIELDS};

pub struct LoggerProvider {
    config: Config,
    environment: Arc<EnvironmentSnapshot>,
    rotating_file: OnceCell<Arc<Handler>>,
    console: OnceCell<Arc<Handler>>,
    environment_processor: OnceCell<Arc<Processor>>,
    logger: OnceCell<Arc<Logger>>,
}

impl LoggerProvider {
    /// Nothing is built here; see the individual accessors.
    pub fn new(config: Config, environment: EnvironmentSnapshot) -> Self {
        LoggerProvider {
            config,
            environment: Arc::new(environment),
            rotating_file: OnceCell::new(),
            console: OnceCell::new(),
            environment_processor: OnceCell::new(),
            logger: OnceCell::new(),
        }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn environment(&self) -> &EnvironmentSnapshot {
        &self.environment
    }

    /// Rotating file handler, always first in the handler list.
    ///
    /// Checks (and creates) the log directory before opening the appender.
    pub fn rotating_file_handler(&self) -> Result<Arc<Handler>, LogwireError> {
        self.rotating_file
            .get_or_try_init(|| -> Result<_, LogwireError> {
                let logfile = self.config.logfile();
                precondition::ensure_log_directory(logfile)?;
                let handler = RotatingFileHandler::new(
                    logfile,
                    self.config.logfile_count(),
                    self.config.loglevel(),
                    self.config.rotation(),
                )?;
                tracing::debug!(
                    logfile = %logfile.display(),
                    max_files = self.config.logfile_count(),
                    "built rotating file handler"
                );
                Ok(Arc::new(Handler::RotatingFile(handler)))
            })
            .cloned()
    }

    pub fn console_handler(&self) -> Arc<Handler> {
        self.console
            .get_or_init(|| {
                Arc::new(Handler::Console(ConsoleHandler::for_environment(
                    self.config.is_dev(),
                    self.config.loglevel(),
                )))
            })
            .clone()
    }

    /// `[rotating_file, console]`, in that order.
    pub fn handlers(&self) -> Result<Vec<Arc<Handler>>, LogwireError> {
        Ok(vec![self.rotating_file_handler()?, self.console_handler()])
    }

    pub fn environment_fields(&self) -> &'static [&'static str] {
        &ENVIRONMENT_FIELDS
    }

    pub fn environment_processor(&self) -> Result<Arc<Processor>, LogwireError> {
        self.environment_processor
            .get_or_try_init(|| -> Result<_, LogwireError> {
                let processor =
                    EnvironmentProcessor::new(Arc::clone(&self.environment), self.environment_fields())?;
                Ok(Arc::new(Processor::Environment(processor)))
            })
            .cloned()
    }

    pub fn processors(&self) -> Result<Vec<Arc<Processor>>, LogwireError> {
        Ok(vec![self.environment_processor()?])
    }

    /// The shared logger. Every caller gets the same instance.
    pub fn logger(&self) -> Result<Arc<Logger>, LogwireError> {
        self.logger
            .get_or_try_init(|| -> Result<_, LogwireError> {
                let logger = Logger::new(self.config.name(), self.handlers()?, self.processors()?);
                tracing::debug!(channel = logger.name(), "assembled logger");
                Ok(Arc::new(logger))
            })
            .cloned()
    }

    /// Whether the logger has been built yet.
    pub fn is_built(&self) -> bool {
        self.logger.get().is_some()
    }
}
