/// Bridge from `tracing` to the assembled logger
///
/// `init_logging` installs a global subscriber whose only output layer forwards
/// events to the shared `Logger`, so `tracing::info!` and friends end up in the
/// same rotating file (and, in development, on stderr) as direct logger calls.
///
/// Log level from config.loglevel
/// RUST_LOG env var can override at runtime

use serde_json::{Map, Value};
use std::fmt;
use std::sync::Arc;
use tracing::field::{Field, Visit};
use tracing::{Event, Subscriber};
use tracing_subscriber::{
    layer::{Context, Layer, SubscriberExt},
    util::SubscriberInitExt,
    EnvFilter,
};
use crate::errors::LogwireError;
use crate::level::Level;
use crate::logger::Logger;
use crate::provider::LoggerProvider;

/// Layer that turns every `tracing` event into a logger record.
pub struct LoggerLayer {
    logger: Arc<Logger>,
}

impl LoggerLayer {
    pub fn new(logger: Arc<Logger>) -> Self {
        LoggerLayer { logger }
    }
}

impl<S: Subscriber> Layer<S> for LoggerLayer {
    fn on_event(&self, event: &Event<'_>, _ctx: Context<'_, S>) {
        let level = Level::from(*event.metadata().level());
        if !self.logger.is_handling(level) {
            return;
        }

        let mut visitor = FieldVisitor::default();
        event.record(&mut visitor);
        visitor
            .context
            .insert("target".to_string(), Value::String(event.metadata().target().to_string()));

        self.logger.log(level, visitor.message, Value::Object(visitor.context));
    }
}

#[derive(Default)]
struct FieldVisitor {
    message: String,
    context: Map<String, Value>,
}

impl FieldVisitor {
    fn insert(&mut self, field: &Field, value: Value) {
        if field.name() == "message" {
            self.message = match value {
                Value::String(s) => s,
                other => other.to_string(),
            };
        } else {
            self.context.insert(field.name().to_string(), value);
        }
    }
}

impl Visit for FieldVisitor {
    fn record_str(&mut self, field: &Field, value: &str) {
        self.insert(field, Value::String(value.to_string()));
    }

    fn record_i64(&mut self, field: &Field, value: i64) {
        self.insert(field, Value::from(value));
    }

    fn record_u64(&mut self, field: &Field, value: u64) {
        self.insert(field, Value::from(value));
    }

    fn record_f64(&mut self, field: &Field, value: f64) {
        self.insert(field, Value::from(value));
    }

    fn record_bool(&mut self, field: &Field, value: bool) {
        self.insert(field, Value::Bool(value));
    }

    fn record_debug(&mut self, field: &Field, value: &dyn fmt::Debug) {
        self.insert(field, Value::String(format!("{:?}", value)));
    }
}

/// Build the logger and install it as the global `tracing` subscriber.
///
/// Fails if the logger cannot be built (e.g. the log directory precondition)
/// or if a global subscriber is already set.
pub fn init_logging(provider: &LoggerProvider) -> Result<(), LogwireError> {
    let logger = provider.logger()?;

    // Build env filter from config, with RUST_LOG override
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(provider.config().loglevel().filter_directive()));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(LoggerLayer::new(logger))
        .try_init()
        .map_err(|e| LogwireError::Init(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{Config, Rotation};
    use crate::environment::EnvironmentSnapshot;
    use tracing_subscriber::layer::SubscriberExt;

    #[test]
    fn test_tracing_events_reach_the_log_file() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::new("worker", dir.path().join("app.log"), Level::Info, false, false, None)
            .with_rotation(Rotation::Never);
        let provider = LoggerProvider::new(config, EnvironmentSnapshot::default());
        let logger = provider.logger().unwrap();

        let subscriber = tracing_subscriber::registry().with(LoggerLayer::new(logger));
        tracing::subscriber::with_default(subscriber, || {
            tracing::debug!("filtered out by the handler threshold");
            tracing::info!(job_id = 42, queue = "emails", "job done");
            tracing::warn!(retry = true, "slow job");
        });

        let log = std::fs::read_to_string(dir.path().join("app.log")).unwrap();
        assert!(!log.contains("filtered out"));
        assert!(log.contains("worker.INFO: job done"));
        assert!(log.contains("\"job_id\":42"));
        assert!(log.contains("\"queue\":\"emails\""));
        assert!(log.contains("worker.WARNING: slow job"));
        assert!(log.contains("\"retry\":true"));
    }
}
