/// Channel logger
///
/// A `Logger` owns an ordered list of handlers and an ordered list of
/// processors. Each record runs through every processor, then through every
/// handler whose threshold it meets. Handlers never stop propagation, so every
/// handler sees every record at or above its own level.

use chrono::{DateTime, Utc};
use serde::Serialize;
use serde_json::{Map, Value};
use std::sync::Arc;
use crate::handler::Handler;
use crate::level::Level;
use crate::processor::Processor;

/// A single log event as seen by processors and handlers.
#[derive(Debug, Clone, Serialize)]
pub struct LogRecord {
    pub datetime: DateTime<Utc>,
    pub channel: String,
    pub level: Level,
    pub message: String,
    /// Caller-supplied structured fields
    pub context: Map<String, Value>,
    /// Fields added by processors
    pub extra: Map<String, Value>,
}

impl LogRecord {
    /// `context` is usually a JSON object; `null` means no context and any
    /// other value is stored under the `"context"` key.
    pub fn new(channel: &str, level: Level, message: impl Into<String>, context: Value) -> Self {
        let context = match context {
            Value::Object(map) => map,
            Value::Null => Map::new(),
            other => {
                let mut map = Map::new();
                map.insert("context".to_string(), other);
                map
            }
        };

        LogRecord {
            datetime: Utc::now(),
            channel: channel.to_string(),
            level,
            message: message.into(),
            context,
            extra: Map::new(),
        }
    }
}

#[derive(Debug)]
pub struct Logger {
    name: String,
    handlers: Vec<Arc<Handler>>,
    processors: Vec<Arc<Processor>>,
}

impl Logger {
    pub fn new(name: impl Into<String>, handlers: Vec<Arc<Handler>>, processors: Vec<Arc<Processor>>) -> Self {
        Logger {
            name: name.into(),
            handlers,
            processors,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn handlers(&self) -> &[Arc<Handler>] {
        &self.handlers
    }

    pub fn processors(&self) -> &[Arc<Processor>] {
        &self.processors
    }

    /// Whether at least one handler accepts records of `level`.
    pub fn is_handling(&self, level: Level) -> bool {
        self.handlers.iter().any(|h| h.is_handling(level))
    }

    pub fn log(&self, level: Level, message: impl Into<String>, context: Value) {
        if !self.is_handling(level) {
            return;
        }

        let mut record = LogRecord::new(&self.name, level, message, context);
        for processor in &self.processors {
            processor.process(&mut record);
        }

        for handler in self.handlers.iter().filter(|h| h.is_handling(level)) {
            // Not routed through tracing: the global subscriber may be this logger.
            if let Err(e) = handler.handle(&record) {
                eprintln!("logwire: {} handler failed on channel {}: {}", handler.kind(), self.name, e);
            }
        }
    }

    pub fn debug(&self, message: impl Into<String>, context: Value) {
        self.log(Level::Debug, message, context)
    }

    pub fn info(&self, message: impl Into<String>, context: Value) {
        self.log(Level::Info, message, context)
    }

    pub fn notice(&self, message: impl Into<String>, context: Value) {
        self.log(Level::Notice, message, context)
    }

    pub fn warning(&self, message: impl Into<String>, context: Value) {
        self.log(Level::Warning, message, context)
    }

    pub fn error(&self, message: impl Into<String>, context: Value) {
        self.log(Level::Error, message, context)
    }

    pub fn critical(&self, message: impl Into<String>, context: Value) {
        self.log(Level::Critical, message, context)
    }

    pub fn alert(&self, message: impl Into<String>, context: Value) {
        self.log(Level::Alert, message, context)
    }

    pub fn emergency(&self, message: impl Into<String>, context: Value) {
        self.log(Level::Emergency, message, context)
    }
}
