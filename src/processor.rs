/// Record processors
///
/// Processors enrich a record before it reaches the handlers. The only one is
/// the environment processor, which copies request metadata into `extra`.

use serde_json::Value;
use std::sync::Arc;
use crate::environment::EnvironmentSnapshot;
use crate::errors::LogwireError;
use crate::logger::LogRecord;

/// Fields added to every record by default.
pub const ENVIRONMENT_FIELDS: [&str; 3] = ["http_method", "url", "ip"];

/// Record field name -> server variable it is read from.
const FIELD_SOURCES: [(&str, &str); 6] = [
    ("url", "REQUEST_URI"),
    ("ip", "REMOTE_ADDR"),
    ("http_method", "REQUEST_METHOD"),
    ("server", "SERVER_NAME"),
    ("referrer", "HTTP_REFERER"),
    ("user_agent", "HTTP_USER_AGENT"),
];

#[derive(Debug)]
pub enum Processor {
    Environment(EnvironmentProcessor),
}

impl Processor {
    pub fn process(&self, record: &mut LogRecord) {
        match self {
            Processor::Environment(p) => p.process(record),
        }
    }
}

#[derive(Debug, Clone)]
pub struct EnvironmentProcessor {
    environment: Arc<EnvironmentSnapshot>,
    fields: Vec<(&'static str, &'static str)>,
}

impl EnvironmentProcessor {
    /// Bind a snapshot to the given field names, in order.
    pub fn new(environment: Arc<EnvironmentSnapshot>, fields: &[&str]) -> Result<Self, LogwireError> {
        let fields = fields
            .iter()
            .map(|field| {
                FIELD_SOURCES
                    .iter()
                    .find(|(name, _)| name == field)
                    .copied()
                    .ok_or_else(|| LogwireError::UnknownField(field.to_string()))
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(EnvironmentProcessor { environment, fields })
    }

    pub fn fields(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.fields.iter().map(|(name, _)| *name)
    }

    pub fn environment(&self) -> &EnvironmentSnapshot {
        &self.environment
    }

    /// Outside a request (no `REQUEST_URI`) the record is left untouched.
    pub fn process(&self, record: &mut LogRecord) {
        if !self.environment.is_request() {
            return;
        }

        for (field, source) in &self.fields {
            let value = self
                .environment
                .get(source)
                .map(|v| Value::String(v.to_string()))
                .unwrap_or(Value::Null);
            record.extra.insert(field.to_string(), value);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::level::Level;

    fn request_env() -> Arc<EnvironmentSnapshot> {
        Arc::new(EnvironmentSnapshot::from_vars([
            ("REQUEST_METHOD", "GET"),
            ("REQUEST_URI", "/search?q=rust"),
            ("REMOTE_ADDR", "203.0.113.9"),
            ("SERVER_NAME", "example.org"),
            ("HTTP_USER_AGENT", "curl/8.0"),
            ("UNIQUE_ID", "abc123"),
        ]))
    }

    #[test]
    fn test_adds_exactly_the_configured_fields() {
        let processor = EnvironmentProcessor::new(request_env(), &ENVIRONMENT_FIELDS).unwrap();
        let mut record = LogRecord::new("app", Level::Info, "hit", Value::Null);
        processor.process(&mut record);

        assert_eq!(record.extra.len(), 3);
        assert_eq!(record.extra["http_method"], "GET");
        assert_eq!(record.extra["url"], "/search?q=rust");
        assert_eq!(record.extra["ip"], "203.0.113.9");
        assert!(record.context.is_empty());
    }

    #[test]
    fn test_missing_variable_becomes_null() {
        let env = Arc::new(EnvironmentSnapshot::from_vars([("REQUEST_URI", "/")]));
        let processor = EnvironmentProcessor::new(env, &ENVIRONMENT_FIELDS).unwrap();
        let mut record = LogRecord::new("app", Level::Info, "hit", Value::Null);
        processor.process(&mut record);

        assert_eq!(record.extra["url"], "/");
        assert_eq!(record.extra["ip"], Value::Null);
    }

    #[test]
    fn test_non_request_context_is_untouched() {
        let env = Arc::new(EnvironmentSnapshot::from_vars([("REMOTE_ADDR", "127.0.0.1")]));
        let processor = EnvironmentProcessor::new(env, &ENVIRONMENT_FIELDS).unwrap();
        let mut record = LogRecord::new("app", Level::Info, "cli run", Value::Null);
        processor.process(&mut record);
        assert!(record.extra.is_empty());
    }

    #[test]
    fn test_unknown_field_is_rejected() {
        let err = EnvironmentProcessor::new(request_env(), &["url", "cookie"]).unwrap_err();
        assert!(matches!(err, LogwireError::UnknownField(f) if f == "cookie"));
    }

    #[test]
    fn test_fields_keep_order() {
        let processor = EnvironmentProcessor::new(request_env(), &["ip", "url"]).unwrap();
        assert_eq!(processor.fields().collect::<Vec<_>>(), vec!["ip", "url"]);
    }
}
