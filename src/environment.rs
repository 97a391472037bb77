/// Request metadata captured from the hosting environment
///
/// Uses the CGI variable names (`REQUEST_METHOD`, `REQUEST_URI`, ...) so that a
/// process started by a CGI/FastCGI host can be snapshotted with `from_env`.

use std::collections::BTreeMap;

/// Server variables worth capturing for log enrichment.
pub const SERVER_VARS: [&str; 7] = [
    "REQUEST_METHOD",
    "REQUEST_URI",
    "REMOTE_ADDR",
    "SERVER_NAME",
    "HTTP_REFERER",
    "HTTP_USER_AGENT",
    "UNIQUE_ID",
];

/// Read-only snapshot of server variables, taken once at setup.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EnvironmentSnapshot {
    vars: BTreeMap<String, String>,
}

impl EnvironmentSnapshot {
    /// Snapshot the CGI request variables present in the process environment.
    pub fn from_env() -> Self {
        Self::from_vars(
            SERVER_VARS
                .iter()
                .filter_map(|key| std::env::var(key).ok().map(|value| (*key, value))),
        )
    }

    pub fn from_vars<K, V>(vars: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: Into<String>,
        V: Into<String>,
    {
        EnvironmentSnapshot {
            vars: vars.into_iter().map(|(k, v)| (k.into(), v.into())).collect(),
        }
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.vars.get(key).map(String::as_str)
    }

    pub fn contains(&self, key: &str) -> bool {
        self.vars.contains_key(key)
    }

    /// True when the snapshot describes an actual request.
    pub fn is_request(&self) -> bool {
        self.contains("REQUEST_URI")
    }

    pub fn len(&self) -> usize {
        self.vars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vars.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_vars_lookup() {
        let env = EnvironmentSnapshot::from_vars([
            ("REQUEST_METHOD", "GET"),
            ("REQUEST_URI", "/health"),
        ]);
        assert_eq!(env.get("REQUEST_METHOD"), Some("GET"));
        assert_eq!(env.get("REMOTE_ADDR"), None);
        assert!(env.is_request());
        assert_eq!(env.len(), 2);
    }

    #[test]
    fn test_empty_snapshot_is_not_a_request() {
        let env = EnvironmentSnapshot::default();
        assert!(env.is_empty());
        assert!(!env.is_request());
    }
}
