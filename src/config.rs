//! Engine configuration.
//!
//! Configuration only selects behavior around the assertions (how replay
//! treats errored predicates and where reports go). It never changes a
//! verdict.

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// How replay reacts to a deferred predicate that panics or returns `Err`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReplayPolicy {
    /// Report the entry as errored and keep replaying the rest.
    #[default]
    IsolateAndContinue,
    /// Report the entry as errored and stop replay with an error.
    FailFast,
}

/// Built-in report sinks selectable from configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SinkKind {
    /// One line per assertion on standard output.
    #[default]
    Stdout,
    /// One line per assertion on standard error.
    Stderr,
    /// `tracing` events.
    Tracing,
    /// One JSON object per line on standard output.
    Json,
}

/// Configuration for a [`UnitTest`](crate::UnitTest).
///
/// # Examples
///
/// ```
/// use unitcheck::{ReplayPolicy, SinkKind, UnitTestConfig};
///
/// let cfg = UnitTestConfig::from_json(r#"{ "policy": "fail_fast" }"#).unwrap();
/// assert_eq!(cfg.policy, ReplayPolicy::FailFast);
/// assert_eq!(cfg.sink, SinkKind::Stdout);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct UnitTestConfig {
    /// Replay error policy.
    pub policy: ReplayPolicy,
    /// Report sink.
    pub sink: SinkKind,
}

impl UnitTestConfig {
    /// Parses a configuration from JSON. Missing fields take their defaults.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        serde_json::from_str(json).map_err(|e| ConfigError::Parse {
            message: e.to_string(),
        })
    }

    /// Returns a copy with the given replay policy.
    #[must_use]
    pub const fn with_policy(mut self, policy: ReplayPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Returns a copy with the given sink.
    #[must_use]
    pub const fn with_sink(mut self, sink: SinkKind) -> Self {
        self.sink = sink;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let cfg = UnitTestConfig::default();
        assert_eq!(cfg.policy, ReplayPolicy::IsolateAndContinue);
        assert_eq!(cfg.sink, SinkKind::Stdout);
    }

    #[test]
    fn parses_full_config() {
        let json = r#"{ "policy": "fail_fast", "sink": "tracing" }"#;
        let cfg = UnitTestConfig::from_json(json).unwrap();
        assert_eq!(cfg.policy, ReplayPolicy::FailFast);
        assert_eq!(cfg.sink, SinkKind::Tracing);
    }

    #[test]
    fn empty_object_is_default() {
        let cfg = UnitTestConfig::from_json("{}").unwrap();
        assert_eq!(cfg, UnitTestConfig::default());
    }

    #[test]
    fn rejects_unknown_fields() {
        let err = UnitTestConfig::from_json(r#"{ "parallel": true }"#).unwrap_err();
        assert!(err.to_string().contains("parallel"));
    }

    #[test]
    fn rejects_unknown_policy() {
        assert!(UnitTestConfig::from_json(r#"{ "policy": "retry" }"#).is_err());
    }

    #[test]
    fn builder_style_overrides() {
        let cfg = UnitTestConfig::default()
            .with_policy(ReplayPolicy::FailFast)
            .with_sink(SinkKind::Json);
        assert_eq!(cfg.policy, ReplayPolicy::FailFast);
        assert_eq!(cfg.sink, SinkKind::Json);
    }
}
