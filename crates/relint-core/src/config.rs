//! Session configuration.

use crate::rule::RawValue;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::PathBuf;
use thiserror::Error;

/// Top-level configuration for a lint session.
///
/// Rule values stay unparsed: `true`, `false`, or `[enabled, args...]`.
/// The ordered map gives every session the same deterministic rule
/// iteration order.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Per-rule raw configuration values, keyed by rule name.
    #[serde(default)]
    pub rules: BTreeMap<String, RawValue>,
}

impl Config {
    /// Creates an empty configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads configuration from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn from_file(path: &std::path::Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::Io {
            path: path.to_path_buf(),
            source: e,
        })?;
        Self::parse(&content)
    }

    /// Parses configuration from a TOML string.
    ///
    /// # Errors
    ///
    /// Returns an error if the TOML is invalid.
    pub fn parse(content: &str) -> Result<Self, ConfigError> {
        toml::from_str(content).map_err(|e| ConfigError::Parse {
            message: e.to_string(),
        })
    }

    /// Sets the raw value for one rule.
    #[must_use]
    pub fn with_rule(mut self, name: impl Into<String>, value: RawValue) -> Self {
        self.rules.insert(name.into(), value);
        self
    }

    /// Enables a rule with no arguments.
    #[must_use]
    pub fn with_enabled_rule(self, name: impl Into<String>) -> Self {
        self.with_rule(name, RawValue::Boolean(true))
    }
}

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// IO error reading config file.
    #[error("failed to read config file {path}: {source}")]
    Io {
        /// Path that failed to read.
        path: PathBuf,
        /// Underlying IO error.
        source: std::io::Error,
    },

    /// Parse error in config file.
    #[error("failed to parse config: {message}")]
    Parse {
        /// Parse error message.
        message: String,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_rule_values() {
        let toml = r#"
[rules]
no-string-literal = true
must-use-return = [true, "strict"]
dormant-rule = false
"#;
        let config = Config::parse(toml).expect("config must parse");
        assert_eq!(config.rules.len(), 3);
        assert_eq!(
            config.rules.get("no-string-literal"),
            Some(&RawValue::Boolean(true))
        );
        assert!(matches!(
            config.rules.get("must-use-return"),
            Some(RawValue::Array(items)) if items.len() == 2
        ));
    }

    #[test]
    fn rule_iteration_order_is_name_sorted() {
        let config = Config::new()
            .with_enabled_rule("zeta")
            .with_enabled_rule("alpha");
        let names: Vec<&str> = config.rules.keys().map(String::as_str).collect();
        assert_eq!(names, vec!["alpha", "zeta"]);
    }

    #[test]
    fn invalid_toml_is_a_parse_error() {
        let err = Config::parse("rules = [").expect_err("must fail");
        assert!(err.to_string().contains("failed to parse config"));
    }
}
