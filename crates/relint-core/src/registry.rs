//! Explicit rule registry.
//!
//! Maps rule names to constructor functions. The registry is populated
//! from built-ins plus explicit registration for plugins; there is no
//! filesystem scanning or reflective lookup, and an unknown name is a
//! hard error rather than a silently disabled rule.

use crate::rule::{RawValue, RuleBox, RuleOptions};
use crate::types::DisabledInterval;
use std::collections::HashMap;
use thiserror::Error;

/// Constructs a rule instance from its options.
pub type RuleFactory = fn(RuleOptions) -> RuleBox;

/// Errors produced by rule resolution.
#[derive(Debug, Error)]
pub enum RegistryError {
    /// The configuration names a rule no factory was registered for.
    #[error("unknown rule `{name}`; registered rules: {known}")]
    UnknownRule {
        /// The unresolved rule name.
        name: String,
        /// Comma-separated list of registered rule names.
        known: String,
    },
}

/// Mapping from rule name to factory.
#[derive(Default)]
pub struct RuleRegistry {
    factories: HashMap<String, RuleFactory>,
}

impl RuleRegistry {
    /// Creates an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a factory, replacing any previous one for the name.
    pub fn register(&mut self, name: impl Into<String>, factory: RuleFactory) {
        self.factories.insert(name.into(), factory);
    }

    /// Builder-style registration.
    #[must_use]
    pub fn with_rule(mut self, name: impl Into<String>, factory: RuleFactory) -> Self {
        self.register(name, factory);
        self
    }

    /// Returns true if a factory is registered for the name.
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.factories.contains_key(name)
    }

    /// Registered rule names, sorted.
    #[must_use]
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.factories.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    /// Constructs a rule instance by name.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError::UnknownRule`] when no factory was
    /// registered under `name`.
    pub fn create(
        &self,
        name: &str,
        value: RawValue,
        disabled_intervals: Vec<DisabledInterval>,
    ) -> Result<RuleBox, RegistryError> {
        let factory = self
            .factories
            .get(name)
            .ok_or_else(|| RegistryError::UnknownRule {
                name: name.to_string(),
                known: self.names().join(", "),
            })?;
        Ok(factory(RuleOptions::new(name, value, disabled_intervals)))
    }
}
