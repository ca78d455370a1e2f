//! # relint-rules
//!
//! Built-in rules for the relint engine.
//!
//! Each rule lives in its own module and exposes a `NAME` constant plus a
//! `factory` function with the registry's factory signature.
//! [`builtin_registry`] bundles them all; embedders that want a different
//! set can build their own [`RuleRegistry`] and register factories
//! individually.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod must_use_return;
pub mod no_string_literal;

pub use must_use_return::MustUseReturn;
pub use no_string_literal::NoStringLiteral;

use relint_core::RuleRegistry;

/// A registry holding every built-in rule.
#[must_use]
pub fn builtin_registry() -> RuleRegistry {
    RuleRegistry::new()
        .with_rule(no_string_literal::NAME, NoStringLiteral::factory)
        .with_rule(must_use_return::NAME, MustUseReturn::factory)
}

#[cfg(test)]
mod tests {
    use super::*;
    use relint_core::RawValue;

    #[test]
    fn registry_knows_every_builtin() {
        let registry = builtin_registry();
        assert!(registry.contains(no_string_literal::NAME));
        assert!(registry.contains(must_use_return::NAME));
        assert_eq!(
            registry.names(),
            vec![must_use_return::NAME, no_string_literal::NAME]
        );
    }

    #[test]
    fn created_rules_carry_their_options() {
        let registry = builtin_registry();
        let rule = registry
            .create(no_string_literal::NAME, RawValue::Boolean(true), vec![])
            .expect("builtin must be registered");
        assert!(rule.is_enabled());
        assert_eq!(rule.options().rule_name(), no_string_literal::NAME);
    }

    #[test]
    fn unknown_name_is_rejected() {
        let registry = builtin_registry();
        assert!(registry
            .create("no-such-rule", RawValue::Boolean(true), vec![])
            .is_err());
    }
}
