//! # relint-core
//!
//! Core framework for the relint refactoring linter: a pluggable engine
//! that walks a generic syntax tree, runs configured rules against it,
//! and resolves their suggested text edits into one conflict-free
//! patched output.
//!
//! This crate provides:
//!
//! - [`Walker`] for per-node-kind tree traversal
//! - [`Rule`] contract plus [`MatchCollector`] for producing findings
//! - [`SwitchSet`] for suppression-interval computation from in-source
//!   enable/disable switches
//! - [`LintSession`] for per-file orchestration and deduplication
//! - [`fixer`] for maximal non-overlapping replacement selection
//! - [`RuleRegistry`] mapping rule names to factories
//!
//! Parsing and type resolution stay outside: the core consumes an
//! already-built [`SourceFile`] tree plus an optional [`TypeResolver`].
//!
//! ## Example
//!
//! ```ignore
//! use relint_core::{Config, LintSession, SwitchSet};
//!
//! let registry = relint_rules::builtin_registry();
//! let config = Config::new().with_enabled_rule("no-string-literal");
//! let session = LintSession::new(&registry, config);
//! let report = session.lint_file(&file, &SwitchSet::new(), None)?;
//! let patched = relint_core::fixer::apply_fixes(&file.text, &report.matches);
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod config;
mod registry;
mod rule;
mod session;
mod suppress;
mod tree;
mod types;
mod walker;

/// Conflict-free replacement selection and application.
pub mod fixer;

pub use config::{Config, ConfigError};
pub use registry::{RegistryError, RuleFactory, RuleRegistry};
pub use rule::{MatchCollector, RawValue, Rule, RuleBox, RuleOptions, TypeResolver};
pub use session::{FileReport, LintSession, LintUnit, RuleError, SessionError};
pub use suppress::{build_disabled_intervals, RuleSwitch, SwitchSet, SwitchTarget};
pub use tree::{NodeKind, SourceFile, SyntaxNode};
pub use types::{
    does_intersect, DisabledInterval, Fix, Match, MatchDiagnostic, Replacement, Span,
};
pub use walker::{Flow, Handler, Walker};
