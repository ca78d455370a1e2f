//! Per-file lint orchestration.
//!
//! A [`LintSession`] ties the registry, the session config, and the
//! suppression switches together: per file it constructs every configured
//! rule with its disabled intervals, filters by `is_enabled`, runs each
//! surviving rule isolated from the others, and unions the matches with
//! `(file, span, message)` deduplication. Rules are mutually independent,
//! so files (and rules) could run on separate workers without
//! coordination; execution here is single-threaded and synchronous.

use crate::config::Config;
use crate::registry::{RegistryError, RuleRegistry};
use crate::rule::TypeResolver;
use crate::suppress::SwitchSet;
use crate::tree::SourceFile;
use crate::types::Match;

use std::panic::{catch_unwind, AssertUnwindSafe};
use std::path::PathBuf;
use thiserror::Error;
use tracing::{debug, info, warn};

/// Errors that abort a lint pass.
#[derive(Debug, Error)]
pub enum SessionError {
    /// A configured rule name could not be resolved.
    #[error(transparent)]
    Registry(#[from] RegistryError),
}

/// A rule-scoped failure: one rule panicked during its run.
///
/// Isolated so it cannot corrupt or abort other rules' results for the
/// same file.
#[derive(Debug, Clone)]
pub struct RuleError {
    /// Name of the failing rule.
    pub rule: String,
    /// File it was running against.
    pub file: PathBuf,
    /// Panic message, when one could be extracted.
    pub message: String,
}

impl std::fmt::Display for RuleError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "rule `{}` failed on {}: {}",
            self.rule,
            self.file.display(),
            self.message
        )
    }
}

/// One file's lint outcome: deduplicated matches plus rule-scoped errors.
#[derive(Debug, Default)]
pub struct FileReport {
    /// The file the report covers.
    pub file: PathBuf,
    /// Matches in rule-iteration order, then first-produced order.
    pub matches: Vec<Match>,
    /// Failures of individual rules, if any.
    pub errors: Vec<RuleError>,
}

/// One file plus its lint inputs.
pub struct LintUnit<'a> {
    /// The parsed file.
    pub file: &'a SourceFile,
    /// Suppression switches scanned from the file's comments.
    pub switches: &'a SwitchSet,
    /// Optional type-resolution context for semantic rules.
    pub types: Option<&'a dyn TypeResolver>,
}

/// Resolver handed to rules when no type context exists for a file.
///
/// Knows nothing, so semantic rules report nothing and syntax-only rules
/// are unaffected.
struct NullResolver;

impl TypeResolver for NullResolver {
    fn return_type_of(&self, _callee: &str) -> Option<String> {
        None
    }
}

/// Orchestrates rule construction and execution for a batch of files.
pub struct LintSession<'r> {
    registry: &'r RuleRegistry,
    config: Config,
}

impl<'r> LintSession<'r> {
    /// Creates a session over a registry and a session config.
    #[must_use]
    pub fn new(registry: &'r RuleRegistry, config: Config) -> Self {
        Self { registry, config }
    }

    /// Lints a batch of files, one report per file, in input order.
    ///
    /// # Errors
    ///
    /// Fails on the first configured rule name the registry cannot
    /// resolve.
    pub fn lint<'a>(
        &self,
        units: impl IntoIterator<Item = LintUnit<'a>>,
    ) -> Result<Vec<FileReport>, SessionError> {
        units.into_iter().map(|unit| self.lint_unit(&unit)).collect()
    }

    /// Lints one file.
    ///
    /// # Errors
    ///
    /// Fails when a configured rule name is unknown to the registry;
    /// an unknown rule is never treated as disabled.
    pub fn lint_file(
        &self,
        file: &SourceFile,
        switches: &SwitchSet,
        types: Option<&dyn TypeResolver>,
    ) -> Result<FileReport, SessionError> {
        self.lint_unit(&LintUnit {
            file,
            switches,
            types,
        })
    }

    fn lint_unit(&self, unit: &LintUnit<'_>) -> Result<FileReport, SessionError> {
        let file = unit.file;
        debug!(file = %file.path().display(), "linting");

        let mut report = FileReport {
            file: file.path.clone(),
            ..FileReport::default()
        };

        // Rule iteration order is the config's name order, so session
        // output is deterministic across runs.
        for (rule_name, raw_value) in &self.config.rules {
            let intervals = unit.switches.disabled_intervals_for(rule_name, file.len());
            let rule = self
                .registry
                .create(rule_name, raw_value.clone(), intervals)?;

            if !rule.is_enabled() {
                debug!(rule = rule_name.as_str(), "skipping disabled rule");
                continue;
            }

            let resolver = unit.types.unwrap_or(&NullResolver);
            let outcome = catch_unwind(AssertUnwindSafe(|| {
                rule.apply_with_program(file, resolver)
            }));

            match outcome {
                Ok(rule_matches) => {
                    for candidate in rule_matches {
                        if report.matches.iter().any(|m| m.same_finding(&candidate)) {
                            debug!(
                                rule = rule_name.as_str(),
                                start = candidate.span.start,
                                "dropping duplicate finding"
                            );
                            continue;
                        }
                        report.matches.push(candidate);
                    }
                }
                Err(payload) => {
                    let message = panic_message(payload.as_ref());
                    warn!(
                        rule = rule_name.as_str(),
                        file = %file.path().display(),
                        message = message.as_str(),
                        "rule failed; continuing with remaining rules"
                    );
                    report.errors.push(RuleError {
                        rule: rule_name.clone(),
                        file: file.path.clone(),
                        message,
                    });
                }
            }
        }

        info!(
            file = %file.path().display(),
            matches = report.matches.len(),
            errors = report.errors.len(),
            "lint pass complete"
        );
        Ok(report)
    }
}

fn panic_message(payload: &(dyn std::any::Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "rule panicked".to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rule::{MatchCollector, RawValue, Rule, RuleBox, RuleOptions};
    use crate::suppress::SwitchTarget;
    use crate::tree::{NodeKind, SyntaxNode};
    use crate::types::Span;

    /// Reports one fixed finding at [10, 14) through a collector, so
    /// suppression and per-run dedup both apply.
    struct FixedFinding {
        options: RuleOptions,
    }

    impl Rule for FixedFinding {
        fn options(&self) -> &RuleOptions {
            &self.options
        }

        fn apply(&self, file: &SourceFile) -> Vec<Match> {
            let mut collector = MatchCollector::new(file, &self.options);
            let m = collector.create_match(10, 4, "fixed finding", vec![]);
            collector.add_match(m);
            collector.into_matches()
        }
    }

    struct Panicking {
        options: RuleOptions,
    }

    impl Rule for Panicking {
        fn options(&self) -> &RuleOptions {
            &self.options
        }

        fn apply(&self, _file: &SourceFile) -> Vec<Match> {
            panic!("walker exploded");
        }
    }

    fn fixed(options: RuleOptions) -> RuleBox {
        Box::new(FixedFinding { options })
    }

    fn panicking(options: RuleOptions) -> RuleBox {
        Box::new(Panicking { options })
    }

    fn registry() -> RuleRegistry {
        RuleRegistry::new()
            .with_rule("rule-a", fixed)
            .with_rule("rule-b", fixed)
            .with_rule("rule-panics", panicking)
    }

    fn test_file() -> SourceFile {
        let text = "0123456789012345678901234567890123456789";
        SourceFile::new(
            "test.rs",
            text,
            SyntaxNode::new(NodeKind::Root, Span::new(0, text.len())),
        )
    }

    fn enabled(names: &[&str]) -> Config {
        names
            .iter()
            .fold(Config::new(), |c, n| c.with_enabled_rule(*n))
    }

    #[test]
    fn identical_findings_from_independent_rules_deduplicate() {
        let registry = registry();
        let session = LintSession::new(&registry, enabled(&["rule-a", "rule-b"]));
        let report = session
            .lint_file(&test_file(), &SwitchSet::new(), None)
            .expect("lint must succeed");
        assert_eq!(report.matches.len(), 1);
        // First rule in iteration order wins.
        assert_eq!(report.matches[0].rule_name, "rule-a");
    }

    #[test]
    fn suppressed_rule_is_silent_while_others_still_report() {
        let registry = registry();
        let session = LintSession::new(&registry, enabled(&["rule-a", "rule-b"]));
        // Disable only rule-a over the whole file.
        let switches =
            SwitchSet::from_switches([(0, SwitchTarget::Rule("rule-a".to_string()), false)]);
        let report = session
            .lint_file(&test_file(), &switches, None)
            .expect("lint must succeed");
        assert_eq!(report.matches.len(), 1);
        assert_eq!(report.matches[0].rule_name, "rule-b");
    }

    #[test]
    fn all_switch_suppresses_every_rule() {
        let registry = registry();
        let session = LintSession::new(&registry, enabled(&["rule-a", "rule-b"]));
        let switches = SwitchSet::from_switches([(0, SwitchTarget::All, false)]);
        let report = session
            .lint_file(&test_file(), &switches, None)
            .expect("lint must succeed");
        assert!(report.matches.is_empty());
    }

    #[test]
    fn disabled_rule_never_runs() {
        let registry = registry();
        let config = Config::new()
            .with_rule("rule-a", RawValue::Boolean(false))
            .with_enabled_rule("rule-b");
        let session = LintSession::new(&registry, config);
        let report = session
            .lint_file(&test_file(), &SwitchSet::new(), None)
            .expect("lint must succeed");
        assert_eq!(report.matches.len(), 1);
        assert_eq!(report.matches[0].rule_name, "rule-b");
    }

    #[test]
    fn unknown_rule_name_is_a_hard_error() {
        let registry = registry();
        let session = LintSession::new(&registry, enabled(&["rule-a", "rule-nowhere"]));
        let err = session
            .lint_file(&test_file(), &SwitchSet::new(), None)
            .expect_err("unknown rule must fail the pass");
        assert!(err.to_string().contains("rule-nowhere"));
    }

    #[test]
    fn panicking_rule_is_isolated_from_the_others() {
        let registry = registry();
        let session = LintSession::new(&registry, enabled(&["rule-a", "rule-panics"]));
        let report = session
            .lint_file(&test_file(), &SwitchSet::new(), None)
            .expect("lint must succeed");
        assert_eq!(report.matches.len(), 1);
        assert_eq!(report.errors.len(), 1);
        assert_eq!(report.errors[0].rule, "rule-panics");
        assert!(report.errors[0].message.contains("walker exploded"));
    }

    #[test]
    fn batch_returns_one_report_per_file() {
        let registry = registry();
        let session = LintSession::new(&registry, enabled(&["rule-a"]));
        let file_one = test_file();
        let mut file_two = test_file();
        file_two.path = "other.rs".into();
        let switches = SwitchSet::new();
        let reports = session
            .lint([
                LintUnit {
                    file: &file_one,
                    switches: &switches,
                    types: None,
                },
                LintUnit {
                    file: &file_two,
                    switches: &switches,
                    types: None,
                },
            ])
            .expect("lint must succeed");
        assert_eq!(reports.len(), 2);
        assert_eq!(reports[0].file, PathBuf::from("test.rs"));
        assert_eq!(reports[1].file, PathBuf::from("other.rs"));
    }
}
