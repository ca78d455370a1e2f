//! Rule contract and per-run match collection.

use crate::tree::SourceFile;
use crate::types::{does_intersect, DisabledInterval, Fix, Match, Span};

/// The unparsed configuration value of one rule: `true`, `false`, or
/// `[enabled, args...]`.
pub type RawValue = toml::Value;

/// Options a rule is constructed from: its name, raw config value, and the
/// disabled intervals computed for it in the current file.
#[derive(Debug, Clone)]
pub struct RuleOptions {
    rule_name: String,
    value: RawValue,
    arguments: Vec<RawValue>,
    disabled_intervals: Vec<DisabledInterval>,
}

impl RuleOptions {
    /// Creates options from the raw config value.
    ///
    /// For an array value, everything after the leading enabled flag
    /// becomes the rule's arguments.
    #[must_use]
    pub fn new(
        rule_name: impl Into<String>,
        value: RawValue,
        disabled_intervals: Vec<DisabledInterval>,
    ) -> Self {
        let arguments = match &value {
            RawValue::Array(items) if items.len() > 1 => items[1..].to_vec(),
            _ => Vec::new(),
        };
        Self {
            rule_name: rule_name.into(),
            value,
            arguments,
            disabled_intervals,
        }
    }

    /// The rule's configured name.
    #[must_use]
    pub fn rule_name(&self) -> &str {
        &self.rule_name
    }

    /// Arguments after the enabled flag of an array value.
    #[must_use]
    pub fn arguments(&self) -> &[RawValue] {
        &self.arguments
    }

    /// Returns true if the arguments contain the given string.
    #[must_use]
    pub fn has_argument(&self, name: &str) -> bool {
        self.arguments
            .iter()
            .any(|v| v.as_str() == Some(name))
    }

    /// Disabled intervals for this rule in the current file.
    #[must_use]
    pub fn disabled_intervals(&self) -> &[DisabledInterval] {
        &self.disabled_intervals
    }

    /// Whether the raw value enables the rule.
    ///
    /// Booleans map directly; an array is enabled iff its first element is
    /// boolean `true`; any other shape is disabled.
    #[must_use]
    pub fn is_enabled(&self) -> bool {
        match &self.value {
            RawValue::Boolean(enabled) => *enabled,
            RawValue::Array(items) => items
                .first()
                .and_then(RawValue::as_bool)
                .unwrap_or(false),
            _ => false,
        }
    }
}

/// Optional type-resolution capability a semantic rule may query.
///
/// Syntax-only rules ignore it; the default `apply_with_program`
/// implementation never touches it.
pub trait TypeResolver {
    /// Return type of a callable, by the spelling at the call site.
    ///
    /// `None` means the callee is unknown to the resolver; rules must
    /// treat that as "do not report".
    fn return_type_of(&self, callee: &str) -> Option<String>;
}

/// A lint rule: anything exposing `is_enabled`, `apply`, and
/// `apply_with_program`.
///
/// Rules are constructed by a registry factory from [`RuleOptions`], run a
/// [`Walker`](crate::walker::Walker) over the file's tree, and emit
/// matches through a [`MatchCollector`]. They are mutually independent:
/// no rule may depend on another rule's output.
pub trait Rule: Send + Sync {
    /// The options this rule was constructed with.
    fn options(&self) -> &RuleOptions;

    /// Whether the configured raw value enables this rule.
    fn is_enabled(&self) -> bool {
        self.options().is_enabled()
    }

    /// Syntax-only analysis of one file.
    fn apply(&self, file: &SourceFile) -> Vec<Match>;

    /// Semantic analysis with a type-resolution context.
    ///
    /// Defaults to [`apply`](Rule::apply), so every rule has the option
    /// but not the obligation to use type information.
    fn apply_with_program(&self, file: &SourceFile, types: &dyn TypeResolver) -> Vec<Match> {
        let _ = types;
        self.apply(file)
    }
}

/// Type alias for boxed rule trait objects.
pub type RuleBox = Box<dyn Rule>;

/// Collects the matches of one rule's run over one file.
///
/// Admission policy: a candidate is kept only if no already-recorded match
/// of this run has an identical span and message, and its span does not
/// intersect any of the rule's disabled intervals.
pub struct MatchCollector<'a> {
    file: &'a SourceFile,
    options: &'a RuleOptions,
    limit: usize,
    matches: Vec<Match>,
}

impl<'a> MatchCollector<'a> {
    /// Creates a collector bound to one file and one rule's options.
    #[must_use]
    pub fn new(file: &'a SourceFile, options: &'a RuleOptions) -> Self {
        Self {
            file,
            options,
            limit: file.len(),
            matches: Vec::new(),
        }
    }

    /// The file being linted.
    #[must_use]
    pub fn file(&self) -> &SourceFile {
        self.file
    }

    /// The rule options this run was constructed with.
    #[must_use]
    pub fn options(&self) -> &RuleOptions {
        self.options
    }

    /// Builds a match over `[start, start + width)`, clamped to the file.
    #[must_use]
    pub fn create_match(
        &self,
        start: usize,
        width: usize,
        message: impl Into<String>,
        fixes: Vec<Fix>,
    ) -> Match {
        let from = start.min(self.limit);
        let to = (start + width).min(self.limit);
        Match::new(
            self.file.path(),
            Span::new(from, to),
            message,
            self.options.rule_name(),
            fixes,
        )
    }

    /// Records a match unless it duplicates an earlier one from this run
    /// or falls inside a disabled interval.
    pub fn add_match(&mut self, candidate: Match) {
        if self.exists(&candidate) {
            return;
        }
        if does_intersect(candidate.span, self.options.disabled_intervals()) {
            tracing::debug!(
                rule = self.options.rule_name(),
                start = candidate.span.start,
                end = candidate.span.end,
                "match suppressed by disabled interval"
            );
            return;
        }
        self.matches.push(candidate);
    }

    /// Consumes the collector, yielding matches in recording order.
    #[must_use]
    pub fn into_matches(self) -> Vec<Match> {
        self.matches
    }

    fn exists(&self, candidate: &Match) -> bool {
        self.matches
            .iter()
            .any(|m| m.span == candidate.span && m.message == candidate.message)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tree::{NodeKind, SyntaxNode};

    fn raw(text: &str) -> RawValue {
        // Wrap in a table so plain values parse as TOML
        let table: toml::Table = format!("v = {text}")
            .parse()
            .expect("test value must parse");
        table["v"].clone()
    }

    fn test_file() -> SourceFile {
        let text = "0123456789012345678901234567890123456789";
        SourceFile::new(
            "test.rs",
            text,
            SyntaxNode::new(NodeKind::Root, Span::new(0, text.len())),
        )
    }

    #[test]
    fn is_enabled_table() {
        let on = |v: &str| RuleOptions::new("r", raw(v), vec![]).is_enabled();
        assert!(on("true"));
        assert!(!on("false"));
        assert!(on("[true, \"x\"]"));
        assert!(!on("[false]"));
        assert!(!on("[]"));
        assert!(!on("\"yes\""));
        assert!(!on("1"));
        assert!(!on("[1, 2]"));
        assert!(!on("{ enabled = true }"));
    }

    #[test]
    fn array_tail_becomes_arguments() {
        let options = RuleOptions::new("r", raw("[true, \"strict\", 3]"), vec![]);
        assert_eq!(options.arguments().len(), 2);
        assert!(options.has_argument("strict"));
        assert!(!options.has_argument("lenient"));
    }

    #[test]
    fn boolean_value_has_no_arguments() {
        let options = RuleOptions::new("r", raw("true"), vec![]);
        assert!(options.arguments().is_empty());
    }

    #[test]
    fn create_match_clamps_to_file_length() {
        let file = test_file();
        let options = RuleOptions::new("r", raw("true"), vec![]);
        let collector = MatchCollector::new(&file, &options);
        let m = collector.create_match(35, 20, "past the end", vec![]);
        assert_eq!(m.span, Span::new(35, 40));
        let m = collector.create_match(99, 5, "fully past", vec![]);
        assert_eq!(m.span, Span::new(40, 40));
    }

    #[test]
    fn duplicate_span_and_message_recorded_once() {
        let file = test_file();
        let options = RuleOptions::new("r", raw("true"), vec![]);
        let mut collector = MatchCollector::new(&file, &options);
        let m = collector.create_match(2, 5, "dup", vec![]);
        collector.add_match(m.clone());
        collector.add_match(m);
        let other = collector.create_match(2, 5, "not a dup", vec![]);
        collector.add_match(other);
        assert_eq!(collector.into_matches().len(), 2);
    }

    #[test]
    fn suppressed_span_is_rejected() {
        let file = test_file();
        let options = RuleOptions::new("r", raw("true"), vec![DisabledInterval::new(10, 20)]);
        let mut collector = MatchCollector::new(&file, &options);
        let inside = collector.create_match(12, 4, "inside", vec![]);
        collector.add_match(inside);
        assert!(collector.into_matches().is_empty());
    }

    #[test]
    fn boundary_exact_spans_are_not_suppressed() {
        let file = test_file();
        let options = RuleOptions::new("r", raw("true"), vec![DisabledInterval::new(10, 20)]);
        let mut collector = MatchCollector::new(&file, &options);
        // Ends exactly at the interval start
        let before = collector.create_match(5, 5, "before", vec![]);
        // Starts exactly at the interval end
        let after = collector.create_match(20, 5, "after", vec![]);
        collector.add_match(before);
        collector.add_match(after);
        assert_eq!(collector.into_matches().len(), 2);
    }
}
