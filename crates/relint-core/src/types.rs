//! Core types for lint findings and suggested fixes.

use miette::{Diagnostic, SourceSpan};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// A half-open byte range `[start, end)` into one file's original text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Span {
    /// Inclusive start offset.
    pub start: usize,
    /// Exclusive end offset.
    pub end: usize,
}

impl Span {
    /// Creates a new span. `start` must not exceed `end`.
    #[must_use]
    pub fn new(start: usize, end: usize) -> Self {
        debug_assert!(start <= end, "span start must not exceed end");
        Self { start, end }
    }

    /// Length of the span in bytes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.end - self.start
    }

    /// Returns true if the span covers no text.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }

    /// Strict half-open intersection test: two non-empty spans `[s,e)` and
    /// `[ds,de)` intersect iff `s < de && ds < e`. A span ending exactly
    /// where another starts does not intersect it, and an empty span has
    /// no overlap with anything.
    #[must_use]
    pub fn intersects(&self, other: Span) -> bool {
        !self.is_empty()
            && !other.is_empty()
            && self.start < other.end
            && other.start < self.end
    }
}

/// A span where a given rule (or all rules) must not report findings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DisabledInterval {
    /// Byte offset where suppression begins.
    pub start: usize,
    /// Byte offset where suppression ends (exclusive).
    pub end: usize,
}

impl DisabledInterval {
    /// Creates a new disabled interval.
    #[must_use]
    pub fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }

    /// The interval as a plain span.
    #[must_use]
    pub fn span(&self) -> Span {
        Span::new(self.start, self.end)
    }
}

/// Returns true if `span` intersects any of the given disabled intervals.
#[must_use]
pub fn does_intersect(span: Span, intervals: &[DisabledInterval]) -> bool {
    intervals.iter().any(|i| span.intersects(i.span()))
}

/// One literal text substitution over the file's *original* text.
///
/// Offsets always refer to the pre-fix text; `FixResolver` is responsible
/// for applying replacements in an order that keeps them valid.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Replacement {
    /// Start offset in the original text.
    pub start: usize,
    /// End offset in the original text (exclusive).
    pub end: usize,
    /// Text spliced in place of `[start, end)`.
    pub replace_with: String,
}

impl Replacement {
    /// Creates a new replacement. `start` must not exceed `end`.
    #[must_use]
    pub fn new(start: usize, end: usize, replace_with: impl Into<String>) -> Self {
        debug_assert!(start <= end, "replacement start must not exceed end");
        Self {
            start,
            end,
            replace_with: replace_with.into(),
        }
    }
}

/// One named remediation option for a [`Match`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Fix {
    /// Human-readable description of the fix.
    pub description: String,
    /// Whether applying the fix cannot change program behavior.
    pub safe: bool,
    /// Replacements making up the fix, in the order the rule produced them.
    pub replacements: Vec<Replacement>,
}

impl Fix {
    /// Creates a new fix.
    #[must_use]
    pub fn new(description: impl Into<String>, safe: bool, replacements: Vec<Replacement>) -> Self {
        Self {
            description: description.into(),
            safe,
            replacements,
        }
    }
}

/// One diagnostic finding, immutable once produced.
///
/// Finding identity is `(file, span, message)` — the producing rule is
/// deliberately excluded so independent rules reporting the same finding
/// deduplicate to one.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Match {
    /// File the finding was reported against.
    pub file: PathBuf,
    /// Text range of the finding in the original source.
    pub span: Span,
    /// Human-readable message.
    pub message: String,
    /// Name of the rule that produced this match.
    pub rule_name: String,
    /// Suggested fixes; batch fixing always selects the first.
    pub fixes: Vec<Fix>,
}

impl Match {
    /// Creates a new match.
    #[must_use]
    pub fn new(
        file: impl Into<PathBuf>,
        span: Span,
        message: impl Into<String>,
        rule_name: impl Into<String>,
        fixes: Vec<Fix>,
    ) -> Self {
        Self {
            file: file.into(),
            span,
            message: message.into(),
            rule_name: rule_name.into(),
            fixes,
        }
    }

    /// Returns true if this match carries at least one fix.
    #[must_use]
    pub fn has_fix(&self) -> bool {
        !self.fixes.is_empty()
    }

    /// Finding identity: same `(file, span, message)` triple.
    ///
    /// Rule name does not participate, so a duplicate reported by a second
    /// rule instance collapses onto the first.
    #[must_use]
    pub fn same_finding(&self, other: &Match) -> bool {
        self.file == other.file && self.span == other.span && self.message == other.message
    }
}

impl std::fmt::Display for Match {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}:{}..{}: [{}] {}",
            self.file.display(),
            self.span.start,
            self.span.end,
            self.rule_name,
            self.message
        )
    }
}

/// Converts a [`Match`] to a miette Diagnostic for rich error display.
#[allow(dead_code)] // Public API for miette integration
#[derive(Debug, thiserror::Error, Diagnostic)]
#[error("{message}")]
pub struct MatchDiagnostic {
    message: String,
    #[help]
    help: Option<String>,
    #[label("{label_message}")]
    span: SourceSpan,
    label_message: String,
}

impl From<&Match> for MatchDiagnostic {
    fn from(m: &Match) -> Self {
        Self {
            message: m.message.clone(),
            help: m.fixes.first().map(|f| f.description.clone()),
            span: SourceSpan::from((m.span.start, m.span.len())),
            label_message: m.rule_name.clone(),
        }
    }
}
