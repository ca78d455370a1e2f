//! Comment-trivia scanner for suppression directives.
//!
//! Owns the textual grammar the core deliberately knows nothing about:
//!
//! ```text
//! // relint:disable              disable every rule from here
//! // relint:disable rule-name    disable one rule from here
//! // relint:enable               re-enable every rule
//! // relint:enable rule-name     re-enable one rule
//! ```
//!
//! Each directive produces one `(offset, target, enabled)` switch at the
//! byte offset of the comment. The scan runs over the file's text with
//! the string-literal spans of the lowered tree masked out, so a
//! directive-shaped line inside a multi-line string is text, not a
//! switch. Malformed directives are ignored, never an error.

use relint_core::{NodeKind, SourceFile, Span, SwitchSet, SwitchTarget, SyntaxNode};

const DISABLE: &str = "relint:disable";
const ENABLE: &str = "relint:enable";

/// Scans a parsed file for suppression switches.
#[must_use]
pub fn scan_switches(file: &SourceFile) -> SwitchSet {
    let mut literals = Vec::new();
    collect_literal_spans(&file.root, &mut literals);

    let mut set = SwitchSet::new();
    let mut offset = 0;

    for line in file.text.split_inclusive('\n') {
        let trimmed = line.trim_start();
        if let Some(body) = comment_body(trimmed) {
            let comment_offset = offset + (line.len() - trimmed.len());
            if !inside_literal(comment_offset, &literals) {
                if let Some((target, enabled)) = parse_directive(body) {
                    tracing::debug!(offset = comment_offset, enabled, "suppression switch");
                    set.push(comment_offset, target, enabled);
                }
            }
        }
        offset += line.len();
    }

    set
}

/// String-literal spans of the lowered tree, in traversal order.
fn collect_literal_spans(node: &SyntaxNode, spans: &mut Vec<Span>) {
    if node.kind == NodeKind::StrLit {
        spans.push(node.span);
    }
    for child in &node.children {
        collect_literal_spans(child, spans);
    }
}

fn inside_literal(offset: usize, spans: &[Span]) -> bool {
    spans.iter().any(|s| s.start <= offset && offset < s.end)
}

/// The trimmed body of a `//` or `///` comment line, if it is one.
fn comment_body(line: &str) -> Option<&str> {
    line.strip_prefix("//")
        .map(|rest| rest.trim_start_matches('/').trim())
}

fn parse_directive(body: &str) -> Option<(SwitchTarget, bool)> {
    if let Some(tail) = body.strip_prefix(DISABLE) {
        parse_target(tail).map(|target| (target, false))
    } else if let Some(tail) = body.strip_prefix(ENABLE) {
        parse_target(tail).map(|target| (target, true))
    } else {
        None
    }
}

/// The switch target named after a directive keyword.
///
/// Nothing after the keyword means "all rules"; a whitespace-separated
/// word names one rule; any other trailing character makes the line a
/// non-directive (so `relint:disabled` never toggles anything).
fn parse_target(tail: &str) -> Option<SwitchTarget> {
    if tail.is_empty() {
        return Some(SwitchTarget::All);
    }
    if !tail.starts_with(char::is_whitespace) {
        return None;
    }
    let name = tail.trim();
    if name.is_empty() {
        Some(SwitchTarget::All)
    } else {
        Some(SwitchTarget::Rule(name.to_string()))
    }
}
