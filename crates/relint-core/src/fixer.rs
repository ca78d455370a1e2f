//! Conflict-free resolution of suggested text replacements.
//!
//! Given one file's final match list, takes the first fix of every match
//! that has one, flattens the replacements, selects a maximum
//! non-overlapping subset by the classical interval-scheduling greedy rule
//! (earliest end first), and applies the survivors right-to-left as direct
//! text surgery on the original text. Replacements rejected as conflicting
//! are dropped silently for this pass; a later pass over the rewritten
//! text may surface and resolve them.

use crate::types::{Match, Replacement};

/// Result of applying one file's accepted replacements.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Patched {
    /// The rewritten text.
    pub text: String,
    /// Number of replacements actually applied.
    pub applied: usize,
}

/// Flattens the first fix of every fixable match into one replacement list.
///
/// Per-match alternative selection does not exist in batch mode; the first
/// suggested fix always wins.
#[must_use]
pub fn collect_replacements(matches: &[Match]) -> Vec<Replacement> {
    matches
        .iter()
        .filter_map(|m| m.fixes.first())
        .flat_map(|fix| fix.replacements.iter().cloned())
        .collect()
}

/// Selects a maximum-cardinality pairwise non-overlapping subset and
/// returns it in right-to-left application order.
///
/// Sorts ascending by `end`, then greedily accepts every replacement whose
/// `start` is at or past the end of the last accepted one, and finally
/// reverses so the rightmost replacement is applied first.
#[must_use]
pub fn select_replacements(mut replacements: Vec<Replacement>) -> Vec<Replacement> {
    if replacements.is_empty() {
        return replacements;
    }

    replacements.sort_by_key(|r| (r.end, r.start));

    let mut accepted: Vec<Replacement> = Vec::new();
    let mut last_accepted_end = 0;
    for replacement in replacements {
        if replacement.start >= last_accepted_end {
            last_accepted_end = replacement.end;
            accepted.push(replacement);
        }
    }

    accepted.reverse();
    accepted
}

/// Applies replacements in right-to-left order to the original text.
///
/// Because edits proceed strictly right-to-left, offsets of not-yet-applied
/// leftward replacements stay valid. A defensive boundary check skips any
/// candidate reaching past the start of the last applied edit, as a second
/// guard against residual overlap.
#[must_use]
pub fn apply_replacements(text: &str, ordered: &[Replacement]) -> Patched {
    let mut patched = text.to_string();
    let mut last_changed = text.len();
    let mut applied = 0;

    for replacement in ordered {
        if replacement.end > last_changed {
            tracing::warn!(
                start = replacement.start,
                end = replacement.end,
                "skipping overlapping replacement"
            );
            continue;
        }
        patched.replace_range(replacement.start..replacement.end, &replacement.replace_with);
        last_changed = replacement.start;
        applied += 1;
    }

    Patched {
        text: patched,
        applied,
    }
}

/// Resolves one file's matches into patched text: collect, select, apply.
#[must_use]
pub fn apply_fixes(text: &str, matches: &[Match]) -> Patched {
    let selected = select_replacements(collect_replacements(matches));
    apply_replacements(text, &selected)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Fix, Span};

    fn rep(start: usize, end: usize, with: &str) -> Replacement {
        Replacement::new(start, end, with)
    }

    fn fixable(span: Span, replacements: Vec<Replacement>) -> Match {
        Match::new(
            "test.rs",
            span,
            "finding",
            "test-rule",
            vec![Fix::new("fix it", true, replacements)],
        )
    }

    #[test]
    fn zero_replacements_leave_text_unchanged() {
        let patched = apply_fixes("hello world", &[]);
        assert_eq!(patched.text, "hello world");
        assert_eq!(patched.applied, 0);
    }

    #[test]
    fn single_replacement() {
        let matches = [fixable(Span::new(0, 5), vec![rep(0, 5, "howdy")])];
        let patched = apply_fixes("hello world", &matches);
        assert_eq!(patched.text, "howdy world");
        assert_eq!(patched.applied, 1);
    }

    #[test]
    fn two_non_overlapping_replacements() {
        let matches = [
            fixable(Span::new(0, 5), vec![rep(0, 5, "goodbye")]),
            fixable(Span::new(6, 11), vec![rep(6, 11, "moon")]),
        ];
        let patched = apply_fixes("hello world", &matches);
        assert_eq!(patched.text, "goodbye moon");
        assert_eq!(patched.applied, 2);
    }

    #[test]
    fn overlapping_replacements_keep_the_smaller_end() {
        // [0,5) and [3,8) overlap; exactly [0,5) survives.
        let matches = [
            fixable(Span::new(0, 5), vec![rep(0, 5, "AAAAA")]),
            fixable(Span::new(3, 8), vec![rep(3, 8, "BBBBB")]),
        ];
        let patched = apply_fixes("0123456789", &matches);
        assert_eq!(patched.text, "AAAAA56789");
        assert_eq!(patched.applied, 1);
    }

    #[test]
    fn touching_replacements_both_survive() {
        let selected = select_replacements(vec![rep(5, 8, "b"), rep(0, 5, "a")]);
        assert_eq!(selected, vec![rep(5, 8, "b"), rep(0, 5, "a")]);
    }

    #[test]
    fn selection_returns_right_to_left_order() {
        let selected = select_replacements(vec![rep(0, 2, "a"), rep(8, 9, "c"), rep(4, 6, "b")]);
        let starts: Vec<usize> = selected.iter().map(|r| r.start).collect();
        assert_eq!(starts, vec![8, 4, 0]);
    }

    #[test]
    fn only_first_fix_of_a_match_is_taken() {
        let m = Match::new(
            "test.rs",
            Span::new(0, 5),
            "finding",
            "test-rule",
            vec![
                Fix::new("preferred", true, vec![rep(0, 5, "first")]),
                Fix::new("alternative", true, vec![rep(0, 5, "second")]),
            ],
        );
        let replacements = collect_replacements(&[m]);
        assert_eq!(replacements, vec![rep(0, 5, "first")]);
    }

    #[test]
    fn defensive_guard_skips_residual_overlap() {
        // Hand the applier an order the selector would never produce.
        let bad_order = [rep(0, 5, "AAAAA"), rep(3, 8, "BBBBB")];
        let patched = apply_replacements("0123456789", &bad_order);
        assert_eq!(patched.text, "AAAAA56789");
        assert_eq!(patched.applied, 1);
    }

    #[test]
    fn deletion_and_insertion() {
        // Delete " world" and insert a prefix at offset 0.
        let selected = select_replacements(vec![rep(5, 11, ""), rep(0, 0, ">> ")]);
        let patched = apply_replacements("hello world", &selected);
        assert_eq!(patched.text, ">> hello");
        assert_eq!(patched.applied, 2);
    }

    /// Largest subset orderable by end position with each start at or past
    /// the previous end, found by exhaustive search.
    fn brute_force_max(replacements: &[Replacement]) -> usize {
        let n = replacements.len();
        let mut best = 0;
        for mask in 0u32..(1 << n) {
            let mut chosen: Vec<&Replacement> = (0..n)
                .filter(|i| mask & (1 << i) != 0)
                .map(|i| &replacements[i])
                .collect();
            chosen.sort_by_key(|r| (r.end, r.start));
            let ok = chosen
                .windows(2)
                .all(|pair| pair[1].start >= pair[0].end);
            if ok {
                best = best.max(chosen.len());
            }
        }
        best
    }

    #[test]
    fn greedy_selection_matches_brute_force_cardinality() {
        // Small deterministic pseudo-random interval sets.
        let mut seed: u64 = 0x5DEECE66D;
        let mut next = move |bound: usize| {
            seed = seed.wrapping_mul(6_364_136_223_846_793_005).wrapping_add(1);
            ((seed >> 33) as usize) % bound
        };

        for _ in 0..50 {
            let count = 1 + next(6);
            let replacements: Vec<Replacement> = (0..count)
                .map(|_| {
                    let start = next(20);
                    let len = next(6);
                    rep(start, start + len, "x")
                })
                .collect();

            let selected = select_replacements(replacements.clone());
            // Right-to-left order implies pairwise non-overlap.
            for pair in selected.windows(2) {
                assert!(
                    pair[1].end <= pair[0].start,
                    "selected set must not overlap"
                );
            }
            assert_eq!(
                selected.len(),
                brute_force_max(&replacements),
                "greedy must reach maximum cardinality for {replacements:?}"
            );
        }
    }
}
