//! Disabled-interval computation from in-source enable/disable switches.
//!
//! The textual grammar of directive comments belongs to the frontend; the
//! core consumes ordered `(offset, target, enabled)` switch triples and
//! turns them into minimal disjoint [`DisabledInterval`] lists, one list
//! per rule, built once per file before any rule runs.

use crate::types::DisabledInterval;
use std::collections::HashMap;

/// What a directive switches: every rule at once, or one named rule.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum SwitchTarget {
    /// The bare "all rules" switch.
    All,
    /// A single named rule.
    Rule(String),
}

/// One enable/disable toggle at a byte offset.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RuleSwitch {
    /// Byte offset the toggle takes effect from.
    pub offset: usize,
    /// True for enable, false for disable.
    pub enabled: bool,
}

/// Per-file switch sequences grouped by target, in position order.
#[derive(Debug, Clone, Default)]
pub struct SwitchSet {
    all: Vec<RuleSwitch>,
    by_rule: HashMap<String, Vec<RuleSwitch>>,
}

impl SwitchSet {
    /// Creates an empty switch set (no directives in the file).
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a switch set from scanner output.
    #[must_use]
    pub fn from_switches(switches: impl IntoIterator<Item = (usize, SwitchTarget, bool)>) -> Self {
        let mut set = Self::new();
        for (offset, target, enabled) in switches {
            set.push(offset, target, enabled);
        }
        set
    }

    /// Records one toggle.
    pub fn push(&mut self, offset: usize, target: SwitchTarget, enabled: bool) {
        let switch = RuleSwitch { offset, enabled };
        match target {
            SwitchTarget::All => self.all.push(switch),
            SwitchTarget::Rule(name) => self.by_rule.entry(name).or_default().push(switch),
        }
    }

    /// Returns true if the file carried no directives at all.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.all.is_empty() && self.by_rule.is_empty()
    }

    /// Effective disabled intervals for one rule over a file of `eof` bytes.
    #[must_use]
    pub fn disabled_intervals_for(&self, rule_name: &str, eof: usize) -> Vec<DisabledInterval> {
        let rule_switches = self
            .by_rule
            .get(rule_name)
            .map_or(&[] as &[RuleSwitch], Vec::as_slice);
        build_disabled_intervals(rule_switches, &self.all, eof)
    }
}

/// Merges one rule's toggle sequence with the "all" sequence into minimal
/// disjoint disabled intervals.
///
/// An offset is disabled if either sequence's most recent toggle at or
/// before it is a disable. An enable with no preceding disable is a no-op,
/// a disable with no following enable extends to `eof`, and repeated
/// identical toggles are idempotent.
#[must_use]
pub fn build_disabled_intervals(
    rule_switches: &[RuleSwitch],
    all_switches: &[RuleSwitch],
    eof: usize,
) -> Vec<DisabledInterval> {
    // (offset, enabled, is_all) merged in position order
    let mut events: Vec<(usize, bool, bool)> = rule_switches
        .iter()
        .map(|s| (s.offset, s.enabled, false))
        .chain(all_switches.iter().map(|s| (s.offset, s.enabled, true)))
        .collect();
    events.sort_by_key(|&(offset, ..)| offset);

    let mut intervals = Vec::new();
    let mut rule_on = true;
    let mut all_on = true;
    let mut disabled_from: Option<usize> = None;

    for (offset, enabled, is_all) in events {
        if is_all {
            all_on = enabled;
        } else {
            rule_on = enabled;
        }
        let disabled = !(rule_on && all_on);
        match (disabled, disabled_from) {
            (true, None) => disabled_from = Some(offset),
            (false, Some(start)) => {
                if start < offset {
                    intervals.push(DisabledInterval::new(start, offset));
                }
                disabled_from = None;
            }
            _ => {}
        }
    }

    if let Some(start) = disabled_from {
        if start < eof {
            intervals.push(DisabledInterval::new(start, eof));
        }
    }

    intervals
}
