// LogWarden - core/classify.rs
//
// Per-line classification: first match wins, in table order.
// Core layer: pure logic, no I/O or UI dependencies.

use crate::core::rules::{Rule, RuleTable};
use std::sync::Arc;

/// Return the first rule in `rules` whose pattern occurs anywhere in `line`.
///
/// Rules are evaluated strictly in slice order and evaluation stops at the
/// first hit, so a line matched by several rules is always attributed to the
/// earliest one. Returns `None` when no rule matches. Pure and deterministic.
pub fn classify<'t>(rules: &'t [Arc<Rule>], line: &str) -> Option<&'t Arc<Rule>> {
    rules.iter().find(|rule| rule.is_match(line))
}

impl RuleTable {
    /// Classify one line against this table. See [`classify`].
    pub fn classify(&self, line: &str) -> Option<&Arc<Rule>> {
        classify(self.rules(), line)
    }
}
