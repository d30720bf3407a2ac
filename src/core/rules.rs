// LogWarden - core/rules.rs
//
// The ordered classification rule table and the built-in rule set.
// Core layer: pure data and regex compilation, no I/O.
//
// Table order is the priority contract. A line is claimed by the earliest
// rule whose pattern matches it; see core::classify.

use crate::core::model::Rgb;
use crate::util::constants;
use crate::util::error::RuleError;
use regex::{Regex, RegexBuilder};
use std::collections::HashMap;
use std::sync::{Arc, OnceLock};

// =============================================================================
// Rule definitions (uncompiled input)
// =============================================================================

/// Literal definition of one rule, compiled into a `Rule` by `RuleTable::new`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RuleDef {
    pub label: &'static str,
    pub pattern: &'static str,
    pub colour: Rgb,
}

impl RuleDef {
    pub const fn new(label: &'static str, pattern: &'static str, colour: Rgb) -> Self {
        Self {
            label,
            pattern,
            colour,
        }
    }
}

/// Built-in rule set, highest priority first.
///
/// "SELinux Denials" sits below "Permission Issues", whose `avc:.*denied`
/// alternative matches everything `avc: denied` does. Rule 7 therefore never
/// claims a line. The order is kept as shipped because it is observable in
/// reports.
pub const BUILTIN_RULES: &[RuleDef] = &[
    RuleDef::new(
        "Permission Issues",
        r"permission denied|avc:.*denied",
        Rgb::new(220, 20, 60), // Crimson
    ),
    RuleDef::new(
        "Security Exceptions",
        r"security exception|invalid credential",
        Rgb::new(255, 140, 0), // Dark orange
    ),
    RuleDef::new(
        "Root Access",
        r"root access|su command",
        Rgb::new(50, 205, 50), // Lime green
    ),
    RuleDef::new(
        "Malware/Trojans",
        r"malware|trojan|virus|backdoor",
        Rgb::new(138, 43, 226), // Violet
    ),
    RuleDef::new(
        "Unauthorized Access",
        r"unauthorized (access|attempt)|bruteforce",
        Rgb::new(0, 191, 255), // Deep sky blue
    ),
    RuleDef::new(
        "Kernel Issues",
        r"kernel panic|segfault|Oops\[#[0-9]+\]|Call Trace:",
        Rgb::new(255, 215, 0), // Gold
    ),
    RuleDef::new(
        "SELinux Denials",
        r"avc: denied",
        Rgb::new(255, 105, 180), // Hot pink
    ),
    RuleDef::new(
        "Debugging Issues",
        r"debuggerd.*signal 11",
        Rgb::new(64, 224, 208), // Turquoise
    ),
    RuleDef::new(
        "Package Issues",
        r"package .* does not belong to|invalid package",
        Rgb::new(147, 112, 219), // Medium purple
    ),
];

// =============================================================================
// Compiled rule
// =============================================================================

/// A compiled classification rule.
///
/// Immutable once built. The pattern is case-insensitive and unanchored: it
/// matches if it occurs anywhere in a line.
#[derive(Debug, Clone)]
pub struct Rule {
    label: String,
    matcher: Regex,
    colour: Rgb,
    position: usize,
}

impl Rule {
    /// Category name, unique within its table.
    pub fn label(&self) -> &str {
        &self.label
    }

    /// Source text of the pattern (without the case-insensitive flag).
    pub fn pattern(&self) -> &str {
        self.matcher.as_str()
    }

    /// Caller-supplied visual attribute.
    pub fn colour(&self) -> Rgb {
        self.colour
    }

    /// Index in the owning table. Lower is higher priority.
    pub fn position(&self) -> usize {
        self.position
    }

    /// True if the pattern occurs anywhere in `line`.
    pub fn is_match(&self, line: &str) -> bool {
        self.matcher.is_match(line)
    }
}

// =============================================================================
// Rule table
// =============================================================================

/// Ordered, immutable list of rules.
///
/// Rules are held behind `Arc` so annotations can reference the rule that
/// claimed a line without borrowing the table.
#[derive(Debug, Clone, Default)]
pub struct RuleTable {
    rules: Vec<Arc<Rule>>,
}

impl RuleTable {
    /// Compile a table from literal definitions, preserving their order.
    ///
    /// Fails on the first bad definition; a table is either built whole or
    /// not at all.
    pub fn new(defs: &[RuleDef]) -> Result<Self, RuleError> {
        let mut rules = Vec::with_capacity(defs.len());
        let mut seen: HashMap<&str, usize> = HashMap::with_capacity(defs.len());

        for (position, def) in defs.iter().enumerate() {
            if def.label.is_empty() {
                return Err(RuleError::MissingField {
                    position,
                    field: "label",
                });
            }
            if def.pattern.is_empty() {
                return Err(RuleError::MissingField {
                    position,
                    field: "pattern",
                });
            }
            if let Some(&first) = seen.get(def.label) {
                return Err(RuleError::DuplicateLabel {
                    label: def.label.to_string(),
                    first,
                    second: position,
                });
            }
            seen.insert(def.label, position);

            let matcher = compile_pattern(def.label, def.pattern)?;
            rules.push(Arc::new(Rule {
                label: def.label.to_string(),
                matcher,
                colour: def.colour,
                position,
            }));
        }

        tracing::debug!(rules = rules.len(), "Rule table compiled");
        Ok(Self { rules })
    }

    /// The rules in priority order.
    pub fn rules(&self) -> &[Arc<Rule>] {
        &self.rules
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Look up a rule by its label.
    pub fn get(&self, label: &str) -> Option<&Arc<Rule>> {
        self.rules.iter().find(|r| r.label == label)
    }
}

/// Compile a rule pattern case-insensitively, with length validation to
/// bound compile cost.
///
/// Case folding is Unicode-aware (`K` also matches the Kelvin sign U+212A).
/// Digit classes in the built-in patterns are spelled `[0-9]` to stay ASCII.
fn compile_pattern(label: &str, pattern: &str) -> Result<Regex, RuleError> {
    if pattern.len() > constants::MAX_REGEX_PATTERN_LENGTH {
        return Err(RuleError::RegexTooLong {
            label: label.to_string(),
            length: pattern.len(),
            max_length: constants::MAX_REGEX_PATTERN_LENGTH,
        });
    }

    RegexBuilder::new(pattern)
        .case_insensitive(true)
        .size_limit(constants::MAX_REGEX_COMPILED_SIZE)
        .build()
        .map_err(|e| RuleError::InvalidRegex {
            label: label.to_string(),
            pattern: pattern.to_string(),
            source: e,
        })
}

// =============================================================================
// Built-in table (compiled once per process)
// =============================================================================

static BUILTIN: OnceLock<Result<RuleTable, RuleError>> = OnceLock::new();

/// The process-wide built-in rule table.
///
/// Compiled on first use and never rebuilt. A compile failure here is a bug
/// in `BUILTIN_RULES`; it is returned on every call so the caller can refuse
/// to run with a partial table.
pub fn builtin_rules() -> Result<&'static RuleTable, RuleError> {
    BUILTIN
        .get_or_init(|| {
            let table = RuleTable::new(BUILTIN_RULES);
            if let Err(ref e) = table {
                tracing::error!(error = %e, "Built-in rule table failed to compile");
            }
            table
        })
        .as_ref()
        .map_err(Clone::clone)
}

// =============================================================================
// Tests
// =============================================================================
