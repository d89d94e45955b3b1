//! Core data structures for construct statistics

use serde::{Deserialize, Serialize};
use std::ops::{Add, AddAssign};

/// Per-construct occurrence counts for one unit of text, plus derived totals.
///
/// The primitive counters are filled by [`crate::count`]; `complexity_score`
/// is filled by [`crate::score`]. Field names serialize in camelCase so the
/// wire form matches the report vocabulary (`if`, `elseIf`, `logicalAnd`, …).
///
/// `else` is computed subtractively (standalone `else` occurrences minus
/// `else if` occurrences) and may be negative for malformed input. That is a
/// documented heuristic limitation, not a bug, so `else` and `total` are
/// signed and never clamped.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConstructCounts {
    /// `if (` occurrences, excluding the `if` inside `else if`
    pub r#if: u64,
    /// `else if (` occurrences
    pub else_if: u64,
    /// Standalone `else` occurrences minus `else_if` (may be negative)
    pub r#else: i64,
    /// `for (` occurrences
    pub r#for: u64,
    /// `while (` occurrences
    pub r#while: u64,
    /// Bare `do` keyword occurrences (known over-count, kept by design)
    pub do_while: u64,
    /// `switch (` occurrences
    pub switch: u64,
    /// `?` characters
    pub ternary: u64,
    /// `&&` occurrences
    pub logical_and: u64,
    /// `||` occurrences
    pub logical_or: u64,
    /// Sum of all primitive counters above
    pub total: i64,
    /// Weighted complexity score, one fractional digit
    pub complexity_score: f64,
}

impl ConstructCounts {
    /// Create a new counter set with all zeros.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sum of the primitive counters, including the possibly-negative `else`.
    pub fn primitive_total(&self) -> i64 {
        self.r#if as i64
            + self.else_if as i64
            + self.r#else
            + self.r#for as i64
            + self.r#while as i64
            + self.do_while as i64
            + self.switch as i64
            + self.ternary as i64
            + self.logical_and as i64
            + self.logical_or as i64
    }

    /// Primitive counters as `(name, value)` pairs in canonical order.
    ///
    /// The order matches the counter set's field order and is what the
    /// report exporter iterates.
    pub fn named_values(&self) -> [(&'static str, i64); 10] {
        [
            ("if", self.r#if as i64),
            ("elseIf", self.else_if as i64),
            ("else", self.r#else),
            ("for", self.r#for as i64),
            ("while", self.r#while as i64),
            ("doWhile", self.do_while as i64),
            ("switch", self.switch as i64),
            ("ternary", self.ternary as i64),
            ("logicalAnd", self.logical_and as i64),
            ("logicalOr", self.logical_or as i64),
        ]
    }
}

impl Add for ConstructCounts {
    type Output = Self;

    /// Sum the primitive counters and `total`.
    ///
    /// The derived `complexity_score` is reset to zero: an aggregate score
    /// is always recomputed from the summed counters with [`crate::score`],
    /// never built by summing per-unit scores.
    fn add(self, other: Self) -> Self {
        Self {
            r#if: self.r#if + other.r#if,
            else_if: self.else_if + other.else_if,
            r#else: self.r#else + other.r#else,
            r#for: self.r#for + other.r#for,
            r#while: self.r#while + other.r#while,
            do_while: self.do_while + other.do_while,
            switch: self.switch + other.switch,
            ternary: self.ternary + other.ternary,
            logical_and: self.logical_and + other.logical_and,
            logical_or: self.logical_or + other.logical_or,
            total: self.total + other.total,
            complexity_score: 0.0,
        }
    }
}

impl AddAssign for ConstructCounts {
    fn add_assign(&mut self, other: Self) {
        *self = *self + other;
    }
}

/// Analysis result for a single unit of text (typically one file).
///
/// Immutable after creation; `complexity` is copied from the counter set's
/// score at construction so ranking does not depend on later mutation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UnitStats {
    /// Unit identifier (path or label)
    pub label: String,
    /// Scored counter set for this unit
    pub counts: ConstructCounts,
    /// Alias of `counts.complexity_score`, used for ranking
    pub complexity: f64,
}

impl UnitStats {
    /// Create unit stats from a scored counter set.
    pub fn new(label: impl Into<String>, counts: ConstructCounts) -> Self {
        Self {
            label: label.into(),
            complexity: counts.complexity_score,
            counts,
        }
    }
}

/// Aggregated analysis across many units.
///
/// `units` is sorted descending by complexity (stable, so equal scores keep
/// scan order); `total` is rescored from the summed primitive counters.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProjectStats {
    /// Per-unit results, ranked by complexity
    pub units: Vec<UnitStats>,
    /// Aggregate counter set across all units
    pub total: ConstructCounts,
}

impl ProjectStats {
    /// Number of units analyzed.
    pub fn unit_count(&self) -> usize {
        self.units.len()
    }
}
