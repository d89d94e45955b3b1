//! Complexity scoring over a counter set.
//!
//! The weighted score is the metric's definition, not an approximation of a
//! published formula: loops weigh heaviest, branching next, short-circuit
//! operators least. Two report-only metrics derive from the same counters:
//! a branch-count-plus-one cyclomatic approximation, and a bounded 0-100
//! maintainability index.

use crate::stats::ConstructCounts;

/// Per-construct weights for the complexity score.
const WEIGHT_IF: f64 = 1.0;
const WEIGHT_ELSE_IF: f64 = 0.5;
const WEIGHT_ELSE: f64 = 0.3;
const WEIGHT_LOOP: f64 = 2.0;
const WEIGHT_SWITCH: f64 = 1.5;
const WEIGHT_TERNARY: f64 = 0.5;
const WEIGHT_LOGICAL: f64 = 0.2;

/// Fill `complexity_score` from the primitive counters.
///
/// Rounded to one fractional digit. The other fields pass through unchanged.
pub fn score(mut counts: ConstructCounts) -> ConstructCounts {
    let mut s = 0.0;
    s += counts.r#if as f64 * WEIGHT_IF;
    s += counts.else_if as f64 * WEIGHT_ELSE_IF;
    s += counts.r#else as f64 * WEIGHT_ELSE;
    s += counts.r#for as f64 * WEIGHT_LOOP;
    s += counts.r#while as f64 * WEIGHT_LOOP;
    s += counts.do_while as f64 * WEIGHT_LOOP;
    s += counts.switch as f64 * WEIGHT_SWITCH;
    s += counts.ternary as f64 * WEIGHT_TERNARY;
    s += (counts.logical_and + counts.logical_or) as f64 * WEIGHT_LOGICAL;

    counts.complexity_score = (s * 10.0).round() / 10.0;
    counts
}

impl ConstructCounts {
    /// Approximate cyclomatic complexity: branch constructs plus one.
    ///
    /// No decision-point deduplication beyond the raw counters.
    pub fn cyclomatic_complexity(&self) -> u64 {
        self.r#if + self.else_if + self.switch + self.r#for + self.r#while + self.do_while + 1
    }

    /// Maintainability index in 0-100, non-increasing in complexity and
    /// construct volume: `max(0, 100 - min(cyclomatic * 2 + total * 0.5, 50))`.
    pub fn maintainability_index(&self) -> f64 {
        let penalty = (self.cyclomatic_complexity() as f64 * 2.0 + self.total as f64 * 0.5)
            .min(50.0);
        (100.0 - penalty).max(0.0)
    }
}
