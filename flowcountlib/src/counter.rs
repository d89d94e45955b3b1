//! Construct classification over sanitized text.
//!
//! Each rule is a word-boundary-respecting pattern applied independently to
//! the whole text, counting non-overlapping matches. Two counters are
//! subtractive: `else if` matches both the `else` and `if` rules, so the
//! standalone counts subtract the `else_if` count afterwards. For `else`
//! this can go negative on malformed input and is deliberately not clamped.

use lazy_static::lazy_static;
use regex::Regex;

use crate::sanitize::sanitize;
use crate::score::score;
use crate::stats::ConstructCounts;

lazy_static! {
    static ref IF_RULE: Regex =
        Regex::new(r"\bif\s*\(").unwrap_or_else(|e| panic!("regex: {e}"));
    static ref ELSE_IF_RULE: Regex =
        Regex::new(r"\belse\s+if\s*\(").unwrap_or_else(|e| panic!("regex: {e}"));
    static ref ELSE_RULE: Regex =
        Regex::new(r"\belse\b").unwrap_or_else(|e| panic!("regex: {e}"));
    static ref FOR_RULE: Regex =
        Regex::new(r"\bfor\s*\(").unwrap_or_else(|e| panic!("regex: {e}"));
    static ref WHILE_RULE: Regex =
        Regex::new(r"\bwhile\s*\(").unwrap_or_else(|e| panic!("regex: {e}"));
    // Bare `do` keyword: intentionally counts every `do` token, not only
    // ones paired with a trailing `while`. Known over-count, kept because
    // the metric is defined over it.
    static ref DO_RULE: Regex =
        Regex::new(r"\bdo\b").unwrap_or_else(|e| panic!("regex: {e}"));
    static ref SWITCH_RULE: Regex =
        Regex::new(r"\bswitch\s*\(").unwrap_or_else(|e| panic!("regex: {e}"));
    static ref TERNARY_RULE: Regex =
        Regex::new(r"\?").unwrap_or_else(|e| panic!("regex: {e}"));
    static ref AND_RULE: Regex =
        Regex::new(r"&&").unwrap_or_else(|e| panic!("regex: {e}"));
    static ref OR_RULE: Regex =
        Regex::new(r"\|\|").unwrap_or_else(|e| panic!("regex: {e}"));
}

fn matches(rule: &Regex, text: &str) -> u64 {
    rule.find_iter(text).count() as u64
}

/// Count control-flow constructs in already-sanitized text.
///
/// Fills the primitive counters and `total`; `complexity_score` is left at
/// zero for [`crate::score`] to fill. Never fails.
pub fn count(sanitized: &str) -> ConstructCounts {
    let mut counts = ConstructCounts::new();

    let raw_if = matches(&IF_RULE, sanitized);
    let raw_else = matches(&ELSE_RULE, sanitized) as i64;

    counts.else_if = matches(&ELSE_IF_RULE, sanitized);
    // Every `else if (` contains exactly one `if (` and one `else` match;
    // subtract them out so the compound form is counted once, as elseIf.
    counts.r#if = raw_if.saturating_sub(counts.else_if);
    counts.r#else = raw_else - counts.else_if as i64;
    counts.r#for = matches(&FOR_RULE, sanitized);
    counts.r#while = matches(&WHILE_RULE, sanitized);
    counts.do_while = matches(&DO_RULE, sanitized);
    counts.switch = matches(&SWITCH_RULE, sanitized);
    counts.ternary = matches(&TERNARY_RULE, sanitized);
    counts.logical_and = matches(&AND_RULE, sanitized);
    counts.logical_or = matches(&OR_RULE, sanitized);

    counts.total = counts.primitive_total();
    counts
}

/// Analyze raw source text: sanitize, count, score.
///
/// Total function over arbitrary text; non-source input yields low or zero
/// counters rather than an error.
///
/// # Example
///
/// ```rust
/// use flowcountlib::analyze;
///
/// let counts = analyze("if (x) { for (int i = 0; i < 10; i++) {} } else if (y) {}");
/// assert_eq!(counts.r#if, 1);
/// assert_eq!(counts.else_if, 1);
/// assert_eq!(counts.r#for, 1);
/// assert_eq!(counts.r#else, 0);
/// assert_eq!(counts.total, 3);
/// ```
pub fn analyze(text: &str) -> ConstructCounts {
    score(count(&sanitize(text)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_text_counts_nothing() {
        let counts = analyze("");
        assert_eq!(counts.total, 0);
        assert_eq!(counts.complexity_score, 0.0);
    }

    #[test]
    fn keyword_free_text_counts_nothing() {
        let counts = analyze("let x = compute(a, b);\nreturn x + 1;\n");
        assert_eq!(counts.total, 0);
        assert_eq!(counts.complexity_score, 0.0);
    }

    #[test]
    fn basic_constructs() {
        let counts = count("if (a) {} while (b) {} switch (c) {} for (;;) {}");
        assert_eq!(counts.r#if, 1);
        assert_eq!(counts.r#while, 1);
        assert_eq!(counts.switch, 1);
        assert_eq!(counts.r#for, 1);
        assert_eq!(counts.total, 4);
    }

    #[test]
    fn else_if_counted_once() {
        let counts = count("if (x) {} else if (y) {} else {}");
        assert_eq!(counts.r#if, 1);
        assert_eq!(counts.else_if, 1);
        assert_eq!(counts.r#else, 1);
        assert_eq!(counts.total, 3);
    }

    #[test]
    fn conditional_chain_with_loop() {
        let counts = analyze("if (x) { for (int i=0;i<10;i++) {} } else if (y) {}");
        assert_eq!(counts.r#if, 1);
        assert_eq!(counts.else_if, 1);
        assert_eq!(counts.r#for, 1);
        assert_eq!(counts.r#else, 0);
        assert_eq!(counts.total, 3);
    }

    #[test]
    fn word_boundaries_respected() {
        // Identifiers containing keywords must not match.
        let counts = count("endif(x); elsewhere(); format(); dormant; switcher(y);");
        assert_eq!(counts.r#if, 0);
        assert_eq!(counts.r#else, 0);
        assert_eq!(counts.r#for, 0);
        assert_eq!(counts.do_while, 0);
        assert_eq!(counts.switch, 0);
    }

    #[test]
    fn keyword_without_paren_not_counted() {
        let counts = count("if x then y");
        assert_eq!(counts.r#if, 0);
    }

    #[test]
    fn bare_do_overcounts_by_design() {
        let counts = count("do { a(); } while (x); do { b(); }");
        assert_eq!(counts.do_while, 2);
        assert_eq!(counts.r#while, 1);
    }

    #[test]
    fn ternary_and_logical_operators() {
        let counts = count("let v = a && b || c ? d : e;");
        assert_eq!(counts.logical_and, 1);
        assert_eq!(counts.logical_or, 1);
        assert_eq!(counts.ternary, 1);
        assert_eq!(counts.total, 3);
    }

    #[test]
    fn constructs_in_literals_ignored() {
        assert_eq!(analyze(r#""if (x) {}""#).r#if, 0);
        assert_eq!(analyze("'while (y)'").r#while, 0);
        assert_eq!(analyze("`for (;;)`").r#for, 0);
    }

    #[test]
    fn constructs_in_comments_ignored() {
        assert_eq!(analyze("// if (x) {}").r#if, 0);
        assert_eq!(analyze("/* switch (y) { } */").switch, 0);
    }

    #[test]
    fn subtractive_else_rule() {
        let counts = count("else if (a) {} else if (b) {}");
        assert_eq!(counts.else_if, 2);
        assert_eq!(counts.r#else, 0);

        // Whitespace between else and if still matches the compound rule.
        let counts = count("else\n   if (a) {}");
        assert_eq!(counts.else_if, 1);
        assert_eq!(counts.r#else, 0);
        assert_eq!(counts.r#if, 0);
    }
}
