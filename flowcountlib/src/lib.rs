//! Heuristic lexical classifier for control-flow constructs.
//!
//! `flowcountlib` estimates the control-flow complexity of source text
//! without parsing it: literal and comment content is stripped first, then
//! pattern rules count branch, loop, and short-circuit constructs, and a
//! weighted score is derived from the counters. The heuristic targets
//! C-family and JS-family syntax and trades precision for language breadth.
//!
//! The pipeline is pure and composable: [`sanitize`] -> [`count`] ->
//! [`score`], wrapped by [`analyze`] for the common case. On top of it sit
//! batch scanning over a directory tree ([`scan_path`]), aggregation and
//! ranking of per-file results ([`aggregate`]), and a VISX report exporter
//! ([`render`]).
//!
//! # Example
//!
//! ```rust
//! use flowcountlib::analyze;
//!
//! let counts = analyze("if (ready && valid) { for (;;) { step(); } }");
//! assert_eq!(counts.r#if, 1);
//! assert_eq!(counts.r#for, 1);
//! assert_eq!(counts.logical_and, 1);
//! assert_eq!(counts.total, 3);
//! assert_eq!(counts.complexity_score, 3.2);
//! ```

pub mod aggregate;
pub mod counter;
pub mod error;
pub mod export;
pub mod filter;
pub mod sanitize;
pub mod scan;
pub mod score;
pub mod stats;

pub use aggregate::aggregate;
pub use counter::{analyze, count};
pub use error::FlowcountError;
pub use export::{render, RenderOptions, Theme};
pub use filter::{discover_files, FilterConfig, DEFAULT_EXTENSIONS};
pub use sanitize::sanitize;
pub use scan::{scan_file, scan_path, ScanFailure, ScanOptions, ScanResult};
pub use score::score;
pub use stats::{ConstructCounts, ProjectStats, UnitStats};

/// Crate-wide result type.
pub type Result<T> = std::result::Result<T, FlowcountError>;
