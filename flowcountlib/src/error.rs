//! Error types for flowcountlib

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur during scanning and report rendering.
///
/// The analysis functions themselves (`sanitize`, `count`, `score`,
/// `analyze`) are total and never return an error.
#[derive(Error, Debug)]
pub enum FlowcountError {
    /// Failed to read a source file
    #[error("failed to read file '{path}': {source}")]
    FileRead {
        path: PathBuf,
        source: std::io::Error,
    },

    /// Invalid glob pattern
    #[error("invalid glob pattern '{pattern}': {message}")]
    InvalidGlob { pattern: String, message: String },

    /// Path does not exist
    #[error("path does not exist: {0}")]
    PathNotFound(PathBuf),

    /// A report option field is structurally invalid
    #[error("invalid report option '{field}': {value} (must be positive)")]
    InvalidDimension { field: &'static str, value: u32 },

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
