//! Batch analysis over files on disk.
//!
//! This is the collaborator layer around the pure analysis core: it reads
//! unit text, tolerates per-unit read failures, honors a cooperative
//! cancellation flag between units, and feeds completed units into
//! [`aggregate`].

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use serde::Serialize;

use crate::aggregate::aggregate;
use crate::counter::analyze;
use crate::error::FlowcountError;
use crate::filter::{discover_files, FilterConfig};
use crate::stats::{ProjectStats, UnitStats};
use crate::Result;

/// Options for a batch scan.
#[derive(Debug, Clone, Default)]
pub struct ScanOptions {
    /// File filter configuration
    pub filter: FilterConfig,
    /// Cooperative cancellation flag, checked between units
    pub cancel: Option<Arc<AtomicBool>>,
    /// Discard already-analyzed units when the scan is cancelled
    pub discard_on_cancel: bool,
}

impl ScanOptions {
    /// Create new default options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the file filter.
    pub fn filter(mut self, filter: FilterConfig) -> Self {
        self.filter = filter;
        self
    }

    /// Attach a cancellation flag. The scan stops before the next unit once
    /// the flag is set.
    pub fn cancel_flag(mut self, flag: Arc<AtomicBool>) -> Self {
        self.cancel = Some(flag);
        self
    }

    /// Drop partial results on cancellation instead of aggregating them.
    pub fn discard_on_cancel(mut self) -> Self {
        self.discard_on_cancel = true;
        self
    }
}

/// A unit that could not be analyzed during a batch scan.
///
/// Failures are reported alongside the aggregate rather than aborting the
/// remaining scan.
#[derive(Debug, Clone, Serialize)]
pub struct ScanFailure {
    /// Path of the unreadable file
    pub path: PathBuf,
    /// Human-readable failure description
    pub message: String,
}

/// Result of a batch scan.
#[derive(Debug, Clone, Serialize)]
pub struct ScanResult {
    /// Aggregated, ranked analysis over all readable units
    pub project: ProjectStats,
    /// Units excluded because their text could not be read
    pub failures: Vec<ScanFailure>,
    /// Whether the scan stopped early on the cancellation flag
    pub cancelled: bool,
}

fn is_cancelled(options: &ScanOptions) -> bool {
    options
        .cancel
        .as_ref()
        .is_some_and(|flag| flag.load(Ordering::Relaxed))
}

/// Label a unit by its path relative to the scan root.
fn unit_label(path: &Path, root: &Path) -> String {
    path.strip_prefix(root)
        .unwrap_or(path)
        .to_string_lossy()
        .to_string()
}

/// Analyze one file into a [`UnitStats`].
///
/// The filter is not consulted: an explicitly named file is always analyzed.
pub fn scan_file(path: impl AsRef<Path>) -> Result<UnitStats> {
    let path = path.as_ref();
    let text = fs::read_to_string(path).map_err(|e| FlowcountError::FileRead {
        path: path.to_path_buf(),
        source: e,
    })?;
    Ok(UnitStats::new(path.to_string_lossy(), analyze(&text)))
}

/// Scan all matching files under a root path and aggregate the results.
///
/// Each unit is analyzed independently; a read failure is recorded in
/// [`ScanResult::failures`] and excluded from the aggregate without aborting
/// the rest of the scan. When the cancellation flag is set, units analyzed
/// so far are aggregated unless `discard_on_cancel` was requested.
pub fn scan_path(root: impl AsRef<Path>, options: ScanOptions) -> Result<ScanResult> {
    let root = root.as_ref();
    let files = discover_files(root, &options.filter)?;

    let mut units = Vec::new();
    let mut failures = Vec::new();
    let mut cancelled = false;

    for path in files {
        if is_cancelled(&options) {
            cancelled = true;
            break;
        }

        match fs::read_to_string(&path) {
            Ok(text) => {
                units.push(UnitStats::new(unit_label(&path, root), analyze(&text)));
            }
            Err(e) => failures.push(ScanFailure {
                path,
                message: e.to_string(),
            }),
        }
    }

    if cancelled && options.discard_on_cancel {
        units.clear();
    }

    Ok(ScanResult {
        project: aggregate(units),
        failures,
        cancelled,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    fn write_source(root: &Path, name: &str, content: &str) -> PathBuf {
        let path = root.join(name);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).unwrap();
        }
        fs::write(&path, content).unwrap();
        path
    }

    #[test]
    fn test_scan_file() {
        let temp = tempdir().unwrap();
        let path = write_source(temp.path(), "a.js", "if (x) { while (y) {} }");

        let unit = scan_file(&path).unwrap();
        assert_eq!(unit.counts.r#if, 1);
        assert_eq!(unit.counts.r#while, 1);
        assert_eq!(unit.complexity, 3.0);
    }

    #[test]
    fn test_scan_file_missing() {
        let result = scan_file("/no/such/file.js");
        assert!(matches!(result, Err(FlowcountError::FileRead { .. })));
    }

    #[test]
    fn test_scan_path_aggregates_units() {
        let temp = tempdir().unwrap();
        write_source(temp.path(), "a.js", "if (x) {}");
        write_source(temp.path(), "sub/b.js", "for (;;) {} for (;;) {}");

        let result = scan_path(temp.path(), ScanOptions::new()).unwrap();
        assert!(!result.cancelled);
        assert!(result.failures.is_empty());
        assert_eq!(result.project.unit_count(), 2);
        assert_eq!(result.project.total.r#if, 1);
        assert_eq!(result.project.total.r#for, 2);

        // b.js (score 4.0) ranks above a.js (score 1.0); labels are
        // root-relative.
        assert_eq!(result.project.units[0].label, "sub/b.js");
        assert_eq!(result.project.units[1].label, "a.js");
    }

    #[test]
    fn test_unreadable_unit_is_reported_not_fatal() {
        let temp = tempdir().unwrap();
        write_source(temp.path(), "good.js", "if (x) {}");
        // Invalid UTF-8 makes read_to_string fail for this unit.
        fs::write(temp.path().join("bad.js"), [0xff, 0xfe, 0x00]).unwrap();

        let result = scan_path(temp.path(), ScanOptions::new()).unwrap();
        assert_eq!(result.project.unit_count(), 1);
        assert_eq!(result.failures.len(), 1);
        assert!(result.failures[0].path.ends_with("bad.js"));
        assert_eq!(result.project.total.r#if, 1);
    }

    #[test]
    fn test_cancelled_scan_stops_before_next_unit() {
        let temp = tempdir().unwrap();
        write_source(temp.path(), "a.js", "if (x) {}");

        let flag = Arc::new(AtomicBool::new(true));
        let options = ScanOptions::new().cancel_flag(Arc::clone(&flag));
        let result = scan_path(temp.path(), options).unwrap();

        // Flag was already set, so no unit was analyzed at all.
        assert!(result.cancelled);
        assert_eq!(result.project.unit_count(), 0);
    }

    #[test]
    fn test_cancelled_scan_discards_when_requested() {
        let temp = tempdir().unwrap();
        write_source(temp.path(), "a.js", "if (x) {}");

        let flag = Arc::new(AtomicBool::new(true));
        let options = ScanOptions::new()
            .cancel_flag(flag)
            .discard_on_cancel();
        let result = scan_path(temp.path(), options).unwrap();

        assert!(result.cancelled);
        assert_eq!(result.project.unit_count(), 0);
        assert_eq!(result.project.total.total, 0);
    }

    #[test]
    fn test_scan_missing_root() {
        let result = scan_path("/no/such/dir", ScanOptions::new());
        assert!(matches!(result, Err(FlowcountError::PathNotFound(_))));
    }
}
