//! Source file filtering and discovery with glob pattern support.

use std::path::{Path, PathBuf};

use glob::Pattern;
use walkdir::WalkDir;

use crate::error::FlowcountError;
use crate::Result;

/// File extensions scanned by default: the C-family and JS-family languages
/// the classification heuristic targets.
pub const DEFAULT_EXTENSIONS: &[&str] = &[
    "c", "cc", "cpp", "cxx", "h", "hpp", "js", "jsx", "mjs", "ts", "tsx", "java", "cs", "go",
    "php", "swift", "kt",
];

/// Configuration for file filtering.
#[derive(Debug, Clone)]
pub struct FilterConfig {
    /// Glob patterns to include (if empty, include all matching extensions)
    pub include: Vec<Pattern>,
    /// Glob patterns to exclude
    pub exclude: Vec<Pattern>,
    /// File extensions to consider source files
    pub extensions: Vec<String>,
}

impl Default for FilterConfig {
    fn default() -> Self {
        Self {
            include: Vec::new(),
            exclude: Vec::new(),
            extensions: DEFAULT_EXTENSIONS.iter().map(|s| s.to_string()).collect(),
        }
    }
}

impl FilterConfig {
    /// Create a new filter config with the default extension set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an include pattern.
    pub fn include(mut self, pattern: &str) -> Result<Self> {
        let pat = Pattern::new(pattern).map_err(|e| FlowcountError::InvalidGlob {
            pattern: pattern.to_string(),
            message: e.to_string(),
        })?;
        self.include.push(pat);
        Ok(self)
    }

    /// Add an exclude pattern.
    pub fn exclude(mut self, pattern: &str) -> Result<Self> {
        let pat = Pattern::new(pattern).map_err(|e| FlowcountError::InvalidGlob {
            pattern: pattern.to_string(),
            message: e.to_string(),
        })?;
        self.exclude.push(pat);
        Ok(self)
    }

    /// Replace the extension set.
    pub fn extensions(mut self, extensions: Vec<String>) -> Self {
        self.extensions = extensions;
        self
    }

    /// Check if a path matches the filter criteria.
    ///
    /// A path matches if its extension is in the configured set, it matches
    /// at least one include pattern (or include is empty), and it matches no
    /// exclude pattern.
    pub fn matches(&self, path: &Path) -> bool {
        let Some(ext) = path.extension().and_then(|e| e.to_str()) else {
            return false;
        };
        if !self.extensions.iter().any(|e| e == ext) {
            return false;
        }

        let path_str = path.to_string_lossy();

        for pattern in &self.exclude {
            if pattern.matches(&path_str) {
                return false;
            }
        }

        if self.include.is_empty() {
            return true;
        }

        self.include.iter().any(|p| p.matches(&path_str))
    }
}

/// Check if a directory should be skipped during traversal.
fn should_skip_dir(name: &str) -> bool {
    name.starts_with('.') || name == "node_modules" || name == "target"
}

/// Discover source files under a root path.
///
/// Walks the tree and returns all files that match the filter, in sorted
/// order so downstream ranking ties are deterministic across platforms.
/// A root that is itself a file is returned as-is when it matches.
pub fn discover_files(root: impl AsRef<Path>, filter: &FilterConfig) -> Result<Vec<PathBuf>> {
    let root = root.as_ref();

    if !root.exists() {
        return Err(FlowcountError::PathNotFound(root.to_path_buf()));
    }

    if root.is_file() {
        return Ok(if filter.matches(root) {
            vec![root.to_path_buf()]
        } else {
            Vec::new()
        });
    }

    let mut files = Vec::new();
    let walker = WalkDir::new(root).into_iter().filter_entry(|entry| {
        if entry.depth() == 0 || !entry.file_type().is_dir() {
            return true;
        }
        entry
            .file_name()
            .to_str()
            .map(|name| !should_skip_dir(name))
            .unwrap_or(true)
    });

    for entry in walker {
        let entry = entry.map_err(|e| FlowcountError::Io(e.into()))?;
        if entry.file_type().is_file() && filter.matches(entry.path()) {
            files.push(entry.path().to_path_buf());
        }
    }

    files.sort();
    Ok(files)
}
