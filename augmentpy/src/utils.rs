//! Utility helpers: line/column mapping, suppression comments, path
//! normalization, and Python file discovery.

use crate::constants::{DEFAULT_EXCLUDE_FOLDERS, SUPPRESSION_PATTERNS};
use rustc_hash::FxHashSet;
use std::path::{Path, PathBuf};

/// Maps byte offsets to 1-indexed line and column numbers.
#[derive(Debug, Clone)]
pub struct LineIndex {
    /// Stores the byte index of the start of each line.
    line_starts: Vec<usize>,
}

impl LineIndex {
    /// Creates a new `LineIndex` by scanning the source code for newlines.
    /// Uses byte iteration since '\n' is always a single byte in UTF-8.
    #[must_use]
    pub fn new(source: &str) -> Self {
        let mut line_starts = vec![0];
        for (i, byte) in source.as_bytes().iter().enumerate() {
            if *byte == b'\n' {
                line_starts.push(i + 1);
            }
        }
        Self { line_starts }
    }

    /// Converts a byte offset to a 1-indexed line number.
    #[must_use]
    pub fn line_index(&self, offset: usize) -> usize {
        match self.line_starts.binary_search(&offset) {
            Ok(line) => line + 1,
            Err(line) => line,
        }
    }

    /// Converts a byte offset to a 1-indexed column number (byte column
    /// within the line).
    #[must_use]
    pub fn column_index(&self, offset: usize) -> usize {
        let line = self.line_index(offset);
        offset - self.line_starts[line - 1] + 1
    }
}

/// Detects lines with suppression comments.
///
/// Supports `# noqa: APY` and `# augmentpy: ignore`. Returns a set of
/// 1-indexed line numbers that the linter must not report on.
#[must_use]
pub fn get_ignored_lines(source: &str) -> FxHashSet<usize> {
    source
        .lines()
        .enumerate()
        .filter(|(_, line)| SUPPRESSION_PATTERNS.iter().any(|p| line.contains(p)))
        .map(|(i, _)| i + 1)
        .collect()
}

/// Normalizes path separators for stable cross-platform display output.
#[must_use]
pub fn normalize_display_path(path: &Path) -> String {
    let s = path.to_string_lossy();
    let normalized = s.replace('\\', "/");
    normalized
        .strip_prefix("./")
        .unwrap_or(&normalized)
        .to_owned()
}

/// Checks if a folder name matches any exclusion pattern.
#[must_use]
pub fn is_excluded(name: &str, excludes: &[String]) -> bool {
    excludes.iter().any(|e| e == name)
}

/// Collects all Python files under `root`, honoring gitignore rules and the
/// default plus user-specified folder exclusions.
///
/// A `root` that is itself a `.py` file is returned as a single-element list.
#[must_use]
pub fn collect_python_files(root: &Path, exclude: &[String]) -> Vec<PathBuf> {
    use ignore::WalkBuilder;

    if root.is_file() {
        return if root.extension().is_some_and(|ext| ext == "py") {
            vec![root.to_path_buf()]
        } else {
            Vec::new()
        };
    }

    let mut all_excludes: Vec<String> = exclude.to_vec();
    all_excludes.extend(DEFAULT_EXCLUDE_FOLDERS().iter().map(|&s| s.to_owned()));

    let root_for_filter = root.to_path_buf();
    let walker = WalkBuilder::new(root)
        .hidden(false) // Excluded-folder defaults handle dot-directories
        .git_ignore(true)
        .git_global(true)
        .git_exclude(true)
        .filter_entry(move |entry| {
            if entry.path() == root_for_filter {
                return true;
            }
            // Only filter directories; files are filtered by extension below
            if !entry.file_type().is_some_and(|ft| ft.is_dir()) {
                return true;
            }
            entry
                .file_name()
                .to_str()
                .is_none_or(|name| !is_excluded(name, &all_excludes))
        })
        .build();

    let mut files: Vec<PathBuf> = walker
        .filter_map(Result::ok)
        .filter(|entry| !entry.file_type().is_some_and(|ft| ft.is_dir()))
        .map(|entry| entry.into_path())
        .filter(|path| path.extension().is_some_and(|ext| ext == "py"))
        .collect();

    files.sort();
    files
}
