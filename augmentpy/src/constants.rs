//! Shared constants used across the crate.

use rustc_hash::FxHashSet;
use std::sync::OnceLock;

/// Name of the dedicated configuration file.
pub const CONFIG_FILENAME: &str = ".augmentpy.toml";

/// Name of the standard Python project file that may carry a
/// `[tool.augmentpy]` section.
pub const PYPROJECT_FILENAME: &str = "pyproject.toml";

/// Comment markers that suppress findings on the line they appear on.
pub const SUPPRESSION_PATTERNS: &[&str] = &["# noqa: APY", "# augmentpy: ignore"];

/// Folders that are never scanned unless explicitly included.
#[allow(non_snake_case)]
pub fn DEFAULT_EXCLUDE_FOLDERS() -> &'static FxHashSet<&'static str> {
    static FOLDERS: OnceLock<FxHashSet<&'static str>> = OnceLock::new();
    FOLDERS.get_or_init(|| {
        let mut s = FxHashSet::default();
        s.insert(".git");
        s.insert(".venv");
        s.insert("venv");
        s.insert("__pycache__");
        s.insert("build");
        s.insert("dist");
        s.insert("node_modules");
        s.insert(".tox");
        s.insert(".mypy_cache");
        s
    })
}
