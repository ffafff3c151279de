//! The `fix` command: rewrite flagged assignments in place.

use crate::config::Config;
use crate::fix::{fix_all, FixError};
use crate::linter::lint_source;
use crate::utils::{collect_python_files, normalize_display_path};
use anyhow::Result;
use colored::Colorize;
use serde::Serialize;
use std::fs;
use std::io::Write;
use std::path::Path;

/// Options for the fix command
#[derive(Debug, Default)]
pub struct FixOptions {
    /// Additional folder names to exclude
    pub exclude: Vec<String>,
    /// Show what would change without writing any file
    pub dry_run: bool,
    /// Output results as JSON
    pub json: bool,
    /// Verbose output
    pub verbose: bool,
}

/// Per-file result of a fix run
#[derive(Debug, Serialize)]
pub struct FileFixResult {
    /// File that was rewritten
    pub file: String,
    /// Number of assignments rewritten
    pub replacements: usize,
    /// Number of findings that could not be applied
    pub skipped: usize,
}

/// Rewrite every augmentable assignment under `root`.
///
/// Each file is a separate batch: its findings are resolved against one
/// snapshot and applied in a single pass. A file whose rewrite fails
/// validation is left untouched and reported.
///
/// # Errors
///
/// Returns an error if output writing or a file write fails.
pub fn run_fix<W: Write>(
    root: &Path,
    config: &Config,
    options: &FixOptions,
    mut writer: W,
) -> Result<Vec<FileFixResult>> {
    if options.dry_run && !options.json {
        writeln!(
            writer,
            "{}",
            "[DRY-RUN] Assignments that would be rewritten:".yellow()
        )?;
    }

    let mut exclude = options.exclude.clone();
    exclude.extend(config.exclude_folders().iter().cloned());
    let files = collect_python_files(root, &exclude);

    let mut results = Vec::new();

    for path in &files {
        let display = normalize_display_path(path);

        let source = match fs::read_to_string(path) {
            Ok(s) => s,
            Err(e) => {
                if !options.json {
                    writeln!(writer, "  {} {}: {}", "Skip:".yellow(), display, e)?;
                }
                continue;
            }
        };

        let findings = match lint_source(path, &source, config) {
            Ok(f) => f,
            Err(e) => {
                if !options.json {
                    writeln!(writer, "  {} {}: {}", "Parse error:".red(), display, e)?;
                }
                continue;
            }
        };

        if findings.is_empty() {
            if options.verbose && !options.json {
                writeln!(writer, "  {} {}", "Clean:".dimmed(), display)?;
            }
            continue;
        }

        if options.dry_run {
            if !options.json {
                for finding in &findings {
                    writeln!(
                        writer,
                        "  Would rewrite {}:{}: {}",
                        display, finding.line, finding.message
                    )?;
                }
            }
            results.push(FileFixResult {
                file: display,
                replacements: findings.len(),
                skipped: 0,
            });
            continue;
        }

        match fix_all(&source, &findings, None) {
            Ok(outcome) => {
                if outcome.applied > 0 {
                    fs::write(path, &outcome.source)?;
                    if !options.json {
                        writeln!(
                            writer,
                            "  {} {} ({} rewritten)",
                            "Fixed:".green(),
                            display,
                            outcome.applied
                        )?;
                    }
                }
                results.push(FileFixResult {
                    file: display,
                    replacements: outcome.applied,
                    skipped: outcome.skipped,
                });
            }
            Err(FixError::InvalidRewrite) => {
                // Refused rewrite: the file on disk stays byte-identical.
                if !options.json {
                    writeln!(
                        writer,
                        "  {} {}: rewrite failed validation, file left unchanged",
                        "Skip:".yellow(),
                        display
                    )?;
                }
            }
            Err(e) => {
                if !options.json {
                    writeln!(writer, "  {} {}: {}", "Error:".red(), display, e)?;
                }
            }
        }
    }

    if options.json {
        writeln!(writer, "{}", serde_json::to_string_pretty(&results)?)?;
    }

    Ok(results)
}
