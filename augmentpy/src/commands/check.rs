//! The `check` command: scan files and report findings.

use crate::config::Config;
use crate::linter::lint_source;
use crate::output::{print_findings, print_findings_json, print_summary};
use crate::rules::Finding;
use crate::utils::{collect_python_files, normalize_display_path};
use anyhow::Result;
use colored::Colorize;
use rayon::prelude::*;
use std::fs;
use std::io::Write;
use std::path::Path;

/// Options for the check command
#[derive(Debug, Default)]
pub struct CheckOptions {
    /// Additional folder names to exclude
    pub exclude: Vec<String>,
    /// Output raw JSON instead of human-readable lines
    pub json: bool,
    /// Show files as they are scanned
    pub verbose: bool,
    /// Suppress everything except the summary
    pub quiet: bool,
}

/// Result of a check run
#[derive(Debug)]
pub struct CheckReport {
    /// Number of Python files scanned
    pub files_scanned: usize,
    /// All findings across the scanned files, in path order
    pub findings: Vec<Finding>,
    /// Number of files that could not be read or parsed
    pub failed_files: usize,
}

/// Scan `root` for augmentable assignments and print the findings.
///
/// Files are linted in parallel; each file's transform pipeline itself is
/// synchronous and shares nothing but the immutable configuration.
///
/// # Errors
///
/// Returns an error if output writing fails. Unreadable or unparsable
/// files are skipped with a note and counted in the report.
pub fn run_check<W: Write>(
    root: &Path,
    config: &Config,
    options: &CheckOptions,
    mut writer: W,
) -> Result<CheckReport> {
    let mut exclude = options.exclude.clone();
    exclude.extend(config.exclude_folders().iter().cloned());
    let files = collect_python_files(root, &exclude);

    let results: Vec<(String, Result<Vec<Finding>, String>)> = files
        .par_iter()
        .map(|path| {
            let display = normalize_display_path(path);
            let outcome = fs::read_to_string(path)
                .map_err(|e| e.to_string())
                .and_then(|source| {
                    lint_source(path, &source, config).map_err(|e| e.to_string())
                });
            (display, outcome)
        })
        .collect();

    let mut findings = Vec::new();
    let mut failed_files = 0;
    for (display, outcome) in results {
        match outcome {
            Ok(file_findings) => {
                if options.verbose && !options.json {
                    writeln!(
                        writer,
                        "  {} {} ({} finding(s))",
                        "Scanned:".dimmed(),
                        display,
                        file_findings.len()
                    )?;
                }
                findings.extend(file_findings);
            }
            Err(err) => {
                failed_files += 1;
                if !options.json {
                    writeln!(writer, "  {} {}: {}", "Skip:".yellow(), display, err)?;
                }
            }
        }
    }

    if options.json {
        print_findings_json(&mut writer, &findings)?;
    } else {
        if !options.quiet {
            print_findings(&mut writer, &findings)?;
        }
        print_summary(&mut writer, files.len(), findings.len())?;
    }

    Ok(CheckReport {
        files_scanned: files.len(),
        findings,
        failed_files,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn write_file(dir: &TempDir, name: &str, content: &str) {
        fs::write(dir.path().join(name), content).unwrap();
    }

    #[test]
    fn test_check_reports_findings() {
        let dir = TempDir::new().unwrap();
        write_file(&dir, "a.py", "x = x + 1\n");
        write_file(&dir, "b.py", "y = 2\n");

        let mut buffer = Vec::new();
        let report = run_check(
            dir.path(),
            &Config::default(),
            &CheckOptions::default(),
            &mut buffer,
        )
        .unwrap();

        assert_eq!(report.files_scanned, 2);
        assert_eq!(report.findings.len(), 1);
        let output = String::from_utf8(buffer).unwrap();
        assert!(output.contains("a.py:1:1"));
        assert!(output.contains("1 augmentable assignment(s)"));
    }

    #[test]
    fn test_check_clean_tree() {
        let dir = TempDir::new().unwrap();
        write_file(&dir, "ok.py", "x = y + z\n");

        let mut buffer = Vec::new();
        let report = run_check(
            dir.path(),
            &Config::default(),
            &CheckOptions::default(),
            &mut buffer,
        )
        .unwrap();

        assert!(report.findings.is_empty());
        let output = String::from_utf8(buffer).unwrap();
        assert!(output.contains("no augmentable assignments"));
    }

    #[test]
    fn test_check_json_output() {
        let dir = TempDir::new().unwrap();
        write_file(&dir, "a.py", "n = n - 1\n");

        let mut buffer = Vec::new();
        run_check(
            dir.path(),
            &Config::default(),
            &CheckOptions {
                json: true,
                ..CheckOptions::default()
            },
            &mut buffer,
        )
        .unwrap();

        let json: serde_json::Value = serde_json::from_slice(&buffer).unwrap();
        assert!(json.is_array());
        assert_eq!(json[0]["rule_id"], "APY-Q001");
        assert!(json[0]["message"].as_str().unwrap().contains("-="));
    }

    #[test]
    fn test_check_counts_unreadable_files() {
        let dir = TempDir::new().unwrap();
        // Invalid UTF-8 cannot be read into a string and is skipped
        fs::write(dir.path().join("bad.py"), [0xffu8, 0xfe, 0x00]).unwrap();
        write_file(&dir, "good.py", "x = x + 1\n");

        let mut buffer = Vec::new();
        let report = run_check(
            dir.path(),
            &Config::default(),
            &CheckOptions::default(),
            &mut buffer,
        )
        .unwrap();

        assert_eq!(report.failed_files, 1);
        assert_eq!(report.findings.len(), 1);
        let output = String::from_utf8(buffer).unwrap();
        assert!(output.contains("Skip:"));
    }

    #[test]
    fn test_check_respects_exclude() {
        let dir = TempDir::new().unwrap();
        fs::create_dir(dir.path().join("vendor")).unwrap();
        fs::write(dir.path().join("vendor").join("v.py"), "x = x + 1\n").unwrap();

        let mut buffer = Vec::new();
        let report = run_check(
            dir.path(),
            &Config::default(),
            &CheckOptions {
                exclude: vec!["vendor".to_owned()],
                ..CheckOptions::default()
            },
            &mut buffer,
        )
        .unwrap();

        assert_eq!(report.files_scanned, 0);
    }
}
