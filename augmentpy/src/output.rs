//! CLI output formatting: colored human output and JSON.

use crate::rules::Finding;
use crate::utils::normalize_display_path;
use colored::Colorize;
use std::io::Write;

/// Print findings as human-readable lines, grouped in document order.
///
/// # Errors
///
/// Returns an error if writing to the output fails.
pub fn print_findings(writer: &mut impl Write, findings: &[Finding]) -> std::io::Result<()> {
    for finding in findings {
        let location = format!(
            "{}:{}:{}",
            normalize_display_path(&finding.file),
            finding.line,
            finding.col
        );
        writeln!(
            writer,
            "{} {} {}",
            location.cyan(),
            finding.rule_id.yellow(),
            finding.message
        )?;
    }
    Ok(())
}

/// Print findings as a JSON array.
///
/// # Errors
///
/// Returns an error if serialization or writing fails.
pub fn print_findings_json(writer: &mut impl Write, findings: &[Finding]) -> anyhow::Result<()> {
    let json = serde_json::to_string_pretty(findings)?;
    writeln!(writer, "{json}")?;
    Ok(())
}

/// Print the end-of-scan summary line.
///
/// # Errors
///
/// Returns an error if writing to the output fails.
pub fn print_summary(
    writer: &mut impl Write,
    files_scanned: usize,
    finding_count: usize,
) -> std::io::Result<()> {
    if finding_count == 0 {
        writeln!(
            writer,
            "{} {} file(s) scanned, no augmentable assignments found.",
            "[OK]".green(),
            files_scanned
        )
    } else {
        writeln!(
            writer,
            "{} {} file(s) scanned, {} augmentable assignment(s) found.",
            "[!]".yellow().bold(),
            files_scanned,
            finding_count
        )
    }
}
