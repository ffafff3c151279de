//! Shared CLI entry point used by both binaries.

use crate::cli::{CheckArgs, Cli, Commands, FixArgs};
use crate::commands::{run_check, run_fix, CheckOptions, FixOptions};
use crate::config::Config;
use anyhow::Result;
use clap::error::ErrorKind;
use clap::Parser;
use std::io::Write;

/// Parses `args` (without the program name) and runs the requested command
/// against stdout, returning the process exit code: 0 clean, 1 findings
/// present when failing on findings is configured, 2 usage errors.
///
/// # Errors
///
/// Returns an error on I/O failures; usage errors are reported on the
/// appropriate stream and reflected in the exit code instead.
pub fn run_with_args(args: Vec<String>) -> Result<i32> {
    let argv = std::iter::once("augmentpy".to_owned()).chain(args);
    let cli = match Cli::try_parse_from(argv) {
        Ok(cli) => cli,
        Err(err) => {
            // --help/--version land here too and are not failures
            let code = match err.kind() {
                ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => 0,
                _ => 2,
            };
            err.print()?;
            return Ok(code);
        }
    };

    let stdout = std::io::stdout();
    let mut writer = stdout.lock();
    match cli.command {
        Commands::Check(args) => run_check_command(&args, &mut writer),
        Commands::Fix(args) => run_fix_command(&args, &mut writer),
    }
}

fn run_check_command<W: Write>(args: &CheckArgs, mut writer: W) -> Result<i32> {
    let options = CheckOptions {
        exclude: args.exclude.clone(),
        json: args.json,
        verbose: args.verbose,
        quiet: args.quiet,
    };

    let mut total_findings = 0;
    let mut fail_on_findings = args.fail_on_findings;
    for root in args.paths.resolved() {
        let config = Config::load_from_path(&root);
        fail_on_findings |= config.augmentpy.fail_on_findings.unwrap_or(false);
        let report = run_check(&root, &config, &options, &mut writer)?;
        total_findings += report.findings.len();
    }

    Ok(i32::from(fail_on_findings && total_findings > 0))
}

fn run_fix_command<W: Write>(args: &FixArgs, mut writer: W) -> Result<i32> {
    let options = FixOptions {
        exclude: args.exclude.clone(),
        dry_run: args.dry_run,
        json: args.json,
        verbose: args.verbose,
    };

    for root in args.paths.resolved() {
        let config = Config::load_from_path(&root);
        run_fix(&root, &config, &options, &mut writer)?;
    }

    Ok(0)
}
