//! Command-line interface argument definitions.

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

/// Help text for configuration file options, shown at the bottom of --help.
const CONFIG_HELP: &str = "\
CONFIGURATION FILE (.augmentpy.toml):
  Create this file in your project root to set defaults.
  The same keys work under [tool.augmentpy] in pyproject.toml.

  [augmentpy]
  commutative = true           # Also flag `x = 1 + x` for commutative operators
  fail_on_findings = false     # `check` exits 1 when findings are present
  exclude_folders = [\"migrations\", \"vendor\"]
  ignore = []                  # Rule codes to disable, e.g. [\"APY-Q001\"]

SUPPRESSION:
  Append `# noqa: APY` or `# augmentpy: ignore` to a line to skip it.
";

/// Top-level CLI parser.
#[derive(Parser, Debug)]
#[command(
    name = "augmentpy",
    version,
    about = "Find and fix Python assignments that should use augmented operators",
    after_help = CONFIG_HELP
)]
pub struct Cli {
    /// Subcommand to run.
    #[command(subcommand)]
    pub command: Commands,
}

/// Available subcommands.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Scan for assignments that could use an augmented operator.
    Check(CheckArgs),
    /// Rewrite flagged assignments in place.
    Fix(FixArgs),
}

/// Shared path arguments.
#[derive(Args, Debug, Default, Clone)]
pub struct PathArgs {
    /// Paths to analyze (files or directories).
    /// Defaults to the current directory when none are given.
    pub paths: Vec<PathBuf>,
}

impl PathArgs {
    /// The paths to scan, defaulting to the current directory.
    #[must_use]
    pub fn resolved(&self) -> Vec<PathBuf> {
        if self.paths.is_empty() {
            vec![PathBuf::from(".")]
        } else {
            self.paths.clone()
        }
    }
}

/// Arguments for the `check` subcommand.
#[derive(Args, Debug, Default)]
pub struct CheckArgs {
    /// Path options.
    #[command(flatten)]
    pub paths: PathArgs,

    /// Output raw JSON.
    #[arg(long, short = 'j')]
    pub json: bool,

    /// Enable verbose output (shows files being scanned).
    #[arg(short, long)]
    pub verbose: bool,

    /// Quiet mode: show only the summary.
    #[arg(long)]
    pub quiet: bool,

    /// Exclude folders by name.
    #[arg(long, short = 'e', alias = "exclude-folder")]
    pub exclude: Vec<String>,

    /// Exit with code 1 if any findings are present.
    #[arg(long)]
    pub fail_on_findings: bool,
}

/// Arguments for the `fix` subcommand.
#[derive(Args, Debug, Default)]
pub struct FixArgs {
    /// Path options.
    #[command(flatten)]
    pub paths: PathArgs,

    /// Show what would change without writing any file.
    #[arg(long)]
    pub dry_run: bool,

    /// Output results as JSON.
    #[arg(long, short = 'j')]
    pub json: bool,

    /// Enable verbose output.
    #[arg(short, long)]
    pub verbose: bool,

    /// Exclude folders by name.
    #[arg(long, short = 'e', alias = "exclude-folder")]
    pub exclude: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[test]
    fn test_parse_check_with_flags() {
        let cli = Cli::try_parse_from([
            "augmentpy",
            "check",
            "src",
            "--json",
            "-e",
            "vendor",
            "--fail-on-findings",
        ])
        .unwrap();
        match cli.command {
            Commands::Check(args) => {
                assert_eq!(args.paths.resolved(), [PathBuf::from("src")]);
                assert!(args.json);
                assert!(args.fail_on_findings);
                assert_eq!(args.exclude, ["vendor".to_owned()]);
            }
            Commands::Fix(_) => panic!("expected check"),
        }
    }

    #[test]
    fn test_parse_fix_dry_run() {
        let cli = Cli::try_parse_from(["augmentpy", "fix", "--dry-run"]).unwrap();
        match cli.command {
            Commands::Fix(args) => {
                assert!(args.dry_run);
                assert_eq!(args.paths.resolved(), [PathBuf::from(".")]);
            }
            Commands::Check(_) => panic!("expected fix"),
        }
    }

    #[test]
    fn test_missing_subcommand_is_an_error() {
        assert!(Cli::try_parse_from(["augmentpy"]).is_err());
    }
}
