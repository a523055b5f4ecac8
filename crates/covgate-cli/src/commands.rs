//! CLI command definitions using clap

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// Covgate: fail the build when per-file coverage gaps drift from the
/// checked-in expectation table
#[derive(Parser, Debug)]
#[command(name = "covgate")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Verbosity level (-v, -vv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Quiet mode (suppress non-error output)
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Color output (auto, always, never)
    #[arg(long, default_value = "auto", global = true)]
    pub color: ColorArg,

    /// Repository root; table paths and default file locations are relative to it
    #[arg(long, env = "COVGATE_ROOT", default_value = ".", global = true)]
    pub root: PathBuf,

    /// Subcommand to run
    #[command(subcommand)]
    pub command: Commands,
}

/// CLI subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Check a coverage report against the expectation table
    ///
    /// Exits 0 when every file matches, 1 when any file mismatches and
    /// 2 when an input cannot be read or parsed.
    Check(CheckArgs),

    /// Print an expectation table matching the current report
    Baseline(BaselineArgs),
}

/// Arguments for the check command
#[derive(Parser, Debug, Clone)]
pub struct CheckArgs {
    /// llvm-cov JSON export (default: <root>/build/ccov/tests.json)
    #[arg(long, env = "COVGATE_REPORT")]
    pub report: Option<PathBuf>,

    /// Expectation table (default: <root>/coverage-gaps.yaml)
    #[arg(long, env = "COVGATE_TABLE")]
    pub table: Option<PathBuf>,

    /// Output format
    #[arg(long, default_value = "text")]
    pub format: CheckFormat,

    /// Treat a missing table as empty (every file must be fully covered)
    #[arg(long)]
    pub allow_missing_table: bool,
}

/// Arguments for the baseline command
#[derive(Parser, Debug, Clone)]
pub struct BaselineArgs {
    /// llvm-cov JSON export (default: <root>/build/ccov/tests.json)
    #[arg(long, env = "COVGATE_REPORT")]
    pub report: Option<PathBuf>,

    /// Output file (default: stdout)
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

/// Output format for the check command
#[derive(ValueEnum, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum CheckFormat {
    /// One diagnostic block per mismatching file
    #[default]
    Text,
    /// Verification outcome as JSON
    Json,
}

impl From<CheckFormat> for crate::output::OutputFormat {
    fn from(format: CheckFormat) -> Self {
        match format {
            CheckFormat::Text => Self::Text,
            CheckFormat::Json => Self::Json,
        }
    }
}

/// Color argument for CLI
#[derive(ValueEnum, Clone, Debug, Default)]
pub enum ColorArg {
    /// Automatic color detection
    #[default]
    Auto,
    /// Always use colors
    Always,
    /// Never use colors
    Never,
}

impl From<ColorArg> for crate::config::ColorChoice {
    fn from(arg: ColorArg) -> Self {
        match arg {
            ColorArg::Auto => Self::Auto,
            ColorArg::Always => Self::Always,
            ColorArg::Never => Self::Never,
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
mod tests {
    use super::*;

    mod cli_tests {
        use super::*;

        #[test]
        fn test_parse_check_command() {
            let cli = Cli::parse_from(["covgate", "check"]);
            if let Commands::Check(args) = cli.command {
                assert!(args.report.is_none());
                assert!(args.table.is_none());
                assert_eq!(args.format, CheckFormat::Text);
                assert!(!args.allow_missing_table);
            } else {
                panic!("expected Check command");
            }
        }

        #[test]
        fn test_parse_check_with_paths() {
            let cli = Cli::parse_from([
                "covgate",
                "check",
                "--report",
                "out/tests.json",
                "--table",
                "gaps.yaml",
                "--format",
                "json",
            ]);
            if let Commands::Check(args) = cli.command {
                assert_eq!(args.report, Some(PathBuf::from("out/tests.json")));
                assert_eq!(args.table, Some(PathBuf::from("gaps.yaml")));
                assert_eq!(args.format, CheckFormat::Json);
            } else {
                panic!("expected Check command");
            }
        }

        #[test]
        fn test_parse_check_allow_missing_table() {
            let cli = Cli::parse_from(["covgate", "check", "--allow-missing-table"]);
            if let Commands::Check(args) = cli.command {
                assert!(args.allow_missing_table);
            } else {
                panic!("expected Check command");
            }
        }

        #[test]
        fn test_parse_baseline_with_output() {
            let cli = Cli::parse_from(["covgate", "baseline", "-o", "coverage-gaps.yaml"]);
            if let Commands::Baseline(args) = cli.command {
                assert_eq!(args.output, Some(PathBuf::from("coverage-gaps.yaml")));
            } else {
                panic!("expected Baseline command");
            }
        }

        #[test]
        fn test_global_root_after_subcommand() {
            let cli = Cli::parse_from(["covgate", "check", "--root", "/work/rpn"]);
            assert_eq!(cli.root, PathBuf::from("/work/rpn"));
        }

        #[test]
        fn test_global_verbose_flag() {
            let cli = Cli::parse_from(["covgate", "-vv", "check"]);
            assert_eq!(cli.verbose, 2);
        }

        #[test]
        fn test_global_quiet_flag() {
            let cli = Cli::parse_from(["covgate", "-q", "check"]);
            assert!(cli.quiet);
        }

        #[test]
        fn test_invalid_format_rejected() {
            let result = Cli::try_parse_from(["covgate", "check", "--format", "tap"]);
            assert!(result.is_err());
        }

        #[test]
        fn test_subcommand_required() {
            assert!(Cli::try_parse_from(["covgate"]).is_err());
        }
    }

    mod conversion_tests {
        use super::*;
        use crate::config::ColorChoice;
        use crate::output::OutputFormat;

        #[test]
        fn test_color_arg_into_choice() {
            assert_eq!(ColorChoice::from(ColorArg::Never), ColorChoice::Never);
            assert_eq!(ColorChoice::from(ColorArg::Always), ColorChoice::Always);
            assert_eq!(ColorChoice::from(ColorArg::Auto), ColorChoice::Auto);
        }

        #[test]
        fn test_check_format_into_output_format() {
            assert_eq!(OutputFormat::from(CheckFormat::Json), OutputFormat::Json);
            assert_eq!(OutputFormat::from(CheckFormat::Text), OutputFormat::Text);
        }
    }
}
