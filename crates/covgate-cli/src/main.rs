//! Covgate CLI: coverage-regression gate for CI
//!
//! ## Usage
//!
//! ```bash
//! covgate check                              # build/ccov/tests.json vs coverage-gaps.yaml
//! covgate --root ../rpn check --format json  # machine-readable outcome
//! covgate baseline -o coverage-gaps.yaml     # regenerate the table on purpose
//! ```

use clap::Parser;
use covgate_cli::{
    absolute_root,
    handlers::{execute_baseline, execute_check, exit_status, EXIT_INPUT_ERROR},
    logging::init_logging,
    Cli, CliConfig, CliError, CliResult, ColorChoice, Commands, Verbosity,
};
use std::process::ExitCode;

fn main() -> ExitCode {
    match run() {
        Ok(code) => code,
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::from(EXIT_INPUT_ERROR)
        }
    }
}

fn run() -> CliResult<ExitCode> {
    let cli = Cli::parse();

    // Build configuration from CLI args
    let config = build_config(&cli)?;
    init_logging(&config);
    tracing::debug!(root = %config.root.display(), "configuration ready");

    match cli.command {
        Commands::Check(args) => {
            let outcome = execute_check(&config, &args)?;
            Ok(ExitCode::from(exit_status(&outcome)))
        }
        Commands::Baseline(args) => {
            execute_baseline(&config, &args)?;
            Ok(ExitCode::SUCCESS)
        }
    }
}

fn build_config(cli: &Cli) -> CliResult<CliConfig> {
    let verbosity = Verbosity::from_flags(cli.quiet, cli.verbose);
    let color: ColorChoice = cli.color.clone().into();

    let root = absolute_root(&cli.root)?;
    if !root.is_dir() {
        return Err(CliError::config(format!(
            "repository root {} is not a directory",
            root.display()
        )));
    }

    Ok(CliConfig::new()
        .with_verbosity(verbosity)
        .with_color(color)
        .with_root(root))
}
