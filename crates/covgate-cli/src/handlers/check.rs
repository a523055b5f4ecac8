//! Check command handler

use crate::config::CliConfig;
use crate::error::CliResult;
use crate::output::{render_outcome, Reporter};
use crate::CheckArgs;
use covgate::{CoverageReport, CoverageVerifier, ExpectationTable, VerificationOutcome};
use std::path::Path;

/// Exit status of a passing run
pub const EXIT_PASSED: u8 = 0;

/// Exit status when any file mismatches
pub const EXIT_MISMATCH: u8 = 1;

/// Exit status when an input cannot be loaded
pub const EXIT_INPUT_ERROR: u8 = 2;

/// Execute the check command.
///
/// Both inputs are loaded before anything is classified, so a malformed
/// input aborts without printing partial diagnostics.
pub fn execute_check(config: &CliConfig, args: &CheckArgs) -> CliResult<VerificationOutcome> {
    let reporter = Reporter::new(
        config.color.should_color(),
        config.verbosity.is_quiet(),
    );

    let table_path = config.table_path(args.table.as_deref());
    let table = load_table(&table_path, &config.root, args.allow_missing_table, &reporter)?;

    let report_path = config.report_path(args.report.as_deref());
    let report = CoverageReport::load(&report_path)?;
    tracing::info!(
        report = %report_path.display(),
        table = %table_path.display(),
        files = report.len(),
        declared = table.len(),
        "checking coverage"
    );

    let outcome = CoverageVerifier::new(&table).verify(&report);

    reporter.emit(&render_outcome(&outcome, args.format.into())?)?;
    if config.verbosity.is_verbose() {
        for path in &outcome.stale {
            reporter.info(&format!(
                "{} is declared but not in the report",
                path.display()
            ));
        }
    }
    reporter.verdict(&outcome);

    Ok(outcome)
}

/// Load the table, or an empty one when it is missing and that is allowed
pub fn load_table(
    path: &Path,
    root: &Path,
    allow_missing: bool,
    reporter: &Reporter,
) -> CliResult<ExpectationTable> {
    if allow_missing && !path.exists() {
        reporter.warning(&format!(
            "{} not found, expecting full coverage everywhere",
            path.display()
        ));
        return Ok(ExpectationTable::new());
    }
    Ok(ExpectationTable::load(path, root)?)
}

/// Process exit status for a finished run
#[must_use]
pub const fn exit_status(outcome: &VerificationOutcome) -> u8 {
    if outcome.passed {
        EXIT_PASSED
    } else {
        EXIT_MISMATCH
    }
}
