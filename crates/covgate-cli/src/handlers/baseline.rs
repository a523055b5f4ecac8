//! Baseline command handler

use crate::config::CliConfig;
use crate::error::CliResult;
use crate::output::Reporter;
use crate::BaselineArgs;
use covgate::{Baseline, CoverageReport};

/// Execute the baseline command.
///
/// Prints the table to stdout unless `--output` names a file.
pub fn execute_baseline(config: &CliConfig, args: &BaselineArgs) -> CliResult<()> {
    let reporter = Reporter::new(
        config.color.should_color(),
        config.verbosity.is_quiet(),
    );

    let report_path = config.report_path(args.report.as_deref());
    let report = CoverageReport::load(&report_path)?;
    let baseline = Baseline::from_report(&report, &config.root)?;
    let yaml = baseline.to_yaml()?;

    match args.output {
        Some(ref output) => {
            std::fs::write(output, &yaml)?;
            reporter.info(&format!(
                "Wrote {} expectations to {}",
                baseline.len(),
                output.display()
            ));
        }
        None => reporter.emit(&yaml)?,
    }

    tracing::info!(
        report = %report_path.display(),
        files = report.len(),
        gaps = baseline.len(),
        "baseline generated"
    );
    Ok(())
}
