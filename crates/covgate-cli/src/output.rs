//! Output formatting and verdict reporting
//!
//! Stdout carries only the machine-consumable part of a run (diagnostic
//! blocks, JSON, baseline YAML). Status lines and notes go to stderr.

use crate::error::CliResult;
use console::{style, Style, Term};
use covgate::VerificationOutcome;
use serde::{Deserialize, Serialize};

/// Output format for check results
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum OutputFormat {
    /// Human-readable diagnostic blocks
    #[default]
    Text,
    /// JSON output
    Json,
}

/// Render what a check run prints on stdout
pub fn render_outcome(outcome: &VerificationOutcome, format: OutputFormat) -> CliResult<String> {
    match format {
        OutputFormat::Text => Ok(outcome.render_diagnostics()),
        OutputFormat::Json => {
            let mut json = serde_json::to_string_pretty(outcome)?;
            json.push('\n');
            Ok(json)
        }
    }
}

/// One-line verdict, e.g. `FAILED 12 files checked (1 implicit, 2 explicit)`
#[must_use]
pub fn summary_line(outcome: &VerificationOutcome, use_color: bool) -> String {
    let status = if outcome.passed { "PASSED" } else { "FAILED" };
    let status = if use_color {
        let status_style = if outcome.passed {
            Style::new().green().bold()
        } else {
            Style::new().red().bold()
        };
        status_style.apply_to(status).to_string()
    } else {
        status.to_string()
    };

    format!(
        "{status} {} files checked ({} implicit, {} explicit)",
        outcome.files_checked,
        outcome.implicit_count(),
        outcome.explicit_count()
    )
}

/// Writes run results to the terminal
#[derive(Debug)]
pub struct Reporter {
    out: Term,
    err: Term,
    /// Whether to use colors
    pub use_color: bool,
    /// Quiet mode
    pub quiet: bool,
}

impl Default for Reporter {
    fn default() -> Self {
        Self::new(true, false)
    }
}

impl Reporter {
    /// Create a new reporter
    #[must_use]
    pub fn new(use_color: bool, quiet: bool) -> Self {
        Self {
            out: Term::stdout(),
            err: Term::stderr(),
            use_color,
            quiet,
        }
    }

    /// Write raw text to stdout; always printed
    pub fn emit(&self, text: &str) -> CliResult<()> {
        if !text.is_empty() {
            self.out.write_str(text)?;
        }
        Ok(())
    }

    /// Print the verdict line
    pub fn verdict(&self, outcome: &VerificationOutcome) {
        // Always print failures, even in quiet mode
        if self.quiet && outcome.passed {
            return;
        }
        let _ = self.err.write_line(&summary_line(outcome, self.use_color));
    }

    /// Print a warning message
    pub fn warning(&self, message: &str) {
        if self.quiet {
            return;
        }

        let prefix = if self.use_color {
            style("⚠").yellow().bold().to_string()
        } else {
            "WARN".to_string()
        };

        let _ = self.err.write_line(&format!("{prefix} {message}"));
    }

    /// Print an info message
    pub fn info(&self, message: &str) {
        if self.quiet {
            return;
        }

        let prefix = if self.use_color {
            style("ℹ").blue().bold().to_string()
        } else {
            "INFO".to_string()
        };

        let _ = self.err.write_line(&format!("{prefix} {message}"));
    }
}
