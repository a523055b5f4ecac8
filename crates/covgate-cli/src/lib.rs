//! Covgate CLI Library
//!
//! Command-line surface for the covgate coverage-regression gate.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)] // Error types are self-documenting

mod commands;
mod config;
mod error;
pub mod handlers;
pub mod logging;
mod output;

pub use commands::{BaselineArgs, CheckArgs, CheckFormat, Cli, ColorArg, Commands};
pub use config::{
    absolute_root, resolve_root, CliConfig, ColorChoice, Verbosity, DEFAULT_REPORT_PATH,
    DEFAULT_TABLE_PATH,
};
pub use error::{CliError, CliResult};
pub use output::{render_outcome, summary_line, OutputFormat, Reporter};
