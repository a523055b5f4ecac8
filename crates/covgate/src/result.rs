//! Result and error types for covgate.
//!
//! Everything in here is an input problem: the run cannot be trusted and
//! aborts before a verdict. Coverage mismatches are data, not errors, and
//! live in [`crate::verifier`].

use std::path::PathBuf;
use thiserror::Error;

/// Result type for covgate operations
pub type GateResult<T> = Result<T, GateError>;

/// Errors that can occur while loading gate inputs
#[derive(Debug, Error)]
pub enum GateError {
    /// Input file could not be read
    #[error("Failed to read {}: {source}", path.display())]
    Read {
        /// File that failed to load
        path: PathBuf,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// Coverage report is not valid llvm-cov JSON
    #[error("Malformed coverage report: {0}")]
    ReportJson(#[from] serde_json::Error),

    /// Coverage report parsed but contains no export data
    #[error("Malformed coverage report: `data` is empty")]
    EmptyReport,

    /// A file summary claims more covered lines than it has
    #[error(
        "Malformed coverage report: {} has {covered} covered lines out of {count}",
        path.display()
    )]
    CoveredExceedsTotal {
        /// File the summary belongs to
        path: PathBuf,
        /// `lines.count`
        count: u64,
        /// `lines.covered`
        covered: u64,
    },

    /// The same file appears twice in the coverage report
    #[error("Malformed coverage report: {} is listed more than once", path.display())]
    DuplicateReportEntry {
        /// Normalized path listed more than once
        path: PathBuf,
    },

    /// Expectation table document is invalid
    #[error("Malformed expectation table: {message}")]
    MalformedTable {
        /// Error message
        message: String,
    },

    /// The same file is declared twice in the expectation table
    #[error("Duplicate expectation for {}", path.display())]
    DuplicateExpectation {
        /// Normalized path declared more than once
        path: PathBuf,
    },

    /// Expectation path could not be made absolute
    #[error("Expectation path must be absolute: {}", path.display())]
    RelativePath {
        /// Offending path
        path: PathBuf,
    },

    /// YAML serialization error
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml_ng::Error),
}

impl GateError {
    /// Create a read error for `path`
    #[must_use]
    pub fn read(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Read {
            path: path.into(),
            source,
        }
    }

    /// Create a malformed table error
    #[must_use]
    pub fn malformed_table(message: impl Into<String>) -> Self {
        Self::MalformedTable {
            message: message.into(),
        }
    }
}
