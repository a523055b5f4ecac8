//! Coverage verifier: classifies every file of a report against the
//! expectation table and folds the results into one verdict.
//!
//! Classification is two-case:
//!
//! - **undeclared** file: compliant when fully covered, otherwise an
//!   [`MismatchKind::Implicit`] mismatch.
//! - **declared** file: compliant only on exact field-wise equality with the
//!   tolerated metric, otherwise an [`MismatchKind::Explicit`] mismatch.
//!   Shrinking gaps count too; the table must be updated deliberately.
//!
//! Files are classified independently, so the verdict does not depend on
//! report order.

use crate::expectation::{normalize_path, ExpectationTable};
use crate::metric::CoverageMetric;
use crate::report::{CoverageReport, FileCoverageSummary};
use serde::Serialize;
use std::collections::HashSet;
use std::fmt;
use std::path::{Path, PathBuf};

/// Why a file failed the gate
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum MismatchKind {
    /// Undeclared file lost full coverage
    Implicit,
    /// Declared file's gap differs from its tolerance
    Explicit,
}

impl MismatchKind {
    /// Lowercase label used in diagnostics
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Implicit => "implicit",
            Self::Explicit => "explicit",
        }
    }
}

impl fmt::Display for MismatchKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One file that failed the gate
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct Mismatch {
    /// File path as it appears in the report
    pub path: PathBuf,
    /// Classification
    pub kind: MismatchKind,
    /// Uncovered counts observed in this run
    pub actual: CoverageMetric,
    /// Tolerated counts, `None` for implicit mismatches
    pub expected: Option<CoverageMetric>,
}

impl fmt::Display for Mismatch {
    /// Renders the diagnostic block:
    ///
    /// ```text
    /// /repo/src/a.cpp
    ///     explicit
    ///     lines = 4
    ///     branches = 0
    ///     regions = 1
    /// ```
    ///
    /// (indented with tabs)
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}\n\t{}\n\tlines = {}\n\tbranches = {}\n\tregions = {}",
            self.path.display(),
            self.kind,
            self.actual.lines,
            self.actual.branches,
            self.actual.regions
        )
    }
}

/// Result of one verification run
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct VerificationOutcome {
    /// True iff no mismatch was recorded
    pub passed: bool,
    /// Number of report entries classified
    pub files_checked: usize,
    /// Every mismatch, in report order
    pub mismatches: Vec<Mismatch>,
    /// Declared paths the report never mentioned (informational only)
    pub stale: Vec<PathBuf>,
}

impl VerificationOutcome {
    /// Number of implicit mismatches
    #[must_use]
    pub fn implicit_count(&self) -> usize {
        self.count_of(MismatchKind::Implicit)
    }

    /// Number of explicit mismatches
    #[must_use]
    pub fn explicit_count(&self) -> usize {
        self.count_of(MismatchKind::Explicit)
    }

    fn count_of(&self, kind: MismatchKind) -> usize {
        self.mismatches.iter().filter(|m| m.kind == kind).count()
    }

    /// Mismatch for `path`, if any
    #[must_use]
    pub fn mismatch_for(&self, path: &Path) -> Option<&Mismatch> {
        self.mismatches.iter().find(|m| m.path == path)
    }

    /// All diagnostic blocks, one per line group, newline terminated
    #[must_use]
    pub fn render_diagnostics(&self) -> String {
        let mut out = String::new();
        for mismatch in &self.mismatches {
            out.push_str(&mismatch.to_string());
            out.push('\n');
        }
        out
    }
}

/// Classify a single file.
///
/// Returns `None` when the file complies with its expectation (or lack of
/// one).
#[must_use]
pub fn classify(expected: Option<CoverageMetric>, actual: CoverageMetric) -> Option<MismatchKind> {
    match expected {
        None if actual.is_zero() => None,
        None => Some(MismatchKind::Implicit),
        Some(expected) if expected == actual => None,
        Some(_) => Some(MismatchKind::Explicit),
    }
}

/// Checks coverage reports against one expectation table
#[derive(Debug, Clone, Copy)]
pub struct CoverageVerifier<'a> {
    table: &'a ExpectationTable,
}

impl<'a> CoverageVerifier<'a> {
    /// Create a verifier for `table`
    #[must_use]
    pub const fn new(table: &'a ExpectationTable) -> Self {
        Self { table }
    }

    /// Check a single file summary
    #[must_use]
    pub fn check_file(&self, summary: &FileCoverageSummary) -> Option<Mismatch> {
        let actual = summary.actual();
        let expected = self.table.get(&summary.path);

        let Some(kind) = classify(expected, actual) else {
            tracing::debug!(path = %summary.path.display(), %actual, "coverage matches");
            return None;
        };

        tracing::info!(
            path = %summary.path.display(),
            kind = kind.as_str(),
            %actual,
            "coverage mismatch"
        );
        Some(Mismatch {
            path: summary.path.clone(),
            kind,
            actual,
            expected,
        })
    }

    /// Classify every file in `report` and aggregate the verdict.
    ///
    /// All mismatches are collected; nothing short-circuits.
    #[must_use]
    pub fn verify(&self, report: &CoverageReport) -> VerificationOutcome {
        let mismatches: Vec<Mismatch> = report
            .iter()
            .filter_map(|summary| self.check_file(summary))
            .collect();

        let seen: HashSet<PathBuf> = report.iter().map(|s| normalize_path(&s.path)).collect();
        let stale: Vec<PathBuf> = self
            .table
            .entries()
            .filter(|entry| !seen.contains(entry.path.as_path()))
            .map(|entry| entry.path.clone())
            .collect();
        for path in &stale {
            tracing::debug!(path = %path.display(), "expectation not present in report");
        }

        let outcome = VerificationOutcome {
            passed: mismatches.is_empty(),
            files_checked: report.len(),
            mismatches,
            stale,
        };
        tracing::info!(
            passed = outcome.passed,
            files = outcome.files_checked,
            implicit = outcome.implicit_count(),
            explicit = outcome.explicit_count(),
            "coverage verification finished"
        );
        outcome
    }
}
