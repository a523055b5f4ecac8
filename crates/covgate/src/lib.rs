//! Covgate: per-file coverage-gap regression gate
//!
//! Compares an llvm-cov JSON export against a checked-in table of tolerated
//! coverage gaps. A build fails when a declared file's uncovered
//! lines/branches/regions differ from the table in any direction, or when an
//! undeclared file stops being fully covered.
//!
//! # Architecture
//!
//! ```text
//! ┌────────────────────┐     ┌────────────────────┐
//! │ coverage-gaps.yaml │     │ llvm-cov export    │
//! │ ExpectationTable   │     │ CoverageReport     │
//! └─────────┬──────────┘     └─────────┬──────────┘
//!           │                          │
//!           └────────► CoverageVerifier ◄┘
//!                           │
//!                  VerificationOutcome (pass / mismatches)
//! ```
//!
//! # Example
//!
//! ```
//! use covgate::{
//!     CoverageMetric, CoverageReport, CoverageVerifier, ExpectationEntry, ExpectationTable,
//!     FileCoverageSummary, MismatchKind,
//! };
//!
//! let table = ExpectationTable::from_entries([ExpectationEntry::new(
//!     "/a.cpp",
//!     CoverageMetric::new(3, 0, 1),
//! )])?;
//! let report = CoverageReport::new(vec![FileCoverageSummary::new("/a.cpp", 20, 16, 0, 1)]);
//!
//! let outcome = CoverageVerifier::new(&table).verify(&report);
//! assert!(!outcome.passed);
//! assert_eq!(outcome.mismatches[0].kind, MismatchKind::Explicit);
//! # Ok::<(), covgate::GateError>(())
//! ```

#![warn(missing_docs)]

mod baseline;
mod expectation;
mod metric;
mod report;
mod result;
mod verifier;

pub use baseline::Baseline;
pub use expectation::{normalize_path, resolve_path, ExpectationEntry, ExpectationTable};
pub use metric::CoverageMetric;
pub use report::{CoverageReport, FileCoverageSummary};
pub use result::{GateError, GateResult};
pub use verifier::{classify, CoverageVerifier, Mismatch, MismatchKind, VerificationOutcome};
