//! Per-file uncovered-unit counts.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Uncovered lines, branches and regions of one file in one report run.
///
/// Every field counts units that were *not* exercised, so an all-zero
/// metric means the file is fully covered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct CoverageMetric {
    /// Uncovered lines (`lines.count - lines.covered`)
    pub lines: u64,
    /// Uncovered branches (`branches.notcovered`)
    pub branches: u64,
    /// Uncovered regions (`regions.notcovered`)
    pub regions: u64,
}

impl CoverageMetric {
    /// A fully covered file
    pub const ZERO: Self = Self::new(0, 0, 0);

    /// Create a new metric
    #[must_use]
    pub const fn new(lines: u64, branches: u64, regions: u64) -> Self {
        Self {
            lines,
            branches,
            regions,
        }
    }

    /// True when nothing is left uncovered
    #[must_use]
    pub const fn is_zero(&self) -> bool {
        self.lines == 0 && self.branches == 0 && self.regions == 0
    }
}

impl fmt::Display for CoverageMetric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "lines = {}, branches = {}, regions = {}",
            self.lines, self.branches, self.regions
        )
    }
}
