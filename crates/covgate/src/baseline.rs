//! Baseline: the expectation table that the current report would satisfy.
//!
//! Used to update the checked-in table on purpose after a coverage change.
//! Nothing here writes the table; callers decide where the YAML goes.

use crate::expectation::{normalize_path, DeclaredGap, TableDocument};
use crate::report::CoverageReport;
use crate::result::{GateError, GateResult};
use std::collections::{BTreeMap, HashSet};
use std::path::{Path, PathBuf};

const HEADER: &str = "\
# Expected numbers of not covered code per file.
# All files not in this list are expected to have full coverage.
";

/// Gaps observed in a report, keyed by table path
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Baseline {
    gaps: BTreeMap<PathBuf, DeclaredGap>,
}

impl Baseline {
    /// Collect every file of `report` that is not fully covered.
    ///
    /// Paths under `root` are made repository-relative; the rest stay
    /// absolute. A file listed twice is rejected.
    pub fn from_report(report: &CoverageReport, root: &Path) -> GateResult<Self> {
        let root = normalize_path(root);
        let mut seen = HashSet::new();
        let mut gaps = BTreeMap::new();
        for summary in report {
            let absolute = normalize_path(&summary.path);
            if !seen.insert(absolute.clone()) {
                return Err(GateError::DuplicateReportEntry { path: absolute });
            }
            let actual = summary.actual();
            if actual.is_zero() {
                continue;
            }
            let path = absolute
                .strip_prefix(&root)
                .map_or_else(|_| absolute.clone(), Path::to_path_buf);
            gaps.insert(
                path.clone(),
                DeclaredGap {
                    path,
                    lines: actual.lines,
                    branches: actual.branches,
                    regions: actual.regions,
                },
            );
        }
        Ok(Self { gaps })
    }

    /// Number of files with a gap
    #[must_use]
    pub fn len(&self) -> usize {
        self.gaps.len()
    }

    /// True when the report is fully covered
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.gaps.is_empty()
    }

    /// Render as an expectation table document, sorted by path
    pub fn to_yaml(&self) -> GateResult<String> {
        let document = TableDocument {
            gaps: self.gaps.values().cloned().collect(),
        };
        let body = serde_yaml_ng::to_string(&document)?;
        Ok(format!("{HEADER}{body}"))
    }
}
