//! Coverage report: typed boundary for `llvm-cov export -format=text` JSON.
//!
//! Only the fields the gate reads are modelled; everything else in the
//! export is ignored. A missing or mistyped field fails the whole load.

use crate::expectation::normalize_path;
use crate::metric::CoverageMetric;
use crate::result::{GateError, GateResult};
use serde::Deserialize;
use std::collections::HashSet;
use std::path::{Path, PathBuf};

#[derive(Debug, Deserialize)]
struct ExportDocument {
    data: Vec<ExportData>,
}

#[derive(Debug, Deserialize)]
struct ExportData {
    files: Vec<ExportFile>,
}

#[derive(Debug, Deserialize)]
struct ExportFile {
    filename: PathBuf,
    summary: ExportSummary,
}

#[derive(Debug, Deserialize)]
struct ExportSummary {
    lines: LineCounts,
    branches: NotCovered,
    regions: NotCovered,
}

#[derive(Debug, Deserialize)]
struct LineCounts {
    count: u64,
    covered: u64,
}

// llvm-cov has no `notcovered` for lines, hence the separate shape.
#[derive(Debug, Deserialize)]
struct NotCovered {
    notcovered: u64,
}

/// Raw per-file counts from one report run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileCoverageSummary {
    /// Normalized absolute path of the source file
    pub path: PathBuf,
    /// `lines.count`
    pub total_lines: u64,
    /// `lines.covered`
    pub covered_lines: u64,
    /// `branches.notcovered`
    pub not_covered_branches: u64,
    /// `regions.notcovered`
    pub not_covered_regions: u64,
}

impl FileCoverageSummary {
    /// Create a new summary; `path` is lexically normalized
    #[must_use]
    pub fn new(
        path: impl Into<PathBuf>,
        total_lines: u64,
        covered_lines: u64,
        not_covered_branches: u64,
        not_covered_regions: u64,
    ) -> Self {
        let path: PathBuf = path.into();
        Self {
            path: normalize_path(&path),
            total_lines,
            covered_lines,
            not_covered_branches,
            not_covered_regions,
        }
    }

    /// Derive the uncovered counts for this file
    #[must_use]
    pub const fn actual(&self) -> CoverageMetric {
        CoverageMetric::new(
            self.total_lines.saturating_sub(self.covered_lines),
            self.not_covered_branches,
            self.not_covered_regions,
        )
    }
}

/// Ordered per-file summaries of one report run
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CoverageReport {
    files: Vec<FileCoverageSummary>,
}

impl CoverageReport {
    /// Create a report from summaries, keeping their order
    #[must_use]
    pub fn new(files: Vec<FileCoverageSummary>) -> Self {
        Self { files }
    }

    /// Load and parse the JSON export at `path`
    pub fn load(path: &Path) -> GateResult<Self> {
        let json = std::fs::read_to_string(path).map_err(|e| GateError::read(path, e))?;
        let report = Self::from_json_str(&json)?;
        tracing::debug!(
            report = %path.display(),
            files = report.len(),
            "loaded coverage report"
        );
        Ok(report)
    }

    /// Parse a JSON export.
    ///
    /// Reads `data[0].files`; later `data` entries are ignored. A filename
    /// listed twice (after normalization) is rejected.
    pub fn from_json_str(json: &str) -> GateResult<Self> {
        let document: ExportDocument = serde_json::from_str(json)?;
        let export = document
            .data
            .into_iter()
            .next()
            .ok_or(GateError::EmptyReport)?;

        let mut seen = HashSet::new();
        let files = export
            .files
            .into_iter()
            .map(|file| {
                let path = normalize_path(&file.filename);
                if !seen.insert(path.clone()) {
                    return Err(GateError::DuplicateReportEntry { path });
                }
                let lines = file.summary.lines;
                if lines.covered > lines.count {
                    return Err(GateError::CoveredExceedsTotal {
                        path,
                        count: lines.count,
                        covered: lines.covered,
                    });
                }
                Ok(FileCoverageSummary::new(
                    path,
                    lines.count,
                    lines.covered,
                    file.summary.branches.notcovered,
                    file.summary.regions.notcovered,
                ))
            })
            .collect::<GateResult<Vec<_>>>()?;

        Ok(Self { files })
    }

    /// Summaries in report order
    #[must_use]
    pub fn files(&self) -> &[FileCoverageSummary] {
        &self.files
    }

    /// Iterate summaries in report order
    pub fn iter(&self) -> std::slice::Iter<'_, FileCoverageSummary> {
        self.files.iter()
    }

    /// Number of files in the report
    #[must_use]
    pub fn len(&self) -> usize {
        self.files.len()
    }

    /// True when the report lists no files
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }
}

impl<'a> IntoIterator for &'a CoverageReport {
    type Item = &'a FileCoverageSummary;
    type IntoIter = std::slice::Iter<'a, FileCoverageSummary>;

    fn into_iter(self) -> Self::IntoIter {
        self.files.iter()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn export_json(files: &str) -> String {
        format!(
            r#"{{"type": "llvm.coverage.json.export", "version": "2.0.1", "data": [{{"files": [{files}], "totals": {{}}}}]}}"#
        )
    }

    fn file_json(name: &str, count: u64, covered: u64, branches: u64, regions: u64) -> String {
        format!(
            r#"{{"filename": "{name}", "segments": [], "summary": {{
                "lines": {{"count": {count}, "covered": {covered}, "percent": 0}},
                "functions": {{"count": 1, "covered": 1, "percent": 100}},
                "branches": {{"count": 10, "covered": 0, "notcovered": {branches}, "percent": 0}},
                "regions": {{"count": 10, "covered": 0, "notcovered": {regions}, "percent": 0}}
            }}}}"#
        )
    }

    #[test]
    fn test_actual_derives_lines_from_count_and_covered() {
        let summary = FileCoverageSummary::new("/a.cpp", 120, 117, 0, 1);
        assert_eq!(summary.actual(), CoverageMetric::new(3, 0, 1));
    }

    #[test]
    fn test_parse_preserves_order_and_counts() {
        let json = export_json(&format!(
            "{}, {}",
            file_json("/repo/src/b.cpp", 50, 50, 2, 0),
            file_json("/repo/src/a.cpp", 40, 36, 0, 1)
        ));
        let report = CoverageReport::from_json_str(&json).unwrap();

        assert_eq!(report.len(), 2);
        assert_eq!(report.files()[0].path, PathBuf::from("/repo/src/b.cpp"));
        assert_eq!(report.files()[0].actual(), CoverageMetric::new(0, 2, 0));
        assert_eq!(report.files()[1].actual(), CoverageMetric::new(4, 0, 1));
    }

    #[test]
    fn test_parse_normalizes_filenames() {
        let json = export_json(&file_json("/repo/build/../src/a.cpp", 1, 1, 0, 0));
        let report = CoverageReport::from_json_str(&json).unwrap();
        assert_eq!(report.files()[0].path, PathBuf::from("/repo/src/a.cpp"));
    }

    #[test]
    fn test_summary_new_normalizes_path() {
        let summary = FileCoverageSummary::new("/repo/./src/../src/a.cpp", 1, 1, 0, 0);
        assert_eq!(summary.path, PathBuf::from("/repo/src/a.cpp"));
    }

    #[test]
    fn test_repeated_filename_is_error() {
        let json = export_json(&format!(
            "{}, {}",
            file_json("/repo/src/hdr.h", 10, 8, 0, 0),
            file_json("/repo/src/./hdr.h", 10, 10, 0, 1)
        ));
        let err = CoverageReport::from_json_str(&json).unwrap_err();
        assert!(matches!(
            err,
            GateError::DuplicateReportEntry { ref path } if path == Path::new("/repo/src/hdr.h")
        ));
        assert!(err.to_string().contains("listed more than once"));
    }

    #[test]
    fn test_empty_files_list() {
        let report = CoverageReport::from_json_str(&export_json("")).unwrap();
        assert!(report.is_empty());
    }

    #[test]
    fn test_empty_data_is_error() {
        let result = CoverageReport::from_json_str(r#"{"data": []}"#);
        assert!(matches!(result, Err(GateError::EmptyReport)));
    }

    #[test]
    fn test_missing_notcovered_is_error() {
        let json = export_json(
            r#"{"filename": "/a.cpp", "summary": {
                "lines": {"count": 1, "covered": 1},
                "branches": {"count": 0},
                "regions": {"notcovered": 0}
            }}"#,
        );
        let err = CoverageReport::from_json_str(&json).unwrap_err();
        assert!(matches!(err, GateError::ReportJson(_)));
        assert!(err.to_string().contains("notcovered"));
    }

    #[test]
    fn test_negative_count_is_error() {
        let json = export_json(
            r#"{"filename": "/a.cpp", "summary": {
                "lines": {"count": 1, "covered": 1},
                "branches": {"notcovered": -1},
                "regions": {"notcovered": 0}
            }}"#,
        );
        assert!(matches!(
            CoverageReport::from_json_str(&json),
            Err(GateError::ReportJson(_))
        ));
    }

    #[test]
    fn test_covered_exceeding_total_is_error() {
        let json = export_json(&file_json("/a.cpp", 3, 5, 0, 0));
        let result = CoverageReport::from_json_str(&json);
        assert!(matches!(
            result,
            Err(GateError::CoveredExceedsTotal {
                count: 3,
                covered: 5,
                ..
            })
        ));
    }

    #[test]
    fn test_not_json_is_error() {
        assert!(matches!(
            CoverageReport::from_json_str("not valid json"),
            Err(GateError::ReportJson(_))
        ));
    }

    #[test]
    fn test_load_from_file() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("tests.json");
        std::fs::write(&path, export_json(&file_json("/a.cpp", 10, 7, 1, 1))).unwrap();

        let report = CoverageReport::load(&path).unwrap();
        assert_eq!(report.files()[0].actual(), CoverageMetric::new(3, 1, 1));
    }

    #[test]
    fn test_load_missing_file() {
        let result = CoverageReport::load(Path::new("/nonexistent/tests.json"));
        assert!(matches!(result, Err(GateError::Read { .. })));
    }
}
