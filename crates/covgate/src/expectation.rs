//! Expectation table: the checked-in list of tolerated coverage gaps.
//!
//! Files not listed are expected to have full coverage. The table is read
//! from a YAML document whose paths are relative to the repository root:
//!
//! ```yaml
//! gaps:
//!   - path: src/modules/calculator/controller.cpp
//!     lines: 14
//!     branches: 11
//!     regions: 6
//! ```

use crate::metric::CoverageMetric;
use crate::result::{GateError, GateResult};
use serde::{Deserialize, Deserializer, Serialize};
use std::collections::btree_map::Entry;
use std::collections::BTreeMap;
use std::path::{Component, Path, PathBuf};

/// One declared gap as it appears in the table document
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub(crate) struct DeclaredGap {
    pub(crate) path: PathBuf,
    pub(crate) lines: u64,
    pub(crate) branches: u64,
    pub(crate) regions: u64,
}

/// On-disk layout of the table
#[derive(Debug, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub(crate) struct TableDocument {
    #[serde(default, deserialize_with = "null_as_empty")]
    pub(crate) gaps: Vec<DeclaredGap>,
}

// `gaps:` and `gaps: ~` both parse as null.
fn null_as_empty<'de, D>(deserializer: D) -> Result<Vec<DeclaredGap>, D::Error>
where
    D: Deserializer<'de>,
{
    Option::<Vec<DeclaredGap>>::deserialize(deserializer).map(Option::unwrap_or_default)
}

/// Tolerated gap for a single file
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExpectationEntry {
    /// Normalized absolute path
    pub path: PathBuf,
    /// Tolerated uncovered counts
    pub metric: CoverageMetric,
}

impl ExpectationEntry {
    /// Create a new entry
    #[must_use]
    pub fn new(path: impl Into<PathBuf>, metric: CoverageMetric) -> Self {
        Self {
            path: path.into(),
            metric,
        }
    }
}

/// Mapping from file path to its tolerated gap.
///
/// Immutable once built. Lookups normalize the query path, so
/// `/repo/src/../src/a.cpp` finds an entry declared as `/repo/src/a.cpp`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExpectationTable {
    entries: BTreeMap<PathBuf, ExpectationEntry>,
}

impl ExpectationTable {
    /// Create an empty table (every file must be fully covered)
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a table from already-resolved entries.
    ///
    /// Paths must be absolute. A path declared twice (after normalization)
    /// is rejected rather than silently overwritten.
    pub fn from_entries<I>(entries: I) -> GateResult<Self>
    where
        I: IntoIterator<Item = ExpectationEntry>,
    {
        let mut table = BTreeMap::new();
        for entry in entries {
            if !entry.path.is_absolute() {
                return Err(GateError::RelativePath { path: entry.path });
            }
            let path = normalize_path(&entry.path);
            match table.entry(path.clone()) {
                Entry::Occupied(_) => return Err(GateError::DuplicateExpectation { path }),
                Entry::Vacant(slot) => {
                    slot.insert(ExpectationEntry::new(path, entry.metric));
                }
            }
        }
        Ok(Self { entries: table })
    }

    /// Load the table document at `path`, resolving its entries against `root`
    pub fn load(path: &Path, root: &Path) -> GateResult<Self> {
        let yaml = std::fs::read_to_string(path).map_err(|e| GateError::read(path, e))?;
        let table = Self::from_yaml_str(&yaml, root)?;
        tracing::debug!(
            table = %path.display(),
            entries = table.len(),
            "loaded expectation table"
        );
        Ok(table)
    }

    /// Parse a table document, resolving relative entries against `root`
    pub fn from_yaml_str(yaml: &str, root: &Path) -> GateResult<Self> {
        if is_blank_document(yaml) {
            return Ok(Self::new());
        }

        let document: TableDocument =
            serde_yaml_ng::from_str(yaml).map_err(|e| GateError::malformed_table(e.to_string()))?;

        Self::from_entries(document.gaps.into_iter().map(|gap| {
            ExpectationEntry::new(
                resolve_path(root, &gap.path),
                CoverageMetric::new(gap.lines, gap.branches, gap.regions),
            )
        }))
    }

    /// Tolerated metric for `path`, or `None` if the file is undeclared
    #[must_use]
    pub fn get(&self, path: &Path) -> Option<CoverageMetric> {
        self.entries
            .get(path)
            .or_else(|| self.entries.get(&normalize_path(path)))
            .map(|entry| entry.metric)
    }

    /// Check if `path` is declared
    #[must_use]
    pub fn contains(&self, path: &Path) -> bool {
        self.get(path).is_some()
    }

    /// Number of declared files
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True when no file has a tolerated gap
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entries in path order
    pub fn entries(&self) -> impl Iterator<Item = &ExpectationEntry> {
        self.entries.values()
    }
}

/// Join `path` onto `root` unless it is already absolute, then normalize
#[must_use]
pub fn resolve_path(root: &Path, path: &Path) -> PathBuf {
    if path.is_absolute() {
        normalize_path(path)
    } else {
        normalize_path(&root.join(path))
    }
}

/// Lexically normalize a path: drop `.` and fold `..` into its parent.
///
/// Does not touch the filesystem; the files need not exist.
#[must_use]
pub fn normalize_path(path: &Path) -> PathBuf {
    let mut normalized = PathBuf::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => match normalized.components().next_back() {
                Some(Component::Normal(_)) => {
                    normalized.pop();
                }
                // `/..` is `/`
                Some(Component::RootDir | Component::Prefix(_)) => {}
                _ => normalized.push(component),
            },
            other => normalized.push(other),
        }
    }
    normalized
}

fn is_blank_document(yaml: &str) -> bool {
    yaml.lines().all(|line| {
        let line = line.trim();
        line.is_empty() || line.starts_with('#') || line == "---"
    })
}
