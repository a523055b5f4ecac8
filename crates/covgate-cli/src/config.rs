//! CLI configuration

use covgate::normalize_path;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Report location relative to the repository root
pub const DEFAULT_REPORT_PATH: &str = "build/ccov/tests.json";

/// Expectation table location relative to the repository root
pub const DEFAULT_TABLE_PATH: &str = "coverage-gaps.yaml";

/// CLI verbosity level
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Verbosity {
    /// Quiet - minimal output
    Quiet,
    /// Normal - default output
    #[default]
    Normal,
    /// Verbose - extra output
    Verbose,
    /// Debug - maximum output
    Debug,
}

impl Verbosity {
    /// Build from the `-q` flag and `-v` count
    #[must_use]
    pub const fn from_flags(quiet: bool, verbose: u8) -> Self {
        if quiet {
            return Self::Quiet;
        }
        match verbose {
            0 => Self::Normal,
            1 => Self::Verbose,
            _ => Self::Debug,
        }
    }

    /// Check if quiet mode
    #[must_use]
    pub const fn is_quiet(self) -> bool {
        matches!(self, Self::Quiet)
    }

    /// Check if verbose or higher
    #[must_use]
    pub const fn is_verbose(self) -> bool {
        matches!(self, Self::Verbose | Self::Debug)
    }

    /// Default log filter when `RUST_LOG` is unset
    #[must_use]
    pub const fn log_filter(self) -> &'static str {
        match self {
            Self::Quiet => "error",
            Self::Normal => "warn",
            Self::Verbose => "info",
            Self::Debug => "debug",
        }
    }
}

/// Color output choice
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ColorChoice {
    /// Always use colors
    Always,
    /// Use colors when output is a terminal
    #[default]
    Auto,
    /// Never use colors
    Never,
}

impl ColorChoice {
    /// Should use colors based on output detection
    #[must_use]
    pub fn should_color(self) -> bool {
        match self {
            Self::Always => true,
            Self::Never => false,
            Self::Auto => std::io::IsTerminal::is_terminal(&std::io::stderr()),
        }
    }
}

/// CLI configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CliConfig {
    /// Verbosity level
    pub verbosity: Verbosity,
    /// Color output choice
    pub color: ColorChoice,
    /// Absolute repository root
    pub root: PathBuf,
}

impl Default for CliConfig {
    fn default() -> Self {
        Self {
            verbosity: Verbosity::Normal,
            color: ColorChoice::Auto,
            root: PathBuf::from("/"),
        }
    }
}

impl CliConfig {
    /// Create new default configuration
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set verbosity
    #[must_use]
    pub const fn with_verbosity(mut self, verbosity: Verbosity) -> Self {
        self.verbosity = verbosity;
        self
    }

    /// Set color choice
    #[must_use]
    pub const fn with_color(mut self, color: ColorChoice) -> Self {
        self.color = color;
        self
    }

    /// Set repository root (expected absolute, see [`resolve_root`])
    #[must_use]
    pub fn with_root(mut self, root: impl Into<PathBuf>) -> Self {
        self.root = root.into();
        self
    }

    /// Report path: the override if given, else the default under the root
    #[must_use]
    pub fn report_path(&self, explicit: Option<&Path>) -> PathBuf {
        explicit.map_or_else(|| self.root.join(DEFAULT_REPORT_PATH), Path::to_path_buf)
    }

    /// Table path: the override if given, else the default under the root
    #[must_use]
    pub fn table_path(&self, explicit: Option<&Path>) -> PathBuf {
        explicit.map_or_else(|| self.root.join(DEFAULT_TABLE_PATH), Path::to_path_buf)
    }
}

/// Make `root` absolute against `cwd` and normalize it
#[must_use]
pub fn resolve_root(root: &Path, cwd: &Path) -> PathBuf {
    covgate::resolve_path(cwd, root)
}

/// Normalized absolute form of `root` based on the process working directory
pub fn absolute_root(root: &Path) -> std::io::Result<PathBuf> {
    if root.is_absolute() {
        return Ok(normalize_path(root));
    }
    Ok(resolve_root(root, &std::env::current_dir()?))
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;

    mod verbosity_tests {
        use super::*;

        #[test]
        fn test_default_verbosity() {
            assert_eq!(Verbosity::default(), Verbosity::Normal);
        }

        #[test]
        fn test_from_flags() {
            assert_eq!(Verbosity::from_flags(false, 0), Verbosity::Normal);
            assert_eq!(Verbosity::from_flags(false, 1), Verbosity::Verbose);
            assert_eq!(Verbosity::from_flags(false, 5), Verbosity::Debug);
            assert_eq!(Verbosity::from_flags(true, 3), Verbosity::Quiet);
        }

        #[test]
        fn test_is_quiet() {
            assert!(Verbosity::Quiet.is_quiet());
            assert!(!Verbosity::Normal.is_quiet());
        }

        #[test]
        fn test_is_verbose() {
            assert!(!Verbosity::Normal.is_verbose());
            assert!(Verbosity::Verbose.is_verbose());
            assert!(Verbosity::Debug.is_verbose());
        }

        #[test]
        fn test_log_filter() {
            assert_eq!(Verbosity::Quiet.log_filter(), "error");
            assert_eq!(Verbosity::Normal.log_filter(), "warn");
            assert_eq!(Verbosity::Verbose.log_filter(), "info");
            assert_eq!(Verbosity::Debug.log_filter(), "debug");
        }
    }

    mod color_choice_tests {
        use super::*;

        #[test]
        fn test_default_color() {
            assert_eq!(ColorChoice::default(), ColorChoice::Auto);
        }

        #[test]
        fn test_should_color_fixed() {
            assert!(ColorChoice::Always.should_color());
            assert!(!ColorChoice::Never.should_color());
        }
    }

    mod cli_config_tests {
        use super::*;

        #[test]
        fn test_default_paths_under_root() {
            let config = CliConfig::new().with_root("/work/rpn");
            assert_eq!(
                config.report_path(None),
                PathBuf::from("/work/rpn/build/ccov/tests.json")
            );
            assert_eq!(
                config.table_path(None),
                PathBuf::from("/work/rpn/coverage-gaps.yaml")
            );
        }

        #[test]
        fn test_explicit_paths_win() {
            let config = CliConfig::new().with_root("/work/rpn");
            assert_eq!(
                config.report_path(Some(Path::new("/tmp/tests.json"))),
                PathBuf::from("/tmp/tests.json")
            );
            assert_eq!(
                config.table_path(Some(Path::new("gaps.yaml"))),
                PathBuf::from("gaps.yaml")
            );
        }

        #[test]
        fn test_chained_builders() {
            let config = CliConfig::new()
                .with_verbosity(Verbosity::Debug)
                .with_color(ColorChoice::Never);
            assert_eq!(config.verbosity, Verbosity::Debug);
            assert_eq!(config.color, ColorChoice::Never);
        }

        #[test]
        fn test_resolve_root() {
            assert_eq!(
                resolve_root(Path::new("utils/.."), Path::new("/work/rpn")),
                PathBuf::from("/work/rpn")
            );
            assert_eq!(
                resolve_root(Path::new("/elsewhere/./repo"), Path::new("/work")),
                PathBuf::from("/elsewhere/repo")
            );
        }

        #[test]
        fn test_absolute_root_is_absolute() {
            assert!(absolute_root(Path::new(".")).unwrap().is_absolute());
        }

        #[test]
        fn test_serialize_roundtrip_fields() {
            let config = CliConfig::new().with_root("/r");
            let json = serde_json::to_string(&config).unwrap();
            assert!(json.contains("\"root\":\"/r\""));
        }
    }
}
