//! Logging setup for the CLI.
//!
//! Events go to stderr in compact form so stdout stays reserved for
//! diagnostics, JSON and baseline YAML. `RUST_LOG` overrides the level
//! derived from `-q`/`-v`.

use crate::config::CliConfig;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;

/// Build the filter for `config`, honouring `RUST_LOG` when set
#[must_use]
pub fn env_filter(config: &CliConfig) -> EnvFilter {
    EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(config.verbosity.log_filter()))
}

/// Install the global subscriber.
///
/// Uses `try_init`, so a second call (or a subscriber installed by a test
/// harness) is left in place.
pub fn init_logging(config: &CliConfig) {
    let terminal_layer = tracing_subscriber::fmt::layer()
        .with_writer(std::io::stderr)
        .with_ansi(config.color.should_color())
        .with_target(false)
        .compact();

    let _ = tracing_subscriber::registry()
        .with(env_filter(config))
        .with(terminal_layer)
        .try_init();
}
