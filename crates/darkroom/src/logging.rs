//! Logging initialization.
//!
//! Uses the `tracing` ecosystem. Logs go to stderr (stdout is reserved for
//! asset references); `RUST_LOG` overrides the configured level.

use darkroom_core::config::LoggingConfig;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Initialize the logging subsystem from configuration.
///
/// `verbose` and `json_logs` are CLI overrides on top of the config file.
pub fn init(config: &LoggingConfig, verbose: bool, json_logs: bool) {
    let default_level = if verbose { "debug" } else { &config.level };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    if json_logs || config.format == "json" {
        tracing_subscriber::registry()
            .with(filter)
            .with(fmt::layer().json().with_writer(std::io::stderr))
            .init();
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(
                fmt::layer()
                    .with_target(false)
                    .with_writer(std::io::stderr)
                    .with_ansi(true),
            )
            .init();
    }
}
