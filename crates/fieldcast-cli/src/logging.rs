//! Logging setup for the CLI
//!
//! Structured logging via tracing-subscriber: verbosity flags pick the base
//! level, and `FIELDCAST_LOG` overrides the filter entirely for targeted
//! debugging (e.g. `FIELDCAST_LOG=fieldcast_core::builder=trace`).

use tracing_subscriber::EnvFilter;

use crate::error::Result;

/// Environment variable holding a tracing filter directive
pub const LOG_ENV_VAR: &str = "FIELDCAST_LOG";

/// Initialize the global tracing subscriber
pub fn init(verbosity: u8, use_color: bool) -> Result<()> {
    let default_level = match verbosity {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    let filter = EnvFilter::try_from_env(LOG_ENV_VAR)
        .unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_ansi(use_color)
        .with_writer(std::io::stderr)
        .with_target(verbosity >= 2)
        .init();

    Ok(())
}
