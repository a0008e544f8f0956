//! Tracing subscriber setup for the CLI.
//!
//! Logs go to stderr so stdout stays machine-readable.

use std::error::Error;

use tracing_subscriber::EnvFilter;

/// Install the global subscriber.
///
/// An explicit `--log-level` wins, then `RUST_LOG`, then the configured level.
pub fn init(explicit: Option<&str>, configured: &str) -> Result<(), Box<dyn Error>> {
    let filter = match explicit {
        Some(directive) => EnvFilter::try_new(directive)?,
        None => EnvFilter::try_from_default_env().or_else(|_| EnvFilter::try_new(configured))?,
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(true)
        .compact()
        .try_init()
        .map_err(|e| e as Box<dyn Error>)?;
    Ok(())
}
