//! Logging setup
//!
//! Console-only `tracing` subscriber. `RUST_LOG` takes precedence over the
//! configured level.

use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

use crate::ClientConfig;

/// Initialize the global subscriber
///
/// # Arguments
/// * `level` - Log level (e.g., "info", "debug", "cinebook_client=trace")
/// * `json_format` - JSON lines instead of human readable output
///
/// # Examples
/// ```no_run
/// cinebook_client::logger::init_logger("debug", false)?;
/// # Ok::<(), anyhow::Error>(())
/// ```
pub fn init_logger(level: &str, json_format: bool) -> anyhow::Result<()> {
    let env_filter = EnvFilter::try_from_default_env().or_else(|_| EnvFilter::try_new(level))?;
    let registry = tracing_subscriber::registry().with(env_filter);

    if json_format {
        registry
            .with(
                fmt::layer()
                    .json()
                    .with_target(true)
                    .with_current_span(true)
                    .with_file(true)
                    .with_line_number(true),
            )
            .try_init()?;
    } else {
        registry
            .with(fmt::layer().with_target(true).compact())
            .try_init()?;
    }

    tracing::debug!(level, json_format, "logger initialized");
    Ok(())
}

/// Initialize with the level from `config`
pub fn init_from_config(config: &ClientConfig, json_format: bool) -> anyhow::Result<()> {
    init_logger(&config.log_level, json_format)
}
