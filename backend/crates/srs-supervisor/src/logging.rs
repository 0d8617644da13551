//! Console logging for the supervisor binary.

use tracing_subscriber::{
    EnvFilter, fmt, prelude::__tracing_subscriber_SubscriberExt, util::SubscriberInitExt,
};

const DEFAULT_FILTER: &str = "info,srs_supervisor=debug";

/// Install a console subscriber. `RUST_LOG` overrides the default filter.
pub fn setup_logging(colored: bool) -> Result<(), Box<dyn std::error::Error>> {
    let console_layer = fmt::layer()
        .with_target(true)
        .with_level(true)
        .with_ansi(colored);

    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));

    tracing_subscriber::registry()
        .with(filter)
        .with(console_layer)
        .try_init()?;

    Ok(())
}
