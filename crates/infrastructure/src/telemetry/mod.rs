//! Logging setup
//!
//! Installs a global `tracing` subscriber with an `EnvFilter` and a text or
//! JSON formatter.

use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use crate::config::LogFormat;

/// Filter used when `RUST_LOG` is not set
///
/// Workspace crates log at `info`; everything else only surfaces warnings.
pub const DEFAULT_LOG_FILTER: &str = "warn,glassbot_relay=info,presentation_http=info,\
application=info,infrastructure=info,integration_backend=info,integration_whatsapp=info,\
tower_http=info";

/// Build the log filter from `RUST_LOG`, falling back to `default`
pub fn env_filter(default: &str) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default))
}

/// Install the global subscriber
///
/// # Errors
/// Returns an error if a global subscriber is already set.
pub fn init_logging(format: LogFormat) -> Result<(), tracing_subscriber::util::TryInitError> {
    let registry = tracing_subscriber::registry().with(env_filter(DEFAULT_LOG_FILTER));

    match format {
        LogFormat::Json => registry
            .with(tracing_subscriber::fmt::layer().json())
            .try_init(),
        LogFormat::Text => registry.with(tracing_subscriber::fmt::layer()).try_init(),
    }
}
