//! Tracing initialization and subscriber setup.
//!
//! Configures a `tracing-subscriber` registry that filters by level and writes
//! compact human-readable lines to stderr.

use crate::Config;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Default filter directive when neither `RUST_LOG` nor `trace_level` is set.
pub const DEFAULT_TRACE_LEVEL: &str = "info";

/// Builds the level filter for a configuration.
///
/// `RUST_LOG` wins over `config.trace_level`, which wins over
/// [`DEFAULT_TRACE_LEVEL`]. An unparsable directive falls back to the default.
#[must_use]
pub fn build_filter(config: &Config) -> EnvFilter {
    if let Ok(filter) = EnvFilter::try_from_default_env() {
        return filter;
    }

    let level = config.trace_level.as_deref().unwrap_or(DEFAULT_TRACE_LEVEL);
    EnvFilter::try_new(level).unwrap_or_else(|_| EnvFilter::new(DEFAULT_TRACE_LEVEL))
}

/// Initializes the global tracing subscriber.
///
/// Idempotent: only the first call in a process installs a subscriber, later
/// calls are ignored.
///
/// # Example
///
/// ```rust
/// use tickbox::observability::init_tracing;
/// use tickbox::Config;
///
/// let config = Config {
///     trace_level: Some("debug".to_string()),
///     ..Default::default()
/// };
///
/// init_tracing(&config);
/// init_tracing(&config);
///
/// tracing::debug!("tracing is now active");
/// ```
pub fn init_tracing(config: &Config) {
    let subscriber = tracing_subscriber::registry()
        .with(build_filter(config))
        .with(
            fmt::layer()
                .compact()
                .with_target(false)
                .with_writer(std::io::stderr),
        );

    let _ = subscriber.try_init();
}
