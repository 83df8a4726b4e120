//! Tracing bootstrap for applications embedding the core.
//!
//! The dashboard that drives this crate owns the process, so the core only
//! offers a one-call initializer; calling it more than once is a no-op.

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::config::LoggingConfig;

/// Initialize tracing from the logging configuration.
///
/// `RUST_LOG` takes precedence over the configured level. The `format` key
/// selects between human-readable (`pretty`) and line-oriented JSON output.
pub fn init(config: &LoggingConfig) {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| format!("libris_core={}", config.level).into());

    let registry = tracing_subscriber::registry().with(filter);

    // A second init in the same process keeps the first subscriber.
    let result = if config.format == "json" {
        registry
            .with(tracing_subscriber::fmt::layer().json())
            .try_init()
    } else {
        registry.with(tracing_subscriber::fmt::layer()).try_init()
    };

    if result.is_ok() {
        tracing::info!("Libris core v{} logging initialized", env!("CARGO_PKG_VERSION"));
    }
}
