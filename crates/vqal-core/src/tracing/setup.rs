//! Tracing initialization and configuration.

use std::sync::Once;

use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use crate::config::ObservabilityConfig;
use crate::constants::{DEFAULT_LOG_FILTER, LOG_ENV_VAR};

static INIT: Once = Once::new();

/// Initialize the VQAL tracing/logging system with default settings.
///
/// Reads the `VQAL_LOG` environment variable for per-module log levels.
/// Format: `VQAL_LOG=vqal_query=debug,vqal_core=warn`
///
/// Falls back to `vqal=info` if `VQAL_LOG` is not set or is invalid.
///
/// This function is idempotent: only the first call installs a subscriber.
pub fn init_tracing() {
    install(EnvFilter::new(DEFAULT_LOG_FILTER), false);
}

/// Initialize tracing from the observability config.
///
/// `VQAL_LOG` still takes precedence; otherwise `log_level` applies to
/// every VQAL crate.
pub fn init_tracing_with_config(config: &ObservabilityConfig) {
    let directive = format!(
        "vqal={level},vqal_core={level},vqal_query={level},vqal_cli={level}",
        level = config.log_level
    );
    install(EnvFilter::new(directive), config.json_logs);
}

fn install(fallback: EnvFilter, json: bool) {
    INIT.call_once(|| {
        let filter = EnvFilter::try_from_env(LOG_ENV_VAR).unwrap_or(fallback);

        let registry = tracing_subscriber::registry().with(filter);
        // Logs go to stderr; stdout carries round outcomes.
        // `try_init` so a subscriber installed by an embedding host wins.
        let _ = if json {
            registry
                .with(
                    fmt::layer()
                        .json()
                        .with_writer(std::io::stderr)
                        .with_target(true)
                        .with_thread_ids(true),
                )
                .try_init()
        } else {
            registry
                .with(
                    fmt::layer()
                        .with_writer(std::io::stderr)
                        .with_target(true)
                        .with_thread_ids(true)
                        .with_file(true)
                        .with_line_number(true),
                )
                .try_init()
        };
        ::tracing::debug!(json, "tracing initialized");
    });
}
