//! Logging initialisation for voxsculpt hosts.
//!
//! # Environment variables
//!
//! | Variable | Effect |
//! |---|---|
//! | `RUST_LOG` | Log filter (default `"info"`). |
//! | `VOXSCULPT_LOG_FORMAT=json` | Emit newline-delimited JSON logs. |
//!
//! # Example
//!
//! ```rust,no_run
//! voxsculpt_runtime::telemetry::init_tracing("voxsculpt");
//! ```

use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

/// Install the global `tracing` subscriber.
///
/// Returns `false` when a subscriber was already installed (the existing
/// one is kept).
pub fn init_tracing(service_name: &str) -> bool {
    let log_level = std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string());
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(log_level));

    let installed = if json_requested() {
        tracing_subscriber::registry()
            .with(env_filter)
            .with(tracing_subscriber::fmt::layer().json())
            .try_init()
            .is_ok()
    } else {
        tracing_subscriber::registry()
            .with(env_filter)
            .with(tracing_subscriber::fmt::layer().compact())
            .try_init()
            .is_ok()
    };

    if installed {
        tracing::debug!(service = service_name, "tracing initialised");
    }
    installed
}

fn json_requested() -> bool {
    std::env::var("VOXSCULPT_LOG_FORMAT").as_deref() == Ok("json")
}
