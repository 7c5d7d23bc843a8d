//! Tracing setup: subscriber initialisation and span names.
//!
//! Each pipeline stage runs in a `glassbox.stage` span with a `stage`
//! field, nested under the evaluation's `glassbox.pipeline` span.

pub mod events;

use tracing_subscriber::EnvFilter;

use glassbox_core::config::ObservabilityConfig;

/// Span wrapping one evaluation run. Field: `evaluation_id`.
pub const PIPELINE_SPAN: &str = "glassbox.pipeline";

/// Environment variable that overrides the configured log level.
pub const LOG_ENV: &str = "GLASSBOX_LOG";

/// Install the global subscriber.
///
/// `GLASSBOX_LOG` wins over `config.log_level`. Returns `false` when a
/// global subscriber was already installed, which is left in place.
pub fn init_tracing(config: &ObservabilityConfig) -> bool {
    let filter =
        EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new(&config.log_level));

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_thread_ids(true);

    let installed = if config.json_logs {
        builder.json().try_init()
    } else {
        builder.try_init()
    };
    installed.is_ok()
}
