//! Logging setup utilities for the chat relay.

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Build the default `EnvFilter` directives for the given crate targets.
///
/// Hyphens are replaced with underscores so that package and binary names
/// can be passed as-is (`cinechat-server` -> `cinechat_server`).
pub fn default_directives(targets: &[&str], default_log_level: &str) -> String {
    let mut directives: Vec<String> = targets
        .iter()
        .map(|target| format!("{}={}", target.replace('-', "_"), default_log_level))
        .collect();
    let shared_target = env!("CARGO_PKG_NAME").replace('-', "_");
    directives.push(format!("{}={}", shared_target, default_log_level));
    directives.push(format!("tower_http={}", default_log_level));
    directives.dedup();
    directives.join(",")
}

/// Initialize the tracing subscriber with the specified default log level.
///
/// The log level can be overridden using the `RUST_LOG` environment variable.
///
/// # Arguments
///
/// * `targets` - Crate / binary names to enable (e.g. `["cinechat-server"]`)
/// * `default_log_level` - The default log level (e.g., "debug", "info", "warn", "error")
///
/// # Examples
///
/// ```no_run
/// use cinechat_shared::logger::setup_logger;
///
/// setup_logger(&["cinechat-server"], "debug");
/// ```
pub fn setup_logger(targets: &[&str], default_log_level: &str) {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default_directives(targets, default_log_level).into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();
    tracing::debug!("Logger initialized (default level: {})", default_log_level);
}
