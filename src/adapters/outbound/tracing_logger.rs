use crate::domains::logger::{DashboardLogger, DynLogger};
use log::LevelFilter;
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

/// Sends dashboard diagnostics into the process-wide `tracing` subscriber.
struct TracingBridge;

impl DashboardLogger for TracingBridge {
    fn info(&self, msg: &str) {
        tracing::info!(target: "dashboard", "{}", msg);
    }

    fn warn(&self, msg: &str) {
        tracing::warn!(target: "dashboard", "{}", msg);
    }

    fn error(&self, msg: &str) {
        tracing::error!(target: "dashboard", "{}", msg);
    }
}

pub fn init_tracing_logger() -> DynLogger {
    Arc::new(TracingBridge)
}

/// Install the process-wide `tracing` subscriber; `RUST_LOG` overrides
/// `default_level`. The `log` facade stays unclaimed so that `fast_log` can
/// still be installed afterwards.
pub fn init_tracing_subscriber(default_level: LevelFilter) -> Result<(), String> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_level.to_string().to_lowercase()));
    let subscriber = tracing_subscriber::fmt().with_env_filter(filter).finish();
    tracing::subscriber::set_global_default(subscriber)
        .map_err(|e| format!("Failed to install tracing subscriber: {}", e))
}
