use crate::domains::logger::{DashboardLogger, DynLogger};
use log::LevelFilter;
use std::sync::Arc;

const TARGET: &str = "vanet_dashboard";

/// Forwards to the `log` facade, which `fast_log` writes to file.
struct FastLogBridge;

impl DashboardLogger for FastLogBridge {
    fn info(&self, msg: &str) {
        log::info!(target: TARGET, "{}", msg);
    }

    fn warn(&self, msg: &str) {
        log::warn!(target: TARGET, "{}", msg);
    }

    fn error(&self, msg: &str) {
        log::error!(target: TARGET, "{}", msg);
    }
}

/// Install `fast_log` as the global `log` backend, appending to `path`.
/// Only the first call in a process can succeed, and only if nothing else
/// (such as `tracing_subscriber`'s `LogTracer`) has claimed `log` already.
/// Console output is left to the `tracing` side.
pub fn init_file_logger(path: &str, level: LevelFilter) -> Result<DynLogger, String> {
    fast_log::init(
        fast_log::config::Config::new().file(path).level(level),
    )
    .map_err(|e| format!("Failed to initialize fast_log at {}: {}", path, e))?;
    Ok(Arc::new(FastLogBridge))
}
