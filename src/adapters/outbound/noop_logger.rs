use crate::domains::logger::{DashboardLogger, DynLogger};
use std::sync::Arc;

struct Silent;

impl DashboardLogger for Silent {
    fn info(&self, _msg: &str) {}
    fn warn(&self, _msg: &str) {}
    fn error(&self, _msg: &str) {}
}

/// Swallows everything; the default logger in tests.
pub fn init_noop_logger() -> DynLogger {
    Arc::new(Silent)
}
