use crate::domains::logger::{DashboardLogger, DynLogger};
use log::LevelFilter;
use std::sync::Arc;

/// Fans every message out to each sink, in order.
pub struct MultiLogger {
    sinks: Vec<DynLogger>,
}

impl MultiLogger {
    pub fn new(sinks: Vec<DynLogger>) -> Self {
        Self { sinks }
    }

    pub fn len(&self) -> usize {
        self.sinks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sinks.is_empty()
    }
}

impl DashboardLogger for MultiLogger {
    fn info(&self, msg: &str) {
        self.sinks.iter().for_each(|s| s.info(msg));
    }

    fn warn(&self, msg: &str) {
        self.sinks.iter().for_each(|s| s.warn(msg));
    }

    fn error(&self, msg: &str) {
        self.sinks.iter().for_each(|s| s.error(msg));
    }
}

/// `tracing` always, plus a `fast_log` file when `file` is set and can be opened.
pub fn init_combined_logger(file: Option<&str>, level: LevelFilter) -> DynLogger {
    let tracing_sink = super::init_tracing_logger();
    let Some(path) = file else {
        return tracing_sink;
    };
    match super::init_file_logger(path, level) {
        Ok(file_sink) => Arc::new(MultiLogger::new(vec![tracing_sink, file_sink])),
        Err(e) => {
            tracing_sink.warn(&format!("{}; logging to console only", e));
            tracing_sink
        }
    }
}
