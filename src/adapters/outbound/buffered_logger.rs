use crate::domains::logger::{DashboardLogger, DynLogger};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use tokio::sync::mpsc;

#[derive(Debug, Clone, Copy)]
enum Level {
    Info,
    Warn,
    Error,
}

/// Hands messages to a background task so poll cycles never wait on log I/O.
/// When the queue is full the message is dropped and counted.
pub struct BufferedLogger {
    sender: mpsc::Sender<(Level, String)>,
    dropped: AtomicU64,
}

impl BufferedLogger {
    /// Must be called inside a tokio runtime.
    pub fn spawn(sink: DynLogger, capacity: usize) -> Arc<Self> {
        let (sender, mut rx) = mpsc::channel::<(Level, String)>(capacity.max(1));
        tokio::spawn(async move {
            while let Some((level, msg)) = rx.recv().await {
                match level {
                    Level::Info => sink.info(&msg),
                    Level::Warn => sink.warn(&msg),
                    Level::Error => sink.error(&msg),
                }
            }
        });
        Arc::new(Self {
            sender,
            dropped: AtomicU64::new(0),
        })
    }

    pub fn dropped(&self) -> u64 {
        self.dropped.load(Ordering::Relaxed)
    }

    fn push(&self, level: Level, msg: &str) {
        if self.sender.try_send((level, msg.to_string())).is_err() {
            self.dropped.fetch_add(1, Ordering::Relaxed);
        }
    }
}

impl DashboardLogger for BufferedLogger {
    fn info(&self, msg: &str) {
        self.push(Level::Info, msg);
    }

    fn warn(&self, msg: &str) {
        self.push(Level::Warn, msg);
    }

    fn error(&self, msg: &str) {
        self.push(Level::Error, msg);
    }
}

pub fn init_buffered_logger(sink: DynLogger, capacity: usize) -> DynLogger {
    BufferedLogger::spawn(sink, capacity)
}
