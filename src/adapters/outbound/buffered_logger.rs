use crate::domains::logger::{DomainLogger, DynLogger};
use std::sync::Arc;
use tokio::sync::mpsc;

#[derive(Clone, Copy)]
enum Level {
    Info,
    Warn,
    Error,
}

/// Hands lines to a background task so timer callbacks never block on I/O.
/// Lines are dropped when the buffer is full.
struct BufferedLogger {
    lines: mpsc::Sender<(Level, String)>,
}

impl BufferedLogger {
    fn enqueue(&self, level: Level, msg: &str) {
        let _ = self.lines.try_send((level, msg.to_string()));
    }
}

impl DomainLogger for BufferedLogger {
    fn info(&self, msg: &str) {
        self.enqueue(Level::Info, msg);
    }

    fn warn(&self, msg: &str) {
        self.enqueue(Level::Warn, msg);
    }

    fn error(&self, msg: &str) {
        self.enqueue(Level::Error, msg);
    }
}

/// Wrap `target` behind a channel of `capacity` lines. Must be called inside
/// a tokio runtime.
pub fn init_buffered_logger(target: DynLogger, capacity: usize) -> DynLogger {
    let (tx, mut rx) = mpsc::channel::<(Level, String)>(capacity.max(1));

    tokio::spawn(async move {
        while let Some((level, msg)) = rx.recv().await {
            match level {
                Level::Info => target.info(&msg),
                Level::Warn => target.warn(&msg),
                Level::Error => target.error(&msg),
            }
        }
    });

    Arc::new(BufferedLogger { lines: tx })
}
