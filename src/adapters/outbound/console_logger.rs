use crate::domains::logger::DomainLogger;
use chrono::Local;
use std::sync::Arc;

/// Plain stdout/stderr logger with a local time stamp and a source tag.
struct ConsoleLogger {
    tag: String,
}

impl ConsoleLogger {
    fn line(&self, level: &str, msg: &str) -> String {
        format!("{} {:<5} [{}] {}", Local::now().format("%H:%M:%S"), level, self.tag, msg)
    }
}

impl DomainLogger for ConsoleLogger {
    fn info(&self, msg: &str) { println!("{}", self.line("INFO", msg)); }
    fn warn(&self, msg: &str) { println!("{}", self.line("WARN", msg)); }
    fn error(&self, msg: &str) { eprintln!("{}", self.line("ERROR", msg)); }
}

/// Console-backed logger, used when no log file is configured.
pub fn init_console_logger(tag: &str) -> Arc<dyn DomainLogger> {
    Arc::new(ConsoleLogger { tag: tag.to_string() })
}
