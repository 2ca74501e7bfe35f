use crate::domains::logger::{DomainLogger, DynLogger};
use std::sync::Arc;

/// Fans every line out to all wrapped loggers, in order.
pub struct MultiLogger {
    targets: Vec<DynLogger>,
}

impl MultiLogger {
    pub fn new(targets: Vec<DynLogger>) -> Self {
        Self { targets }
    }
}

impl DomainLogger for MultiLogger {
    fn info(&self, msg: &str) {
        self.targets.iter().for_each(|t| t.info(msg));
    }

    fn warn(&self, msg: &str) {
        self.targets.iter().for_each(|t| t.warn(msg));
    }

    fn error(&self, msg: &str) {
        self.targets.iter().for_each(|t| t.error(msg));
    }
}

/// Logger for the dashboard binary: console only, or file plus console when a
/// log file is configured. Falls back to console if the file appender cannot
/// be installed.
pub fn init_dashboard_logger(file: Option<&str>) -> DynLogger {
    let console = super::init_console_logger("dashboard");
    let Some(path) = file else {
        return console;
    };
    match super::file_logger::init_file_logger(path) {
        Ok(file_logger) => Arc::new(MultiLogger::new(vec![file_logger, console])),
        Err(e) => {
            console.warn(&e);
            console
        }
    }
}
