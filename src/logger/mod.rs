//! Logger module
//!
//! Provides the service logger:
//! - Server lifecycle logging
//! - Access logging with multiple formats
//! - Level-filtered info, warning and error messages
//! - File-based logging support
//!
//! A `Logger` is a cheap handle. It is created once at startup and handed to
//! whatever needs to log.

mod format;
mod writer;

pub use format::AccessLogEntry;

use crate::config::{Config, LoggingConfig};
use serde::Deserialize;
use std::net::SocketAddr;
use std::sync::Arc;
use writer::LogWriter;

/// Log verbosity, ordered from quietest to loudest
#[derive(Debug, Deserialize, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
}

impl std::fmt::Display for LogLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Self::Error => "error",
            Self::Warn => "warn",
            Self::Info => "info",
            Self::Debug => "debug",
        };
        f.write_str(name)
    }
}

#[derive(Clone)]
pub struct Logger {
    writer: Arc<LogWriter>,
    level: LogLevel,
    access_log: bool,
    access_log_format: Arc<str>,
}

impl Logger {
    /// Build the logger from configuration, opening log files if configured
    pub fn from_config(config: &LoggingConfig) -> std::io::Result<Self> {
        let writer = LogWriter::new(
            config.access_log_file.as_deref(),
            config.error_log_file.as_deref(),
        )?;
        Ok(Self {
            writer: Arc::new(writer),
            level: config.level,
            access_log: config.access_log,
            access_log_format: Arc::from(config.access_log_format.as_str()),
        })
    }

    pub fn enabled(&self, level: LogLevel) -> bool {
        level <= self.level
    }

    pub const fn access_log_enabled(&self) -> bool {
        self.access_log
    }

    pub fn debug(&self, message: &str) {
        if self.enabled(LogLevel::Debug) {
            self.writer.write_access(&format!("[DEBUG] {message}"));
        }
    }

    pub fn info(&self, message: &str) {
        if self.enabled(LogLevel::Info) {
            self.writer.write_access(message);
        }
    }

    pub fn warn(&self, message: &str) {
        if self.enabled(LogLevel::Warn) {
            self.writer.write_error(&format!("[WARN] {message}"));
        }
    }

    pub fn error(&self, message: &str) {
        self.writer.write_error(&format!("[ERROR] {message}"));
    }

    /// Log a formatted access log entry
    pub fn access(&self, entry: &AccessLogEntry) {
        if self.access_log {
            self.writer.write_access(&entry.format(&self.access_log_format));
        }
    }

    pub fn log_server_start(&self, addr: &SocketAddr, config: &Config) {
        self.info("======================================");
        self.info("Number classifier started successfully");
        self.info(&format!("Listening on: http://{addr}"));
        self.info(&format!(
            "Classify endpoint: http://{addr}{}?number=<integer>",
            config.routes.classify_path
        ));
        self.info(&format!("Log level: {}", config.logging.level));
        if let Some(workers) = config.server.workers {
            self.info(&format!("Worker threads: {workers}"));
        }
        if let Some(ref path) = config.logging.access_log_file {
            self.info(&format!("Access log: {path}"));
        }
        if let Some(ref path) = config.logging.error_log_file {
            self.info(&format!("Error log: {path}"));
        }
        self.info(&format!(
            "Fun facts: {} (timeout {}s)",
            config.facts.base_url, config.facts.timeout
        ));
        self.info("======================================\n");
    }

    pub fn log_connection_accepted(&self, peer_addr: &SocketAddr) {
        self.debug(&format!("[Connection] Accepted from: {peer_addr}"));
    }

    pub fn log_connection_error(&self, err: &impl std::fmt::Debug) {
        self.error(&format!("Failed to serve connection: {err:?}"));
    }
}

#[cfg(test)]
impl Logger {
    /// Logger writing into memory, at `debug` so every message is kept
    pub fn buffered() -> Self {
        Self {
            writer: Arc::new(LogWriter::buffered()),
            level: LogLevel::Debug,
            access_log: true,
            access_log_format: Arc::from("common"),
        }
    }

    pub fn error_lines(&self) -> Vec<String> {
        self.writer.error_lines()
    }

    pub fn access_lines(&self) -> Vec<String> {
        self.writer.access_lines()
    }
}
