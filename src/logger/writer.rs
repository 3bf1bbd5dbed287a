//! Log writer module
//!
//! Thread-safe log output to stdout/stderr or append-mode files.

use std::fs::{File, OpenOptions};
use std::io::{self, Write};
use std::path::Path;
use std::sync::Mutex;

/// Log output target
enum LogTarget {
    Stdout,
    Stderr,
    File(Mutex<File>),
    #[cfg(test)]
    Buffer(Mutex<Vec<String>>),
}

impl LogTarget {
    fn from_path(path: Option<&str>, fallback: Self) -> io::Result<Self> {
        match path {
            Some(p) => Ok(Self::File(Mutex::new(open_log_file(p)?))),
            None => Ok(fallback),
        }
    }

    fn write(&self, message: &str) {
        match self {
            Self::Stdout => println!("{message}"),
            Self::Stderr => eprintln!("{message}"),
            Self::File(file) => {
                if let Ok(mut f) = file.lock() {
                    let _ = writeln!(f, "{message}");
                }
            }
            #[cfg(test)]
            Self::Buffer(lines) => {
                if let Ok(mut lines) = lines.lock() {
                    lines.push(message.to_string());
                }
            }
        }
    }
}

/// Access/info and error sinks
pub struct LogWriter {
    access: LogTarget,
    error: LogTarget,
}

impl LogWriter {
    /// Open the configured files, falling back to stdout and stderr
    pub fn new(access_log_file: Option<&str>, error_log_file: Option<&str>) -> io::Result<Self> {
        Ok(Self {
            access: LogTarget::from_path(access_log_file, LogTarget::Stdout)?,
            error: LogTarget::from_path(error_log_file, LogTarget::Stderr)?,
        })
    }

    pub fn write_access(&self, message: &str) {
        self.access.write(message);
    }

    pub fn write_error(&self, message: &str) {
        self.error.write(message);
    }
}

#[cfg(test)]
impl LogWriter {
    /// In-memory sinks so tests can inspect what was logged
    pub fn buffered() -> Self {
        Self {
            access: LogTarget::Buffer(Mutex::new(Vec::new())),
            error: LogTarget::Buffer(Mutex::new(Vec::new())),
        }
    }

    pub fn error_lines(&self) -> Vec<String> {
        match &self.error {
            LogTarget::Buffer(lines) => lines.lock().map(|l| l.clone()).unwrap_or_default(),
            _ => Vec::new(),
        }
    }

    pub fn access_lines(&self) -> Vec<String> {
        match &self.access {
            LogTarget::Buffer(lines) => lines.lock().map(|l| l.clone()).unwrap_or_default(),
            _ => Vec::new(),
        }
    }
}

/// Open or create a log file for appending
fn open_log_file(path: &str) -> io::Result<File> {
    if let Some(parent) = Path::new(path).parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }

    OpenOptions::new().create(true).append(true).open(path)
}
