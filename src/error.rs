//! Centralized error types for the logging pipeline
//!
//! All pipeline errors are represented by the `LoggerError` enum.
//! Use `Result<T>` as shorthand for `std::result::Result<T, LoggerError>`.

use std::fmt;
use std::path::PathBuf;

/// All logging pipeline errors
#[derive(Debug)]
pub enum LoggerError {
    // === Lifecycle ===
    /// `start` was called while the pipeline is already running
    AlreadyRunning,
    /// `stop` or `add_log` was called while the pipeline is stopped
    NotRunning,

    // === Submission ===
    /// A log request failed validation before reaching the queue
    AddLog { reason: String },
    /// A log entry could not be serialized to JSON
    Serialization { source: serde_json::Error },

    // === IO ===
    /// File system operation failed
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    // === Writer ===
    /// The writer task terminated while it was still needed
    WriterClosed,
}

impl std::error::Error for LoggerError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Serialization { source } => Some(source),
            Self::Io { source, .. } => Some(source),
            _ => None,
        }
    }
}

impl fmt::Display for LoggerError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::AlreadyRunning => write!(f, "logging pipeline is already running"),
            Self::NotRunning => write!(f, "logging pipeline is not running"),
            Self::AddLog { reason } => write!(f, "invalid log request: {}", reason),
            Self::Serialization { source } => {
                write!(f, "log entry is not serializable: {}", source)
            }
            Self::Io { path, .. } => write!(f, "IO error: {}", path.display()),
            Self::WriterClosed => write!(f, "log writer task is gone"),
        }
    }
}

/// Alias for Result with LoggerError
pub type Result<T> = std::result::Result<T, LoggerError>;
