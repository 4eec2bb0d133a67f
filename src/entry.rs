//! Log entry types and codec
//!
//! Core types for representing log records: the closed `Source` and `Level`
//! tags, the `Speed` measurement, and `LogEntry` with its JSON encoding.
//! One encoded entry becomes one line in the output file.

use crate::constants::RECORD_TIMESTAMP_FORMAT;
use crate::error::{LoggerError, Result};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;
use std::str::FromStr;

/// Subsystem a log record originates from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Source {
    Database,
    Website,
    Account,
    Moderation,
    Promote,
    Support,
    Voice,
    Core,
}

impl Source {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Database => "database",
            Self::Website => "website",
            Self::Account => "account",
            Self::Moderation => "moderation",
            Self::Promote => "promote",
            Self::Support => "support",
            Self::Voice => "voice",
            Self::Core => "core",
        }
    }
}

impl fmt::Display for Source {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Source {
    type Err = LoggerError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "database" => Ok(Self::Database),
            "website" => Ok(Self::Website),
            "account" => Ok(Self::Account),
            "moderation" => Ok(Self::Moderation),
            "promote" => Ok(Self::Promote),
            "support" => Ok(Self::Support),
            "voice" => Ok(Self::Voice),
            "core" => Ok(Self::Core),
            _ => Err(LoggerError::AddLog {
                reason: format!("unknown source tag: {:?}", s),
            }),
        }
    }
}

/// Severity of a log record
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Level {
    /// General information: actions taken, progress steps, important events
    Info,
    /// Potentially problematic situations that do not threaten the application
    Warning,
    /// Errors that can lead to significant malfunctions
    Critical,
    /// Successful events or actions
    Success,
}

impl Level {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Info => "info",
            Self::Warning => "warning",
            Self::Critical => "critical",
            Self::Success => "success",
        }
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Level {
    type Err = LoggerError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "info" => Ok(Self::Info),
            "warning" => Ok(Self::Warning),
            "critical" => Ok(Self::Critical),
            "success" => Ok(Self::Success),
            _ => Err(LoggerError::AddLog {
                reason: format!("unknown level tag: {:?}", s),
            }),
        }
    }
}

/// Execution-speed measurement attached to a record
///
/// Call sites report either a raw measurement or a within-budget flag,
/// depending on what they have available.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Speed {
    Flag(bool),
    Value(f64),
}

impl From<bool> for Speed {
    fn from(flag: bool) -> Self {
        Self::Flag(flag)
    }
}

impl From<f64> for Speed {
    fn from(value: f64) -> Self {
        Self::Value(value)
    }
}

/// One structured log record
///
/// Built by `LogEntry::new`, which stamps the current instant; never
/// mutated afterwards.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LogEntry {
    pub timestamp: String,
    pub source: Source,
    pub level: Level,
    pub note: String,
    pub error: Option<String>,
    pub speed: Option<Speed>,
    pub other: Option<Map<String, Value>>,
}

impl LogEntry {
    /// Current timestamp in record form
    #[inline]
    fn now() -> String {
        chrono::Local::now().format(RECORD_TIMESTAMP_FORMAT).to_string()
    }

    /// Build a record stamped with the current instant
    ///
    /// A blank `note` is rejected: every record must say what happened.
    pub fn new(
        source: Source,
        level: Level,
        note: impl Into<String>,
        error: Option<String>,
        speed: Option<Speed>,
        other: Option<Map<String, Value>>,
    ) -> Result<Self> {
        let note = note.into();
        if note.trim().is_empty() {
            return Err(LoggerError::AddLog {
                reason: "note must not be blank".to_string(),
            });
        }

        Ok(Self {
            timestamp: Self::now(),
            source,
            level,
            note,
            error,
            speed,
            other,
        })
    }

    /// Serialize to one self-contained JSON document
    pub fn encode(&self) -> Result<String> {
        serde_json::to_string(self).map_err(|e| LoggerError::Serialization { source: e })
    }
}
