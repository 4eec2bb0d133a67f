//! Application-wide constants
//!
//! Centralized defaults to avoid duplication and ensure consistency.

// =============================================================================
// Queue
// =============================================================================

/// Default bounded queue capacity (pending records)
pub const DEFAULT_MAX_PENDING: usize = 512;

// =============================================================================
// Files
// =============================================================================

/// Default output directory for log files
pub const DEFAULT_LOG_DIR: &str = "logs";

/// Timestamp format embedded in log file names
pub const FILE_TIMESTAMP_FORMAT: &str = "%Y-%m-%d_%H-%M-%S%.3f";

/// Output file extension
pub const FILE_EXTENSION: &str = "json";

/// Timestamp format stamped on each record
pub const RECORD_TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S%.6f";

// =============================================================================
// Timing
// =============================================================================

/// Default active file lifetime before rotation (seconds)
pub const DEFAULT_TIME_ROTATE_SECS: u64 = 3600;

/// Default writer iterations between forced flushes
pub const DEFAULT_MIN_FLUSH: u32 = 16;
