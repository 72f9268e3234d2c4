//! Error types for allocation-engine parsing and configuration.

use thiserror::Error;

/// Errors raised at the boundary where untyped input becomes engine values.
///
/// Every slot operation over already-typed values is total; only parsing and
/// configuration can fail.
#[derive(Error, Debug)]
pub enum AllocationError {
    /// A slot key did not match `{day}-{hour}-{minute}`.
    #[error("Invalid slot key: {0:?}")]
    InvalidSlotKey(String),

    #[error("Invalid day of week: {0} (expected 0-6)")]
    InvalidDay(u8),

    #[error("Invalid slot time {hour}:{minute:02} (expected hour 0-23, minute 0 or 30)")]
    InvalidSlotTime { hour: u8, minute: u8 },

    #[error("Invalid hour range {first}-{last} (expected first <= last <= 23)")]
    InvalidHourRange { first: u8, last: u8 },

    /// Session or config JSON could not be decoded.
    #[error("JSON parse error: {0}")]
    JsonParse(#[from] serde_json::Error),
}

/// Convenience alias used throughout allocation-engine.
pub type Result<T> = std::result::Result<T, AllocationError>;
