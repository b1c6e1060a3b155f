//! Centralized error handling for tabscrub.
//!
//! Data problems are never errors here: a date that does not parse, a split
//! without a delimiter or a dedupe scan that finds nothing all come back as an
//! [`OperationReport`](crate::engine::OperationReport) with `recorded == false`.
//! `ScrubError` is reserved for I/O, codec failures and programmer errors.
//!
//! ```no_run
//! use tabscrub::error::{Result, ResultExt as _};
//!
//! fn read_payload(path: &str) -> Result<String> {
//!     let text = std::fs::read_to_string(path).context("Failed to read CSV payload")?;
//!     Ok(text)
//! }
//! ```

use std::fmt;

/// Main error type for tabscrub operations.
#[derive(Debug)]
pub enum ScrubError {
    /// I/O errors (config files)
    Io(std::io::Error),

    /// Delimited-text decoding or encoding failed
    Csv(String),

    /// Persistence blob could not be produced or read
    Serialization(String),

    /// Configuration errors
    Config(String),

    /// A duplicate scan was resolved against a table it was not taken from
    StaleScan { scanned: u64, current: u64 },

    /// Generic error with context
    Other(String),
}

impl fmt::Display for ScrubError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io(e) => write!(f, "I/O error: {e}"),
            Self::Csv(msg) => write!(f, "CSV error: {msg}"),
            Self::Serialization(msg) => write!(f, "Serialization error: {msg}"),
            Self::Config(msg) => write!(f, "Configuration error: {msg}"),
            Self::StaleScan { scanned, current } => write!(
                f,
                "Duplicate scan taken at revision {scanned} cannot be applied to revision {current}"
            ),
            Self::Other(msg) => write!(f, "{msg}"),
        }
    }
}

impl std::error::Error for ScrubError {}

impl From<std::io::Error> for ScrubError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err)
    }
}

impl From<csv::Error> for ScrubError {
    fn from(err: csv::Error) -> Self {
        Self::Csv(err.to_string())
    }
}

impl From<serde_json::Error> for ScrubError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serialization(err.to_string())
    }
}

impl From<anyhow::Error> for ScrubError {
    fn from(err: anyhow::Error) -> Self {
        Self::Other(err.to_string())
    }
}

// Hosts that cross a string-typed boundary (IPC, FFI) want plain messages
impl From<ScrubError> for String {
    fn from(err: ScrubError) -> Self {
        err.to_string()
    }
}

/// Result type alias for tabscrub operations.
pub type Result<T> = std::result::Result<T, ScrubError>;

/// Extension trait to add context to results.
pub trait ResultExt<T> {
    /// Add context to an error.
    fn context(self, msg: impl Into<String>) -> Result<T>;

    /// Add context using a closure (lazy evaluation).
    fn with_context<F>(self, f: F) -> Result<T>
    where
        F: FnOnce() -> String;
}

impl<T, E> ResultExt<T> for std::result::Result<T, E>
where
    E: Into<ScrubError>,
{
    fn context(self, msg: impl Into<String>) -> Result<T> {
        self.map_err(|e| {
            let err: ScrubError = e.into();
            ScrubError::Other(format!("{}: {}", msg.into(), err))
        })
    }

    fn with_context<F>(self, f: F) -> Result<T>
    where
        F: FnOnce() -> String,
    {
        self.map_err(|e| {
            let err: ScrubError = e.into();
            ScrubError::Other(format!("{}: {}", f(), err))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = ScrubError::Csv("unequal lengths".to_owned());
        assert_eq!(err.to_string(), "CSV error: unequal lengths");
    }

    #[test]
    fn test_stale_scan_display() {
        let err = ScrubError::StaleScan {
            scanned: 2,
            current: 3,
        };
        assert_eq!(
            err.to_string(),
            "Duplicate scan taken at revision 2 cannot be applied to revision 3"
        );
    }

    #[test]
    fn test_error_conversion_to_string() {
        let err = ScrubError::Config("bad page size".to_owned());
        let s: String = err.into();
        assert_eq!(s, "Configuration error: bad page size");
    }

    #[test]
    fn test_result_context() {
        let result: std::result::Result<(), std::io::Error> = Err(std::io::Error::new(
            std::io::ErrorKind::NotFound,
            "config.json",
        ));

        let result: Result<()> = result.context("Failed to read config");
        let message = result.map_err(|e| e.to_string()).err().unwrap_or_default();
        assert!(message.contains("Failed to read config"));
        assert!(message.contains("config.json"));
    }
}
