//! Strategy Fetcher Library
//!
//! Ingests the pipe-delimited log files written by a trading automation
//! process and keeps an in-memory account/strategy model up to date.
//!
//! This library provides tools for:
//! - Scanning a directory for log files with a configured suffix
//! - Classifying and assembling `INFO`, `DAILY` and trade records
//! - Publishing each completed scan as an immutable snapshot
//! - Re-scanning on a fixed period from a background task

pub mod config;
pub mod constants;

// Core application modules
pub mod app {
    pub mod models;
    pub mod services {
        pub mod directory_scanner;
        pub mod record_parser;
        pub mod scheduler;
        pub mod snapshot;
    }
}

// CLI modules
pub mod cli {
    pub mod args;
    pub mod commands;
}

// Re-export commonly used types
pub use app::models::{Account, AccountSet, DailyInfo, Strategy, TradeInfo, TradeType};
pub use app::services::directory_scanner::DirectoryScanner;
pub use app::services::scheduler::PeriodicScanner;
pub use app::services::snapshot::{Snapshot, SnapshotStore};
pub use config::Config;

use std::path::PathBuf;

/// Result type alias for the strategy fetcher
pub type Result<T> = std::result::Result<T, Error>;

/// Error types for scanning, parsing and configuration
#[derive(thiserror::Error, Debug)]
pub enum Error {
    /// I/O operation failed
    #[error("I/O error: {message} ({source})")]
    Io {
        message: String,
        #[source]
        source: std::io::Error,
    },

    /// The scan directory could not be listed
    #[error("Cannot list directory '{}' (cause is: {source})", path.display())]
    DirectoryListing {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A log file could not be opened for reading
    #[error("Cannot open file for reading: '{}' (cause is: {source})", path.display())]
    FileOpen {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A numeric field could not be converted
    #[error("Cannot convert {field}: '{value}' ({reason})")]
    FieldConversion {
        field: &'static str,
        value: String,
        reason: String,
    },

    /// A date token was rejected
    #[error("Bad value for day: '{value}' ({reason})")]
    InvalidDate { value: String, reason: String },

    /// A record carried fewer tokens than its tag requires
    #[error("Malformed {tag} record: expected {expected} tokens, found {found}")]
    MalformedRecord {
        tag: String,
        expected: usize,
        found: usize,
    },

    /// A record arrived before any INFO record established a context
    #[error("No account/strategy context for {tag} record")]
    MissingContext { tag: String },

    /// Configuration error
    #[error("Configuration error: {message}")]
    Configuration { message: String },

    /// Configuration file failed to deserialize
    #[error("Cannot parse config file '{}': {source}", path.display())]
    ConfigParse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}

impl Error {
    /// Create an I/O error with context
    pub fn io(message: impl Into<String>, source: std::io::Error) -> Self {
        Self::Io {
            message: message.into(),
            source,
        }
    }

    /// Create a directory listing error
    pub fn directory_listing(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::DirectoryListing {
            path: path.into(),
            source,
        }
    }

    /// Create a file open error
    pub fn file_open(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::FileOpen {
            path: path.into(),
            source,
        }
    }

    /// Create a field conversion error
    pub fn field_conversion(
        field: &'static str,
        value: impl Into<String>,
        reason: impl ToString,
    ) -> Self {
        Self::FieldConversion {
            field,
            value: value.into(),
            reason: reason.to_string(),
        }
    }

    /// Create an invalid date error
    pub fn invalid_date(value: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidDate {
            value: value.into(),
            reason: reason.into(),
        }
    }

    /// Create a malformed record error
    pub fn malformed_record(tag: impl Into<String>, expected: usize, found: usize) -> Self {
        Self::MalformedRecord {
            tag: tag.into(),
            expected,
            found,
        }
    }

    /// Create a missing context error
    pub fn missing_context(tag: impl Into<String>) -> Self {
        Self::MissingContext { tag: tag.into() }
    }

    /// Create a configuration error
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration {
            message: message.into(),
        }
    }

    /// Create a config parse error
    pub fn config_parse(path: impl Into<PathBuf>, source: toml::de::Error) -> Self {
        Self::ConfigParse {
            path: path.into(),
            source,
        }
    }
}

impl From<std::io::Error> for Error {
    fn from(error: std::io::Error) -> Self {
        Self::Io {
            message: "I/O operation failed".to_string(),
            source: error,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages_carry_context() {
        let err = Error::field_conversion("open profit", "abc", "invalid float literal");
        assert_eq!(
            err.to_string(),
            "Cannot convert open profit: 'abc' (invalid float literal)"
        );

        let err = Error::malformed_record("DAILY", 8, 3);
        assert_eq!(
            err.to_string(),
            "Malformed DAILY record: expected 8 tokens, found 3"
        );
    }

    #[test]
    fn test_io_conversion_keeps_source() {
        use std::error::Error as _;

        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "gone");
        let err: Error = io.into();
        assert!(matches!(err, Error::Io { .. }));
        assert!(err.source().is_some());
    }
}
