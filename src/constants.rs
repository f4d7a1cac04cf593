//! Application constants for the strategy fetcher
//!
//! This module contains the wire-format tags, delimiters, validity bounds
//! and default configuration values used throughout the crate.

// =============================================================================
// Line Format
// =============================================================================

/// Separator between the tokens of a single line
pub const FIELD_DELIMITER: char = '|';

/// Separator between the day, month and year parts of a date token
pub const DATE_DELIMITER: char = '/';

/// Record tags written by the trading automation process
pub mod tags {
    /// Identity header: account code, ticker, strategy name
    pub const INFO: &str = "INFO";

    /// End-of-day performance for the current strategy
    pub const DAILY: &str = "DAILY";

    pub const LONG_ENTRY: &str = "LONG_ENTRY";
    pub const LONG_EXIT: &str = "LONG_EXIT";
    pub const SHORT_ENTRY: &str = "SHORT_ENTRY";
    pub const SHORT_EXIT: &str = "SHORT_EXIT";

    /// Reversal from a long to a short position
    pub const LONG_SHORT: &str = "LONG_SHORT";

    /// Reversal from a short to a long position
    pub const SHORT_LONG: &str = "SHORT_LONG";

    /// All trade event tags
    pub const TRADE_TAGS: &[&str] = &[
        LONG_ENTRY,
        LONG_EXIT,
        SHORT_ENTRY,
        SHORT_EXIT,
        LONG_SHORT,
        SHORT_LONG,
    ];
}

/// Token counts (tag included) required by each record type
pub mod token_counts {
    pub const INFO: usize = 4;
    pub const DAILY: usize = 8;
    pub const TRADE: usize = 7;
}

// =============================================================================
// Validity Bounds
// =============================================================================

/// Smallest accepted `YYYYMMDD` value
pub const MIN_DATE: u32 = 20_000_000;

/// Largest accepted `YYYYMMDD` value
pub const MAX_DATE: u32 = 30_000_000;

// =============================================================================
// Configuration Defaults
// =============================================================================

/// Default directory scanned for log files
pub const DEFAULT_SCAN_DIR: &str = "data";

/// Default file suffix selecting the files to parse
pub const DEFAULT_FILE_SUFFIX: &str = ".log";

/// Default hours between two scan cycles
pub const DEFAULT_SCAN_PERIOD_HOURS: u64 = 1;

/// Default delay before the first scan cycle
pub const DEFAULT_STARTUP_DELAY_SECS: u64 = 2;

/// Config file name looked up in the local `config/` directory
pub const LOCAL_CONFIG_FILE: &str = "config/strategy-fetcher.toml";

/// Application directory below the user configuration directory
pub const APP_CONFIG_DIR: &str = "strategy-fetcher";

/// Config file name inside [`APP_CONFIG_DIR`]
pub const CONFIG_FILE_NAME: &str = "config.toml";
