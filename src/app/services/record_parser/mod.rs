//! Record parser for trading automation log files
//!
//! Each line of a log file is a pipe-delimited record whose first token is
//! its tag. Lines are fed in file order into a scan-scoped [`AccountSet`],
//! whose cursor decides which account and strategy a record attaches to.
//!
//! ## Architecture
//!
//! - [`parser`] - File reading and line iteration
//! - [`classifier`] - Tokenizing a line and dispatching on its tag
//! - [`handlers`] - Per record-type assembly into the working model
//! - [`field_parsers`] - Date and numeric token conversion
//! - [`stats`] - Counters accumulated across a scan cycle
//!
//! ## Usage
//!
//! ```rust
//! use strategy_fetcher::AccountSet;
//! use strategy_fetcher::app::services::record_parser::{handle_line, ParseStats};
//!
//! let mut set = AccountSet::new();
//! let mut stats = ParseStats::new();
//!
//! handle_line(&mut set, "INFO|ACC1|ES|Breakout", &mut stats);
//! handle_line(&mut set, "DAILY|01/06/2024|100|50|3|5|1100|1000", &mut stats);
//!
//! assert_eq!(set.account("ACC1").unwrap().balance, 1000.0);
//! assert_eq!(stats.daily_records, 1);
//! ```
//!
//! [`AccountSet`]: crate::app::models::AccountSet

pub mod classifier;
pub mod field_parsers;
pub mod handlers;
pub mod parser;
pub mod stats;

#[cfg(test)]
pub mod tests;

// Re-export main types for easy access
pub use classifier::{RecordKind, handle_line};
pub use handlers::RecordOutcome;
pub use parser::{parse_file, parse_reader};
pub use stats::ParseStats;
