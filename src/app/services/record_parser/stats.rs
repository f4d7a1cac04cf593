//! Scan statistics
//!
//! Counters accumulated while parsing the files of one scan cycle.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Counters for one scan cycle
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParseStats {
    /// Files read to the end or up to a read error
    pub files_parsed: usize,
    /// Files that could not be opened
    pub files_skipped: usize,
    /// Lines read, blank lines included
    pub lines_read: usize,
    pub blank_lines: usize,
    pub info_records: usize,
    pub daily_records: usize,
    pub trade_records: usize,
    /// Records dropped because their date was rejected
    pub records_discarded: usize,
    /// Records dropped for missing tokens or missing INFO context
    pub records_rejected: usize,
    pub unknown_tags: usize,
    /// Individual fields that failed to convert
    pub field_errors: usize,
    /// Files whose reading stopped on an I/O error
    pub read_errors: usize,
}

impl ParseStats {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records committed to the model
    pub fn records_applied(&self) -> usize {
        self.info_records + self.daily_records + self.trade_records
    }

    /// Total number of diagnostics reported during the cycle
    pub fn diagnostics(&self) -> usize {
        self.files_skipped
            + self.records_discarded
            + self.records_rejected
            + self.unknown_tags
            + self.field_errors
            + self.read_errors
    }
}

impl fmt::Display for ParseStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} files ({} skipped), {} lines, {} records applied, {} diagnostics",
            self.files_parsed,
            self.files_skipped,
            self.lines_read,
            self.records_applied(),
            self.diagnostics()
        )
    }
}
