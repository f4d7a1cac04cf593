//! Test utilities for record parser testing
//!
//! Shared fixtures and helpers used across the record parser test modules.

use std::io::{self, Read, Write};
use tempfile::NamedTempFile;

use super::{ParseStats, handle_line};
use crate::app::models::AccountSet;

mod parser_tests;

pub const INFO_LINE: &str = "INFO|ACC1|ES|Breakout";
pub const DAILY_LINE: &str = "DAILY|01/06/2024|100|50|3|5|1100|1000";

/// Feed lines through the classifier into a fresh working set
pub fn apply_lines(lines: &[&str]) -> (AccountSet, ParseStats) {
    let mut set = AccountSet::new();
    let mut stats = ParseStats::new();
    for line in lines {
        handle_line(&mut set, line, &mut stats);
    }
    (set, stats)
}

/// Helper to create a temporary file with given content
pub fn create_temp_file(content: &[u8]) -> NamedTempFile {
    let mut temp_file = NamedTempFile::new().unwrap();
    temp_file.write_all(content).unwrap();
    temp_file.flush().unwrap();
    temp_file
}

/// Reader that yields `data` and then fails
pub struct FailingReader {
    data: io::Cursor<Vec<u8>>,
}

impl FailingReader {
    pub fn new(data: &str) -> Self {
        Self {
            data: io::Cursor::new(data.as_bytes().to_vec()),
        }
    }
}

impl Read for FailingReader {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        let read = self.data.read(buf)?;
        if read == 0 {
            return Err(io::Error::other("device unplugged"));
        }
        Ok(read)
    }
}
