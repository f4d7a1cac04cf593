//! Tests for log file reading

use super::*;
use crate::Error;
use crate::app::services::record_parser::{parse_file, parse_reader};
use std::io::BufReader;
use std::path::Path;

#[test]
fn test_parse_file_applies_lines_in_order() {
    let content = format!("{}\r\n\r\n{}\r\n   \n", INFO_LINE, DAILY_LINE);
    let temp_file = create_temp_file(content.as_bytes());

    let mut set = AccountSet::new();
    let mut stats = ParseStats::new();
    parse_file(temp_file.path(), &mut set, &mut stats).unwrap();

    let account = set.account("ACC1").unwrap();
    assert_eq!(account.strategies["Breakout"].daily_info.len(), 1);
    assert_eq!(stats.lines_read, 4);
    assert_eq!(stats.blank_lines, 2);
    assert_eq!(stats.records_applied(), 2);
}

#[test]
fn test_parse_file_missing_file_leaves_set_untouched() {
    let mut set = AccountSet::new();
    let mut stats = ParseStats::new();

    let result = parse_file(
        Path::new("/nonexistent/strategy-fetcher/a.log"),
        &mut set,
        &mut stats,
    );

    assert!(matches!(result, Err(Error::FileOpen { .. })));
    assert!(set.accounts().is_empty());
    assert_eq!(stats.lines_read, 0);
}

#[test]
fn test_read_error_keeps_processed_lines() {
    let reader = BufReader::new(FailingReader::new(&format!("{}\n{}\n", INFO_LINE, DAILY_LINE)));

    let mut set = AccountSet::new();
    let mut stats = ParseStats::new();
    parse_reader(reader, Path::new("failing.log"), &mut set, &mut stats);

    assert_eq!(stats.read_errors, 1);
    assert_eq!(stats.daily_records, 1);
    assert_eq!(
        set.account("ACC1").unwrap().strategies["Breakout"]
            .daily_info
            .len(),
        1
    );
}

#[test]
fn test_invalid_utf8_line_does_not_stop_file() {
    let mut content = Vec::new();
    content.extend_from_slice(INFO_LINE.as_bytes());
    content.extend_from_slice(b"\nNOTE|\xff\xfe\n");
    content.extend_from_slice(DAILY_LINE.as_bytes());
    let temp_file = create_temp_file(&content);

    let mut set = AccountSet::new();
    let mut stats = ParseStats::new();
    parse_file(temp_file.path(), &mut set, &mut stats).unwrap();

    assert_eq!(stats.unknown_tags, 1);
    assert_eq!(stats.daily_records, 1);
    assert_eq!(stats.read_errors, 0);
}
