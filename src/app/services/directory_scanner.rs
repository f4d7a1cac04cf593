//! Directory scanner for trading automation log files
//!
//! Lists the configured directory (non-recursively), keeps the regular files
//! whose name ends with the configured suffix and parses each one into a
//! single scan-scoped working set. Files are visited in path order so that
//! INFO context carried from one file to the next is reproducible.

use crate::app::models::{Account, AccountSet};
use crate::app::services::record_parser::{ParseStats, parse_file};
use crate::config::ScanConfig;
use crate::{Error, Result};
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

/// Result of one complete scan cycle
#[derive(Debug, Default)]
pub struct ScanOutcome {
    /// Accounts assembled from every parsed file
    pub accounts: HashMap<String, Account>,
    pub stats: ParseStats,
}

/// Scanner for one directory and file suffix
#[derive(Debug, Clone)]
pub struct DirectoryScanner {
    dir: PathBuf,
    suffix: String,
}

impl DirectoryScanner {
    pub fn new(dir: impl Into<PathBuf>, suffix: impl Into<String>) -> Self {
        Self {
            dir: dir.into(),
            suffix: suffix.into(),
        }
    }

    pub fn from_config(config: &ScanConfig) -> Self {
        Self::new(&config.dir, &config.file_suffix)
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn suffix(&self) -> &str {
        &self.suffix
    }

    /// List the files selected for parsing
    ///
    /// Fails only when the directory itself cannot be listed; unreadable
    /// entries are logged and skipped.
    pub fn discover_files(&self) -> Result<Vec<PathBuf>> {
        let entries = fs::read_dir(&self.dir).map_err(|e| Error::directory_listing(&self.dir, e))?;

        let mut files = Vec::new();
        for entry in entries {
            let entry = match entry {
                Ok(entry) => entry,
                Err(e) => {
                    warn!("Skipping unreadable entry in {}: {}", self.dir.display(), e);
                    continue;
                }
            };

            let path = entry.path();
            if path.is_file() && self.matches_suffix(&path) {
                files.push(path);
            }
        }

        files.sort();
        debug!(
            "Found {} '{}' files in {}",
            files.len(),
            self.suffix,
            self.dir.display()
        );
        Ok(files)
    }

    /// Run one full scan into a fresh working set
    ///
    /// The cursor of the working set is shared by all files of the scan, so
    /// a file without an INFO header continues the previous file's context.
    pub fn scan(&self) -> Result<ScanOutcome> {
        info!("Fetching files from: {}", self.dir.display());

        let files = self.discover_files()?;
        let mut set = AccountSet::new();
        let mut stats = ParseStats::new();

        for path in &files {
            match parse_file(path, &mut set, &mut stats) {
                Ok(()) => stats.files_parsed += 1,
                Err(e) => {
                    warn!("{}", e);
                    stats.files_skipped += 1;
                }
            }
        }

        info!("Scan of {} complete: {}", self.dir.display(), stats);

        Ok(ScanOutcome {
            accounts: set.into_accounts(),
            stats,
        })
    }

    fn matches_suffix(&self, path: &Path) -> bool {
        path.file_name()
            .is_some_and(|name| name.to_string_lossy().ends_with(&self.suffix))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    /// Helper to create a scan directory holding the given files
    fn create_scan_dir(files: &[(&str, &str)]) -> TempDir {
        let temp_dir = TempDir::new().unwrap();
        for (name, content) in files {
            fs::write(temp_dir.path().join(name), content).unwrap();
        }
        temp_dir
    }

    #[test]
    fn test_discover_filters_by_suffix_and_skips_directories() {
        let temp_dir = create_scan_dir(&[
            ("a.log", "INFO|A|T|S"),
            ("b.txt", "INFO|B|T|S"),
            ("c.log.bak", "INFO|C|T|S"),
        ]);
        fs::create_dir(temp_dir.path().join("nested.log")).unwrap();
        fs::write(temp_dir.path().join("nested.log").join("d.log"), "INFO|D|T|S").unwrap();

        let scanner = DirectoryScanner::new(temp_dir.path(), ".log");
        let files = scanner.discover_files().unwrap();

        assert_eq!(files, vec![temp_dir.path().join("a.log")]);
    }

    #[test]
    fn test_discover_returns_files_in_path_order() {
        let temp_dir = create_scan_dir(&[("c.log", ""), ("a.log", ""), ("b.log", "")]);

        let files = DirectoryScanner::new(temp_dir.path(), ".log")
            .discover_files()
            .unwrap();

        let names: Vec<_> = files
            .iter()
            .map(|p| p.file_name().unwrap().to_string_lossy().into_owned())
            .collect();
        assert_eq!(names, vec!["a.log", "b.log", "c.log"]);
    }

    #[test]
    fn test_scan_missing_directory_fails() {
        let scanner = DirectoryScanner::new("/nonexistent/strategy-fetcher", ".log");

        let result = scanner.scan();
        assert!(matches!(result, Err(Error::DirectoryListing { .. })));
    }

    #[test]
    fn test_scan_builds_accounts_from_all_files() {
        let temp_dir = create_scan_dir(&[
            ("one.log", "INFO|ACC1|ES|Breakout\nDAILY|01/06/2024|1|2|3|4|5|6\n"),
            ("two.log", "INFO|ACC2|NQ|Trend\nLONG_ENTRY|01/06/2024|930|1|10|1|10\n"),
            ("ignored.csv", "INFO|ACC3|CL|Other\n"),
        ]);

        let outcome = DirectoryScanner::new(temp_dir.path(), ".log")
            .scan()
            .unwrap();

        assert_eq!(outcome.accounts.len(), 2);
        assert_eq!(outcome.accounts["ACC1"].daily_count(), 1);
        assert_eq!(outcome.accounts["ACC2"].trade_count(), 1);
        assert_eq!(outcome.stats.files_parsed, 2);
        assert_eq!(outcome.stats.files_skipped, 0);
    }

    #[test]
    fn test_scan_empty_directory_yields_empty_model() {
        let temp_dir = TempDir::new().unwrap();

        let outcome = DirectoryScanner::new(temp_dir.path(), ".log")
            .scan()
            .unwrap();

        assert!(outcome.accounts.is_empty());
        assert_eq!(outcome.stats, ParseStats::default());
    }
}
