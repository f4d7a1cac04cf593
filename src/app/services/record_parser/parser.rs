//! Log file reading
//!
//! Opens one file and forwards its non-blank lines, in order, to the
//! line classifier. Lines are decoded lossily so a stray non-UTF-8 byte
//! cannot end a file early.

use super::classifier::handle_line;
use super::stats::ParseStats;
use crate::app::models::AccountSet;
use crate::{Error, Result};
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;
use tracing::{debug, info, warn};

/// Parse one log file into the working set
///
/// Returns an error only when the file cannot be opened, leaving the working
/// set untouched. A read error mid-file stops reading that file; records
/// already applied stay in the model.
pub fn parse_file(path: &Path, set: &mut AccountSet, stats: &mut ParseStats) -> Result<()> {
    info!("Handling: {}", path.display());

    let file = File::open(path).map_err(|e| Error::file_open(path, e))?;
    parse_reader(BufReader::new(file), path, set, stats);

    Ok(())
}

/// Parse lines from any buffered reader; `source` names it in diagnostics
pub fn parse_reader<R: BufRead>(
    reader: R,
    source: &Path,
    set: &mut AccountSet,
    stats: &mut ParseStats,
) {
    let mut line_count = 0usize;

    for chunk in reader.split(b'\n') {
        let bytes = match chunk {
            Ok(bytes) => bytes,
            Err(e) => {
                warn!(
                    "Cannot scan file: {} after line {} (cause is: {})",
                    source.display(),
                    line_count,
                    e
                );
                stats.read_errors += 1;
                break;
            }
        };

        line_count += 1;
        stats.lines_read += 1;

        let decoded = String::from_utf8_lossy(&bytes);
        let line = decoded.strip_suffix('\r').unwrap_or(&decoded[..]);

        if line.trim().is_empty() {
            stats.blank_lines += 1;
            continue;
        }

        handle_line(set, line, stats);
    }

    debug!("Read {} lines from {}", line_count, source.display());
}
