//! Line tokenizing and record-type dispatch

use super::handlers::{self, RecordOutcome};
use super::stats::ParseStats;
use crate::app::models::{AccountSet, TradeType};
use crate::constants::{FIELD_DELIMITER, tags};
use tracing::warn;

/// Record type selected by the leading token of a line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecordKind {
    Info,
    Daily,
    Trade(TradeType),
}

impl RecordKind {
    /// Classify a record tag, `None` for unknown tags
    pub fn from_tag(tag: &str) -> Option<Self> {
        match tag {
            tags::INFO => Some(Self::Info),
            tags::DAILY => Some(Self::Daily),
            other => TradeType::from_tag(other).map(Self::Trade),
        }
    }
}

/// Split a line into its tokens
pub fn tokenize(line: &str) -> Vec<&str> {
    line.split(FIELD_DELIMITER).collect()
}

/// Classify one line and apply it to the working set
///
/// Unknown tags, malformed records and records without context are logged
/// and dropped without touching the model.
pub fn handle_line(set: &mut AccountSet, line: &str, stats: &mut ParseStats) {
    let tokens = tokenize(line);
    let tag = tokens.first().copied().unwrap_or_default();

    let Some(kind) = RecordKind::from_tag(tag) else {
        warn!("Skipping unknown token: {}", tag);
        stats.unknown_tags += 1;
        return;
    };

    let outcome = match kind {
        RecordKind::Info => handlers::handle_info(set, &tokens),
        RecordKind::Daily => handlers::handle_daily(set, &tokens, stats),
        RecordKind::Trade(trade_type) => handlers::handle_trade(set, trade_type, &tokens, stats),
    };

    match outcome {
        Ok(RecordOutcome::Applied) => match kind {
            RecordKind::Info => stats.info_records += 1,
            RecordKind::Daily => stats.daily_records += 1,
            RecordKind::Trade(_) => stats.trade_records += 1,
        },
        Ok(RecordOutcome::Discarded) => stats.records_discarded += 1,
        Err(e) => {
            warn!("Skipping line '{}': {}", line, e);
            stats.records_rejected += 1;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_kind_dispatch() {
        assert_eq!(RecordKind::from_tag("INFO"), Some(RecordKind::Info));
        assert_eq!(RecordKind::from_tag("DAILY"), Some(RecordKind::Daily));
        assert_eq!(
            RecordKind::from_tag("SHORT_LONG"),
            Some(RecordKind::Trade(TradeType::ShortToLong))
        );
        assert_eq!(RecordKind::from_tag("FOO"), None);
        assert_eq!(RecordKind::from_tag(""), None);
    }

    #[test]
    fn test_tokenize_keeps_empty_tokens() {
        assert_eq!(tokenize("INFO|A||S"), vec!["INFO", "A", "", "S"]);
        assert_eq!(tokenize("FOO"), vec!["FOO"]);
    }
}
