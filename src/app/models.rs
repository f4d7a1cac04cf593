//! Data models for the strategy fetcher
//!
//! This module contains the hierarchical model assembled during a scan cycle:
//! accounts own strategies, strategies own their daily performance and trades.

use crate::constants::tags;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};
use std::fmt;

// =============================================================================
// Trade Event Types
// =============================================================================

/// Closed set of trade event tags emitted by the trading automation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TradeType {
    #[serde(rename = "LONG_ENTRY")]
    LongEntry,
    #[serde(rename = "LONG_EXIT")]
    LongExit,
    #[serde(rename = "SHORT_ENTRY")]
    ShortEntry,
    #[serde(rename = "SHORT_EXIT")]
    ShortExit,
    #[serde(rename = "LONG_SHORT")]
    LongToShort,
    #[serde(rename = "SHORT_LONG")]
    ShortToLong,
}

impl TradeType {
    /// Map a wire tag to its trade type
    pub fn from_tag(tag: &str) -> Option<Self> {
        match tag {
            tags::LONG_ENTRY => Some(Self::LongEntry),
            tags::LONG_EXIT => Some(Self::LongExit),
            tags::SHORT_ENTRY => Some(Self::ShortEntry),
            tags::SHORT_EXIT => Some(Self::ShortExit),
            tags::LONG_SHORT => Some(Self::LongToShort),
            tags::SHORT_LONG => Some(Self::ShortToLong),
            _ => None,
        }
    }

    /// Wire tag of this trade type
    pub fn as_tag(&self) -> &'static str {
        match self {
            Self::LongEntry => tags::LONG_ENTRY,
            Self::LongExit => tags::LONG_EXIT,
            Self::ShortEntry => tags::SHORT_ENTRY,
            Self::ShortExit => tags::SHORT_EXIT,
            Self::LongToShort => tags::LONG_SHORT,
            Self::ShortToLong => tags::SHORT_LONG,
        }
    }
}

impl fmt::Display for TradeType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_tag())
    }
}

// =============================================================================
// Per-Strategy Records
// =============================================================================

/// One calendar day of performance for a strategy
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DailyInfo {
    /// Day encoded as `YYYYMMDD`
    pub day: u32,
    pub open_profit: f64,
    pub close_profit: f64,
    pub true_range: f64,
    pub num_trades: i32,
    pub equity: f64,
    pub balance: f64,
}

impl DailyInfo {
    pub fn new(day: u32) -> Self {
        Self {
            day,
            ..Default::default()
        }
    }
}

/// One trade event, kept in arrival order
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TradeInfo {
    pub trade_type: TradeType,
    /// Day encoded as `YYYYMMDD`
    pub day: u32,
    /// Time of day as written upstream (HHMM or HHMMSS)
    pub time: i32,
    pub position: i32,
    pub price: f64,
    pub position_at_broker: i32,
    pub price_at_broker: f64,
}

impl TradeInfo {
    pub fn new(trade_type: TradeType, day: u32) -> Self {
        Self {
            trade_type,
            day,
            time: 0,
            position: 0,
            price: 0.0,
            position_at_broker: 0,
            price_at_broker: 0.0,
        }
    }
}

// =============================================================================
// Strategy and Account
// =============================================================================

/// A strategy running on one account
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Strategy {
    /// Name, unique within its account
    pub name: String,
    pub ticker: String,
    /// Daily performance keyed by `YYYYMMDD`
    pub daily_info: BTreeMap<u32, DailyInfo>,
    /// Trades in arrival order
    pub trades: Vec<TradeInfo>,
}

impl Strategy {
    pub fn new(name: impl Into<String>, ticker: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ticker: ticker.into(),
            daily_info: BTreeMap::new(),
            trades: Vec::new(),
        }
    }

    /// Get the daily entry for `day`, creating an empty one if absent
    pub fn daily_entry(&mut self, day: u32) -> &mut DailyInfo {
        self.daily_info
            .entry(day)
            .or_insert_with(|| DailyInfo::new(day))
    }
}

/// A trading account and the strategies attached to it
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Account {
    /// Unique account code
    pub code: String,
    /// Latest non-zero balance observed
    pub balance: f64,
    /// Latest non-zero equity observed
    pub equity: f64,
    pub strategies: HashMap<String, Strategy>,
}

impl Account {
    pub fn new(code: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            balance: 0.0,
            equity: 0.0,
            strategies: HashMap::new(),
        }
    }

    /// Number of daily entries across all strategies
    pub fn daily_count(&self) -> usize {
        self.strategies.values().map(|s| s.daily_info.len()).sum()
    }

    /// Number of trades across all strategies
    pub fn trade_count(&self) -> usize {
        self.strategies.values().map(|s| s.trades.len()).sum()
    }
}

// =============================================================================
// Scan-Scoped Working Set
// =============================================================================

/// Identity of the account/strategy that DAILY and trade records attach to
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Cursor {
    pub account: String,
    pub strategy: String,
}

/// Working container filled during one scan cycle
///
/// The cursor is cycle-scoped: it survives file boundaries, so a file without
/// its own INFO header attaches to the context left by the previous file.
#[derive(Debug, Default)]
pub struct AccountSet {
    accounts: HashMap<String, Account>,
    cursor: Option<Cursor>,
}

impl AccountSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Look up or create the account and strategy, then move the cursor to them
    pub fn select(&mut self, account_code: &str, ticker: &str, strategy_name: &str) {
        let account = self
            .accounts
            .entry(account_code.to_string())
            .or_insert_with(|| Account::new(account_code));

        account
            .strategies
            .entry(strategy_name.to_string())
            .or_insert_with(|| Strategy::new(strategy_name, ticker));

        self.cursor = Some(Cursor {
            account: account_code.to_string(),
            strategy: strategy_name.to_string(),
        });
    }

    pub fn cursor(&self) -> Option<&Cursor> {
        self.cursor.as_ref()
    }

    /// Account under the cursor
    pub fn current_account_mut(&mut self) -> Option<&mut Account> {
        let cursor = self.cursor.as_ref()?;
        self.accounts.get_mut(&cursor.account)
    }

    /// Strategy under the cursor
    pub fn current_strategy_mut(&mut self) -> Option<&mut Strategy> {
        let cursor = self.cursor.as_ref()?;
        self.accounts
            .get_mut(&cursor.account)?
            .strategies
            .get_mut(&cursor.strategy)
    }

    pub fn accounts(&self) -> &HashMap<String, Account> {
        &self.accounts
    }

    pub fn account(&self, code: &str) -> Option<&Account> {
        self.accounts.get(code)
    }

    /// Consume the working set, keeping only the account mapping
    pub fn into_accounts(self) -> HashMap<String, Account> {
        self.accounts
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_trade_type_tag_mapping() {
        for tag in tags::TRADE_TAGS {
            let trade_type = TradeType::from_tag(tag).unwrap();
            assert_eq!(trade_type.as_tag(), *tag);
        }
        assert_eq!(TradeType::from_tag("DAILY"), None);
        assert_eq!(TradeType::from_tag("long_entry"), None);
    }

    #[test]
    fn test_trade_type_serializes_as_wire_tag() {
        let json = serde_json::to_string(&TradeType::LongToShort).unwrap();
        assert_eq!(json, "\"LONG_SHORT\"");
    }

    #[test]
    fn test_select_creates_and_moves_cursor() {
        let mut set = AccountSet::new();
        assert!(set.cursor().is_none());
        assert!(set.current_strategy_mut().is_none());

        set.select("ACC1", "ES", "Breakout");
        set.select("ACC1", "NQ", "Reversal");
        set.select("ACC2", "CL", "Trend");

        assert_eq!(set.accounts().len(), 2);
        assert_eq!(set.account("ACC1").unwrap().strategies.len(), 2);
        assert_eq!(
            set.cursor(),
            Some(&Cursor {
                account: "ACC2".to_string(),
                strategy: "Trend".to_string()
            })
        );
    }

    #[test]
    fn test_select_existing_keeps_original_ticker() {
        let mut set = AccountSet::new();
        set.select("ACC1", "ES", "Breakout");
        set.select("ACC2", "CL", "Trend");
        set.select("ACC1", "NQ", "Breakout");

        // Re-selecting an existing pair moves the cursor back to it
        let strategy = set.current_strategy_mut().unwrap();
        assert_eq!(strategy.name, "Breakout");
        assert_eq!(strategy.ticker, "ES");
    }

    #[test]
    fn test_daily_entry_is_create_or_update() {
        let mut strategy = Strategy::new("S", "T");
        strategy.daily_entry(20240601).open_profit = 10.0;
        strategy.daily_entry(20240601).close_profit = 5.0;

        assert_eq!(strategy.daily_info.len(), 1);
        let day = &strategy.daily_info[&20240601];
        assert_eq!(day.day, 20240601);
        assert_eq!(day.open_profit, 10.0);
        assert_eq!(day.close_profit, 5.0);
    }
}
