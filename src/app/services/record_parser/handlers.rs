//! Record handlers
//!
//! One handler per record type. INFO is the only handler that moves the
//! working set's cursor; DAILY and trade records attach to whatever account
//! and strategy the cursor currently points at.

use super::field_parsers::{assign, assign_non_zero, parse_date, parse_f64, parse_i32};
use super::stats::ParseStats;
use crate::app::models::{AccountSet, TradeInfo, TradeType};
use crate::constants::{tags, token_counts};
use crate::{Error, Result};
use tracing::{debug, warn};

/// What happened to a well-formed record
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecordOutcome {
    /// The record was committed to the model
    Applied,
    /// The record's date was rejected; nothing was written
    Discarded,
}

/// Handle `INFO|account|ticker|strategy`
pub fn handle_info(set: &mut AccountSet, tokens: &[&str]) -> Result<RecordOutcome> {
    require_tokens(tags::INFO, tokens, token_counts::INFO)?;

    let (account, ticker, strategy) = (tokens[1], tokens[2], tokens[3]);
    set.select(account, ticker, strategy);
    debug!("Context set to {}/{} ({})", account, strategy, ticker);

    Ok(RecordOutcome::Applied)
}

/// Handle `DAILY|day|open_equity|net_profit|true_range|num_trades|equity|balance`
///
/// Updates the current account's balance and equity (zeros ignored) and
/// creates or updates the current strategy's entry for `day`.
pub fn handle_daily(
    set: &mut AccountSet,
    tokens: &[&str],
    stats: &mut ParseStats,
) -> Result<RecordOutcome> {
    require_tokens(tags::DAILY, tokens, token_counts::DAILY)?;
    require_context(set, tags::DAILY)?;

    let Some(day) = accept(parse_date(tokens[1]), stats) else {
        return Ok(RecordOutcome::Discarded);
    };

    let open_profit = accept(parse_f64("open profit", tokens[2]), stats);
    let close_profit = accept(parse_f64("close profit", tokens[3]), stats);
    let true_range = accept(parse_f64("true range", tokens[4]), stats);
    let num_trades = accept(parse_i32("num trades", tokens[5]), stats);
    let equity = accept(parse_f64("equity", tokens[6]), stats);
    let balance = accept(parse_f64("balance", tokens[7]), stats);

    let account = set
        .current_account_mut()
        .ok_or_else(|| Error::missing_context(tags::DAILY))?;
    assign_non_zero(&mut account.equity, equity);
    assign_non_zero(&mut account.balance, balance);

    let strategy = set
        .current_strategy_mut()
        .ok_or_else(|| Error::missing_context(tags::DAILY))?;
    let daily = strategy.daily_entry(day);
    assign(&mut daily.open_profit, open_profit);
    assign(&mut daily.close_profit, close_profit);
    assign(&mut daily.true_range, true_range);
    assign(&mut daily.num_trades, num_trades);
    assign(&mut daily.equity, equity);
    assign(&mut daily.balance, balance);

    Ok(RecordOutcome::Applied)
}

/// Handle `<TRADE_TAG>|day|time|position|price|position_at_broker|price_at_broker`
///
/// Appends a trade to the current strategy.
pub fn handle_trade(
    set: &mut AccountSet,
    trade_type: TradeType,
    tokens: &[&str],
    stats: &mut ParseStats,
) -> Result<RecordOutcome> {
    require_tokens(trade_type.as_tag(), tokens, token_counts::TRADE)?;
    require_context(set, trade_type.as_tag())?;

    let Some(day) = accept(parse_date(tokens[1]), stats) else {
        return Ok(RecordOutcome::Discarded);
    };

    let mut trade = TradeInfo::new(trade_type, day);
    assign(&mut trade.time, accept(parse_i32("time", tokens[2]), stats));
    assign(&mut trade.position, accept(parse_i32("position", tokens[3]), stats));
    assign(&mut trade.price, accept(parse_f64("price", tokens[4]), stats));
    assign(
        &mut trade.position_at_broker,
        accept(parse_i32("position at broker", tokens[5]), stats),
    );
    assign(
        &mut trade.price_at_broker,
        accept(parse_f64("price at broker", tokens[6]), stats),
    );

    let strategy = set
        .current_strategy_mut()
        .ok_or_else(|| Error::missing_context(trade_type.as_tag()))?;
    strategy.trades.push(trade);

    Ok(RecordOutcome::Applied)
}

/// Log and count a failed conversion, passing successful values through
fn accept<T>(result: Result<T>, stats: &mut ParseStats) -> Option<T> {
    match result {
        Ok(value) => Some(value),
        Err(e) => {
            warn!("{}", e);
            stats.field_errors += 1;
            None
        }
    }
}

fn require_tokens(tag: &str, tokens: &[&str], expected: usize) -> Result<()> {
    if tokens.len() < expected {
        return Err(Error::malformed_record(tag, expected, tokens.len()));
    }
    Ok(())
}

fn require_context(set: &AccountSet, tag: &str) -> Result<()> {
    if set.cursor().is_none() {
        return Err(Error::missing_context(tag));
    }
    Ok(())
}
