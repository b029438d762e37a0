//! Collection utilities over enriched trades: enrichment, outcome
//! filtering and sorting.

use crate::calculator::calculate_trade_metrics;
use core_types::{EnrichedTrade, Trade, TradeOutcome};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

/// The field a trade list can be sorted on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortField {
    EntryDate,
    Pnl,
    PnlPct,
    Symbol,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    Asc,
    Desc,
}

/// Attaches the derived calculations to a trade, leaving every other
/// field untouched.
pub fn enrich_trade(trade: Trade) -> EnrichedTrade {
    let calculations = calculate_trade_metrics(&trade);
    EnrichedTrade {
        trade,
        calculations,
    }
}

/// Enriches a whole collection, preserving input order.
pub fn enrich_trades(trades: Vec<Trade>) -> Vec<EnrichedTrade> {
    trades.into_iter().map(enrich_trade).collect()
}

/// The subsequence of trades whose realized outcome matches.
///
/// Open trades have no outcome flags set and therefore never match.
pub fn filter_by_outcome(trades: &[EnrichedTrade], outcome: TradeOutcome) -> Vec<EnrichedTrade> {
    trades
        .iter()
        .filter(|t| match outcome {
            TradeOutcome::Winning => t.calculations.is_winner,
            TradeOutcome::Losing => t.calculations.is_loser,
            TradeOutcome::Breakeven => t.calculations.is_breakeven,
        })
        .cloned()
        .collect()
}

/// The subsequence of closed trades, the input every aggregate
/// calculation expects.
pub fn closed_trades(trades: &[EnrichedTrade]) -> Vec<EnrichedTrade> {
    trades.iter().filter(|t| t.is_closed()).cloned().collect()
}

/// Returns a new, stably sorted copy of the trade list.
///
/// P&L fields are `None` for open trades; those trades always sort
/// after every trade with a value, whichever order was requested, and
/// keep their relative input order among themselves.
pub fn sort_trades(
    trades: &[EnrichedTrade],
    field: SortField,
    order: SortOrder,
) -> Vec<EnrichedTrade> {
    let mut sorted = trades.to_vec();
    sorted.sort_by(|a, b| match field {
        SortField::EntryDate => apply_order(a.trade.entry_date.cmp(&b.trade.entry_date), order),
        SortField::Symbol => apply_order(a.trade.symbol.cmp(&b.trade.symbol), order),
        SortField::Pnl => compare_nullable(a.calculations.net_pnl, b.calculations.net_pnl, order),
        SortField::PnlPct => compare_nullable(a.calculations.pnl_pct, b.calculations.pnl_pct, order),
    });
    sorted
}

fn apply_order(ordering: Ordering, order: SortOrder) -> Ordering {
    match order {
        SortOrder::Asc => ordering,
        SortOrder::Desc => ordering.reverse(),
    }
}

fn compare_nullable(a: Option<Decimal>, b: Option<Decimal>, order: SortOrder) -> Ordering {
    match (a, b) {
        (Some(x), Some(y)) => apply_order(x.cmp(&y), order),
        // Missing values lose to present ones in either direction.
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}
