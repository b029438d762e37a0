//! Per-trade metrics: the derived figures of a single journal record.

use core_types::{Trade, TradeCalculations, TradeDirection};
use rust_decimal::Decimal;

const MILLIS_PER_HOUR: Decimal = Decimal::from_parts(3_600_000, 0, 0, false, 0);
const HOURS_PER_DAY: Decimal = Decimal::from_parts(24, 0, 0, false, 0);

/// Computes the derived figures for a single trade.
///
/// An open trade (no exit date) or one without an exit price is not an
/// error: it yields calculations with `entry_value` populated and every
/// other field `None`, all outcome flags false. Closed trades get the
/// full set, with exactly one of winner/loser/breakeven true.
pub fn calculate_trade_metrics(trade: &Trade) -> TradeCalculations {
    let entry_value = trade.entry_price * trade.quantity;

    let (Some(exit_date), Some(exit_price)) = (trade.exit_date, trade.exit_price) else {
        return TradeCalculations::open(entry_value);
    };

    let pnl = match trade.direction {
        TradeDirection::Long => (exit_price - trade.entry_price) * trade.quantity,
        TradeDirection::Short => (trade.entry_price - exit_price) * trade.quantity,
    };

    // entry_value > 0 is a caller-held invariant; the guard keeps the
    // engine panic-free if a malformed record slips through.
    let pnl_pct = if entry_value == Decimal::ZERO {
        Decimal::ZERO
    } else {
        pnl / entry_value * Decimal::ONE_HUNDRED
    };

    let net_pnl = pnl - trade.fees.unwrap_or_default();
    let exit_value = exit_price * trade.quantity;

    // Signed: an exit recorded before the entry comes out negative and
    // is carried through unchanged.
    let holding_period_hours =
        Decimal::from((exit_date - trade.entry_date).num_milliseconds()) / MILLIS_PER_HOUR;
    let holding_period_days = holding_period_hours / HOURS_PER_DAY;

    let actual_risk_reward = trade.stop_loss.and_then(|stop| {
        let risk = (trade.entry_price - stop).abs() * trade.quantity;
        if risk == Decimal::ZERO {
            None
        } else {
            Some(pnl.abs() / risk)
        }
    });

    TradeCalculations {
        entry_value,
        exit_value: Some(exit_value),
        pnl: Some(pnl),
        pnl_pct: Some(pnl_pct),
        net_pnl: Some(net_pnl),
        holding_period_hours: Some(holding_period_hours),
        holding_period_days: Some(holding_period_days),
        is_winner: net_pnl > Decimal::ZERO,
        is_loser: net_pnl < Decimal::ZERO,
        is_breakeven: net_pnl == Decimal::ZERO,
        actual_risk_reward,
    }
}
