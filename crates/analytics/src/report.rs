use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Counts, rates and P&L totals over a set of closed trades.
///
/// This struct is the workhorse of the dashboard: almost every headline
/// number a journal shows comes from here.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BasicMetrics {
    // I. Counts
    pub total_trades: usize,
    pub winning_trades: usize,
    pub losing_trades: usize,
    pub breakeven_trades: usize,

    // II. Rates (0-100, zero when there are no trades)
    pub win_rate_pct: Decimal,
    pub loss_rate_pct: Decimal,
    pub breakeven_rate_pct: Decimal,

    // III. P&L
    pub total_net_pnl: Decimal,
    pub average_pnl: Decimal,
    /// Mean net P&L over winners only. Zero when there are no winners.
    pub average_win: Decimal,
    /// Mean net P&L over losers only, so negative or zero.
    pub average_loss: Decimal,
    pub largest_win: Decimal,
    pub largest_loss: Decimal,
    pub gross_profit: Decimal,
    /// Sum of losing trades' net P&L, as a positive magnitude.
    pub gross_loss: Decimal,

    /// Gross profit over gross loss. `None` encodes the infinite case
    /// (winners but no losers); no winners at all yields `Some(0)`.
    pub profit_factor: Option<Decimal>,

    pub average_holding_period_hours: Decimal,
}

impl BasicMetrics {
    /// Creates a new, zeroed-out metrics block, the defined result for
    /// an empty trade set.
    pub fn new() -> Self {
        Self {
            total_trades: 0,
            winning_trades: 0,
            losing_trades: 0,
            breakeven_trades: 0,
            win_rate_pct: Decimal::ZERO,
            loss_rate_pct: Decimal::ZERO,
            breakeven_rate_pct: Decimal::ZERO,
            total_net_pnl: Decimal::ZERO,
            average_pnl: Decimal::ZERO,
            average_win: Decimal::ZERO,
            average_loss: Decimal::ZERO,
            largest_win: Decimal::ZERO,
            largest_loss: Decimal::ZERO,
            gross_profit: Decimal::ZERO,
            gross_loss: Decimal::ZERO,
            profit_factor: Some(Decimal::ZERO),
            average_holding_period_hours: Decimal::ZERO,
        }
    }
}

impl Default for BasicMetrics {
    fn default() -> Self {
        Self::new()
    }
}

/// Probability-weighted average outcome per trade, in money and in
/// percent-of-entry terms.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Default)]
pub struct ExpectancyMetrics {
    pub expectancy: Decimal,
    pub expectancy_pct: Decimal,
}

/// Risk-adjusted return over the per-trade return series.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Default)]
pub struct SharpeMetrics {
    /// Zero when there are fewer than two trades or the deviation is zero.
    pub sharpe_ratio: Decimal,
    pub average_return: Decimal,
    /// Sample standard deviation (n - 1 denominator) of per-trade returns.
    pub standard_deviation: Decimal,
}

/// One contiguous stretch of equity below its running peak.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DrawdownPeriod {
    /// 1-based trade number (in entry-date order) where the dip began.
    pub start_trade: usize,
    /// 1-based trade number of the last trade still below the peak.
    pub end_trade: usize,
    /// Deepest peak-to-equity distance observed within the period.
    pub depth: Decimal,
}

/// Decline-from-peak statistics over the cumulative equity sequence.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct DrawdownMetrics {
    pub max_drawdown: Decimal,
    /// Max drawdown relative to the peak it fell from. Zero when the
    /// peak itself was zero.
    pub max_drawdown_pct: Decimal,
    /// Distance below the peak after the final trade.
    pub current_drawdown: Decimal,
    pub periods: Vec<DrawdownPeriod>,
}

/// One point of the cumulative equity curve, one per closed trade.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EquityPoint {
    /// 1-based sequential index after sorting by entry date.
    pub trade_number: usize,
    pub symbol: String,
    /// Running sum of net P&L up to and including this trade.
    pub equity: Decimal,
    pub entry_date: DateTime<Utc>,
}

/// Aggregates for one group of a dimensional or time-based breakdown.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GroupPerformance {
    /// Group label: a symbol, a strategy name, `"Unknown"`, a weekday,
    /// a `YYYY-MM` month, an `HH:00` hour.
    pub key: String,
    pub trades: usize,
    pub total_pnl: Decimal,
    pub win_rate_pct: Decimal,
}

/// The three chronological breakdowns of the same trade set.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct TimeBasedMetrics {
    /// Sunday through Saturday, only days that saw trades.
    pub by_day_of_week: Vec<GroupPerformance>,
    /// Calendar months in ascending order.
    pub by_month: Vec<GroupPerformance>,
    /// Hours of day (entry time, UTC as recorded) in ascending order.
    pub by_hour: Vec<GroupPerformance>,
}

/// Win/loss streak lengths over the chronological trade sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct StreakMetrics {
    /// Positive: ongoing win streak. Negative: ongoing loss streak.
    /// Zero after a breakeven trade or an empty journal.
    pub current_streak: i64,
    pub longest_win_streak: usize,
    pub longest_loss_streak: usize,
}

/// A comprehensive, standardized report of a journal's performance.
///
/// This struct is the final output of the `AnalyticsEngine` and serves as
/// the data transfer object for performance results toward the
/// presentation layer, which serializes it as-is.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PerformanceReport {
    pub basic: BasicMetrics,
    pub expectancy: ExpectancyMetrics,
    pub sharpe: SharpeMetrics,
    pub drawdown: DrawdownMetrics,
    pub streaks: StreakMetrics,
    pub equity_curve: Vec<EquityPoint>,
    pub by_symbol: Vec<GroupPerformance>,
    pub by_strategy: Vec<GroupPerformance>,
    pub time: TimeBasedMetrics,
}

impl PerformanceReport {
    /// Creates a new, zeroed-out PerformanceReport, the defined result
    /// for an empty trade set.
    pub fn new() -> Self {
        Self {
            basic: BasicMetrics::new(),
            expectancy: ExpectancyMetrics::default(),
            sharpe: SharpeMetrics::default(),
            drawdown: DrawdownMetrics::default(),
            streaks: StreakMetrics::default(),
            equity_curve: Vec::new(),
            by_symbol: Vec::new(),
            by_strategy: Vec::new(),
            time: TimeBasedMetrics::default(),
        }
    }
}

impl Default for PerformanceReport {
    fn default() -> Self {
        Self::new()
    }
}
