use crate::enricher::{SortField, SortOrder, sort_trades};
use crate::error::AnalyticsError;
use crate::math;
use crate::report::{
    BasicMetrics, DrawdownMetrics, DrawdownPeriod, EquityPoint, ExpectancyMetrics,
    GroupPerformance, PerformanceReport, SharpeMetrics, StreakMetrics, TimeBasedMetrics,
};
use chrono::{Datelike, Timelike};
use core_types::EnrichedTrade;
use indexmap::IndexMap;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

/// A dimension trades can be broken down by.
///
/// A closed enumeration instead of a field-name string: each variant
/// maps to one accessor, so an unsupported grouping cannot be expressed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Dimension {
    Symbol,
    StrategyName,
    AssetType,
    TimeOfDay,
    MarketConditions,
    SetupType,
    DayOfWeek,
}

impl Dimension {
    /// The grouping value of one trade, `None` when the field is unset.
    fn value_of(self, trade: &EnrichedTrade) -> Option<String> {
        match self {
            Dimension::Symbol => Some(trade.trade.symbol.clone()),
            Dimension::StrategyName => trade.trade.strategy_name.clone(),
            Dimension::AssetType => Some(trade.trade.asset_type.to_string()),
            Dimension::TimeOfDay => trade.trade.time_of_day.clone(),
            Dimension::MarketConditions => trade.trade.market_conditions.clone(),
            Dimension::SetupType => trade.trade.setup_type.clone(),
            Dimension::DayOfWeek => Some(trade.trade.entry_date.format("%A").to_string()),
        }
    }
}

impl fmt::Display for Dimension {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Dimension::Symbol => "symbol",
            Dimension::StrategyName => "strategy",
            Dimension::AssetType => "asset_type",
            Dimension::TimeOfDay => "time_of_day",
            Dimension::MarketConditions => "market_conditions",
            Dimension::SetupType => "setup_type",
            Dimension::DayOfWeek => "day_of_week",
        };
        write!(f, "{name}")
    }
}

impl FromStr for Dimension {
    type Err = AnalyticsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "symbol" => Ok(Dimension::Symbol),
            "strategy" => Ok(Dimension::StrategyName),
            "asset_type" => Ok(Dimension::AssetType),
            "time_of_day" => Ok(Dimension::TimeOfDay),
            "market_conditions" => Ok(Dimension::MarketConditions),
            "setup_type" => Ok(Dimension::SetupType),
            "day_of_week" => Ok(Dimension::DayOfWeek),
            other => Err(AnalyticsError::UnknownDimension(other.to_string())),
        }
    }
}

/// Running totals for one breakdown group.
#[derive(Default)]
struct GroupAccumulator {
    trades: usize,
    winners: usize,
    total_pnl: Decimal,
}

impl GroupAccumulator {
    fn add(&mut self, trade: &EnrichedTrade) {
        self.trades += 1;
        if trade.calculations.is_winner {
            self.winners += 1;
        }
        self.total_pnl += trade.calculations.net_pnl.unwrap_or_default();
    }

    fn into_performance(self, key: String) -> GroupPerformance {
        let win_rate_pct = if self.trades == 0 {
            Decimal::ZERO
        } else {
            Decimal::from(self.winners) / Decimal::from(self.trades) * Decimal::ONE_HUNDRED
        };
        GroupPerformance {
            key,
            trades: self.trades,
            total_pnl: self.total_pnl,
            win_rate_pct,
        }
    }
}

/// A stateless calculator for deriving portfolio statistics from a
/// user's enriched, closed trades.
///
/// Every method is a deterministic, total function of its input: empty
/// input and missing optional fields produce the documented sentinel
/// values, never an error. Callers are expected to have excluded open
/// trades already; a stray open trade contributes zero P&L and no
/// outcome count.
#[derive(Debug, Default)]
pub struct AnalyticsEngine {
    /// Risk-free rate in percent units, matched to the per-trade
    /// return series used by the Sharpe ratio.
    risk_free_rate: Decimal,
}

impl AnalyticsEngine {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_risk_free_rate(risk_free_rate: Decimal) -> Self {
        Self { risk_free_rate }
    }

    /// The main entry point: computes every metric block and assembles
    /// them into a single report. Sorts by entry date once and reuses
    /// the ordering for the chronological calculations.
    pub fn calculate(&self, trades: &[EnrichedTrade]) -> PerformanceReport {
        tracing::debug!(total_trades = trades.len(), "calculating performance report");

        if trades.is_empty() {
            return PerformanceReport::new();
        }

        let sorted = sort_trades(trades, SortField::EntryDate, SortOrder::Asc);

        PerformanceReport {
            basic: self.basic_metrics(trades),
            expectancy: self.expectancy(trades),
            sharpe: self.sharpe_ratio(trades),
            drawdown: drawdown_of_sorted(&sorted),
            streaks: streaks_of_sorted(&sorted),
            equity_curve: equity_curve_of_sorted(&sorted),
            by_symbol: self.performance_by_dimension(trades, Dimension::Symbol),
            by_strategy: self.performance_by_dimension(trades, Dimension::StrategyName),
            time: self.time_based_metrics(trades),
        }
    }

    /// Counts, rates, averages and the profit factor.
    pub fn basic_metrics(&self, trades: &[EnrichedTrade]) -> BasicMetrics {
        let mut metrics = BasicMetrics::new();
        metrics.total_trades = trades.len();
        if trades.is_empty() {
            return metrics;
        }

        let mut total_hours = Decimal::ZERO;

        for trade in trades {
            let calc = &trade.calculations;
            let net = calc.net_pnl.unwrap_or_default();
            metrics.total_net_pnl += net;
            total_hours += calc.holding_period_hours.unwrap_or_default();

            if calc.is_winner {
                metrics.winning_trades += 1;
                metrics.gross_profit += net;
                metrics.largest_win = metrics.largest_win.max(net);
            } else if calc.is_loser {
                metrics.losing_trades += 1;
                metrics.gross_loss += net.abs();
                metrics.largest_loss = metrics.largest_loss.min(net);
            } else if calc.is_breakeven {
                metrics.breakeven_trades += 1;
            }
        }

        let total = Decimal::from(metrics.total_trades);
        metrics.win_rate_pct =
            Decimal::from(metrics.winning_trades) / total * Decimal::ONE_HUNDRED;
        metrics.loss_rate_pct = Decimal::from(metrics.losing_trades) / total * Decimal::ONE_HUNDRED;
        metrics.breakeven_rate_pct =
            Decimal::from(metrics.breakeven_trades) / total * Decimal::ONE_HUNDRED;
        metrics.average_pnl = metrics.total_net_pnl / total;
        metrics.average_holding_period_hours = total_hours / total;

        if metrics.winning_trades > 0 {
            metrics.average_win = metrics.gross_profit / Decimal::from(metrics.winning_trades);
        }
        if metrics.losing_trades > 0 {
            // Signed: the mean of losers' net P&L is negative.
            metrics.average_loss = -metrics.gross_loss / Decimal::from(metrics.losing_trades);
        }

        metrics.profit_factor = if metrics.winning_trades == 0 {
            Some(Decimal::ZERO)
        } else if metrics.losing_trades == 0 {
            // Winners without losers: the infinite case.
            None
        } else {
            Some(metrics.gross_profit / metrics.gross_loss)
        };

        metrics
    }

    /// Probability-weighted average outcome per trade.
    pub fn expectancy(&self, trades: &[EnrichedTrade]) -> ExpectancyMetrics {
        let basic = self.basic_metrics(trades);
        if basic.total_trades == 0 {
            return ExpectancyMetrics::default();
        }

        // average_loss is signed negative, so both terms add.
        let expectancy = basic.win_rate_pct / Decimal::ONE_HUNDRED * basic.average_win
            + basic.loss_rate_pct / Decimal::ONE_HUNDRED * basic.average_loss;

        let mut win_pct_sum = Decimal::ZERO;
        let mut loss_pct_sum = Decimal::ZERO;
        for trade in trades {
            let calc = &trade.calculations;
            let pct = calc.pnl_pct.unwrap_or_default();
            if calc.is_winner {
                win_pct_sum += pct;
            } else if calc.is_loser {
                loss_pct_sum += pct;
            }
        }
        let average_win_pct = if basic.winning_trades == 0 {
            Decimal::ZERO
        } else {
            win_pct_sum / Decimal::from(basic.winning_trades)
        };
        let average_loss_pct = if basic.losing_trades == 0 {
            Decimal::ZERO
        } else {
            loss_pct_sum / Decimal::from(basic.losing_trades)
        };
        let expectancy_pct = basic.win_rate_pct / Decimal::ONE_HUNDRED * average_win_pct
            + basic.loss_rate_pct / Decimal::ONE_HUNDRED * average_loss_pct;

        ExpectancyMetrics {
            expectancy,
            expectancy_pct,
        }
    }

    /// Risk-adjusted return over the per-trade `pnl_pct` series.
    ///
    /// Fewer than two closed trades is not an error: the result is all
    /// zeros. The deviation is the sample standard deviation (n - 1).
    pub fn sharpe_ratio(&self, trades: &[EnrichedTrade]) -> SharpeMetrics {
        let returns: Vec<Decimal> = trades
            .iter()
            .filter_map(|t| t.calculations.pnl_pct)
            .collect();

        if returns.len() < 2 {
            return SharpeMetrics::default();
        }

        let average_return = math::mean(&returns).unwrap_or_default();
        let standard_deviation = math::std_dev(&returns).unwrap_or_default();

        let sharpe_ratio = if standard_deviation == Decimal::ZERO {
            Decimal::ZERO
        } else {
            (average_return - self.risk_free_rate) / standard_deviation
        };

        SharpeMetrics {
            sharpe_ratio,
            average_return,
            standard_deviation,
        }
    }

    /// Decline-from-peak statistics over the cumulative equity sequence,
    /// ordered by entry date.
    pub fn drawdown(&self, trades: &[EnrichedTrade]) -> DrawdownMetrics {
        let sorted = sort_trades(trades, SortField::EntryDate, SortOrder::Asc);
        drawdown_of_sorted(&sorted)
    }

    /// One cumulative-equity point per trade, ordered by entry date.
    pub fn equity_curve(&self, trades: &[EnrichedTrade]) -> Vec<EquityPoint> {
        let sorted = sort_trades(trades, SortField::EntryDate, SortOrder::Asc);
        equity_curve_of_sorted(&sorted)
    }

    /// Win/loss streak lengths over the chronological trade sequence.
    pub fn streaks(&self, trades: &[EnrichedTrade]) -> StreakMetrics {
        let sorted = sort_trades(trades, SortField::EntryDate, SortOrder::Asc);
        streaks_of_sorted(&sorted)
    }

    /// Groups trades by one dimension and aggregates each group.
    ///
    /// Trades without a value for the dimension land under the literal
    /// `"Unknown"`. Groups come back in first-encountered order; callers
    /// wanting a ranking sort the result themselves.
    pub fn performance_by_dimension(
        &self,
        trades: &[EnrichedTrade],
        dimension: Dimension,
    ) -> Vec<GroupPerformance> {
        let mut groups: IndexMap<String, GroupAccumulator> = IndexMap::new();

        for trade in trades {
            let key = match dimension.value_of(trade) {
                Some(value) if !value.is_empty() => value,
                _ => "Unknown".to_string(),
            };
            groups.entry(key).or_default().add(trade);
        }

        groups
            .into_iter()
            .map(|(key, acc)| acc.into_performance(key))
            .collect()
    }

    /// The three chronological breakdowns: weekday, calendar month and
    /// hour of day, each bucketed on the trade's recorded entry time.
    pub fn time_based_metrics(&self, trades: &[EnrichedTrade]) -> TimeBasedMetrics {
        let mut by_weekday: BTreeMap<u32, GroupAccumulator> = BTreeMap::new();
        let mut by_month: BTreeMap<String, GroupAccumulator> = BTreeMap::new();
        let mut by_hour: BTreeMap<u32, GroupAccumulator> = BTreeMap::new();

        for trade in trades {
            let entry = trade.trade.entry_date;
            by_weekday
                .entry(entry.weekday().num_days_from_sunday())
                .or_default()
                .add(trade);
            by_month
                .entry(entry.format("%Y-%m").to_string())
                .or_default()
                .add(trade);
            by_hour.entry(entry.hour()).or_default().add(trade);
        }

        TimeBasedMetrics {
            by_day_of_week: by_weekday
                .into_iter()
                .map(|(day, acc)| acc.into_performance(weekday_name(day).to_string()))
                .collect(),
            by_month: by_month
                .into_iter()
                .map(|(month, acc)| acc.into_performance(month))
                .collect(),
            by_hour: by_hour
                .into_iter()
                .map(|(hour, acc)| acc.into_performance(format!("{hour:02}:00")))
                .collect(),
        }
    }
}

/// English weekday names, Sunday-first, never localized.
fn weekday_name(days_from_sunday: u32) -> &'static str {
    match days_from_sunday {
        0 => "Sunday",
        1 => "Monday",
        2 => "Tuesday",
        3 => "Wednesday",
        4 => "Thursday",
        5 => "Friday",
        _ => "Saturday",
    }
}

fn equity_curve_of_sorted(sorted: &[EnrichedTrade]) -> Vec<EquityPoint> {
    let mut equity = Decimal::ZERO;
    sorted
        .iter()
        .enumerate()
        .map(|(idx, trade)| {
            equity += trade.calculations.net_pnl.unwrap_or_default();
            EquityPoint {
                trade_number: idx + 1,
                symbol: trade.trade.symbol.clone(),
                equity,
                entry_date: trade.trade.entry_date,
            }
        })
        .collect()
}

fn drawdown_of_sorted(sorted: &[EnrichedTrade]) -> DrawdownMetrics {
    let mut metrics = DrawdownMetrics::default();

    let mut equity = Decimal::ZERO;
    // The pre-trade equity of zero counts as seen, so the peak never
    // goes negative.
    let mut peak = Decimal::ZERO;
    let mut current: Option<DrawdownPeriod> = None;

    for (idx, trade) in sorted.iter().enumerate() {
        equity += trade.calculations.net_pnl.unwrap_or_default();
        if equity > peak {
            peak = equity;
        }
        let drawdown = peak - equity;

        if drawdown > metrics.max_drawdown {
            metrics.max_drawdown = drawdown;
            metrics.max_drawdown_pct = if peak == Decimal::ZERO {
                Decimal::ZERO
            } else {
                drawdown / peak * Decimal::ONE_HUNDRED
            };
        }

        if drawdown > Decimal::ZERO {
            match current.as_mut() {
                Some(period) => {
                    period.end_trade = idx + 1;
                    period.depth = period.depth.max(drawdown);
                }
                None => {
                    current = Some(DrawdownPeriod {
                        start_trade: idx + 1,
                        end_trade: idx + 1,
                        depth: drawdown,
                    });
                }
            }
        } else if let Some(period) = current.take() {
            metrics.periods.push(period);
        }

        metrics.current_drawdown = drawdown;
    }

    if let Some(period) = current.take() {
        metrics.periods.push(period);
    }

    metrics
}

fn streaks_of_sorted(sorted: &[EnrichedTrade]) -> StreakMetrics {
    let mut streak: i64 = 0;
    let mut longest_win: usize = 0;
    let mut longest_loss: usize = 0;

    for trade in sorted {
        let calc = &trade.calculations;
        if calc.is_winner {
            streak = if streak > 0 { streak + 1 } else { 1 };
            longest_win = longest_win.max(streak as usize);
        } else if calc.is_loser {
            streak = if streak < 0 { streak - 1 } else { -1 };
            longest_loss = longest_loss.max(streak.unsigned_abs() as usize);
        } else if calc.is_breakeven {
            // A breakeven trade breaks both kinds of streak.
            streak = 0;
        }
    }

    StreakMetrics {
        current_streak: streak,
        longest_win_streak: longest_win,
        longest_loss_streak: longest_loss,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::enricher::enrich_trades;
    use chrono::{TimeZone, Utc};
    use core_types::{AssetType, Trade, TradeDirection};
    use rust_decimal_macros::dec;
    use uuid::Uuid;

    /// One closed long trade per requested net P&L, entered on
    /// consecutive days. Quantity 1 and zero fees keep net == gross.
    fn trades_with_net_pnls(pnls: &[Decimal]) -> Vec<EnrichedTrade> {
        let trades = pnls
            .iter()
            .enumerate()
            .map(|(idx, pnl)| {
                let entry = Utc
                    .with_ymd_and_hms(2024, 3, 1, 10, 0, 0)
                    .unwrap()
                    + chrono::Duration::days(idx as i64);
                Trade {
                    id: Uuid::new_v4(),
                    user_id: Uuid::new_v4(),
                    symbol: format!("SYM{idx}"),
                    asset_type: AssetType::Stock,
                    currency: "USD".to_string(),
                    entry_date: entry,
                    entry_price: dec!(100),
                    exit_date: Some(entry + chrono::Duration::hours(4)),
                    exit_price: Some(dec!(100) + pnl),
                    quantity: dec!(1),
                    direction: TradeDirection::Long,
                    fees: None,
                    strategy_name: None,
                    setup_type: None,
                    stop_loss: None,
                    take_profit: None,
                    planned_risk_reward: None,
                    time_of_day: None,
                    market_conditions: None,
                    emotional_state: None,
                    notes: None,
                    tags: Vec::new(),
                    screenshots: Vec::new(),
                }
            })
            .collect();
        enrich_trades(trades)
    }

    #[test]
    fn empty_input_yields_zeroed_basics() {
        let engine = AnalyticsEngine::new();
        let metrics = engine.basic_metrics(&[]);

        assert_eq!(metrics.total_trades, 0);
        assert_eq!(metrics.win_rate_pct, Decimal::ZERO);
        assert_eq!(metrics.total_net_pnl, Decimal::ZERO);
        // Zero, not infinite and not undefined.
        assert_eq!(metrics.profit_factor, Some(Decimal::ZERO));
    }

    #[test]
    fn basic_counts_and_rates() {
        let engine = AnalyticsEngine::new();
        let trades = trades_with_net_pnls(&[dec!(50), dec!(30), dec!(-20), dec!(0), dec!(-10)]);
        let metrics = engine.basic_metrics(&trades);

        assert_eq!(metrics.total_trades, 5);
        assert_eq!(metrics.winning_trades, 2);
        assert_eq!(metrics.losing_trades, 2);
        assert_eq!(metrics.breakeven_trades, 1);
        assert_eq!(metrics.win_rate_pct, dec!(40));
        assert_eq!(metrics.loss_rate_pct, dec!(40));
        assert_eq!(metrics.breakeven_rate_pct, dec!(20));
        assert_eq!(metrics.total_net_pnl, dec!(50));
        assert_eq!(metrics.average_pnl, dec!(10));
        assert_eq!(metrics.average_win, dec!(40));
        assert_eq!(metrics.average_loss, dec!(-15));
        assert_eq!(metrics.largest_win, dec!(50));
        assert_eq!(metrics.largest_loss, dec!(-20));
        assert_eq!(metrics.gross_profit, dec!(80));
        assert_eq!(metrics.gross_loss, dec!(30));
        assert_eq!(metrics.profit_factor, Some(dec!(80) / dec!(30)));
    }

    #[test]
    fn profit_factor_is_infinite_without_losers() {
        let engine = AnalyticsEngine::new();
        let trades = trades_with_net_pnls(&[dec!(50), dec!(30)]);
        assert_eq!(engine.basic_metrics(&trades).profit_factor, None);
    }

    #[test]
    fn profit_factor_is_zero_without_winners() {
        let engine = AnalyticsEngine::new();
        let trades = trades_with_net_pnls(&[dec!(-50), dec!(-30)]);
        assert_eq!(
            engine.basic_metrics(&trades).profit_factor,
            Some(Decimal::ZERO)
        );
    }

    #[test]
    fn expectancy_weights_signed_averages() {
        let engine = AnalyticsEngine::new();
        // 60% winners averaging +50, 40% losers averaging -20:
        // 0.6 * 50 + 0.4 * (-20) = 22.
        let trades =
            trades_with_net_pnls(&[dec!(50), dec!(50), dec!(50), dec!(-20), dec!(-20)]);
        let expectancy = engine.expectancy(&trades);

        assert_eq!(expectancy.expectancy, dec!(22));
        // pnl_pct mirrors net here (quantity 1, entry 100, no fees):
        // 0.6 * 50% + 0.4 * (-20%) = 22%.
        assert_eq!(expectancy.expectancy_pct, dec!(22));
    }

    #[test]
    fn expectancy_of_empty_is_zero() {
        let engine = AnalyticsEngine::new();
        assert_eq!(engine.expectancy(&[]), ExpectancyMetrics::default());
    }

    #[test]
    fn sharpe_needs_two_trades() {
        let engine = AnalyticsEngine::new();

        assert_eq!(engine.sharpe_ratio(&[]), SharpeMetrics::default());

        let one = trades_with_net_pnls(&[dec!(50)]);
        let metrics = engine.sharpe_ratio(&one);
        assert_eq!(metrics.sharpe_ratio, Decimal::ZERO);
        assert_eq!(metrics.average_return, Decimal::ZERO);
        assert_eq!(metrics.standard_deviation, Decimal::ZERO);
    }

    #[test]
    fn sharpe_sign_follows_mean_return() {
        let engine = AnalyticsEngine::new();

        let winners = trades_with_net_pnls(&[dec!(10), dec!(20), dec!(30)]);
        let metrics = engine.sharpe_ratio(&winners);
        assert_eq!(metrics.average_return, dec!(20));
        assert!(metrics.standard_deviation > Decimal::ZERO);
        assert!(metrics.sharpe_ratio > Decimal::ZERO);

        let losers = trades_with_net_pnls(&[dec!(-10), dec!(-20), dec!(-30)]);
        assert!(engine.sharpe_ratio(&losers).sharpe_ratio < Decimal::ZERO);
    }

    #[test]
    fn sharpe_is_zero_for_constant_returns() {
        let engine = AnalyticsEngine::new();
        let trades = trades_with_net_pnls(&[dec!(10), dec!(10), dec!(10)]);
        let metrics = engine.sharpe_ratio(&trades);

        assert_eq!(metrics.standard_deviation, Decimal::ZERO);
        assert_eq!(metrics.sharpe_ratio, Decimal::ZERO);
        assert_eq!(metrics.average_return, dec!(10));
    }

    #[test]
    fn risk_free_rate_lowers_sharpe() {
        let trades = trades_with_net_pnls(&[dec!(10), dec!(20), dec!(30)]);
        let base = AnalyticsEngine::new().sharpe_ratio(&trades);
        let adjusted = AnalyticsEngine::with_risk_free_rate(dec!(5)).sharpe_ratio(&trades);

        assert!(adjusted.sharpe_ratio < base.sharpe_ratio);
    }

    #[test]
    fn equity_curve_accumulates_in_entry_order() {
        let engine = AnalyticsEngine::new();
        let trades = trades_with_net_pnls(&[dec!(100), dec!(-30), dec!(50)]);
        let curve = engine.equity_curve(&trades);

        let equities: Vec<Decimal> = curve.iter().map(|p| p.equity).collect();
        assert_eq!(equities, vec![dec!(100), dec!(70), dec!(120)]);
        let numbers: Vec<usize> = curve.iter().map(|p| p.trade_number).collect();
        assert_eq!(numbers, vec![1, 2, 3]);
    }

    #[test]
    fn equity_curve_of_empty_is_empty() {
        assert!(AnalyticsEngine::new().equity_curve(&[]).is_empty());
    }

    #[test]
    fn drawdown_tracks_peak_and_recovery() {
        let engine = AnalyticsEngine::new();
        // Equity: 100, 70, 120 — one dip of 30 below the peak of 100.
        let trades = trades_with_net_pnls(&[dec!(100), dec!(-30), dec!(50)]);
        let metrics = engine.drawdown(&trades);

        assert_eq!(metrics.max_drawdown, dec!(30));
        assert_eq!(metrics.max_drawdown_pct, dec!(30));
        assert_eq!(metrics.current_drawdown, Decimal::ZERO);
        assert_eq!(metrics.periods.len(), 1);
        assert_eq!(metrics.periods[0].start_trade, 2);
        assert_eq!(metrics.periods[0].end_trade, 2);
        assert_eq!(metrics.periods[0].depth, dec!(30));
    }

    #[test]
    fn drawdown_with_zero_peak_has_zero_pct() {
        let engine = AnalyticsEngine::new();
        // Every trade loses; the peak never rises above the starting 0.
        let trades = trades_with_net_pnls(&[dec!(-10), dec!(-20)]);
        let metrics = engine.drawdown(&trades);

        assert_eq!(metrics.max_drawdown, dec!(30));
        assert_eq!(metrics.max_drawdown_pct, Decimal::ZERO);
        assert_eq!(metrics.current_drawdown, dec!(30));
        // Still underwater at the end: one open-ended period.
        assert_eq!(metrics.periods.len(), 1);
        assert_eq!(metrics.periods[0].start_trade, 1);
        assert_eq!(metrics.periods[0].end_trade, 2);
    }

    #[test]
    fn drawdown_of_empty_is_zeroed() {
        let metrics = AnalyticsEngine::new().drawdown(&[]);
        assert_eq!(metrics.max_drawdown, Decimal::ZERO);
        assert_eq!(metrics.max_drawdown_pct, Decimal::ZERO);
        assert_eq!(metrics.current_drawdown, Decimal::ZERO);
        assert!(metrics.periods.is_empty());
    }

    #[test]
    fn three_winners_make_a_streak_of_three() {
        let engine = AnalyticsEngine::new();
        let trades = trades_with_net_pnls(&[dec!(10), dec!(10), dec!(10)]);
        let streaks = engine.streaks(&trades);

        assert_eq!(streaks.current_streak, 3);
        assert_eq!(streaks.longest_win_streak, 3);
        assert_eq!(streaks.longest_loss_streak, 0);
    }

    #[test]
    fn breakeven_resets_without_extending() {
        let engine = AnalyticsEngine::new();
        let trades = trades_with_net_pnls(&[dec!(10), dec!(0), dec!(10)]);
        let streaks = engine.streaks(&trades);

        assert_eq!(streaks.current_streak, 1);
        assert_eq!(streaks.longest_win_streak, 1);
        assert_eq!(streaks.longest_loss_streak, 0);
    }

    #[test]
    fn losses_count_negative() {
        let engine = AnalyticsEngine::new();
        let trades =
            trades_with_net_pnls(&[dec!(10), dec!(10), dec!(-5), dec!(-5), dec!(-5)]);
        let streaks = engine.streaks(&trades);

        assert_eq!(streaks.current_streak, -3);
        assert_eq!(streaks.longest_win_streak, 2);
        assert_eq!(streaks.longest_loss_streak, 3);
    }

    #[test]
    fn streaks_of_empty_are_zero() {
        assert_eq!(AnalyticsEngine::new().streaks(&[]), StreakMetrics::default());
    }

    #[test]
    fn dimension_groups_missing_values_under_unknown() {
        let engine = AnalyticsEngine::new();
        let mut trades = trades_with_net_pnls(&[dec!(10), dec!(-5), dec!(20)]);
        trades[0].trade.strategy_name = Some("Breakout".to_string());
        // trades[1] and trades[2] keep strategy_name = None.

        let groups = engine.performance_by_dimension(&trades, Dimension::StrategyName);

        assert_eq!(groups.len(), 2);
        assert_eq!(groups[0].key, "Breakout");
        assert_eq!(groups[0].trades, 1);

        let unknown = &groups[1];
        assert_eq!(unknown.key, "Unknown");
        assert_eq!(unknown.trades, 2);
        assert_eq!(unknown.total_pnl, dec!(15));
        assert_eq!(unknown.win_rate_pct, dec!(50));
    }

    #[test]
    fn dimension_groups_keep_first_encountered_order() {
        let engine = AnalyticsEngine::new();
        let mut trades = trades_with_net_pnls(&[dec!(10), dec!(20), dec!(30)]);
        trades[0].trade.symbol = "MSFT".to_string();
        trades[1].trade.symbol = "AAPL".to_string();
        trades[2].trade.symbol = "MSFT".to_string();

        let groups = engine.performance_by_dimension(&trades, Dimension::Symbol);
        let keys: Vec<&str> = groups.iter().map(|g| g.key.as_str()).collect();
        assert_eq!(keys, vec!["MSFT", "AAPL"]);
        assert_eq!(groups[0].trades, 2);
    }

    #[test]
    fn time_buckets_land_on_entry_date() {
        let engine = AnalyticsEngine::new();
        // 2024-03-01 is a Friday, 2024-03-02 a Saturday.
        let trades = trades_with_net_pnls(&[dec!(10), dec!(-5)]);
        let time = engine.time_based_metrics(&trades);

        let days: Vec<&str> = time.by_day_of_week.iter().map(|g| g.key.as_str()).collect();
        assert_eq!(days, vec!["Friday", "Saturday"]);

        assert_eq!(time.by_month.len(), 1);
        assert_eq!(time.by_month[0].key, "2024-03");
        assert_eq!(time.by_month[0].trades, 2);
        assert_eq!(time.by_month[0].total_pnl, dec!(5));

        assert_eq!(time.by_hour.len(), 1);
        assert_eq!(time.by_hour[0].key, "10:00");
        assert_eq!(time.by_hour[0].trades, 2);
    }

    #[test]
    fn time_metrics_of_empty_are_empty() {
        let time = AnalyticsEngine::new().time_based_metrics(&[]);
        assert!(time.by_day_of_week.is_empty());
        assert!(time.by_month.is_empty());
        assert!(time.by_hour.is_empty());
    }

    #[test]
    fn full_report_assembles_every_block() {
        let engine = AnalyticsEngine::new();
        let trades = trades_with_net_pnls(&[dec!(100), dec!(-30), dec!(50)]);
        let report = engine.calculate(&trades);

        assert_eq!(report.basic.total_trades, 3);
        assert_eq!(report.equity_curve.len(), 3);
        assert_eq!(report.streaks.current_streak, 1);
        assert_eq!(report.drawdown.max_drawdown, dec!(30));
        assert_eq!(report.by_symbol.len(), 3);
        assert_eq!(report.by_strategy.len(), 1); // all Unknown
        assert_eq!(report.time.by_month.len(), 1);
    }

    #[test]
    fn full_report_of_empty_is_zeroed() {
        let report = AnalyticsEngine::new().calculate(&[]);
        assert_eq!(report, PerformanceReport::new());
    }

    #[test]
    fn dimension_parses_from_cli_names() {
        assert_eq!("symbol".parse::<Dimension>().ok(), Some(Dimension::Symbol));
        assert_eq!(
            "day_of_week".parse::<Dimension>().ok(),
            Some(Dimension::DayOfWeek)
        );
        assert!("direction".parse::<Dimension>().is_err());
    }
}
