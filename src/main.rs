use analytics::{
    AnalyticsEngine, Dimension, GroupPerformance, PerformanceReport, closed_trades, enrich_trades,
    format,
};
use anyhow::{Context, Result};
use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use comfy_table::Table;
use configuration::Config;
use core_types::{EnrichedTrade, Trade};
use rust_decimal::Decimal;
use std::fs;
use std::path::PathBuf;
use tracing_subscriber::{EnvFilter, FmtSubscriber};

/// The main entry point for the tradelog journal CLI.
fn main() -> Result<()> {
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(EnvFilter::from_default_env())
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    // A missing config file is fine for a read-only reporting tool;
    // fall back to defaults and say so.
    let config = configuration::load_config().unwrap_or_else(|e| {
        tracing::debug!(error = %e, "no usable config.toml, using defaults");
        Config::default()
    });

    let cli = Cli::parse();

    match cli.command {
        Commands::Report(args) => handle_report(args, &config),
        Commands::Breakdown(args) => handle_breakdown(args, &config),
    }
}

// ==============================================================================
// CLI Structure
// ==============================================================================

/// A personal trading journal: performance statistics from your logged trades.
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Compute and print the full performance report.
    Report(ReportArgs),
    /// Break performance down by one dimension.
    Breakdown(BreakdownArgs),
}

#[derive(Parser)]
struct ReportArgs {
    /// Path to a JSON export of trades.
    #[arg(long, short)]
    input: PathBuf,

    /// Risk-free rate in percent, overriding the configured value.
    #[arg(long)]
    risk_free_rate: Option<Decimal>,

    /// Only include trades entered on or after this date (YYYY-MM-DD).
    #[arg(long)]
    from: Option<NaiveDate>,

    /// Only include trades entered on or before this date (YYYY-MM-DD).
    #[arg(long)]
    to: Option<NaiveDate>,
}

#[derive(Parser)]
struct BreakdownArgs {
    /// Path to a JSON export of trades.
    #[arg(long, short)]
    input: PathBuf,

    /// Dimension to group by: symbol, strategy, asset_type, time_of_day,
    /// market_conditions, setup_type or day_of_week.
    #[arg(long)]
    by: String,

    /// Only include trades entered on or after this date (YYYY-MM-DD).
    #[arg(long)]
    from: Option<NaiveDate>,

    /// Only include trades entered on or before this date (YYYY-MM-DD).
    #[arg(long)]
    to: Option<NaiveDate>,
}

// ==============================================================================
// Command Logic
// ==============================================================================

/// Reads, validates and enriches the trade export. Records that fail
/// validation are skipped with a warning rather than aborting the run.
fn load_trades(path: &PathBuf) -> Result<Vec<EnrichedTrade>> {
    let raw = fs::read_to_string(path)
        .with_context(|| format!("failed to read trade export {}", path.display()))?;
    let trades: Vec<Trade> =
        serde_json::from_str(&raw).context("trade export is not a valid JSON trade list")?;

    let mut valid = Vec::with_capacity(trades.len());
    for trade in trades {
        match trade.validate() {
            Ok(()) => valid.push(trade),
            Err(e) => {
                tracing::warn!(trade_id = %trade.id, error = %e, "skipping invalid trade");
            }
        }
    }

    Ok(enrich_trades(valid))
}

/// Date-range pre-filtering is the caller's job; the engine itself
/// never filters by date.
fn filter_by_date_range(
    trades: Vec<EnrichedTrade>,
    from: Option<NaiveDate>,
    to: Option<NaiveDate>,
) -> Vec<EnrichedTrade> {
    trades
        .into_iter()
        .filter(|t| {
            let entry = t.trade.entry_date.date_naive();
            from.is_none_or(|from| entry >= from) && to.is_none_or(|to| entry <= to)
        })
        .collect()
}

/// Handles the `report` command: the full statistics run.
fn handle_report(args: ReportArgs, config: &Config) -> Result<()> {
    let enriched = filter_by_date_range(load_trades(&args.input)?, args.from, args.to);
    let closed = closed_trades(&enriched);
    let open_count = enriched.len() - closed.len();

    let risk_free_rate = args
        .risk_free_rate
        .unwrap_or(config.analytics.risk_free_rate_pct);
    let engine = AnalyticsEngine::with_risk_free_rate(risk_free_rate);
    let report = engine.calculate(&closed);

    println!(
        "--- Performance Report ({} closed trades, {} open excluded) ---",
        closed.len(),
        open_count
    );
    print_summary(&report);

    println!("\n--- By Symbol ---");
    print_groups(&report.by_symbol, config.report.top_groups);
    println!("\n--- By Strategy ---");
    print_groups(&report.by_strategy, config.report.top_groups);

    if config.report.show_time_breakdowns {
        println!("\n--- By Weekday ---");
        print_groups(&report.time.by_day_of_week, config.report.top_groups);
        println!("\n--- By Month ---");
        print_groups(&report.time.by_month, config.report.top_groups);
        println!("\n--- By Hour ---");
        print_groups(&report.time.by_hour, config.report.top_groups);
    }

    if config.report.show_equity_curve {
        println!("\n--- Equity Curve ---");
        print_equity_curve(&report);
    }

    Ok(())
}

/// Handles the `breakdown` command: one dimension, ranked by P&L.
fn handle_breakdown(args: BreakdownArgs, config: &Config) -> Result<()> {
    let dimension: Dimension = args.by.parse()?;
    let enriched = filter_by_date_range(load_trades(&args.input)?, args.from, args.to);
    let closed = closed_trades(&enriched);

    let engine = AnalyticsEngine::new();
    let mut groups = engine.performance_by_dimension(&closed, dimension);
    // The engine returns first-encountered order; rank for display.
    groups.sort_by(|a, b| b.total_pnl.cmp(&a.total_pnl));

    println!("--- Performance by {dimension} ---");
    print_groups(&groups, config.report.top_groups);

    Ok(())
}

// ==============================================================================
// Table Rendering
// ==============================================================================

fn print_summary(report: &PerformanceReport) {
    let basic = &report.basic;

    let mut table = Table::new();
    table.set_header(vec!["Metric", "Value"]);
    table.add_row(vec!["Trades".to_string(), basic.total_trades.to_string()]);
    table.add_row(vec![
        "Winners / Losers / Breakeven".to_string(),
        format!(
            "{} / {} / {}",
            basic.winning_trades, basic.losing_trades, basic.breakeven_trades
        ),
    ]);
    table.add_row(vec![
        "Win rate".to_string(),
        format::format_pct(basic.win_rate_pct),
    ]);
    table.add_row(vec![
        "Total net P&L".to_string(),
        format!("{:.2}", basic.total_net_pnl),
    ]);
    table.add_row(vec![
        "Average trade".to_string(),
        format!("{:.2}", basic.average_pnl),
    ]);
    table.add_row(vec![
        "Average win / loss".to_string(),
        format!("{:.2} / {:.2}", basic.average_win, basic.average_loss),
    ]);
    table.add_row(vec![
        "Largest win / loss".to_string(),
        format!("{:.2} / {:.2}", basic.largest_win, basic.largest_loss),
    ]);
    table.add_row(vec![
        "Profit factor".to_string(),
        format::format_ratio(basic.profit_factor),
    ]);
    table.add_row(vec![
        "Expectancy".to_string(),
        format!("{:.2}", report.expectancy.expectancy),
    ]);
    table.add_row(vec![
        "Sharpe ratio".to_string(),
        format!("{:.2}", report.sharpe.sharpe_ratio),
    ]);
    table.add_row(vec![
        "Max drawdown".to_string(),
        format!(
            "{:.2} ({})",
            report.drawdown.max_drawdown,
            format::format_pct(report.drawdown.max_drawdown_pct)
        ),
    ]);
    table.add_row(vec![
        "Current streak".to_string(),
        report.streaks.current_streak.to_string(),
    ]);
    table.add_row(vec![
        "Longest win / loss streak".to_string(),
        format!(
            "{} / {}",
            report.streaks.longest_win_streak, report.streaks.longest_loss_streak
        ),
    ]);
    table.add_row(vec![
        "Average holding period".to_string(),
        format::format_holding_period(Some(basic.average_holding_period_hours)),
    ]);

    println!("{table}");
}

fn print_groups(groups: &[GroupPerformance], limit: usize) {
    let mut table = Table::new();
    table.set_header(vec!["Group", "Trades", "Net P&L", "Win rate"]);
    for group in groups.iter().take(limit) {
        table.add_row(vec![
            group.key.clone(),
            group.trades.to_string(),
            format!("{:.2}", group.total_pnl),
            format::format_pct(group.win_rate_pct),
        ]);
    }
    if groups.len() > limit {
        tracing::debug!(shown = limit, total = groups.len(), "breakdown truncated");
    }
    println!("{table}");
}

fn print_equity_curve(report: &PerformanceReport) {
    let mut table = Table::new();
    table.set_header(vec!["#", "Date", "Symbol", "Equity"]);
    for point in &report.equity_curve {
        table.add_row(vec![
            point.trade_number.to_string(),
            format::format_date(point.entry_date),
            point.symbol.clone(),
            format!("{:.2}", point.equity),
        ]);
    }
    println!("{table}");
}
