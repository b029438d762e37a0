use rust_decimal::Decimal;
use serde::Deserialize;

/// The root configuration structure for the journal CLI.
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub analytics: AnalyticsSettings,
    pub report: ReportSettings,
}

/// Parameters that feed the analytics engine itself.
#[derive(Debug, Clone, Deserialize)]
pub struct AnalyticsSettings {
    /// The risk-free rate used by the Sharpe ratio, in the same percent
    /// units as the per-trade return series. 0 disables the adjustment.
    #[serde(default)]
    pub risk_free_rate_pct: Decimal,
}

/// Display knobs for the printed report.
#[derive(Debug, Clone, Deserialize)]
pub struct ReportSettings {
    /// How many groups of a breakdown table to print before cutting off.
    #[serde(default = "default_top_groups")]
    pub top_groups: usize,
    /// Whether `report` also prints the equity curve table.
    #[serde(default = "default_show")]
    pub show_equity_curve: bool,
    /// Whether `report` also prints the weekday/month/hour breakdowns.
    #[serde(default = "default_show")]
    pub show_time_breakdowns: bool,
}

fn default_top_groups() -> usize {
    10
}

fn default_show() -> bool {
    true
}

impl Default for Config {
    fn default() -> Self {
        Self {
            analytics: AnalyticsSettings {
                risk_free_rate_pct: Decimal::ZERO,
            },
            report: ReportSettings {
                top_groups: default_top_groups(),
                show_equity_curve: default_show(),
                show_time_breakdowns: default_show(),
            },
        }
    }
}
