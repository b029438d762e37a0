//! Display helpers for report values. The engine itself only ever
//! returns raw numbers; these are for table/text consumers.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;

/// Formats an amount with its (opaque) currency code: "1234.50 USD".
#[must_use]
pub fn format_currency(value: Decimal, currency: &str) -> String {
    format!("{value:.2} {currency}")
}

/// Formats a percentage that is already in 0-100 units: "42.50%".
#[must_use]
pub fn format_pct(value: Decimal) -> String {
    format!("{value:.2}%")
}

/// Formats an optional ratio, rendering the absent (or infinite) case
/// as "N/A".
#[must_use]
pub fn format_ratio(value: Option<Decimal>) -> String {
    value.map_or_else(|| "N/A".to_string(), |v| format!("{v:.2}"))
}

/// Formats a timestamp the way the journal displays it.
#[must_use]
pub fn format_date(value: DateTime<Utc>) -> String {
    value.format("%Y-%m-%d %H:%M").to_string()
}

/// Formats a holding period given in hours: minutes under an hour,
/// hours under two days, days beyond. Open trades ("-") have none.
#[must_use]
pub fn format_holding_period(hours: Option<Decimal>) -> String {
    let Some(hours) = hours else {
        return "-".to_string();
    };

    let magnitude = hours.abs();
    if magnitude < Decimal::ONE {
        format!("{:.0}m", hours * Decimal::from(60))
    } else if magnitude < Decimal::from(48) {
        format!("{hours:.1}h")
    } else {
        format!("{:.1}d", hours / Decimal::from(24))
    }
}
