use crate::enums::{AssetType, TradeDirection};
use crate::error::CoreError;
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A single journaled trade, exactly as the storage layer hands it over.
///
/// The record is immutable input: the analytics layer never mutates it,
/// it only derives new values from it. A trade with no `exit_date` is
/// *open*; open trades carry no P&L and are excluded from aggregate
/// statistics downstream.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Trade {
    pub id: Uuid,
    /// The owning user. Trades are always scoped to one user upstream.
    pub user_id: Uuid,
    pub symbol: String,
    pub asset_type: AssetType,
    /// Carried through verbatim for display; never used arithmetically.
    pub currency: String,
    pub entry_date: DateTime<Utc>,
    pub entry_price: Decimal,
    pub exit_date: Option<DateTime<Utc>>,
    pub exit_price: Option<Decimal>,
    pub quantity: Decimal,
    pub direction: TradeDirection,
    /// Total fees and commissions. Absent means zero.
    #[serde(default)]
    pub fees: Option<Decimal>,

    // Optional journal annotations.
    #[serde(default)]
    pub strategy_name: Option<String>,
    #[serde(default)]
    pub setup_type: Option<String>,
    #[serde(default)]
    pub stop_loss: Option<Decimal>,
    #[serde(default)]
    pub take_profit: Option<Decimal>,
    #[serde(default)]
    pub planned_risk_reward: Option<Decimal>,
    #[serde(default)]
    pub time_of_day: Option<String>,
    #[serde(default)]
    pub market_conditions: Option<String>,
    #[serde(default)]
    pub emotional_state: Option<String>,
    #[serde(default)]
    pub notes: Option<String>,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub screenshots: Vec<String>,
}

impl Trade {
    /// A trade is open iff it has no exit date, regardless of exit price.
    pub fn is_open(&self) -> bool {
        self.exit_date.is_none()
    }

    pub fn is_closed(&self) -> bool {
        !self.is_open()
    }

    /// Checks the invariants the analytics layer assumes were enforced
    /// upstream. The engine itself never rejects records; callers run
    /// this at the boundary and drop offending trades before analysis.
    pub fn validate(&self) -> Result<(), CoreError> {
        if self.entry_price <= Decimal::ZERO {
            return Err(CoreError::InvalidInput(
                "entry_price".to_string(),
                format!("must be positive, got {}", self.entry_price),
            ));
        }
        if self.quantity <= Decimal::ZERO {
            return Err(CoreError::InvalidInput(
                "quantity".to_string(),
                format!("must be positive, got {}", self.quantity),
            ));
        }
        if let Some(fees) = self.fees {
            if fees < Decimal::ZERO {
                return Err(CoreError::InvalidInput(
                    "fees".to_string(),
                    format!("must not be negative, got {fees}"),
                ));
            }
        }
        if let Some(exit_date) = self.exit_date {
            if exit_date < self.entry_date {
                return Err(CoreError::InvalidInput(
                    "exit_date".to_string(),
                    format!("precedes entry_date {}", self.entry_date),
                ));
            }
        }
        Ok(())
    }
}

/// Figures derived from a single trade's raw fields.
///
/// Computed fresh on every call and never persisted. For an open trade
/// only `entry_value` is populated; everything else is `None` and all
/// three outcome flags are false.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TradeCalculations {
    /// `entry_price * quantity`. Present even for open trades.
    pub entry_value: Decimal,
    pub exit_value: Option<Decimal>,
    /// Gross P&L before fees, signed by direction.
    pub pnl: Option<Decimal>,
    /// Gross P&L as a percentage of entry value.
    pub pnl_pct: Option<Decimal>,
    /// Gross P&L minus fees.
    pub net_pnl: Option<Decimal>,
    pub holding_period_hours: Option<Decimal>,
    pub holding_period_days: Option<Decimal>,
    pub is_winner: bool,
    pub is_loser: bool,
    pub is_breakeven: bool,
    /// Realized reward-to-risk against the recorded stop-loss. Only
    /// present for closed trades with a stop and non-zero risk.
    pub actual_risk_reward: Option<Decimal>,
}

impl TradeCalculations {
    /// Calculations for a trade that is still in progress.
    pub fn open(entry_value: Decimal) -> Self {
        Self {
            entry_value,
            exit_value: None,
            pnl: None,
            pnl_pct: None,
            net_pnl: None,
            holding_period_hours: None,
            holding_period_days: None,
            is_winner: false,
            is_loser: false,
            is_breakeven: false,
            actual_risk_reward: None,
        }
    }
}

/// A trade together with its derived calculations.
///
/// Serializes as the trade's own fields plus a nested `calculations`
/// object, which is the shape chart and table consumers expect.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EnrichedTrade {
    #[serde(flatten)]
    pub trade: Trade,
    pub calculations: TradeCalculations,
}

impl EnrichedTrade {
    pub fn is_open(&self) -> bool {
        self.trade.is_open()
    }

    pub fn is_closed(&self) -> bool {
        self.trade.is_closed()
    }

    /// Net P&L shortcut; `None` while the trade is open.
    pub fn net_pnl(&self) -> Option<Decimal> {
        self.calculations.net_pnl
    }
}
