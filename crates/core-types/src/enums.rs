use serde::{Deserialize, Serialize};
use std::fmt;

/// The direction of a trade: long positions profit when price rises,
/// short positions when it falls.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum TradeDirection {
    Long,
    Short,
}

impl TradeDirection {
    /// Returns the opposite direction of the trade.
    pub fn opposite(&self) -> Self {
        match self {
            TradeDirection::Long => TradeDirection::Short,
            TradeDirection::Short => TradeDirection::Long,
        }
    }
}

impl fmt::Display for TradeDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TradeDirection::Long => write!(f, "LONG"),
            TradeDirection::Short => write!(f, "SHORT"),
        }
    }
}

/// The asset class of the instrument a trade was taken on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AssetType {
    Stock,
    Forex,
    Crypto,
    Options,
}

impl fmt::Display for AssetType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AssetType::Stock => write!(f, "stock"),
            AssetType::Forex => write!(f, "forex"),
            AssetType::Crypto => write!(f, "crypto"),
            AssetType::Options => write!(f, "options"),
        }
    }
}

/// The realized outcome of a closed trade. Open trades have no outcome.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TradeOutcome {
    Winning,
    Losing,
    Breakeven,
}
