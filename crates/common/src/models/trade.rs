use std::fmt;

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

pub type TradeId = i64;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Side {
    Buy,
    Sell,
    Other(String),
}

impl Side {
    pub fn as_str(&self) -> &str {
        match self {
            Self::Buy => "buy",
            Self::Sell => "sell",
            Self::Other(s) => s,
        }
    }
}

impl From<String> for Side {
    fn from(value: String) -> Self {
        match value.as_str() {
            "buy" => Self::Buy,
            "sell" => Self::Sell,
            _ => Self::Other(value),
        }
    }
}

impl From<Side> for String {
    fn from(value: Side) -> Self {
        match value {
            Side::Other(s) => s,
            known => known.as_str().to_string(),
        }
    }
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Lifecycle state of a trade as reported by the gateway.
/// States the client has no special handling for are kept verbatim.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum TradeStatus {
    Open,
    Executed,
    Other(String),
}

impl TradeStatus {
    pub fn as_str(&self) -> &str {
        match self {
            Self::Open => "open",
            Self::Executed => "executed",
            Self::Other(s) => s,
        }
    }
}

impl From<String> for TradeStatus {
    fn from(value: String) -> Self {
        match value.as_str() {
            "open" => Self::Open,
            "executed" => Self::Executed,
            _ => Self::Other(value),
        }
    }
}

impl From<TradeStatus> for String {
    fn from(value: TradeStatus) -> Self {
        match value {
            TradeStatus::Other(s) => s,
            known => known.as_str().to_string(),
        }
    }
}

impl fmt::Display for TradeStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A ledger row. Owned by the gateway; the client only caches reads of it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Trade {
    pub id: TradeId,
    pub symbol: String,
    pub side: Side,
    pub quantity: f64,
    pub price: f64,
    pub status: TradeStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<NaiveDateTime>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<NaiveDateTime>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewTrade {
    pub symbol: String,
    pub side: Side,
    pub quantity: f64,
    pub price: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
}

impl NewTrade {
    pub fn new(symbol: impl Into<String>, side: Side, quantity: f64, price: f64) -> Self {
        Self {
            symbol: symbol.into(),
            side,
            quantity,
            price,
            note: None,
        }
    }
}

/// Partial update body. Only the fields that are set go on the wire.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TradePatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub symbol: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub side: Option<Side>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub quantity: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub price: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<TradeStatus>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
}

impl TradePatch {
    pub fn status(status: TradeStatus) -> Self {
        Self {
            status: Some(status),
            ..Default::default()
        }
    }
}
