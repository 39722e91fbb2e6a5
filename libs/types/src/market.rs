//! Market snapshot types
//!
//! A market is a tradeable token pair. The data source sends the whole
//! market list on every poll; each entry is immutable for that tick.

use crate::ids::{MarketId, TokenId};
use crate::numeric::{lenient_decimal, lenient_u64};
use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer, Serialize};

/// Market status as sent on the wire (0 = closed, 1 = active)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(into = "u64")]
pub enum MarketStatus {
    Closed,
    Active,
}

impl MarketStatus {
    pub fn is_active(&self) -> bool {
        matches!(self, MarketStatus::Active)
    }

    /// Lowercase label used for display and search
    pub fn label(&self) -> &'static str {
        match self {
            MarketStatus::Active => "active",
            MarketStatus::Closed => "closed",
        }
    }
}

/// Only status 1 is active; anything else is treated as closed.
impl From<u64> for MarketStatus {
    fn from(status: u64) -> Self {
        if status == 1 {
            MarketStatus::Active
        } else {
            MarketStatus::Closed
        }
    }
}

impl<'de> Deserialize<'de> for MarketStatus {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        lenient_u64(deserializer).map(MarketStatus::from)
    }
}

impl From<MarketStatus> for u64 {
    fn from(status: MarketStatus) -> Self {
        match status {
            MarketStatus::Closed => 0,
            MarketStatus::Active => 1,
        }
    }
}

/// Snapshot of one market for the current poll tick
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Market {
    pub market_id: MarketId,
    pub token_a: TokenId,
    pub token_b: TokenId,
    #[serde(default, deserialize_with = "lenient_decimal")]
    pub last_price: Decimal,
    pub status: MarketStatus,
}

impl Market {
    pub fn new(
        market_id: MarketId,
        token_a: TokenId,
        token_b: TokenId,
        last_price: Decimal,
        status: MarketStatus,
    ) -> Self {
        Self {
            market_id,
            token_a,
            token_b,
            last_price,
            status,
        }
    }

    pub fn is_active(&self) -> bool {
        self.status.is_active()
    }

    /// Trading pair label, e.g. `Token 1 / Token 2`
    pub fn pair_label(&self) -> String {
        format!("Token {} / Token {}", self.token_a, self.token_b)
    }
}
