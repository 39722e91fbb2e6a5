//! Order types
//!
//! Orders are immutable snapshots delivered by the data source. The wire
//! `flag` is kept as received so that an unexpected value never causes an
//! order to be dropped; [`Order::side`] interprets it.

use crate::ids::MarketId;
use crate::numeric::{lenient_decimal, lenient_u64};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Wire flag for a sell order.
pub const FLAG_SELL: u64 = 0;
/// Wire flag for a buy order.
pub const FLAG_BUY: u64 = 1;

/// Order side (buyer or seller)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Side {
    /// Sell order (ask)
    Sell,
    /// Buy order (bid)
    Buy,
}

impl Side {
    /// Interpret a wire flag. Unknown flags have no side.
    pub fn from_flag(flag: u64) -> Option<Self> {
        match flag {
            FLAG_SELL => Some(Side::Sell),
            FLAG_BUY => Some(Side::Buy),
            _ => None,
        }
    }

    /// Wire flag for this side
    pub fn flag(&self) -> u64 {
        match self {
            Side::Sell => FLAG_SELL,
            Side::Buy => FLAG_BUY,
        }
    }
}

/// A resting order for one market.
///
/// Amounts are denominated in either token of the pair; whichever of
/// `b_token_amount` / `a_token_amount` is non-zero is the order size.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Order {
    pub market_id: MarketId,
    #[serde(deserialize_with = "lenient_u64")]
    pub flag: u64,
    #[serde(default, deserialize_with = "lenient_decimal")]
    pub price: Decimal,
    #[serde(default, deserialize_with = "lenient_decimal")]
    pub a_token_amount: Decimal,
    #[serde(default, deserialize_with = "lenient_decimal")]
    pub b_token_amount: Decimal,
}

impl Order {
    /// Create a new order
    pub fn new(
        market_id: MarketId,
        side: Side,
        price: Decimal,
        a_token_amount: Decimal,
        b_token_amount: Decimal,
    ) -> Self {
        Self {
            market_id,
            flag: side.flag(),
            price,
            a_token_amount,
            b_token_amount,
        }
    }

    /// Side encoded by the wire flag, if recognised
    pub fn side(&self) -> Option<Side> {
        Side::from_flag(self.flag)
    }

    /// Order size: `b_token_amount` when non-zero, else `a_token_amount`
    pub fn quantity(&self) -> Decimal {
        if self.b_token_amount.is_zero() {
            self.a_token_amount
        } else {
            self.b_token_amount
        }
    }
}
