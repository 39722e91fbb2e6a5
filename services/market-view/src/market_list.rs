//! Market list helpers
//!
//! Grouping, search and per-row indicators for the market table, plus the
//! reference price handed to the trading panel.

use rust_decimal::Decimal;
use types::ids::MarketId;
use types::market::Market;

use crate::direction::{PriceDirection, PriceTracker};

/// Reference price used when no market is selected or found.
pub const DEFAULT_REFERENCE_PRICE: u64 = 75;

/// Markets split by status, list order preserved within each group.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GroupedMarkets {
    pub active: Vec<Market>,
    pub closed: Vec<Market>,
}

impl GroupedMarkets {
    /// Active markets first, then closed ones.
    pub fn display_order(&self) -> impl Iterator<Item = &Market> {
        self.active.iter().chain(self.closed.iter())
    }
}

pub fn group_by_status(markets: &[Market]) -> GroupedMarkets {
    let (active, closed) = markets.iter().cloned().partition(Market::is_active);
    GroupedMarkets { active, closed }
}

/// Case-insensitive search over id, pair label, last price and status.
///
/// A blank query matches every market. Otherwise the query is matched as
/// typed, surrounding whitespace included.
pub fn filter_markets(query: &str, markets: &[Market]) -> Vec<Market> {
    if query.trim().is_empty() {
        return markets.to_vec();
    }
    let query = query.to_lowercase();

    markets
        .iter()
        .filter(|market| matches_query(market, &query))
        .cloned()
        .collect()
}

fn matches_query(market: &Market, query: &str) -> bool {
    market.market_id.to_string().contains(query)
        || market.pair_label().to_lowercase().contains(query)
        || market.last_price.to_string().contains(query)
        || market.status.label().contains(query)
}

/// Direction arrow for a market row.
pub fn price_indicator(market: &Market, prices: &PriceTracker) -> PriceDirection {
    PriceDirection::between(prices.previous_price(market.market_id), market.last_price)
}

/// Price the trading panel starts from: the selected market's last price,
/// or [`DEFAULT_REFERENCE_PRICE`].
pub fn reference_price(selected: Option<MarketId>, markets: &[Market]) -> Decimal {
    selected
        .and_then(|id| markets.iter().find(|m| m.market_id == id))
        .map(|m| m.last_price)
        .unwrap_or_else(|| Decimal::from(DEFAULT_REFERENCE_PRICE))
}
