//! Tick-over-tick price direction
//!
//! The tracker keeps exactly two single-tick price maps: the prices seen on
//! the previous market-list refresh and the prices seen on the current one.
//! No longer history is retained. Refreshing is a pure reducer: it returns
//! the next tracker and leaves the old one untouched, so the caller owns
//! the state.

use std::collections::BTreeMap;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use types::ids::MarketId;
use types::market::Market;
use types::numeric::difference;

/// Movement of a market's price between two consecutive ticks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PriceDirection {
    Up,
    Down,
    Neutral,
}

impl PriceDirection {
    /// Compare a current price against the previous one.
    pub fn between(previous: Decimal, current: Decimal) -> Self {
        match current.cmp(&previous) {
            std::cmp::Ordering::Greater => PriceDirection::Up,
            std::cmp::Ordering::Less => PriceDirection::Down,
            std::cmp::Ordering::Equal => PriceDirection::Neutral,
        }
    }

    /// Arrow shown next to a price.
    pub fn arrow(&self) -> &'static str {
        match self {
            PriceDirection::Up => "↑",
            PriceDirection::Down => "↓",
            PriceDirection::Neutral => "-",
        }
    }
}

/// Last observed price per market for a single tick.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PriceSnapshot(BTreeMap<MarketId, Decimal>);

impl PriceSnapshot {
    /// Capture the last price of every market in the list.
    ///
    /// A market listed twice keeps its last entry.
    pub fn from_markets(markets: &[Market]) -> Self {
        Self(
            markets
                .iter()
                .map(|m| (m.market_id, m.last_price))
                .collect(),
        )
    }

    /// Price for a market, zero if it was not seen.
    pub fn price(&self, market_id: MarketId) -> Decimal {
        self.0.get(&market_id).copied().unwrap_or(Decimal::ZERO)
    }

    pub fn contains(&self, market_id: MarketId) -> bool {
        self.0.contains_key(&market_id)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// Previous-tick and current-tick price maps.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PriceTracker {
    previous: PriceSnapshot,
    current: PriceSnapshot,
}

impl PriceTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a tracker from explicit snapshots.
    pub fn from_snapshots(previous: PriceSnapshot, current: PriceSnapshot) -> Self {
        Self { previous, current }
    }

    /// Rotate in a freshly fetched market list.
    ///
    /// The current map becomes the previous one and the new list becomes
    /// current. After refreshing with M1 then M2, `previous` holds M1's
    /// prices and `current` holds M2's.
    pub fn refresh(&self, markets: &[Market]) -> Self {
        Self {
            previous: self.current.clone(),
            current: PriceSnapshot::from_markets(markets),
        }
    }

    pub fn previous(&self) -> &PriceSnapshot {
        &self.previous
    }

    pub fn current(&self) -> &PriceSnapshot {
        &self.current
    }

    /// Current-tick price, zero if unseen.
    pub fn current_price(&self, market_id: MarketId) -> Decimal {
        self.current.price(market_id)
    }

    /// Previous-tick price, zero if unseen.
    pub fn previous_price(&self, market_id: MarketId) -> Decimal {
        self.previous.price(market_id)
    }

    /// Current minus previous price, zero if the difference overflows.
    pub fn change(&self, market_id: MarketId) -> Decimal {
        difference(self.current_price(market_id), self.previous_price(market_id))
    }

    /// Direction of the market's price between the two retained ticks.
    pub fn direction(&self, market_id: MarketId) -> PriceDirection {
        PriceDirection::between(self.previous_price(market_id), self.current_price(market_id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use types::ids::TokenId;
    use types::market::MarketStatus;

    fn market(id: u64, price: u64) -> Market {
        Market::new(
            MarketId::new(id),
            TokenId::new(0),
            TokenId::new(1),
            Decimal::from(price),
            MarketStatus::Active,
        )
    }

    #[test]
    fn test_direction_between() {
        assert_eq!(PriceDirection::between(Decimal::from(50), Decimal::from(55)), PriceDirection::Up);
        assert_eq!(PriceDirection::between(Decimal::from(55), Decimal::from(50)), PriceDirection::Down);
        assert_eq!(PriceDirection::between(Decimal::from(50), Decimal::from(50)), PriceDirection::Neutral);
    }

    #[test]
    fn test_empty_tracker_is_neutral() {
        let tracker = PriceTracker::new();
        assert_eq!(tracker.direction(MarketId::new(1)), PriceDirection::Neutral);
        assert_eq!(tracker.change(MarketId::new(1)), Decimal::ZERO);
    }

    #[test]
    fn test_first_refresh_compares_against_zero() {
        let tracker = PriceTracker::new().refresh(&[market(1, 58)]);
        assert_eq!(tracker.previous_price(MarketId::new(1)), Decimal::ZERO);
        assert_eq!(tracker.direction(MarketId::new(1)), PriceDirection::Up);
    }

    #[test]
    fn test_two_tick_rotation() {
        let m1 = vec![market(1, 50), market(2, 30)];
        let m2 = vec![market(1, 55), market(2, 25)];

        let tracker = PriceTracker::new().refresh(&m1).refresh(&m2);
        assert_eq!(tracker.previous(), &PriceSnapshot::from_markets(&m1));
        assert_eq!(tracker.current(), &PriceSnapshot::from_markets(&m2));

        assert_eq!(tracker.direction(MarketId::new(1)), PriceDirection::Up);
        assert_eq!(tracker.direction(MarketId::new(2)), PriceDirection::Down);
        assert_eq!(tracker.change(MarketId::new(1)), Decimal::from(5));
    }

    #[test]
    fn test_only_one_prior_tick_is_kept() {
        let tracker = PriceTracker::new()
            .refresh(&[market(1, 10)])
            .refresh(&[market(1, 20)])
            .refresh(&[market(1, 20)]);
        assert_eq!(tracker.previous_price(MarketId::new(1)), Decimal::from(20));
        assert_eq!(tracker.direction(MarketId::new(1)), PriceDirection::Neutral);
    }

    #[test]
    fn test_refresh_does_not_mutate_original() {
        let first = PriceTracker::new().refresh(&[market(1, 10)]);
        let _second = first.refresh(&[market(1, 20)]);
        assert_eq!(first.current_price(MarketId::new(1)), Decimal::from(10));
    }

    #[test]
    fn test_market_removed_between_ticks() {
        let tracker = PriceTracker::new().refresh(&[market(1, 10)]).refresh(&[]);
        assert!(!tracker.current().contains(MarketId::new(1)));
        assert_eq!(tracker.direction(MarketId::new(1)), PriceDirection::Down);
    }

    #[test]
    fn test_change_at_decimal_limits() {
        let at = |price: Decimal| {
            Market::new(MarketId::new(1), TokenId::new(0), TokenId::new(1), price, MarketStatus::Active)
        };
        let tracker = PriceTracker::new()
            .refresh(&[at(Decimal::MIN)])
            .refresh(&[at(Decimal::MAX)]);
        assert_eq!(tracker.change(MarketId::new(1)), Decimal::ZERO);
        assert_eq!(tracker.direction(MarketId::new(1)), PriceDirection::Up);
    }

    #[test]
    fn test_arrows() {
        assert_eq!(PriceDirection::Up.arrow(), "↑");
        assert_eq!(PriceDirection::Down.arrow(), "↓");
        assert_eq!(PriceDirection::Neutral.arrow(), "-");
    }
}
