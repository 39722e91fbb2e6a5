//! Bid/ask ladder builder
//!
//! Turns one market's resting orders into the two sides of an order book
//! view. Every order becomes its own row; rows are not merged by price.
//!
//! - Asks (sell orders) ascending by price, best ask first
//! - Bids (buy orders) descending by price, best bid first
//!
//! Sorting is stable, so orders at the same price keep arrival order.
//! All arithmetic uses `Decimal`. A market without orders gets the canned
//! placeholder book so the view always has something to render.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::debug;
use types::numeric::{difference, percent_notional, round_cents};
use types::order::{Order, Side};

/// One row on either side of the ladder.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LadderRow {
    pub price: Decimal,
    pub quantity: Decimal,
    /// `round(price × quantity / 100, 2)`
    pub total: Decimal,
}

impl LadderRow {
    pub fn new(price: Decimal, quantity: Decimal) -> Self {
        Self {
            price,
            quantity,
            total: percent_notional(price, quantity),
        }
    }

    fn from_order(order: &Order) -> Self {
        Self::new(order.price, order.quantity())
    }
}

/// Both sides of one market's book.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderLadder {
    /// Ascending price (best first).
    pub asks: Vec<LadderRow>,
    /// Descending price (best first).
    pub bids: Vec<LadderRow>,
    /// Best ask minus best bid, zero when either side is empty.
    pub spread: Decimal,
}

impl OrderLadder {
    /// Build the ladder for one market's orders.
    ///
    /// Orders whose flag is neither buy nor sell appear on neither side.
    pub fn from_orders(orders: &[Order]) -> Self {
        let mut asks: Vec<&Order> = orders
            .iter()
            .filter(|o| o.side() == Some(Side::Sell))
            .collect();
        asks.sort_by(|a, b| a.price.cmp(&b.price));

        let mut bids: Vec<&Order> = orders
            .iter()
            .filter(|o| o.side() == Some(Side::Buy))
            .collect();
        bids.sort_by(|a, b| b.price.cmp(&a.price));

        let asks: Vec<LadderRow> = asks.into_iter().map(LadderRow::from_order).collect();
        let bids: Vec<LadderRow> = bids.into_iter().map(LadderRow::from_order).collect();
        let spread = spread_of(&asks, &bids);

        Self { asks, bids, spread }
    }

    /// Best (lowest) ask price.
    pub fn best_ask(&self) -> Option<Decimal> {
        self.asks.first().map(|row| row.price)
    }

    /// Best (highest) bid price.
    pub fn best_bid(&self) -> Option<Decimal> {
        self.bids.first().map(|row| row.price)
    }

    /// Number of ask rows.
    pub fn ask_depth(&self) -> usize {
        self.asks.len()
    }

    /// Number of bid rows.
    pub fn bid_depth(&self) -> usize {
        self.bids.len()
    }
}

fn spread_of(asks: &[LadderRow], bids: &[LadderRow]) -> Decimal {
    match (asks.first(), bids.first()) {
        (Some(ask), Some(bid)) => round_cents(difference(ask.price, bid.price)),
        _ => Decimal::ZERO,
    }
}

/// Ladder for a market, tagged with whether it came from real orders.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "ladder", rename_all = "snake_case")]
pub enum LadderView {
    /// Built from the market's orders.
    Derived(OrderLadder),
    /// The market has no orders; canned book shown instead.
    Placeholder(OrderLadder),
}

impl LadderView {
    pub fn ladder(&self) -> &OrderLadder {
        match self {
            LadderView::Derived(ladder) | LadderView::Placeholder(ladder) => ladder,
        }
    }

    pub fn is_placeholder(&self) -> bool {
        matches!(self, LadderView::Placeholder(_))
    }
}

/// Build the ladder view for one market's orders.
pub fn build_ladder(orders: &[Order]) -> LadderView {
    if orders.is_empty() {
        return LadderView::Placeholder(placeholder_ladder());
    }

    let ladder = OrderLadder::from_orders(orders);
    debug!(
        orders = orders.len(),
        asks = ladder.ask_depth(),
        bids = ladder.bid_depth(),
        spread = %ladder.spread,
        "Ladder built"
    );
    LadderView::Derived(ladder)
}

/// Canned three-level book shown when there is nothing to derive from.
pub fn placeholder_ladder() -> OrderLadder {
    let row = |price: u64, quantity: u64| LadderRow::new(Decimal::from(price), Decimal::from(quantity));
    let asks = vec![row(60, 5_000), row(61, 25_000), row(62, 30_000)];
    let bids = vec![row(39, 225_200), row(38, 30_000), row(37, 45_000)];
    let spread = spread_of(&asks, &bids);
    OrderLadder { asks, bids, spread }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;
    use types::ids::MarketId;

    fn order(side: Side, price: &str, a: u64, b: u64) -> Order {
        Order::new(
            MarketId::new(1),
            side,
            Decimal::from_str(price).unwrap(),
            Decimal::from(a),
            Decimal::from(b),
        )
    }

    #[test]
    fn test_u64_limits_do_not_overflow() {
        let max = Decimal::from(u64::MAX);
        let orders = vec![
            Order::new(MarketId::new(1), Side::Buy, max, max, max),
            Order::new(
                MarketId::new(1),
                Side::Buy,
                Decimal::from(10_000_000_000u64),
                Decimal::from(10_000_000_000_000_000_000u64),
                Decimal::ZERO,
            ),
            Order::new(MarketId::new(1), Side::Sell, Decimal::MIN, Decimal::ONE, Decimal::ZERO),
        ];
        let view = build_ladder(&orders);
        let ladder = view.ladder();

        assert_eq!(ladder.bids.len(), 2);
        assert!(ladder.bids.iter().all(|row| row.total == Decimal::ZERO));
        // Decimal::MIN minus u64::MAX leaves the Decimal range.
        assert_eq!(ladder.spread, Decimal::ZERO);
    }

    #[test]
    fn test_single_ask() {
        let view = build_ladder(&[order(Side::Sell, "60", 100, 0)]);
        assert!(!view.is_placeholder());

        let ladder = view.ladder();
        assert_eq!(
            ladder.asks,
            vec![LadderRow {
                price: Decimal::from(60),
                quantity: Decimal::from(100),
                total: Decimal::from(60),
            }]
        );
        assert!(ladder.bids.is_empty());
        assert_eq!(ladder.spread, Decimal::ZERO);
    }

    #[test]
    fn test_sides_are_sorted_best_first() {
        let orders = vec![
            order(Side::Sell, "65", 1, 0),
            order(Side::Buy, "30", 1, 0),
            order(Side::Sell, "61", 1, 0),
            order(Side::Buy, "35", 1, 0),
            order(Side::Sell, "63", 1, 0),
            order(Side::Buy, "32", 1, 0),
        ];
        let view = build_ladder(&orders);
        let ladder = view.ladder();

        let asks: Vec<Decimal> = ladder.asks.iter().map(|r| r.price).collect();
        let bids: Vec<Decimal> = ladder.bids.iter().map(|r| r.price).collect();
        assert_eq!(asks, vec![Decimal::from(61), Decimal::from(63), Decimal::from(65)]);
        assert_eq!(bids, vec![Decimal::from(35), Decimal::from(32), Decimal::from(30)]);

        assert_eq!(ladder.best_ask(), Some(Decimal::from(61)));
        assert_eq!(ladder.best_bid(), Some(Decimal::from(35)));
        assert_eq!(ladder.spread, Decimal::from(26));
    }

    #[test]
    fn test_equal_prices_keep_arrival_order() {
        let orders = vec![
            order(Side::Buy, "40", 1, 0),
            order(Side::Buy, "40", 2, 0),
            order(Side::Buy, "40", 3, 0),
        ];
        let view = build_ladder(&orders);
        let quantities: Vec<Decimal> = view.ladder().bids.iter().map(|r| r.quantity).collect();
        assert_eq!(quantities, vec![Decimal::from(1), Decimal::from(2), Decimal::from(3)]);
    }

    #[test]
    fn test_quantity_uses_b_amount_when_present() {
        let view = build_ladder(&[order(Side::Buy, "40", 500, 20)]);
        let row = &view.ladder().bids[0];
        assert_eq!(row.quantity, Decimal::from(20));
        assert_eq!(row.total, Decimal::from(8));
    }

    #[test]
    fn test_total_rounds_to_cents() {
        let view = build_ladder(&[order(Side::Sell, "33.333", 7, 0)]);
        // 33.333 * 7 / 100 = 2.33331
        assert_eq!(view.ladder().asks[0].total, Decimal::from_str("2.33").unwrap());
    }

    #[test]
    fn test_spread_rounds_to_cents() {
        let orders = vec![order(Side::Sell, "50.456", 1, 0), order(Side::Buy, "40.001", 1, 0)];
        let view = build_ladder(&orders);
        assert_eq!(view.ladder().spread, Decimal::from_str("10.46").unwrap());
    }

    #[test]
    fn test_spread_zero_with_one_side() {
        let view = build_ladder(&[order(Side::Buy, "40", 1, 0)]);
        assert_eq!(view.ladder().spread, Decimal::ZERO);
    }

    #[test]
    fn test_unknown_flag_on_neither_side() {
        let mut odd = order(Side::Buy, "40", 1, 0);
        odd.flag = 9;
        let view = build_ladder(&[odd]);
        assert!(!view.is_placeholder());
        assert_eq!(view.ladder().ask_depth(), 0);
        assert_eq!(view.ladder().bid_depth(), 0);
    }

    #[test]
    fn test_empty_market_gets_placeholder() {
        let view = build_ladder(&[]);
        assert!(view.is_placeholder());

        let ladder = view.ladder();
        assert_eq!(ladder.ask_depth(), 3);
        assert_eq!(ladder.bid_depth(), 3);
        assert_eq!(ladder.spread, Decimal::from(21));
        assert_eq!(ladder.bids[0].total, Decimal::from(87_828));
        assert_eq!(ladder.asks[2].total, Decimal::from(18_600));
    }

    #[test]
    fn test_ladder_view_serialization() {
        let view = build_ladder(&[order(Side::Sell, "60", 100, 0)]);
        let json = serde_json::to_value(&view).unwrap();
        assert_eq!(json["kind"], "derived");

        let back: LadderView = serde_json::from_value(json).unwrap();
        assert_eq!(back, view);
    }
}
