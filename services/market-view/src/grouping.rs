//! Per-market order grouping
//!
//! Splits the flat order list from the data source into one sequence per
//! market. Nothing is dropped or deduplicated and each group keeps the
//! order in which its orders arrived. Uses `BTreeMap` so groups iterate in
//! ascending market id.

use std::collections::BTreeMap;

use types::ids::MarketId;
use types::order::Order;

/// Orders keyed by market, arrival order preserved within each market.
pub type OrdersByMarket = BTreeMap<MarketId, Vec<Order>>;

/// Group a flat order list by market id.
pub fn group_by_market(orders: &[Order]) -> OrdersByMarket {
    let mut groups: OrdersByMarket = BTreeMap::new();
    for order in orders {
        groups.entry(order.market_id).or_default().push(order.clone());
    }
    groups
}

/// Orders for one market, or an empty slice if it has none.
pub fn orders_for(groups: &OrdersByMarket, market_id: MarketId) -> &[Order] {
    groups.get(&market_id).map(Vec::as_slice).unwrap_or(&[])
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::Decimal;
    use types::order::Side;

    fn order(market: u64, side: Side, price: u64) -> Order {
        Order::new(
            MarketId::new(market),
            side,
            Decimal::from(price),
            Decimal::from(10),
            Decimal::ZERO,
        )
    }

    #[test]
    fn test_empty_input() {
        assert!(group_by_market(&[]).is_empty());
    }

    #[test]
    fn test_groups_preserve_arrival_order() {
        let orders = vec![
            order(2, Side::Buy, 40),
            order(1, Side::Sell, 60),
            order(2, Side::Sell, 70),
            order(1, Side::Buy, 30),
            order(2, Side::Buy, 41),
        ];

        let groups = group_by_market(&orders);
        assert_eq!(groups.len(), 2);

        let prices: Vec<Decimal> = groups[&MarketId::new(2)].iter().map(|o| o.price).collect();
        assert_eq!(prices, vec![Decimal::from(40), Decimal::from(70), Decimal::from(41)]);

        let prices: Vec<Decimal> = groups[&MarketId::new(1)].iter().map(|o| o.price).collect();
        assert_eq!(prices, vec![Decimal::from(60), Decimal::from(30)]);
    }

    #[test]
    fn test_duplicates_are_kept() {
        let orders = vec![order(1, Side::Buy, 40), order(1, Side::Buy, 40)];
        let groups = group_by_market(&orders);
        assert_eq!(groups[&MarketId::new(1)].len(), 2);
    }

    #[test]
    fn test_orders_for_missing_market() {
        let groups = group_by_market(&[order(1, Side::Buy, 40)]);
        assert!(orders_for(&groups, MarketId::new(9)).is_empty());
        assert_eq!(orders_for(&groups, MarketId::new(1)).len(), 1);
    }

    #[test]
    fn test_iteration_is_ascending_by_market() {
        let orders = vec![order(3, Side::Buy, 1), order(1, Side::Buy, 1), order(2, Side::Buy, 1)];
        let keys: Vec<u64> = group_by_market(&orders).keys().map(|k| k.get()).collect();
        assert_eq!(keys, vec![1, 2, 3]);
    }
}
