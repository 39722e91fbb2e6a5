//! Chart series builder
//!
//! Orders carry no timestamp, so the series uses a positional date axis:
//! the last order is dated `today`, the one before it `today - 1 day`, and
//! so on. This is an approximation of trade time, not real trade time.
//!
//! The headline pair shown above the chart (`main_value`, `change_value`)
//! is derived here as well; see [`ChartHeadline`].

use chrono::{Days, NaiveDate};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use types::numeric::difference;
use types::order::Order;

/// One point of a market's price series.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChartPoint {
    pub date: NaiveDate,
    pub price: Decimal,
}

/// Build the series for one market's orders, in arrival order.
///
/// A market without orders still gets a single zero-price point dated
/// `today`.
pub fn build_series(orders: &[Order], today: NaiveDate) -> Vec<ChartPoint> {
    if orders.is_empty() {
        return vec![ChartPoint {
            date: today,
            price: Decimal::ZERO,
        }];
    }

    let count = orders.len();
    orders
        .iter()
        .enumerate()
        .map(|(index, order)| {
            let remaining = (count - 1 - index) as u64;
            ChartPoint {
                date: days_before(today, remaining),
                price: order.price,
            }
        })
        .collect()
}

/// `today - days`, clamped at the earliest representable date.
fn days_before(today: NaiveDate, days: u64) -> NaiveDate {
    today.checked_sub_days(Days::new(days)).unwrap_or(NaiveDate::MIN)
}

/// Headline value and change shown above the chart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChartHeadline {
    pub main_value: Decimal,
    pub change_value: Decimal,
}

impl ChartHeadline {
    /// Canned headline used when no market can be shown.
    pub fn placeholder() -> Self {
        Self {
            main_value: Decimal::from(39),
            change_value: Decimal::new(78, 1),
        }
    }

    /// Headline from a market's orders: last price, and last minus first.
    ///
    /// Returns `None` when there are no orders.
    pub fn from_orders(orders: &[Order]) -> Option<Self> {
        let first = orders.first()?;
        let last = orders.last()?;
        Some(Self {
            main_value: last.price,
            change_value: difference(last.price, first.price),
        })
    }

    /// Headline from the price snapshot: current price, and current minus
    /// previous.
    pub fn from_prices(current: Decimal, previous: Decimal) -> Self {
        Self {
            main_value: current,
            change_value: difference(current, previous),
        }
    }
}
