//! Per-market view assembly
//!
//! Combines the ladder, chart series, headline and price direction for a
//! market into the panel the presentation layer renders. When no market
//! can be shown (nothing selected, selection unknown, or no active markets
//! at all) the view is the canned placeholder instead. Both outcomes are
//! explicit variants of [`MarketView`]; building a view never fails.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::debug;
use types::ids::MarketId;
use types::market::Market;
use types::order::Order;

use crate::chart::{build_series, ChartHeadline, ChartPoint};
use crate::direction::{PriceDirection, PriceTracker};
use crate::grouping::{orders_for, OrdersByMarket};
use crate::ladder::{build_ladder, placeholder_ladder, LadderView};

/// Summary line under the order book.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookSummary {
    pub last_price: Decimal,
    pub spread: Decimal,
    pub price_direction: PriceDirection,
}

impl BookSummary {
    pub fn placeholder() -> Self {
        Self {
            last_price: Decimal::from(39),
            spread: Decimal::from(21),
            price_direction: PriceDirection::Up,
        }
    }
}

/// Everything rendered for one market.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MarketPanel {
    pub headline: ChartHeadline,
    pub series: Vec<ChartPoint>,
    pub ladder: LadderView,
    pub summary: BookSummary,
}

impl MarketPanel {
    /// Build the panel for one market from its orders and the price
    /// snapshot.
    ///
    /// With orders, the headline tracks the orders (last price, last minus
    /// first). Without orders, it falls back to the snapshot (current
    /// price, current minus previous) and the book shows the placeholder
    /// ladder.
    pub fn for_market(
        market_id: MarketId,
        orders: &[Order],
        prices: &PriceTracker,
        today: NaiveDate,
    ) -> Self {
        let headline = ChartHeadline::from_orders(orders).unwrap_or_else(|| {
            ChartHeadline::from_prices(
                prices.current_price(market_id),
                prices.previous_price(market_id),
            )
        });
        let ladder = build_ladder(orders);
        let summary = BookSummary {
            last_price: prices.current_price(market_id),
            spread: ladder.ladder().spread,
            price_direction: prices.direction(market_id),
        };

        Self {
            headline,
            series: build_series(orders, today),
            ladder,
            summary,
        }
    }

    /// Canned panel shown when no market can be displayed.
    pub fn placeholder(today: NaiveDate) -> Self {
        Self {
            headline: ChartHeadline::placeholder(),
            series: build_series(&[], today),
            ladder: LadderView::Placeholder(placeholder_ladder()),
            summary: BookSummary::placeholder(),
        }
    }
}

/// Why the placeholder is shown instead of a market.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PlaceholderReason {
    NoActiveMarkets,
    NothingSelected,
    UnknownMarket(MarketId),
}

/// The selected market's panel, or the placeholder.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum MarketView {
    Ready {
        market: Market,
        panel: MarketPanel,
    },
    Placeholder {
        reason: PlaceholderReason,
        panel: MarketPanel,
    },
}

impl MarketView {
    pub fn panel(&self) -> &MarketPanel {
        match self {
            MarketView::Ready { panel, .. } | MarketView::Placeholder { panel, .. } => panel,
        }
    }

    pub fn is_placeholder(&self) -> bool {
        matches!(self, MarketView::Placeholder { .. })
    }

    pub fn main_value(&self) -> Decimal {
        self.panel().headline.main_value
    }

    pub fn change_value(&self) -> Decimal {
        self.panel().headline.change_value
    }
}

/// Derive the view for the selected market.
pub fn derive_market_view(
    selected: Option<MarketId>,
    markets: &[Market],
    orders: &OrdersByMarket,
    prices: &PriceTracker,
    today: NaiveDate,
) -> MarketView {
    let placeholder = |reason: PlaceholderReason| {
        debug!(?reason, "Showing placeholder market view");
        MarketView::Placeholder {
            reason,
            panel: MarketPanel::placeholder(today),
        }
    };

    if !markets.iter().any(Market::is_active) {
        return placeholder(PlaceholderReason::NoActiveMarkets);
    }

    let Some(market_id) = selected else {
        return placeholder(PlaceholderReason::NothingSelected);
    };

    let Some(market) = markets.iter().find(|m| m.market_id == market_id) else {
        return placeholder(PlaceholderReason::UnknownMarket(market_id));
    };

    let panel = MarketPanel::for_market(market_id, orders_for(orders, market_id), prices, today);
    MarketView::Ready {
        market: market.clone(),
        panel,
    }
}
