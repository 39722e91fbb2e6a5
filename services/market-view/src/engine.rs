//! Tick reducer
//!
//! The engine is a pure function `(state, input) -> (state', output)`. The
//! only state carried between ticks is the [`PriceTracker`]; the caller
//! owns it and passes it back in on every tick.
//!
//! - [`reduce`] handles a freshly polled (markets, orders) pair: it rotates
//!   the price snapshot, then derives every view.
//! - [`derive`] recomputes the views against the current state without
//!   rotating, for input changes that are not a new market list (e.g. the
//!   user selecting another market).

use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tracing::debug;
use types::ids::MarketId;
use types::market::Market;
use types::order::Order;

use crate::direction::PriceTracker;
use crate::grouping::{group_by_market, orders_for};
use crate::view::{derive_market_view, MarketPanel, MarketView};

/// State retained between ticks.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EngineState {
    pub prices: PriceTracker,
}

impl EngineState {
    pub fn new() -> Self {
        Self::default()
    }
}

/// Inputs for one derivation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TickInput<'a> {
    pub markets: &'a [Market],
    pub orders: &'a [Order],
    pub selected: Option<MarketId>,
    /// Anchor of the positional chart date axis.
    pub today: NaiveDate,
}

/// Derived views for one tick.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TickOutput {
    /// One panel per market in the list, keyed by market id.
    pub panels: BTreeMap<MarketId, MarketPanel>,
    /// View for the selected market.
    pub selected: MarketView,
}

impl TickOutput {
    pub fn panel(&self, market_id: MarketId) -> Option<&MarketPanel> {
        self.panels.get(&market_id)
    }
}

/// Rotate the price snapshot with the input's market list, then derive.
pub fn reduce(state: &EngineState, input: &TickInput<'_>) -> (EngineState, TickOutput) {
    let next = EngineState {
        prices: state.prices.refresh(input.markets),
    };
    let output = derive(&next, input);
    (next, output)
}

/// Derive all views against the given state without rotating it.
pub fn derive(state: &EngineState, input: &TickInput<'_>) -> TickOutput {
    let groups = group_by_market(input.orders);

    let panels: BTreeMap<MarketId, MarketPanel> = input
        .markets
        .iter()
        .map(|market| {
            let id = market.market_id;
            let panel = MarketPanel::for_market(id, orders_for(&groups, id), &state.prices, input.today);
            (id, panel)
        })
        .collect();

    let selected = derive_market_view(input.selected, input.markets, &groups, &state.prices, input.today);

    debug!(
        markets = input.markets.len(),
        orders = input.orders.len(),
        selected = ?input.selected,
        placeholder = selected.is_placeholder(),
        "Tick derived"
    );

    TickOutput { panels, selected }
}
