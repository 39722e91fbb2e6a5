//! Market View Service
//!
//! Derives what the trading dashboard renders from the raw data source
//! feed:
//! - Per-market bid/ask ladders with spread
//! - Per-market chart series and headline values
//! - Tick-over-tick price direction per market
//! - Market list grouping, search and reference price
//!
//! Derivation is pure and synchronous. The only state carried between
//! ticks is the previous/current price snapshot, owned by the caller and
//! threaded through [`engine::reduce`]. Missing data never fails: it yields
//! an explicit placeholder variant instead.
//!
//! # Architecture
//!
//! ```text
//!   MarketDataSource (markets, orders)
//!          │
//!      ┌───▼────┐
//!      │ Poller │  ← sequential, one fetch in flight
//!      └───┬────┘
//!          │ TickInput
//!      ┌───▼─────┐        ┌──────────────┐
//!      │ reduce  │◄──────►│ PriceTracker │
//!      └───┬─────┘        └──────────────┘
//!          │
//!   ┌──────┼──────────┐
//!   │      │          │
//! ┌─▼──┐ ┌─▼────┐ ┌───▼─────┐
//! │Book│ │Chart │ │Direction│
//! └─┬──┘ └─┬────┘ └───┬─────┘
//!   │      │          │
//! ┌─▼──────▼──────────▼──┐
//! │  MarketView / Panel  │
//! └──────────────────────┘
//! ```

pub mod chart;
pub mod config;
pub mod direction;
pub mod engine;
pub mod grouping;
pub mod ladder;
pub mod market_list;
pub mod poller;
pub mod view;

// Library version
pub const SERVICE_VERSION: &str = "0.1.0";
