//! Sequential poll driver
//!
//! Fetches the market list and the order list from a [`MarketDataSource`],
//! runs the tick reducer and publishes the result on a `watch` channel.
//! The next poll is scheduled only after the previous one has finished, so
//! at most one fetch is ever outstanding.
//!
//! A failed fetch is logged, counted and published as the last error. The
//! engine state is left untouched and the loop keeps going.

use async_trait::async_trait;
use chrono::{NaiveDate, Utc};
use tokio::sync::watch;
use tracing::{debug, info, warn};
use types::errors::FeedError;
use types::ids::MarketId;
use types::market::Market;
use types::order::Order;

use crate::config::PollerConfig;
use crate::engine::{derive, reduce, EngineState, TickInput, TickOutput};

/// External source of markets and the current user's orders.
#[async_trait]
pub trait MarketDataSource: Send + Sync {
    async fn fetch_markets(&self) -> Result<Vec<Market>, FeedError>;
    async fn fetch_orders(&self) -> Result<Vec<Order>, FeedError>;
}

/// What the driver publishes after every poll.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PollStatus {
    /// Output of the last successful poll.
    pub latest: Option<TickOutput>,
    /// Error of the last poll, cleared by the next success.
    pub last_error: Option<FeedError>,
    pub polls_completed: u64,
    pub polls_failed: u64,
}

/// Supplies the anchor date for the chart axis.
pub type Clock = Box<dyn Fn() -> NaiveDate + Send + Sync>;

/// Drives the engine from a data source.
pub struct Poller<S> {
    source: S,
    config: PollerConfig,
    state: EngineState,
    selected: Option<MarketId>,
    /// Inputs of the last successful poll, kept for re-deriving on
    /// selection changes.
    last_markets: Vec<Market>,
    last_orders: Vec<Order>,
    clock: Clock,
    polls_completed: u64,
    polls_failed: u64,
}

impl<S: MarketDataSource> Poller<S> {
    pub fn new(source: S, config: PollerConfig) -> Self {
        info!(
            poll_interval_ms = config.poll_interval_ms,
            selected = ?config.selected_market,
            "Poller initialized"
        );

        Self {
            source,
            selected: config.selected_market,
            config,
            state: EngineState::new(),
            last_markets: Vec::new(),
            last_orders: Vec::new(),
            clock: Box::new(|| Utc::now().date_naive()),
            polls_completed: 0,
            polls_failed: 0,
        }
    }

    /// Replace the clock used for the chart axis.
    pub fn with_clock(mut self, clock: Clock) -> Self {
        self.clock = clock;
        self
    }

    pub fn state(&self) -> &EngineState {
        &self.state
    }

    pub fn selected(&self) -> Option<MarketId> {
        self.selected
    }

    pub fn polls_completed(&self) -> u64 {
        self.polls_completed
    }

    pub fn polls_failed(&self) -> u64 {
        self.polls_failed
    }

    /// Change the selected market and re-derive from the last poll.
    ///
    /// The price snapshot is not rotated.
    pub fn select(&mut self, market: Option<MarketId>) -> TickOutput {
        self.selected = market;
        let today = (self.clock)();
        derive(&self.state, &self.input(today))
    }

    /// Fetch once and run the reducer.
    ///
    /// On error the engine state is unchanged.
    pub async fn poll_once(&mut self) -> Result<TickOutput, FeedError> {
        let fetched = self.fetch().await;
        let (markets, orders) = match fetched {
            Ok(pair) => pair,
            Err(err) => {
                self.polls_failed += 1;
                warn!(
                    error = %err,
                    transient = err.is_transient(),
                    polls_failed = self.polls_failed,
                    "Poll failed"
                );
                return Err(err);
            }
        };

        self.last_markets = markets;
        self.last_orders = orders;

        let today = (self.clock)();
        let (next, output) = reduce(&self.state, &self.input(today));
        self.state = next;
        self.polls_completed += 1;

        debug!(
            markets = self.last_markets.len(),
            orders = self.last_orders.len(),
            polls_completed = self.polls_completed,
            "Poll completed"
        );

        Ok(output)
    }

    /// Poll until `shutdown` becomes true, publishing after every poll.
    pub async fn run(
        mut self,
        updates: watch::Sender<PollStatus>,
        mut shutdown: watch::Receiver<bool>,
    ) -> Self {
        info!("Poller started");

        loop {
            if *shutdown.borrow() {
                break;
            }

            let result = self.poll_once().await;
            updates.send_modify(|status| {
                match result {
                    Ok(output) => {
                        status.latest = Some(output);
                        status.last_error = None;
                    }
                    Err(err) => status.last_error = Some(err),
                }
                status.polls_completed = self.polls_completed;
                status.polls_failed = self.polls_failed;
            });

            tokio::select! {
                _ = tokio::time::sleep(self.config.poll_interval()) => {}
                changed = shutdown.changed() => {
                    if changed.is_err() {
                        break;
                    }
                }
            }
        }

        info!(
            polls_completed = self.polls_completed,
            polls_failed = self.polls_failed,
            "Poller stopped"
        );
        self
    }

    async fn fetch(&self) -> Result<(Vec<Market>, Vec<Order>), FeedError> {
        let markets = self.source.fetch_markets().await?;
        let orders = self.source.fetch_orders().await?;
        Ok((markets, orders))
    }

    fn input(&self, today: NaiveDate) -> TickInput<'_> {
        TickInput {
            markets: &self.last_markets,
            orders: &self.last_orders,
            selected: self.selected,
            today,
        }
    }
}
