//! Poll driver configuration
//!
//! Defaults match the dashboard: markets and orders are refreshed every
//! three seconds. Values can be loaded from JSON or overridden from the
//! environment.

use std::env;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use tracing::warn;
use types::ids::MarketId;

/// Environment variable overriding the poll interval in milliseconds.
pub const ENV_POLL_INTERVAL_MS: &str = "MARKET_VIEW_POLL_INTERVAL_MS";
/// Environment variable selecting a market at startup.
pub const ENV_SELECTED_MARKET: &str = "MARKET_VIEW_SELECTED_MARKET";

/// Errors from loading or validating configuration.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    #[error("poll interval must be greater than zero")]
    ZeroInterval,

    #[error("invalid value for {key}: {value}")]
    InvalidValue { key: String, value: String },
}

/// Configuration for the poll driver.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PollerConfig {
    /// Delay between the end of one poll and the start of the next.
    pub poll_interval_ms: u64,
    /// Market selected when the driver starts.
    pub selected_market: Option<MarketId>,
}

impl Default for PollerConfig {
    fn default() -> Self {
        Self {
            poll_interval_ms: 3_000,
            selected_market: None,
        }
    }
}

impl PollerConfig {
    /// Defaults overridden by any values present in the environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::default().with_overrides(|key| env::var(key).ok())
    }

    /// Apply overrides from a key lookup, then validate.
    pub fn with_overrides<F>(mut self, lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(raw) = lookup(ENV_POLL_INTERVAL_MS) {
            self.poll_interval_ms = parse_u64(ENV_POLL_INTERVAL_MS, &raw)?;
        }
        if let Some(raw) = lookup(ENV_SELECTED_MARKET) {
            self.selected_market = Some(MarketId::new(parse_u64(ENV_SELECTED_MARKET, &raw)?));
        }
        self.validate()?;
        Ok(self)
    }

    /// Parse from JSON; missing fields take their defaults.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json).map_err(|e| ConfigError::InvalidValue {
            key: "json".to_string(),
            value: e.to_string(),
        })?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.poll_interval_ms == 0 {
            return Err(ConfigError::ZeroInterval);
        }
        if self.poll_interval_ms < 500 {
            warn!(
                poll_interval_ms = self.poll_interval_ms,
                "Poll interval is very short"
            );
        }
        Ok(())
    }

    pub fn poll_interval(&self) -> Duration {
        Duration::from_millis(self.poll_interval_ms)
    }
}

fn parse_u64(key: &str, raw: &str) -> Result<u64, ConfigError> {
    raw.trim().parse().map_err(|_| ConfigError::InvalidValue {
        key: key.to_string(),
        value: raw.to_string(),
    })
}
