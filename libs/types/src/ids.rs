//! Identifier types for market view entities
//!
//! Markets and tokens are addressed by the small integer indices the
//! rollup assigns them. Both serialize transparently as plain integers so
//! they match the data source payloads. On input they also accept numeric
//! strings; unusable values decode to id 0.

use crate::numeric::lenient_u64;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Market identifier (index of a token pair)
///
/// Ordered so that per-market maps iterate deterministically.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MarketId(#[serde(deserialize_with = "lenient_u64")] u64);

impl MarketId {
    pub const fn new(id: u64) -> Self {
        Self(id)
    }

    /// Get the raw index
    pub const fn get(&self) -> u64 {
        self.0
    }
}

impl fmt::Display for MarketId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u64> for MarketId {
    fn from(id: u64) -> Self {
        Self(id)
    }
}

/// Token identifier (index into the token table)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TokenId(#[serde(deserialize_with = "lenient_u64")] u64);

impl TokenId {
    pub const fn new(id: u64) -> Self {
        Self(id)
    }

    pub const fn get(&self) -> u64 {
        self.0
    }
}

impl fmt::Display for TokenId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u64> for TokenId {
    fn from(id: u64) -> Self {
        Self(id)
    }
}
