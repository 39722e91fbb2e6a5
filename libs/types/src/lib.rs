//! Types library for the market view engine
//!
//! Shared definitions for the data fed into the derivation pipeline by the
//! external market/order data source.
//!
//! # Modules
//! - `ids`: Identifiers (MarketId, TokenId)
//! - `numeric`: Decimal helpers and lenient numeric decoding
//! - `order`: Resting orders as delivered by the data source
//! - `market`: Market snapshots (token pair, last price, status)
//! - `errors`: Error taxonomy for data-source failures

// Public modules
pub mod ids;
pub mod numeric;
pub mod order;
pub mod market;
pub mod errors;

// Library version constant
pub const LIB_VERSION: &str = "1.0.0";
