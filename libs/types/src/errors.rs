//! Error types for the market/order data source
//!
//! The derivation engine itself never fails. These errors describe what can
//! go wrong in the collaborator that fetches markets and orders, so the
//! surrounding shell can report them.

use thiserror::Error;

/// Failure while fetching data from the external source
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FeedError {
    /// The server answered with an internal error for a resource query
    #[error("Query error for {resource}")]
    Query { resource: String },

    /// The request was sent but no response came back
    #[error("Network error: {0}")]
    Network(String),

    /// The response could not be decoded
    #[error("Parse error: {0}")]
    Parse(String),

    /// The server answered with an unexpected status
    #[error("Unknown error: {status} - {message}")]
    Unknown { status: u16, message: String },
}

impl FeedError {
    /// Whether retrying on the next poll may succeed
    pub fn is_transient(&self) -> bool {
        matches!(self, FeedError::Network(_) | FeedError::Query { .. })
    }
}

impl From<serde_json::Error> for FeedError {
    fn from(err: serde_json::Error) -> Self {
        FeedError::Parse(err.to_string())
    }
}
