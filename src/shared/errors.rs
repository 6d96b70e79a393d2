//! Error handling for the application

use thiserror::Error;

use crate::shared::types::Address;

/// Per-symbol pricing errors. These never abort a run; they are folded into
/// the report entry of the symbol they belong to.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum PriceError {
    #[error("Price feed unavailable: HTTP status {0}")]
    FeedUnavailable(u16),

    #[error("Price feed request failed: {0}")]
    FeedRequest(String),

    #[error("Price feed returned no pair data")]
    NoPairData,

    #[error("Price feed pair is missing usable fields: {0}")]
    MissingFields(String),

    #[error("Pool {pool} does not pair {target} with {quote}")]
    PairMismatch {
        pool: Address,
        target: Address,
        quote: Address,
    },

    #[error("RPC failure: {0}")]
    RpcFailure(String),

    #[error("Division by zero: {0}")]
    DivisionByZero(String),

    #[error("Invalid amount: {0}")]
    InvalidAmount(String),

    #[error("Reference rate unavailable")]
    ReferenceRateUnavailable,
}

/// General application error
#[derive(Error, Debug)]
pub enum AppError {
    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("Persistence error: {0}")]
    PersistenceError(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}
