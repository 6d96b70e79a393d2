//! Price domain - per-symbol results and the reference USD feed

mod price_feed;

pub use price_feed::UsdRateFeed;
#[cfg(test)]
pub use price_feed::MockUsdRateFeed;

use serde::{Deserialize, Serialize};

use crate::math::to_fixed_point;
use crate::shared::errors::PriceError;

/// Outcome of pricing one symbol: either a USD value or an error, never both.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PriceResult {
    price_in_usd_float: Option<f64>,
    #[serde(rename = "priceInFixedPoint18")]
    price_in_fixed_point_18: Option<String>,
    error: Option<String>,
}

impl PriceResult {
    /// Placeholder for a symbol that has not been priced yet.
    pub fn pending() -> Self {
        Self::failed("not priced")
    }

    /// Build a priced entry. A value with no fixed-point form (negative or
    /// non-finite) becomes an error entry instead.
    pub fn priced(usd: f64) -> Self {
        match to_fixed_point(usd) {
            Ok(fixed) => Self {
                price_in_usd_float: Some(usd),
                price_in_fixed_point_18: Some(fixed),
                error: None,
            },
            Err(e) => Self::failed(e),
        }
    }

    pub fn failed(error: impl ToString) -> Self {
        Self {
            price_in_usd_float: None,
            price_in_fixed_point_18: None,
            error: Some(error.to_string()),
        }
    }

    pub fn from_result(result: Result<f64, PriceError>) -> Self {
        match result {
            Ok(usd) => Self::priced(usd),
            Err(e) => Self::failed(e),
        }
    }

    pub fn usd(&self) -> Option<f64> {
        self.price_in_usd_float
    }

    pub fn fixed_point(&self) -> Option<&str> {
        self.price_in_fixed_point_18.as_deref()
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn is_error(&self) -> bool {
        self.error.is_some()
    }
}
