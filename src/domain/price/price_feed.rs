//! Price feed interface

use async_trait::async_trait;

use crate::shared::errors::PriceError;

/// External source of the reference asset's USD rate.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UsdRateFeed: Send + Sync {
    /// USD per one whole unit of the reference asset.
    async fn fetch_reference_usd_rate(&self) -> Result<f64, PriceError>;
}
