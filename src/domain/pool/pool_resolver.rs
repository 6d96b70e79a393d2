//! Constant-product mid-price of a token in units of the quote asset

use num_traits::Zero;
use std::sync::Arc;
use tracing::debug;

use super::{PoolDataSource, ReserveSnapshot};
use crate::math::scaled_to_float;
use crate::shared::errors::PriceError;
use crate::shared::types::{Address, QuoteAsset, TokenConfig};

/// Resolves token -> quote exchange rates from pool reserves.
///
/// The rate is the ratio of pooled amounts and ignores fees and slippage, so
/// it is a reference price, not an execution price.
pub struct ReservePairResolver {
    source: Arc<dyn PoolDataSource>,
}

impl ReservePairResolver {
    pub fn new(source: Arc<dyn PoolDataSource>) -> Self {
        Self { source }
    }

    /// Price of one whole `token` in whole units of `quote`.
    pub async fn resolve(
        &self,
        token: &TokenConfig,
        quote: &QuoteAsset,
    ) -> Result<f64, PriceError> {
        let snapshot = self.source.read_pool(&token.pool, token.pool_layout).await?;
        let rate = rate_from_snapshot(
            &snapshot,
            &token.pool,
            &token.address,
            token.decimals,
            &quote.address,
            quote.decimals,
        )?;

        debug!(symbol = %token.symbol, pool = %token.pool, rate, "resolved pool rate");
        Ok(rate)
    }
}

/// Orient the snapshot around `target`/`quote` and divide the scaled reserves.
pub fn rate_from_snapshot(
    snapshot: &ReserveSnapshot,
    pool: &Address,
    target: &Address,
    target_decimals: u8,
    quote: &Address,
    quote_decimals: u8,
) -> Result<f64, PriceError> {
    let (target_reserve, quote_reserve) =
        if snapshot.token0 == *target && snapshot.token1 == *quote {
            (&snapshot.reserve0, &snapshot.reserve1)
        } else if snapshot.token0 == *quote && snapshot.token1 == *target {
            (&snapshot.reserve1, &snapshot.reserve0)
        } else {
            return Err(PriceError::PairMismatch {
                pool: *pool,
                target: *target,
                quote: *quote,
            });
        };

    if target_reserve.is_zero() || quote_reserve.is_zero() {
        return Err(PriceError::DivisionByZero(format!("pool {} has an empty reserve", pool)));
    }

    let target_amount = scaled_to_float(target_reserve, target_decimals)?;
    let quote_amount = scaled_to_float(quote_reserve, quote_decimals)?;
    let rate = quote_amount / target_amount;

    if !rate.is_finite() || rate <= 0.0 {
        return Err(PriceError::DivisionByZero(format!(
            "pool {} yields an undefined rate ({} / {})",
            pool, quote_amount, target_amount
        )));
    }

    Ok(rate)
}
