//! Pool domain - reserve reads and pair-price resolution

mod pool_resolver;

pub use pool_resolver::ReservePairResolver;

use async_trait::async_trait;
use num_bigint::BigUint;

use crate::shared::errors::PriceError;
use crate::shared::types::{Address, PoolLayout};

/// Token addresses and raw reserves read from one pool at one block.
#[derive(Debug, Clone, PartialEq)]
pub struct ReserveSnapshot {
    pub token0: Address,
    pub token1: Address,
    pub reserve0: BigUint,
    pub reserve1: BigUint,
}

/// Source of on-chain pool state.
///
/// Implementations must return the addresses and reserves from the same
/// chain state.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait PoolDataSource: Send + Sync {
    async fn read_pool(
        &self,
        pool: &Address,
        layout: PoolLayout,
    ) -> Result<ReserveSnapshot, PriceError>;
}
