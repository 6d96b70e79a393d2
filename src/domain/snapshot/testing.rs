//! In-memory fakes for composer and service tests

use async_trait::async_trait;
use num_bigint::BigUint;
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use super::{Report, SnapshotStore};
use crate::domain::pool::{PoolDataSource, ReserveSnapshot};
use crate::domain::price::UsdRateFeed;
use crate::shared::config::{
    FeedCfg, OutputCfg, ReferenceAssetCfg, RpcCfg, SnapshotConfig,
};
use crate::shared::errors::{AppError, PriceError};
use crate::shared::types::{Address, PoolLayout, QuoteAsset, TokenConfig};

pub const QUOTE: Address = Address([0xAA; 20]);
pub const TOKEN_A: Address = Address([0x01; 20]);
pub const TOKEN_B: Address = Address([0x02; 20]);
pub const POOL_A: Address = Address([0xA1; 20]);
pub const POOL_B: Address = Address([0xB1; 20]);

/// Whole tokens at 18 decimals.
pub fn units(whole: u64) -> BigUint {
    BigUint::from(whole) * BigUint::from(10u32).pow(18)
}

pub fn sample_config() -> SnapshotConfig {
    SnapshotConfig {
        rpc: RpcCfg {
            url: "http://localhost:8545".to_string(),
            chain_id: 56,
        },
        feed: FeedCfg {
            url: "http://localhost:9000/pair".to_string(),
        },
        reference_asset: ReferenceAssetCfg {
            symbol: "REF".to_string(),
        },
        quote_token: QuoteAsset {
            address: QUOTE,
            decimals: 18,
        },
        output: OutputCfg::default(),
        tokens: vec![
            TokenConfig {
                symbol: "AAA".to_string(),
                address: TOKEN_A,
                decimals: 18,
                pool: POOL_A,
                pool_layout: PoolLayout::PairTokens,
            },
            TokenConfig {
                symbol: "BBB".to_string(),
                address: TOKEN_B,
                decimals: 18,
                pool: POOL_B,
                pool_layout: PoolLayout::SplitTokens,
            },
        ],
    }
}

pub struct FakeFeed {
    result: Result<f64, PriceError>,
    pub calls: AtomicUsize,
}

impl FakeFeed {
    pub fn rate(rate: f64) -> Self {
        Self { result: Ok(rate), calls: AtomicUsize::new(0) }
    }

    pub fn failing(error: PriceError) -> Self {
        Self { result: Err(error), calls: AtomicUsize::new(0) }
    }
}

#[async_trait]
impl UsdRateFeed for FakeFeed {
    async fn fetch_reference_usd_rate(&self) -> Result<f64, PriceError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.result.clone()
    }
}

#[derive(Default)]
pub struct FakePools {
    pools: HashMap<Address, Result<ReserveSnapshot, PriceError>>,
    pub calls: AtomicUsize,
}

impl FakePools {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_pool(
        mut self,
        pool: Address,
        token0: Address,
        token1: Address,
        reserve0: BigUint,
        reserve1: BigUint,
    ) -> Self {
        self.pools.insert(
            pool,
            Ok(ReserveSnapshot { token0, token1, reserve0, reserve1 }),
        );
        self
    }

    pub fn with_failure(mut self, pool: Address, error: PriceError) -> Self {
        self.pools.insert(pool, Err(error));
        self
    }
}

#[async_trait]
impl PoolDataSource for FakePools {
    async fn read_pool(
        &self,
        pool: &Address,
        _layout: PoolLayout,
    ) -> Result<ReserveSnapshot, PriceError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.pools
            .get(pool)
            .cloned()
            .unwrap_or_else(|| Err(PriceError::RpcFailure(format!("unknown pool {}", pool))))
    }
}

#[derive(Default)]
pub struct MemoryStore {
    current: Mutex<Option<Report>>,
    last_good: Mutex<Option<Report>>,
    fail_current: bool,
    fail_last_good: bool,
}

impl MemoryStore {
    pub fn failing() -> Self {
        Self { fail_current: true, fail_last_good: true, ..Self::default() }
    }

    pub fn failing_last_good() -> Self {
        Self { fail_last_good: true, ..Self::default() }
    }

    pub fn current(&self) -> Option<Report> {
        self.current.lock().unwrap().clone()
    }

    pub fn last_good(&self) -> Option<Report> {
        self.last_good.lock().unwrap().clone()
    }

    fn check(fail: bool) -> Result<(), AppError> {
        if fail {
            Err(AppError::PersistenceError("read-only store".to_string()))
        } else {
            Ok(())
        }
    }
}

#[async_trait]
impl SnapshotStore for MemoryStore {
    async fn write_current(&self, report: &Report) -> Result<(), AppError> {
        Self::check(self.fail_current)?;
        *self.current.lock().unwrap() = Some(report.clone());
        Ok(())
    }

    async fn write_last_good(&self, report: &Report) -> Result<(), AppError> {
        Self::check(self.fail_last_good)?;
        *self.last_good.lock().unwrap() = Some(report.clone());
        Ok(())
    }

    async fn load_last_good(&self) -> Result<Option<Report>, AppError> {
        Ok(self.last_good())
    }
}
