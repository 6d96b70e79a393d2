//! Composes the per-run report and applies the last-good policy

use chrono::Utc;
use futures::future::join_all;
use std::collections::BTreeMap;
use std::sync::Arc;
use tracing::{info, warn};

use super::{Report, SnapshotStore};
use crate::domain::pool::{PoolDataSource, ReservePairResolver};
use crate::domain::price::{PriceResult, UsdRateFeed};
use crate::shared::config::SnapshotConfig;
use crate::shared::errors::{AppError, PriceError};

pub struct SnapshotComposer {
    config: SnapshotConfig,
    feed: Arc<dyn UsdRateFeed>,
    resolver: ReservePairResolver,
    store: Arc<dyn SnapshotStore>,
}

impl SnapshotComposer {
    pub fn new(
        config: SnapshotConfig,
        feed: Arc<dyn UsdRateFeed>,
        pools: Arc<dyn PoolDataSource>,
        store: Arc<dyn SnapshotStore>,
    ) -> Self {
        Self {
            config,
            feed,
            resolver: ReservePairResolver::new(pools),
            store,
        }
    }

    pub fn config(&self) -> &SnapshotConfig {
        &self.config
    }

    /// Compose a report and persist it.
    ///
    /// Per-symbol failures live inside the report; an `Err` here means the
    /// snapshot could not be written.
    pub async fn run(&self) -> Result<Report, AppError> {
        let report = self.compose().await;
        self.persist(&report).await?;
        Ok(report)
    }

    /// Price every configured symbol without touching storage.
    pub async fn compose(&self) -> Report {
        let reference_symbol = &self.config.reference_asset.symbol;
        let mut prices: BTreeMap<String, PriceResult> = self
            .config
            .symbols()
            .into_iter()
            .map(|symbol| (symbol, PriceResult::pending()))
            .collect();

        let fetched = self.feed.fetch_reference_usd_rate().await;
        let reference_rate = match fetched.and_then(usable_rate) {
            Ok(rate) => {
                info!("✅ {} reference rate: {} USD", reference_symbol, rate);
                prices.insert(reference_symbol.clone(), PriceResult::priced(rate));
                Some(rate)
            }
            Err(e) => {
                warn!("❌ {} reference rate unavailable: {}", reference_symbol, e);
                prices.insert(reference_symbol.clone(), PriceResult::failed(e));
                None
            }
        };

        match reference_rate {
            None => {
                for token in &self.config.tokens {
                    prices.insert(
                        token.symbol.clone(),
                        PriceResult::failed(PriceError::ReferenceRateUnavailable),
                    );
                }
            }
            Some(rate) => {
                let quote = &self.config.quote_token;
                let resolutions = self.config.tokens.iter().map(|token| async move {
                    let usd = self
                        .resolver
                        .resolve(token, quote)
                        .await
                        .map(|pool_rate| pool_rate * rate);
                    (token.symbol.clone(), usd)
                });

                for (symbol, usd) in join_all(resolutions).await {
                    match &usd {
                        Ok(value) => info!("✅ {}: {} USD", symbol, value),
                        Err(e) => warn!("⚠️ {}: {}", symbol, e),
                    }
                    prices.insert(symbol, PriceResult::from_result(usd));
                }
            }
        }

        Report::new(Utc::now(), prices)
    }

    /// "current" always; "last-good" only for a fully priced report.
    pub async fn persist(&self, report: &Report) -> Result<(), AppError> {
        self.store.write_current(report).await?;

        if report.is_fully_priced() {
            self.store.write_last_good(report).await?;
            info!("💾 Snapshot written (current + last-good)");
        } else {
            warn!(
                "💾 Snapshot written with {} error(s); last-good left untouched",
                report.error_count()
            );
        }

        Ok(())
    }
}

fn usable_rate(rate: f64) -> Result<f64, PriceError> {
    if rate.is_finite() && rate > 0.0 {
        Ok(rate)
    } else {
        Err(PriceError::InvalidAmount(format!(
            "reference rate {} is not a positive price",
            rate
        )))
    }
}
