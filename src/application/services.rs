//! Application services and use cases

use chrono::Utc;
use std::sync::Arc;
use tracing::{error, info, warn};

use crate::domain::pool::PoolDataSource;
use crate::domain::price::UsdRateFeed;
use crate::domain::snapshot::{Report, SnapshotComposer, SnapshotStore};
use crate::infrastructure::blockchain::EvmRpcClient;
use crate::infrastructure::market_data::PairFeedClient;
use crate::infrastructure::storage::JsonFileStore;
use crate::shared::config::SnapshotConfig;
use crate::shared::errors::AppError;

/// One snapshot run, including the fallback document when the run aborts.
pub struct SnapshotService {
    composer: SnapshotComposer,
    store: Arc<dyn SnapshotStore>,
}

impl SnapshotService {
    /// Wire fresh network clients and the file store from configuration.
    pub fn from_config(config: SnapshotConfig) -> Self {
        let feed = Arc::new(PairFeedClient::new(config.feed.url.clone()));
        let pools = Arc::new(EvmRpcClient::new(config.rpc.url.clone()));
        let store = Arc::new(JsonFileStore::new(&config.output));
        Self::new(config, feed, pools, store)
    }

    pub fn new(
        config: SnapshotConfig,
        feed: Arc<dyn UsdRateFeed>,
        pools: Arc<dyn PoolDataSource>,
        store: Arc<dyn SnapshotStore>,
    ) -> Self {
        Self {
            composer: SnapshotComposer::new(config, feed, pools, store.clone()),
            store,
        }
    }

    /// Compose and persist. On failure the "current" snapshot is replaced by
    /// a fallback document before the error is returned.
    pub async fn execute(&self) -> Result<Report, AppError> {
        let config = self.composer.config();
        info!(
            "🚀 Snapshot run: chain {}, {} token(s) against {}",
            config.rpc.chain_id,
            config.tokens.len(),
            config.reference_asset.symbol
        );

        match self.composer.run().await {
            Ok(report) => Ok(report),
            Err(e) => {
                error!("❌ Snapshot run failed: {}", e);
                self.write_fallback(&e).await;
                Err(e)
            }
        }
    }

    /// Compose without persisting.
    pub async fn dry_run(&self) -> Report {
        self.composer.compose().await
    }

    pub async fn log_last_good(&self) {
        match self.store.load_last_good().await {
            Ok(Some(report)) => info!("Last good snapshot from {}", report.updated_at()),
            Ok(None) => info!("No last good snapshot yet"),
            Err(e) => warn!("⚠️ Could not read last good snapshot: {}", e),
        }
    }

    async fn write_fallback(&self, cause: &AppError) {
        let symbols = self.composer.config().symbols();
        let report = Report::fallback(symbols, &cause.to_string(), Utc::now());

        // Best effort: ignore write failure here, the run already failed.
        if let Err(write_err) = self.store.write_current(&report).await {
            warn!("⚠️ Fallback snapshot not written: {}", write_err);
        }
    }
}
