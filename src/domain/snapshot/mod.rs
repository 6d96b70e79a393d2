//! Snapshot domain - the per-run report and its persistence policy

mod snapshot_composer;
#[cfg(test)]
pub(crate) mod testing;

pub use snapshot_composer::SnapshotComposer;

use async_trait::async_trait;
use chrono::{DateTime, SecondsFormat, SubsecRound, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::domain::price::PriceResult;
use crate::shared::errors::AppError;

/// Timestamped prices for the reference asset and every tracked token.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Report {
    #[serde(with = "iso_millis")]
    updated_at: DateTime<Utc>,
    prices: BTreeMap<String, PriceResult>,
}

impl Report {
    /// The timestamp is kept at the millisecond precision it is persisted with.
    pub fn new(updated_at: DateTime<Utc>, prices: BTreeMap<String, PriceResult>) -> Self {
        Self {
            updated_at: updated_at.trunc_subsecs(3),
            prices,
        }
    }

    /// Every symbol marked with the same run-level error.
    pub fn fallback<I, S>(symbols: I, error: &str, updated_at: DateTime<Utc>) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let prices = symbols
            .into_iter()
            .map(|symbol| (symbol.into(), PriceResult::failed(error)))
            .collect();
        Self::new(updated_at, prices)
    }

    pub fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    pub fn prices(&self) -> &BTreeMap<String, PriceResult> {
        &self.prices
    }

    pub fn get(&self, symbol: &str) -> Option<&PriceResult> {
        self.prices.get(symbol)
    }

    pub fn error_count(&self) -> usize {
        self.prices.values().filter(|p| p.is_error()).count()
    }

    /// True when no entry carries an error; only such reports may become
    /// the last-good snapshot.
    pub fn is_fully_priced(&self) -> bool {
        self.error_count() == 0
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}

/// Durable home of the "current" and "last-good" snapshots.
#[async_trait]
pub trait SnapshotStore: Send + Sync {
    async fn write_current(&self, report: &Report) -> Result<(), AppError>;

    async fn write_last_good(&self, report: &Report) -> Result<(), AppError>;

    async fn load_last_good(&self) -> Result<Option<Report>, AppError>;
}

mod iso_millis {
    use super::*;
    use serde::{Deserializer, Serializer};

    pub fn serialize<S: Serializer>(ts: &DateTime<Utc>, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&ts.to_rfc3339_opts(SecondsFormat::Millis, true))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<DateTime<Utc>, D::Error> {
        let raw = String::deserialize(deserializer)?;
        DateTime::parse_from_rfc3339(&raw)
            .map(|ts| ts.with_timezone(&Utc))
            .map_err(serde::de::Error::custom)
    }
}
