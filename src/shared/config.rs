use serde::Deserialize;
use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};

use crate::shared::errors::AppError;
use crate::shared::types::{QuoteAsset, TokenConfig};

pub const DEFAULT_CONFIG_PATH: &str = "Config.toml";

#[derive(Debug, Clone, Deserialize)]
pub struct RpcCfg {
    pub url: String,
    pub chain_id: u64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct FeedCfg {
    pub url: String,
}

/// The asset the external feed prices in USD. Kept as a plain label: the
/// feed pair decides what it really is.
#[derive(Debug, Clone, Deserialize)]
pub struct ReferenceAssetCfg {
    pub symbol: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct OutputCfg {
    #[serde(default = "default_output_dir")]
    pub dir: PathBuf,
    #[serde(default = "default_current_file")]
    pub current_file: String,
    #[serde(default = "default_last_good_file")]
    pub last_good_file: String,
}

impl Default for OutputCfg {
    fn default() -> Self {
        Self {
            dir: default_output_dir(),
            current_file: default_current_file(),
            last_good_file: default_last_good_file(),
        }
    }
}

fn default_output_dir() -> PathBuf {
    PathBuf::from("data")
}

fn default_current_file() -> String {
    "prices.json".to_string()
}

fn default_last_good_file() -> String {
    "prices-last-good.json".to_string()
}

/// Immutable configuration for one snapshot run.
#[derive(Debug, Clone, Deserialize)]
pub struct SnapshotConfig {
    pub rpc: RpcCfg,
    pub feed: FeedCfg,
    pub reference_asset: ReferenceAssetCfg,
    pub quote_token: QuoteAsset,
    #[serde(default)]
    pub output: OutputCfg,
    pub tokens: Vec<TokenConfig>,
}

impl SnapshotConfig {
    pub fn from_toml_str(s: &str) -> Result<Self, AppError> {
        let config: Self = toml::from_str(s)
            .map_err(|e| AppError::ConfigError(format!("Failed to parse config file: {}", e)))?;
        config.validate()?;
        Ok(config)
    }

    /// Every symbol the report carries, reference asset first.
    pub fn symbols(&self) -> Vec<String> {
        std::iter::once(self.reference_asset.symbol.clone())
            .chain(self.tokens.iter().map(|t| t.symbol.clone()))
            .collect()
    }

    pub fn validate(&self) -> Result<(), AppError> {
        if self.rpc.url.trim().is_empty() {
            return Err(AppError::ConfigError("rpc.url must not be empty".to_string()));
        }
        if self.feed.url.trim().is_empty() {
            return Err(AppError::ConfigError("feed.url must not be empty".to_string()));
        }
        if self.reference_asset.symbol.trim().is_empty() {
            return Err(AppError::ConfigError(
                "reference_asset.symbol must not be empty".to_string(),
            ));
        }
        if self.tokens.is_empty() {
            return Err(AppError::ConfigError("at least one token must be configured".to_string()));
        }

        let mut seen = HashSet::new();
        seen.insert(self.reference_asset.symbol.as_str());
        for token in &self.tokens {
            if token.symbol.trim().is_empty() {
                return Err(AppError::ConfigError(format!(
                    "token {} has an empty symbol",
                    token.address
                )));
            }
            if !seen.insert(token.symbol.as_str()) {
                return Err(AppError::ConfigError(format!(
                    "duplicate symbol {}",
                    token.symbol
                )));
            }
            if token.address == self.quote_token.address {
                return Err(AppError::ConfigError(format!(
                    "token {} cannot be the quote token itself",
                    token.symbol
                )));
            }
        }

        Ok(())
    }
}

/// Загрузчик конфигурации
pub struct ConfigLoader;

impl ConfigLoader {
    pub fn load<P: AsRef<Path>>(path: P) -> Result<SnapshotConfig, AppError> {
        let path = path.as_ref();
        let config_content = fs::read_to_string(path).map_err(|e| {
            AppError::ConfigError(format!("Failed to read config file {}: {}", path.display(), e))
        })?;

        SnapshotConfig::from_toml_str(&config_content)
    }
}
