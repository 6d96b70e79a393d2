//! CLI arguments and their precedence over the config file
use clap::Parser;
use std::path::PathBuf;

use crate::shared::config::{SnapshotConfig, DEFAULT_CONFIG_PATH};

#[derive(Parser, Debug)]
#[command(name = "lpsnap")]
#[command(version, about = "Snapshot USD prices of pool-quoted tokens into JSON")]
pub struct Cli {
    /// Path to the TOML config file
    #[arg(long, default_value = DEFAULT_CONFIG_PATH)]
    pub config: PathBuf,

    /// RPC endpoint URL (overrides config)
    #[arg(long)]
    pub rpc_url: Option<String>,

    /// Reference pair feed URL (overrides config)
    #[arg(long)]
    pub feed_url: Option<String>,

    /// Directory for snapshot files (overrides config)
    #[arg(long)]
    pub out_dir: Option<PathBuf>,

    /// Print the report instead of writing snapshots
    #[arg(long)]
    pub dry_run: bool,
}

impl Cli {
    /// CLI > config file
    pub fn apply_overrides(&self, config: &mut SnapshotConfig) {
        if let Some(rpc_url) = &self.rpc_url {
            config.rpc.url = rpc_url.clone();
        }
        if let Some(feed_url) = &self.feed_url {
            config.feed.url = feed_url.clone();
        }
        if let Some(out_dir) = &self.out_dir {
            config.output.dir = out_dir.clone();
        }
    }
}
