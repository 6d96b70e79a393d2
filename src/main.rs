use anyhow::{Context, Result};
use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

use lpsnap::{Cli, ConfigLoader, SnapshotService};

#[tokio::main]
async fn main() -> Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();
    let cli = Cli::parse();

    // Priority: CLI args > Config file
    let mut config = ConfigLoader::load(&cli.config)
        .with_context(|| format!("load {}", cli.config.display()))?;
    cli.apply_overrides(&mut config);
    config.validate().context("validate configuration")?;

    let service = SnapshotService::from_config(config);

    if cli.dry_run {
        let report = service.dry_run().await;
        println!("{}", report.to_json()?);
        return Ok(());
    }

    service.log_last_good().await;

    // Per-token errors still exit 0; only an aborted run is an error here.
    let report = service.execute().await.context("snapshot run aborted")?;
    info!(
        "✅ Snapshot complete: {} symbol(s), {} error(s)",
        report.prices().len(),
        report.error_count()
    );

    Ok(())
}
