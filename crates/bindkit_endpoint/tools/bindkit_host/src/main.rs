use anyhow::{Context, Result};
use tracing::info;
use tracing_subscriber::EnvFilter;

use bindkit_host::config::Config;
use bindkit_host::harness;

#[tokio::main(flavor = "multi_thread")]
async fn main() -> Result<()> {
    let config = Config::from_args().context("parse configuration")?;

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(&config.log_filter))
        .init();

    info!(
        "host started endpoint={} workers={} rounds={} activate_early={}",
        config.endpoint_name, config.workers, config.rounds, config.activate_early
    );

    let report = harness::run(&config).await?;

    info!(
        "binds={} unbinds={} stale_unbinds={} handshake={:?} registrations={} final_state={}",
        report.binds,
        report.unbinds,
        report.stale_unbinds,
        report.handshake,
        report.registrations,
        report.final_state.label()
    );
    Ok(())
}
