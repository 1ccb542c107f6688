//! Headless search host for stdin/stdout JSON communication.
//!
//! Usage: `bt-search-host [CONFIG_PATH]`
//!
//! Loads the configuration and data directory, then reads `CommandEnvelope`
//! messages as newline-delimited JSON from stdin and writes one
//! `ResponseEnvelope` per command to stdout.
//!
//! All tracing/diagnostic output goes to stderr so that stdout remains a
//! clean JSON protocol channel.

use std::path::PathBuf;

use bt_search::HostConfig;
use bt_search::data_dir::load_data_dir;
use bt_search::host::stdio::run_stdio_bridge;
use bt_search_core::SearchOrchestrator;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Tracing goes to stderr only; stdout is reserved for the JSON protocol.
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let config_path = std::env::args_os().nth(1).map(PathBuf::from);
    let config = HostConfig::load(config_path.as_deref())
        .map_err(|e| anyhow::anyhow!("failed to load configuration: {e}"))?;

    tracing::info!(
        partitions = config.search.partitions.len(),
        batch_size = config.search.batch_size,
        data_dir = %config.store.data_dir.display(),
        "bt-search-host starting"
    );

    let store = load_data_dir(&config.store.data_dir, &config.search.partitions)
        .await
        .map_err(|e| anyhow::anyhow!("failed to load data directory: {e}"))?;
    let orchestrator = SearchOrchestrator::new(config.search, store);

    run_stdio_bridge(&orchestrator).await.map_err(|e| {
        tracing::error!(error = %e, "bt-search-host exited with error");
        anyhow::anyhow!("bt-search-host failed: {e}")
    })?;

    tracing::info!("bt-search-host shut down cleanly");
    Ok(())
}
