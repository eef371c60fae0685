use std::sync::Arc;
use tokio::sync::watch;
use tokio::time::Duration as TokioDuration;

use bridge_volume_tracker::display::{CounterDisplay, FileDisplay, LogDisplay};
use bridge_volume_tracker::jobs::historical_volume_rollup::start_historical_volume_rollup_job;
use bridge_volume_tracker::jobs::volume_poll::start_volume_poll_job;
use bridge_volume_tracker::services::volume_service::VolumeService;
use bridge_volume_tracker::{init_tracing, AppConfig};

#[tokio::main]
async fn main() {
    // Load environment variables (before tracing so RUST_LOG in .env applies)
    dotenvy::dotenv().ok();

    init_tracing();

    let config = match AppConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            tracing::error!("Invalid configuration: {}", e);
            std::process::exit(1);
        }
    };

    tracing::info!(
        chains = ?config.chains,
        tokens = config.catalog.enabled_tokens().count(),
        "Starting bridge volume tracker"
    );

    let service = VolumeService::from_config(&config);

    let display: Arc<dyn CounterDisplay> = match &config.display_path {
        Some(path) => {
            tracing::info!("Writing counter to {}", path.display());
            Arc::new(FileDisplay::new(path.clone()))
        }
        None => Arc::new(LogDisplay),
    };

    if config.historical_rollup_enabled {
        start_historical_volume_rollup_job(service.clone());
    }

    let (shutdown_tx, shutdown_rx) = watch::channel(false);
    let poll_job = start_volume_poll_job(
        service,
        display,
        TokioDuration::from_secs(config.poll_interval_secs),
        shutdown_rx,
    );

    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
    }

    tracing::info!("Shutdown signal received, stopping volume poll job");
    let _ = shutdown_tx.send(true);

    if let Err(e) = poll_job.await {
        tracing::error!("Volume poll job panicked: {}", e);
    }
}
