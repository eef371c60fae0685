use chrono::Utc;
use dotenvy::dotenv;

use bridge_volume_tracker::services::formatter::format_currency;
use bridge_volume_tracker::services::historical_volume::run_historical_rollup;
use bridge_volume_tracker::services::volume_service::VolumeService;
use bridge_volume_tracker::{init_tracing, AppConfig};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenv().ok();
    init_tracing();

    let config = AppConfig::from_env()?;
    let service = VolumeService::from_config(&config);

    tracing::info!("Starting one-shot historical volume rollup...");

    let results = run_historical_rollup(&service, Utc::now()).await?;

    for volume in &results {
        println!(
            "{:<10} {:<6} {:>3}d  {:>24}  {:>20}",
            volume.chain,
            volume.token,
            volume.days,
            format_currency(volume.amount, Some(&volume.token)),
            format_currency(volume.amount_usd, None)
        );
    }

    tracing::info!("Computed {} rollup windows", results.len());

    Ok(())
}
