//! Historical Volume Rollup Job
//!
//! One-shot computation of trailing 1/7/30-day volumes, run in the background
//! at startup. Its failure is logged and does not affect the poll job.

use chrono::Utc;
use tokio::task::JoinHandle;
use tracing::{error, info};

use crate::services::historical_volume::run_historical_rollup;
use crate::services::volume_service::VolumeService;

pub fn start_historical_volume_rollup_job(service: VolumeService) -> JoinHandle<()> {
    tokio::spawn(async move {
        info!("Running historical volume rollup");

        match run_historical_rollup(&service, Utc::now()).await {
            Ok(results) => info!(windows = results.len(), "Historical volume rollup complete"),
            Err(e) => error!(error = %e, "Historical volume rollup failed"),
        }
    })
}
