//! Volume Poll Job
//!
//! Recomputes the bridge volume summary on a fixed delay and writes the grand
//! total to the display surface. Failed cycles are logged and the next cycle
//! runs on schedule.

use std::sync::Arc;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::Duration as TokioDuration;
use tracing::{error, info};

use crate::display::{CounterDisplay, COUNTER_ELEMENT_ID};
use crate::error::Result;
use crate::models::VolumeSummary;
use crate::services::volume_service::VolumeService;

/// Run one cycle and render its grand total
pub async fn poll_once(service: &VolumeService, display: &dyn CounterDisplay) -> Result<VolumeSummary> {
    let summary = service.update_volume().await?;
    display
        .render(COUNTER_ELEMENT_ID, &summary.total.formatted_amount)
        .await?;
    Ok(summary)
}

/// Start the volume poll job
///
/// The delay starts once a cycle has finished, so cycles never overlap. Flipping
/// `shutdown` to `true` (or dropping its sender) stops the job before the next
/// cycle.
pub fn start_volume_poll_job(
    service: VolumeService,
    display: Arc<dyn CounterDisplay>,
    poll_interval: TokioDuration,
    mut shutdown: watch::Receiver<bool>,
) -> JoinHandle<()> {
    tokio::spawn(async move {
        info!(
            poll_interval_secs = poll_interval.as_secs(),
            chains = service.chains().len(),
            "Volume poll job started"
        );

        loop {
            if *shutdown.borrow() {
                break;
            }

            if let Err(e) = poll_once(&service, display.as_ref()).await {
                error!(error = %e, "Volume update failed");
            }

            if wait_for_next_cycle(poll_interval, &mut shutdown).await {
                break;
            }
        }

        info!("Volume poll job stopped");
    })
}

/// Sleep out the full delay; returns `true` if shutdown was requested meanwhile.
/// A send that leaves the value `false` does not end the delay.
async fn wait_for_next_cycle(poll_interval: TokioDuration, shutdown: &mut watch::Receiver<bool>) -> bool {
    let delay = tokio::time::sleep(poll_interval);
    tokio::pin!(delay);

    loop {
        tokio::select! {
            _ = &mut delay => return false,
            changed = shutdown.changed() => {
                if changed.is_err() || *shutdown.borrow_and_update() {
                    return true;
                }
            }
        }
    }
}
