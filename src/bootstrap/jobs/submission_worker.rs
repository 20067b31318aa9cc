//! Job that processes the queued submissions.
//!
//! There is only one worker, so candidates are probed one at a time in the
//! order they were submitted.
use std::sync::Arc;

use tokio::task::JoinHandle;

use crate::core;

/// It starts the submission worker.
#[must_use]
pub fn start_job(monitor: &Arc<core::Monitor>) -> JoinHandle<()> {
    let weak_monitor = std::sync::Arc::downgrade(monitor);

    tokio::spawn(async move {
        loop {
            let Some(monitor) = weak_monitor.upgrade() else {
                break;
            };

            tokio::select! {
                _ = tokio::signal::ctrl_c() => {
                    tracing::info!("Stopping submission worker job..");
                    break;
                }
                processed = monitor.process_next_submission() => {
                    if processed.is_none() {
                        break;
                    }
                }
            }
        }
    })
}
