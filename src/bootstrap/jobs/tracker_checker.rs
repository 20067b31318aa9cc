//! Job that runs a task on intervals to check the monitored trackers.
//!
//! Trackers are checked again when their own interval elapses, so the job
//! runs often (`check_interval`, 5 seconds by default) and only checks the
//! outdated ones.
//!
//! Refer to [`torrust-tracker-monitor-configuration documentation`](torrust_tracker_monitor_configuration) for more info about those options.
use std::sync::Arc;

use chrono::Utc;
use tokio::task::JoinHandle;
use torrust_tracker_monitor_configuration::Maintenance;

use crate::core;

/// It starts a job for checking the outdated trackers.
#[must_use]
pub fn start_job(config: &Maintenance, monitor: &Arc<core::Monitor>) -> JoinHandle<()> {
    let weak_monitor = std::sync::Arc::downgrade(monitor);
    let interval = config.check_interval;

    tokio::spawn(async move {
        let interval = std::time::Duration::from_secs(interval);
        let mut interval = tokio::time::interval(interval);
        interval.tick().await;

        loop {
            tokio::select! {
                _ = tokio::signal::ctrl_c() => {
                    tracing::info!("Stopping tracker checker job..");
                    break;
                }
                _ = interval.tick() => {
                    if let Some(monitor) = weak_monitor.upgrade() {
                        let start_time = Utc::now().time();
                        let checked = monitor.check_outdated_trackers().await;
                        if checked > 0 {
                            tracing::info!("Checked {checked} trackers in: {}ms", (Utc::now().time() - start_time).num_milliseconds());
                        }
                    } else {
                        break;
                    }
                }
            }
        }
    })
}
