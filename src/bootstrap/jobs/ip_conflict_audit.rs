//! Job that runs a task on intervals to report monitored trackers sharing IPs.
//!
//! The audit is advisory: conflicts are logged as warnings and nothing is
//! changed.
use std::sync::Arc;

use tokio::task::JoinHandle;
use torrust_tracker_monitor_configuration::Maintenance;

use crate::core;

/// It starts a job for auditing IP conflicts every `audit_interval` seconds.
#[must_use]
pub fn start_job(config: &Maintenance, monitor: &Arc<core::Monitor>) -> JoinHandle<()> {
    let weak_monitor = std::sync::Arc::downgrade(monitor);
    let interval = config.audit_interval;

    tokio::spawn(async move {
        let interval = std::time::Duration::from_secs(interval);
        let mut interval = tokio::time::interval(interval);
        interval.tick().await;

        loop {
            tokio::select! {
                _ = tokio::signal::ctrl_c() => {
                    tracing::info!("Stopping IP conflict audit job..");
                    break;
                }
                _ = interval.tick() => {
                    if let Some(monitor) = weak_monitor.upgrade() {
                        let conflicts = monitor.audit_ip_conflicts().await;
                        tracing::debug!("IP conflict audit found {} conflicts", conflicts.len());
                    } else {
                        break;
                    }
                }
            }
        }
    })
}
