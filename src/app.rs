//! Torrust Tracker Monitor application.
//!
//! The application is a container for the monitor jobs. It's responsible for:
//!
//! - Queueing the initial submissions from the configuration.
//! - Starting the jobs.
//!
//! Jobs executed always:
//!
//! - Submission worker: it probes the queued candidates.
//! - Tracker checker: it re-checks the trackers whose interval elapsed.
//! - IP conflict audit: it reports trackers sharing IPs.
use std::sync::Arc;

use tokio::task::JoinHandle;
use torrust_tracker_monitor_configuration::Configuration;
use tracing::info;

use crate::bootstrap::jobs::{ip_conflict_audit, submission_worker, tracker_checker};
use crate::core;

pub async fn start(config: &Configuration, monitor: Arc<core::Monitor>) -> Vec<JoinHandle<()>> {
    let mut jobs: Vec<JoinHandle<()>> = Vec::new();

    // Queue the configured trackers, the already monitored ones are rejected
    if !config.ingestion.initial_submissions.is_empty() {
        let results = monitor.enqueue(&config.ingestion.initial_submissions.join(" ")).await;
        let queued = results.iter().filter(|(_, result)| result.is_ok()).count();
        info!("Queued {queued} of {} initial submissions", results.len());
    }

    jobs.push(submission_worker::start_job(&monitor));

    jobs.push(tracker_checker::start_job(&config.maintenance, &monitor));

    jobs.push(ip_conflict_audit::start_job(&config.maintenance, &monitor));

    jobs
}
