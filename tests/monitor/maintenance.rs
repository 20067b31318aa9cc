use std::time::Duration;

use torrust_tracker_monitor_primitives::status::TrackerStatus;
use torrust_tracker_monitor_test_helpers::configuration;

use crate::common::fakes::{monitor, FixedResolver, RecordingTransport};

#[tokio::test]
async fn a_monitored_tracker_that_stops_answering_should_be_down() {
    let transport = RecordingTransport::answering(1800);
    let monitor = monitor(
        configuration::ephemeral(),
        FixedResolver::new(&[("tracker.example.com", "1.2.3.4")]),
        vec![],
        &transport,
    );

    monitor.enqueue("udp://tracker.example.com:6969").await;
    monitor.process_next_submission().await.unwrap().unwrap();

    // Nothing to check until the interval elapses
    assert_eq!(monitor.check_outdated_trackers().await, 0);

    let mut tracker = monitor.tracker("tracker.example.com").await.unwrap().unwrap();
    tracker.last_checked -= Duration::from_secs(1801);
    monitor.database.save_tracker(tracker).await.unwrap();

    transport.set_udp_interval(None);

    assert_eq!(monitor.check_outdated_trackers().await, 1);

    let tracker = monitor.tracker("tracker.example.com").await.unwrap().unwrap();

    assert_eq!(tracker.status, TrackerStatus::Down);
    assert_eq!(tracker.historic, vec![1, 0]);
    assert!((tracker.uptime - 50.0).abs() < f64::EPSILON);
    assert_eq!(tracker.interval, Some(1800));

    // UDP on the URL port, then HTTPS and HTTP
    assert_eq!(monitor.checks_history().len(), 3);
    assert!(monitor
        .checks_history()
        .entries()
        .iter()
        .all(|entry| entry.status == TrackerStatus::Down));
}

#[tokio::test]
async fn the_audit_should_not_report_a_single_tracker() {
    let transport = RecordingTransport::answering(1800);
    let monitor = monitor(
        configuration::ephemeral(),
        FixedResolver::new(&[("tracker.example.com", "1.2.3.4")]),
        vec![],
        &transport,
    );

    monitor.enqueue("udp://tracker.example.com:6969").await;
    monitor.process_next_submission().await.unwrap().unwrap();

    assert!(monitor.audit_ip_conflicts().await.is_empty());
}
