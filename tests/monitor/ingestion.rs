use std::net::IpAddr;

use torrust_tracker_monitor::core::announcer;
use torrust_tracker_monitor::core::ingestion::Rejection;
use torrust_tracker_monitor::core::tracker::Tracker;
use torrust_tracker_monitor_primitives::status::TrackerStatus;
use torrust_tracker_monitor_test_helpers::configuration;
use url::Url;

use crate::common::fakes::{monitor, FixedResolver, RecordingTransport};

#[tokio::test]
async fn a_submitted_udp_tracker_that_answers_should_be_monitored_and_up() {
    let transport = RecordingTransport::answering(1800);
    let monitor = monitor(
        configuration::ephemeral(),
        FixedResolver::new(&[("tracker.example.com", "1.2.3.4")]),
        vec![],
        &transport,
    );

    let results = monitor.enqueue("udp://tracker.example.com:6969").await;
    assert!(results[0].1.is_ok());

    monitor.process_next_submission().await.unwrap().unwrap();

    let tracker = monitor.tracker("tracker.example.com").await.unwrap().unwrap();

    assert_eq!(tracker.url.as_str(), "udp://tracker.example.com:6969/announce");
    assert_eq!(tracker.status, TrackerStatus::Up);
    assert_eq!(tracker.interval, Some(1800));
    assert_eq!(tracker.historic, vec![1]);
    assert_eq!(tracker.ips, vec!["1.2.3.4".parse::<IpAddr>().unwrap()]);
    assert_eq!(transport.udp_calls(), vec![("tracker.example.com".to_string(), 6969)]);
}

#[tokio::test]
async fn a_tracker_sharing_an_ip_with_a_monitored_one_should_be_rejected_without_contacting_it() {
    let transport = RecordingTransport::answering(1800);
    let monitor = monitor(
        configuration::ephemeral(),
        FixedResolver::new(&[("tracker.example.com", "1.2.3.4")]),
        vec![],
        &transport,
    );

    monitor
        .database
        .save_tracker(Tracker::new(
            Url::parse("udp://other.example.com:6969/announce").unwrap(),
            vec!["1.2.3.4".parse().unwrap()],
            604_800,
        ))
        .await
        .unwrap();

    let results = monitor.enqueue("udp://tracker.example.com:6969").await;

    assert!(matches!(results[0].1, Err(Rejection::CurrentIpConflict { .. })));
    assert_eq!(transport.calls(), 0);
}

#[tokio::test]
async fn a_tracker_whose_host_denies_running_a_tracker_should_be_rejected_without_contacting_it() {
    let transport = RecordingTransport::answering(1800);
    let monitor = monitor(
        configuration::ephemeral(),
        FixedResolver::new(&[("tracker.example.com", "1.2.3.4")]),
        vec!["BITTORRENT".to_string()],
        &transport,
    );

    monitor.enqueue("udp://tracker.example.com:6969").await;
    let result = monitor.process_next_submission().await.unwrap();

    assert!(matches!(
        result,
        Err(Rejection::ProbeFailed {
            source: announcer::Error::Denied { .. }
        })
    ));
    assert_eq!(transport.calls(), 0);
    assert_eq!(monitor.tracker("tracker.example.com").await.unwrap(), None);
}

#[tokio::test]
async fn a_host_that_can_not_be_resolved_should_be_rejected() {
    let transport = RecordingTransport::answering(1800);
    let monitor = monitor(configuration::ephemeral(), FixedResolver::new(&[]), vec![], &transport);

    let results = monitor.enqueue("udp://unknown.example.com:6969").await;

    assert!(matches!(results[0].1, Err(Rejection::InvalidTracker { .. })));
    assert!(monitor.queue().is_empty());
}
