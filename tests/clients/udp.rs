use std::net::SocketAddr;
use std::time::Duration;

use torrust_tracker_monitor::shared::bit_torrent::tracker::udp::client::UdpTrackerClient;
use torrust_tracker_monitor::shared::bit_torrent::tracker::udp::Error;
use tracing::level_filters::LevelFilter;

use crate::common::logging::{tracing_stderr_init, INIT};
use crate::common::udp::{Behaviour, FakeUdpTracker};

fn client() -> UdpTrackerClient {
    INIT.call_once(|| {
        tracing_stderr_init(LevelFilter::ERROR);
    });

    UdpTrackerClient::new(Duration::from_secs(2))
}

#[tokio::test]
async fn it_should_complete_the_connect_and_announce_handshake() {
    let tracker = FakeUdpTracker::start(Behaviour::Announce { interval: 1800 }).await;

    let response = client().announce("127.0.0.1", tracker.addr.port()).await.unwrap();

    assert_eq!(response.interval, 1800);
    assert_eq!(response.leechers, 1);
    assert_eq!(response.seeders, 2);
    assert_eq!(response.peers, vec!["127.0.0.1:6881".parse::<SocketAddr>().unwrap()]);
}

#[tokio::test]
async fn it_should_fail_when_the_connect_response_is_truncated() {
    let tracker = FakeUdpTracker::start(Behaviour::TruncatedConnect).await;

    let err = client().announce("127.0.0.1", tracker.addr.port()).await.unwrap_err();

    assert!(matches!(err, Error::WrongResponseLength { .. }));
    assert_eq!(err.to_string(), "wrong response length");
}

#[tokio::test]
async fn it_should_fail_when_the_transaction_id_does_not_match() {
    let tracker = FakeUdpTracker::start(Behaviour::WrongTransactionId).await;

    let err = client().announce("127.0.0.1", tracker.addr.port()).await.unwrap_err();

    assert!(err.to_string().contains("mismatch"));
}

#[tokio::test]
async fn it_should_fail_with_the_message_of_the_tracker() {
    let tracker = FakeUdpTracker::start(Behaviour::Error("torrent not registered")).await;

    let err = client().announce("127.0.0.1", tracker.addr.port()).await.unwrap_err();

    assert!(matches!(err, Error::TrackerError { ref message } if message == "torrent not registered"));
}

#[tokio::test]
async fn it_should_time_out_when_the_tracker_does_not_answer() {
    let tracker = FakeUdpTracker::start(Behaviour::Silent).await;

    let err = UdpTrackerClient::new(Duration::from_millis(200))
        .announce("127.0.0.1", tracker.addr.port())
        .await
        .unwrap_err();

    assert!(matches!(err, Error::TimeoutWhileReceivingData { .. }));
}
