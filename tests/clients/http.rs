use axum::http::StatusCode;
use torrust_tracker_monitor::shared::bit_torrent::tracker::http::client::Client;
use torrust_tracker_monitor::shared::bit_torrent::tracker::http::Error;
use torrust_tracker_monitor_configuration::Probe;
use torrust_tracker_monitor_primitives::scheme::Scheme;

use crate::common::fixtures::{announce_body, body_without_peers, failure_body};
use crate::common::http::FakeHttpTracker;

fn client() -> Client {
    Client::new(&Probe::default()).unwrap()
}

#[tokio::test]
async fn it_should_announce_to_the_announce_path() {
    let tracker = FakeHttpTracker::start(StatusCode::OK, announce_body(1800)).await;

    let (url, announce) = client().announce(&tracker.url("/some/other/path"), Scheme::Http).await.unwrap();

    assert_eq!(url, tracker.url("/announce"));
    assert_eq!(announce.interval, Some(1800));
    assert!(announce.response.contains_key("peers"));

    let query = tracker.last_query().unwrap();
    assert!(query.starts_with("info_hash="));
    assert!(query.contains("compact=1"));
    assert!(query.contains("left=0"));
}

#[tokio::test]
async fn it_should_fail_when_the_status_is_not_ok() {
    let tracker = FakeHttpTracker::start(StatusCode::NOT_FOUND, announce_body(1800)).await;

    let err = client().announce(&tracker.url("/announce"), Scheme::Http).await.unwrap_err();

    assert!(matches!(err, Error::UnexpectedStatus { status: 404 }));
}

#[tokio::test]
async fn it_should_fail_when_the_tracker_sends_a_failure_reason() {
    let tracker = FakeHttpTracker::start(StatusCode::OK, failure_body("unregistered torrent")).await;

    let err = client().announce(&tracker.url("/announce"), Scheme::Http).await.unwrap_err();

    assert!(matches!(err, Error::TrackerFailure { ref reason } if reason == "unregistered torrent"));
}

#[tokio::test]
async fn it_should_fail_when_the_response_has_no_peers() {
    let tracker = FakeHttpTracker::start(StatusCode::OK, body_without_peers()).await;

    let err = client().announce(&tracker.url("/announce"), Scheme::Http).await.unwrap_err();

    assert!(matches!(err, Error::MissingPeers));
}

#[tokio::test]
async fn it_should_fail_when_the_body_is_empty() {
    let tracker = FakeHttpTracker::start(StatusCode::OK, vec![]).await;

    let err = client().announce(&tracker.url("/announce"), Scheme::Http).await.unwrap_err();

    assert!(matches!(err, Error::EmptyResponse));
}

#[tokio::test]
async fn it_should_stop_reading_responses_larger_than_the_limit() {
    let tracker = FakeHttpTracker::start(StatusCode::OK, announce_body(1800)).await;

    let probe = Probe {
        max_response_size: 8,
        ..Probe::default()
    };

    let err = Client::new(&probe)
        .unwrap()
        .announce(&tracker.url("/announce"), Scheme::Http)
        .await
        .unwrap_err();

    assert!(matches!(err, Error::ResponseTooLarge));
}
