//! Periodic maintenance of the monitored trackers.
//!
//! - [`Monitor::check_outdated_trackers`] re-checks the trackers whose
//!   interval has elapsed, one at a time, and deletes the ones marked for
//!   deletion.
//! - [`Monitor::audit_ip_conflicts`] reports monitored trackers sharing IPs.
//!   It's advisory, nothing is changed.
//!
//! Failures are logged and never stop the loops calling these functions.
use torrust_tracker_monitor_clock::clock::Time;
use tracing::{debug, info, warn};

use crate::core::conflicts::{Conflict, IpIndex};
use crate::core::Monitor;
use crate::CurrentClock;

impl Monitor {
    /// Checks every tracker whose last check is older than its interval.
    ///
    /// It returns the number of checked trackers.
    pub async fn check_outdated_trackers(&self) -> usize {
        let trackers = match self.database.load_trackers().await {
            Ok(trackers) => trackers,
            Err(err) => {
                warn!("Unable to load the trackers to check: {err}");
                return 0;
            }
        };

        let now = CurrentClock::now();
        let dead_tracker_interval = self.config.core.dead_tracker_interval;

        let outdated: Vec<_> = trackers
            .into_iter()
            .filter(|tracker| tracker.needs_check(now, dead_tracker_interval))
            .collect();

        let checked = outdated.len();

        for mut tracker in outdated {
            debug!("Checking {}", tracker.url);

            tracker.update_status(&self.check_context()).await;

            if tracker.to_be_deleted {
                match self.database.remove_tracker(tracker.host.clone()).await {
                    Ok(_) => info!("Deleted {}", tracker.host),
                    Err(err) => warn!("Unable to delete {}: {err}", tracker.host),
                }
            } else if let Err(err) = self.database.save_tracker(tracker.clone()).await {
                warn!("Unable to save {}: {err}", tracker.host);
            }
        }

        checked
    }

    /// Logs every IP shared by two monitored trackers, as a current IP of
    /// both or as a current IP of one and a recent IP of the other.
    pub async fn audit_ip_conflicts(&self) -> Vec<Conflict> {
        let trackers = match self.database.load_trackers().await {
            Ok(trackers) => trackers,
            Err(err) => {
                warn!("Unable to load the trackers to audit: {err}");
                return vec![];
            }
        };

        let conflicts = IpIndex::build(&trackers).audit();

        for conflict in &conflicts {
            warn!("IP conflict: {conflict}");
        }

        conflicts
    }
}

#[cfg(test)]
mod tests {
    use std::net::IpAddr;
    use std::time::Duration;

    use futures::future;
    use torrust_tracker_monitor_clock::clock::stopped::Stopped as _;
    use torrust_tracker_monitor_clock::clock::Stopped;
    use torrust_tracker_monitor_primitives::status::TrackerStatus;
    use torrust_tracker_monitor_test_helpers::configuration;
    use url::Url;

    use crate::core::announcer::MockTransport;
    use crate::core::conflicts::Conflict;
    use crate::core::dns::MockHostResolver;
    use crate::core::test_support::monitor;
    use crate::core::tracker::Tracker;
    use crate::shared::bit_torrent::tracker::udp;

    const NOW: u64 = 1_700_000_000;

    fn ip(ip: &str) -> IpAddr {
        ip.parse().unwrap()
    }

    fn tracker(host: &str, ip_address: &str, last_checked: u64) -> Tracker {
        let mut tracker = Tracker::new(
            Url::parse(&format!("udp://{host}:6969/announce")).unwrap(),
            vec![ip(ip_address)],
            604_800,
        );
        tracker.interval = Some(1800);
        tracker.last_checked = Duration::from_secs(last_checked);
        tracker
    }

    fn resolver() -> MockHostResolver {
        let mut resolver = MockHostResolver::new();
        resolver
            .expect_resolve()
            .returning(|_| Box::pin(future::ready(Ok(vec!["1.2.3.4".parse().unwrap()]))));
        resolver
    }

    #[tokio::test]
    async fn it_should_only_check_the_trackers_whose_interval_elapsed() {
        Stopped::local_set(&Duration::from_secs(NOW));

        let mut transport = MockTransport::new();
        transport.expect_announce_udp().times(1).returning(|_, _| {
            Box::pin(future::ready(Ok(udp::AnnounceResponse {
                interval: 1800,
                leechers: 0,
                seeders: 0,
                peers: vec![],
            })))
        });

        let monitor = monitor(configuration::ephemeral(), transport, resolver());
        monitor
            .database
            .save_tracker(tracker("outdated.example.com", "1.2.3.4", NOW - 1801))
            .await
            .unwrap();
        monitor
            .database
            .save_tracker(tracker("fresh.example.com", "5.6.7.8", NOW - 60))
            .await
            .unwrap();

        assert_eq!(monitor.check_outdated_trackers().await, 1);

        let checked = monitor.tracker("outdated.example.com").await.unwrap().unwrap();
        assert_eq!(checked.status, TrackerStatus::Up);
        assert_eq!(checked.last_checked, Duration::from_secs(NOW));
        assert_eq!(monitor.checks_history().len(), 1);

        let untouched = monitor.tracker("fresh.example.com").await.unwrap().unwrap();
        assert!(untouched.historic.is_empty());
    }

    #[tokio::test]
    async fn it_should_delete_the_trackers_down_for_too_long() {
        Stopped::local_set(&Duration::from_secs(NOW));

        let config = configuration::ephemeral();
        let max_downtime = config.core.max_downtime;

        let mut transport = MockTransport::new();
        transport.expect_announce_udp().never();
        transport.expect_announce_http().never();
        let mut resolver = MockHostResolver::new();
        resolver.expect_resolve().never();

        let monitor = monitor(config, transport, resolver);

        let mut dead = tracker("dead.example.com", "1.2.3.4", NOW - 1801);
        dead.last_uptime = Duration::from_secs(NOW - (max_downtime + 1));
        monitor.database.save_tracker(dead).await.unwrap();

        monitor.check_outdated_trackers().await;

        assert_eq!(monitor.tracker("dead.example.com").await.unwrap(), None);
    }

    #[tokio::test]
    async fn the_audit_should_report_trackers_sharing_an_ip() {
        let monitor = monitor(configuration::ephemeral(), MockTransport::new(), MockHostResolver::new());
        monitor
            .database
            .save_tracker(tracker("a.example.com", "1.2.3.4", NOW))
            .await
            .unwrap();
        monitor
            .database
            .save_tracker(tracker("b.example.com", "1.2.3.4", NOW))
            .await
            .unwrap();

        let conflicts = monitor.audit_ip_conflicts().await;

        assert!(conflicts.contains(&Conflict::SharedCurrentIp {
            ip: ip("1.2.3.4"),
            hosts: vec!["a.example.com".to_string(), "b.example.com".to_string()],
        }));
    }
}
