//! The core `monitor` module contains the tracker monitoring logic which is
//! independent of the delivery layer.
//!
//! It contains the [`Monitor`] service and its dependencies. Higher layers,
//! like a web front end or the background [jobs](crate::bootstrap::jobs),
//! only talk to the [`Monitor`].
//!
//! ```text
//!                      Monitor
//!                         |
//!          +--------------+---------------+
//!          |                              |
//!      ingestion                     maintenance
//!  (submission queue)        (periodic checks and audit)
//!          |                              |
//!          +------------> Tracker <-------+
//!                  (health state machine)
//!                            |
//!                        Announcer
//!                (protocol fallback, BEP 34)
//!                            |
//!               UDP client, HTTP client, TXT resolver
//! ```
//!
//! # Table of contents
//!
//! - [Monitor](#monitor)
//! - [Submissions](#submissions)
//! - [Checks](#checks)
//! - [Collaborators](#collaborators)
//! - [Persistence](#persistence)
//!
//! # Monitor
//!
//! The `Monitor` is the main struct in this module. It owns the submission
//! queue, the two debug histories and the collaborators, and it exposes the
//! operations used by the delivery layer:
//!
//! - [`Monitor::enqueue`](crate::core::Monitor::enqueue): submits tracker URLs.
//! - [`Monitor::process_next_submission`](crate::core::Monitor::process_next_submission): probes the next queued candidate.
//! - [`Monitor::check_outdated_trackers`](crate::core::Monitor::check_outdated_trackers): re-checks trackers whose interval elapsed.
//! - [`Monitor::audit_ip_conflicts`](crate::core::Monitor::audit_ip_conflicts): reports trackers sharing IPs.
//!
//! # Submissions
//!
//! A submitted URL is rejected when:
//!
//! 1. Its host is an IP address.
//! 2. The same URL is already queued.
//! 3. The host is already monitored.
//! 4. The URL is not valid or the host can't be resolved.
//! 5. One of its IPs is a current IP of another monitored tracker.
//! 6. One of its IPs was recently used by another monitored tracker.
//! 7. The queue is full.
//!
//! Queued candidates are processed one at a time. Conflicts are checked again
//! and the candidate is probed. It's accepted if it answers with an interval
//! within the configured range.
//!
//! # Checks
//!
//! Monitored trackers are checked again when their interval elapses. See
//! [`Tracker::update_status`](crate::core::tracker::Tracker::update_status).
//!
//! # Collaborators
//!
//! Everything that leaves the process goes through a trait so it can be
//! replaced in tests:
//!
//! Trait | Production implementation
//! ---|---
//! [`HostResolver`] | [`TokioHostResolver`](crate::core::dns::TokioHostResolver)
//! [`TxtResolver`](crate::shared::bit_torrent::bep34::TxtResolver) | [`DnsTxtResolver`](crate::shared::bit_torrent::bep34::DnsTxtResolver)
//! [`Transport`](crate::core::announcer::Transport) | [`NetworkTransport`](crate::core::announcer::NetworkTransport)
//! [`GeoIp`] | [`NoGeoIp`](crate::core::geoip::NoGeoIp)
//! [`Database`] | [`Sqlite`](crate::core::databases::sqlite::Sqlite)
//!
//! # Persistence
//!
//! The store is always the source of truth. Every operation loads the
//! trackers it needs again. See [`databases`].
pub mod announcer;
pub mod conflicts;
pub mod databases;
pub mod debug_log;
pub mod dns;
pub mod error;
pub mod geoip;
pub mod ingestion;
pub mod maintenance;
pub mod services;
pub mod tracker;

use std::sync::Arc;

use torrust_tracker_monitor_configuration::Configuration;

use self::announcer::Announcer;
use self::databases::Database;
use self::debug_log::DebugHistory;
use self::dns::HostResolver;
use self::geoip::GeoIp;
use self::ingestion::SubmissionQueue;
use self::tracker::{CheckContext, Tracker};

/// The domain layer monitor service.
///
/// Its main responsibility is to keep the monitored trackers up to date.
pub struct Monitor {
    config: Arc<Configuration>,
    /// A database driver implementation: [`Sqlite3`](crate::core::databases::sqlite)
    pub database: Arc<Box<dyn Database>>,
    announcer: Announcer,
    resolver: Arc<dyn HostResolver>,
    geoip: Arc<dyn GeoIp>,
    queue: SubmissionQueue,
    checks_history: DebugHistory,
    submissions_history: DebugHistory,
}

impl Monitor {
    /// `Monitor` constructor.
    #[must_use]
    pub fn new(
        config: &Arc<Configuration>,
        database: Arc<Box<dyn Database>>,
        announcer: Announcer,
        resolver: Arc<dyn HostResolver>,
        geoip: Arc<dyn GeoIp>,
    ) -> Monitor {
        Monitor {
            config: config.clone(),
            database,
            announcer,
            resolver,
            geoip,
            queue: SubmissionQueue::new(config.ingestion.queue_capacity),
            checks_history: DebugHistory::new(config.ingestion.history_capacity),
            submissions_history: DebugHistory::new(config.ingestion.history_capacity),
        }
    }

    #[must_use]
    pub fn config(&self) -> &Configuration {
        &self.config
    }

    /// Attempts made by the periodic checks, newest first.
    #[must_use]
    pub fn checks_history(&self) -> &DebugHistory {
        &self.checks_history
    }

    /// Attempts made while probing submissions, newest first.
    #[must_use]
    pub fn submissions_history(&self) -> &DebugHistory {
        &self.submissions_history
    }

    #[must_use]
    pub fn queue(&self) -> &SubmissionQueue {
        &self.queue
    }

    /// It returns every monitored tracker.
    ///
    /// # Errors
    ///
    /// Will return a `database::Error` if unable to load the trackers.
    pub async fn trackers(&self) -> Result<Vec<Tracker>, databases::error::Error> {
        self.database.load_trackers().await
    }

    /// It returns the monitored tracker with that host.
    ///
    /// # Errors
    ///
    /// Will return a `database::Error` if unable to load the tracker.
    pub async fn tracker(&self, host: &str) -> Result<Option<Tracker>, databases::error::Error> {
        self.database.get_tracker(host.to_owned()).await
    }

    fn check_context(&self) -> CheckContext<'_> {
        CheckContext {
            announcer: &self.announcer,
            resolver: self.resolver.as_ref(),
            geoip: self.geoip.as_ref(),
            policy: &self.config.core,
            history: &self.checks_history,
        }
    }
}
