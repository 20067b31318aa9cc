//! The submission pipeline.
//!
//! Submitted URLs go through cheap checks first (no network traffic apart
//! from resolving the host) and wait in a bounded queue. A single consumer
//! probes the queued candidates one at a time and stores the ones that
//! answer with an acceptable interval.
//!
//! Every rejection is a [`Rejection`]. Submitting never fails in any other
//! way.
use std::net::IpAddr;
use std::time::Duration;

use dashmap::DashSet;
use thiserror::Error;
use tokio::sync::mpsc::error::TrySendError;
use tokio::sync::{mpsc, Mutex};
use torrust_tracker_monitor_clock::clock::Time;
use torrust_tracker_monitor_primitives::status::TrackerStatus;
use tracing::{debug, info, warn};
use url::Url;

use crate::core::conflicts::IpIndex;
use crate::core::databases;
use crate::core::error::ErrorKind;
use crate::core::tracker::{self, has_ip_literal_host, normalize_url, Tracker};
use crate::core::{announcer, Monitor};
use crate::CurrentClock;

#[derive(Debug, Clone, Error)]
pub enum Rejection {
    #[error("{url}: IP addresses are not allowed as tracker hosts, submit the domain name")]
    IpLiteralHost { url: String },

    #[error("{url} is already queued")]
    AlreadyQueued { url: String },

    #[error("{host} is already monitored")]
    AlreadyTracked { host: String },

    #[error("invalid tracker: {source}")]
    InvalidTracker { source: tracker::Error },

    #[error("{host} resolves to {ip}, a current IP of {other}")]
    CurrentIpConflict { host: String, ip: IpAddr, other: String },

    #[error("{host} resolves to {ip}, recently used by {other}")]
    RecentIpConflict { host: String, ip: IpAddr, other: String },

    #[error("the submission queue is full, try again later")]
    QueueFull,

    #[error("{source}")]
    ProbeFailed { source: announcer::Error },

    #[error("{url}: the interval {interval:?} is not between {min}s and {max}s")]
    IntervalOutOfRange {
        url: String,
        interval: Option<u64>,
        min: u64,
        max: u64,
    },

    #[error("{source}")]
    Database { source: databases::error::Error },
}

impl Rejection {
    #[must_use]
    pub fn kind(&self) -> ErrorKind {
        match self {
            Rejection::InvalidTracker { source } => source.kind(),
            Rejection::ProbeFailed { source } => source.kind(),
            Rejection::QueueFull | Rejection::Database { .. } => ErrorKind::Resource,
            Rejection::IpLiteralHost { .. }
            | Rejection::AlreadyQueued { .. }
            | Rejection::AlreadyTracked { .. }
            | Rejection::CurrentIpConflict { .. }
            | Rejection::RecentIpConflict { .. }
            | Rejection::IntervalOutOfRange { .. } => ErrorKind::Validation,
        }
    }
}

impl From<tracker::Error> for Rejection {
    fn from(source: tracker::Error) -> Self {
        Rejection::InvalidTracker { source }
    }
}

impl From<databases::error::Error> for Rejection {
    fn from(source: databases::error::Error) -> Self {
        Rejection::Database { source }
    }
}

/// Bounded queue of candidates plus the URLs waiting in it.
///
/// A URL stays pending from the moment it's queued until its candidate has
/// been processed.
#[derive(Debug)]
pub struct SubmissionQueue {
    sender: mpsc::Sender<Tracker>,
    receiver: Mutex<mpsc::Receiver<Tracker>>,
    pending: DashSet<String>,
}

impl SubmissionQueue {
    #[must_use]
    pub fn new(capacity: usize) -> Self {
        let (sender, receiver) = mpsc::channel(capacity.max(1));

        Self {
            sender,
            receiver: Mutex::new(receiver),
            pending: DashSet::new(),
        }
    }

    #[must_use]
    pub fn is_pending(&self, url: &str) -> bool {
        self.pending.contains(url)
    }

    /// Number of URLs queued or being processed.
    #[must_use]
    pub fn len(&self) -> usize {
        self.pending.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    fn push(&self, candidate: Tracker) -> Result<(), Rejection> {
        let url = candidate.url.to_string();

        if !self.pending.insert(url.clone()) {
            return Err(Rejection::AlreadyQueued { url });
        }

        match self.sender.try_send(candidate) {
            Ok(()) => Ok(()),
            Err(TrySendError::Full(_) | TrySendError::Closed(_)) => {
                self.pending.remove(&url);
                Err(Rejection::QueueFull)
            }
        }
    }

    async fn pop(&self) -> Option<Tracker> {
        self.receiver.lock().await.recv().await
    }

    fn done(&self, url: &Url) {
        self.pending.remove(url.as_str());
    }
}

impl Monitor {
    /// Submits every URL in `text`. URLs are separated by whitespace.
    ///
    /// It returns the result of each submission, in order.
    pub async fn enqueue(&self, text: &str) -> Vec<(String, Result<(), Rejection>)> {
        let mut results = vec![];

        for url in text.split_whitespace().map(str::to_lowercase) {
            let result = self.submit(&url).await;

            match &result {
                Ok(()) => info!("{url} queued"),
                Err(rejection) => warn!("{url} rejected: {rejection}"),
            }

            results.push((url, result));
        }

        results
    }

    /// Validates one URL and queues its candidate.
    ///
    /// # Errors
    ///
    /// Will return a [`Rejection`] if the URL is not acceptable or the queue
    /// is full.
    pub async fn submit(&self, raw: &str) -> Result<(), Rejection> {
        let url = normalize_url(raw)?;

        if has_ip_literal_host(&url) {
            return Err(Rejection::IpLiteralHost { url: url.to_string() });
        }

        if self.queue.is_pending(url.as_str()) {
            return Err(Rejection::AlreadyQueued { url: url.to_string() });
        }

        let host = url.host_str().unwrap_or_default().to_owned();

        if self.database.get_tracker(host.clone()).await?.is_some() {
            return Err(Rejection::AlreadyTracked { host });
        }

        let candidate = Tracker::from_url(raw, self.resolver.as_ref(), self.config.core.recent_ip_ttl).await?;

        self.check_ip_conflicts(&candidate).await?;

        self.queue.push(candidate)
    }

    /// Waits for the next queued candidate and processes it.
    ///
    /// It returns `None` when the queue is closed.
    pub async fn process_next_submission(&self) -> Option<Result<Tracker, Rejection>> {
        let candidate = self.queue.pop().await?;

        let url = candidate.url.clone();

        let result = self.process_candidate(candidate).await;

        match &result {
            Ok(tracker) => info!("{} added, interval {:?}s", tracker.url, tracker.interval),
            Err(rejection) => warn!("{url} rejected: {rejection}"),
        }

        self.queue.done(&url);

        Some(result)
    }

    async fn process_candidate(&self, mut candidate: Tracker) -> Result<Tracker, Rejection> {
        // The store may have changed while the candidate was queued.
        if self.database.get_tracker(candidate.host.clone()).await?.is_some() {
            return Err(Rejection::AlreadyTracked { host: candidate.host });
        }

        self.check_ip_conflicts(&candidate).await?;

        debug!("probing {}", candidate.url);

        let result = self
            .announcer
            .announce(&candidate.url, candidate.port, candidate.ips.first().copied(), &self.submissions_history)
            .await
            .map_err(|source| Rejection::ProbeFailed { source })?;

        let (min, max) = (self.config.ingestion.min_interval, self.config.ingestion.max_interval);

        match result.interval {
            Some(interval) if (min..=max).contains(&interval) => {}
            interval => {
                let rejection = Rejection::IntervalOutOfRange {
                    url: result.url.to_string(),
                    interval,
                    min,
                    max,
                };

                self.submissions_history.edit_latest(result.url.as_str(), |entry| {
                    entry.status = TrackerStatus::Down;
                    entry.info.push(rejection.to_string());
                });

                return Err(rejection);
            }
        }

        candidate.url = result.url;
        candidate.interval = result.interval;
        candidate.latency = Some(result.latency);
        candidate.locate(self.geoip.as_ref());
        candidate.is_up();
        candidate.update_uptime();
        candidate.last_checked = Duration::from_secs(CurrentClock::now().as_secs());

        self.database.save_tracker(candidate.clone()).await?;

        Ok(candidate)
    }

    async fn check_ip_conflicts(&self, candidate: &Tracker) -> Result<(), Rejection> {
        let index = IpIndex::build(&self.database.load_trackers().await?);

        if let Some((ip, other)) = index.current_conflict(&candidate.host, &candidate.ips) {
            return Err(Rejection::CurrentIpConflict {
                host: candidate.host.clone(),
                ip,
                other,
            });
        }

        if let Some((ip, other)) = index.recent_conflict(&candidate.host, &candidate.ips) {
            return Err(Rejection::RecentIpConflict {
                host: candidate.host.clone(),
                ip,
                other,
            });
        }

        Ok(())
    }
}
