//! The monitored tracker entity and its health state machine.
//!
//! ```text
//!                 from_url                 accepted by the
//! submitted URL ----------> candidate ----------------------> up <---> down
//!                                         submission pipeline   \      /
//!                                                                 v  v
//!                                                          to be deleted
//! ```
//!
//! A tracker is created as a candidate by [`Tracker::from_url`]. It's only
//! stored once the submission pipeline accepts it. From then on the
//! maintenance loop calls [`Tracker::update_status`] every `interval`
//! seconds. A tracker is deleted when it has been down for longer than the
//! configured maximum downtime or when its host publishes a BEP 34 record
//! denying it runs a tracker.
//!
//! [`Tracker::is_up`] and [`Tracker::is_down`] are the only functions that
//! change the status and the check history.
use std::collections::{BTreeMap, VecDeque};
use std::net::IpAddr;
use std::str::FromStr;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use serde_with::{serde_as, DurationSeconds};
use thiserror::Error;
use torrust_tracker_monitor_clock::clock::Time;
use torrust_tracker_monitor_configuration::Core;
use torrust_tracker_monitor_primitives::scheme::Scheme;
use torrust_tracker_monitor_primitives::status::TrackerStatus;
use torrust_tracker_monitor_primitives::DurationSinceUnixEpoch;
use tracing::{debug, info};
use url::Url;

use crate::core::announcer::Announcer;
use crate::core::debug_log::{DebugEntry, DebugHistory};
use crate::core::dns::{self, HostResolver};
use crate::core::error::ErrorKind;
use crate::core::geoip::{locate_all, GeoIp};
use crate::shared::bit_torrent::bep34::Preference;
use crate::CurrentClock;

/// Number of checks kept to compute the uptime.
pub const HISTORIC_CAPACITY: usize = 1000;

#[derive(Debug, Clone, Error)]
pub enum Error {
    #[error("invalid URL {url}: {message}")]
    InvalidUrl { url: String, message: String },

    #[error("unsupported scheme {scheme} in {url}, it must be udp, http or https")]
    UnsupportedScheme { url: String, scheme: String },

    #[error("invalid host {host}")]
    InvalidHost { host: String },

    #[error("UDP trackers must have a port: {url}")]
    MissingPort { url: String },

    #[error(transparent)]
    UnableToResolve(#[from] dns::Error),
}

impl Error {
    #[must_use]
    pub fn kind(&self) -> ErrorKind {
        match self {
            Error::UnableToResolve(err) => err.kind(),
            _ => ErrorKind::Validation,
        }
    }
}

#[serde_as]
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Tracker {
    /// Host name, IPv6 literals keep their brackets.
    pub host: String,
    /// Announce URL, its path is always `/announce`.
    pub url: Url,
    /// Port of the submitted URL. Unlike `url` it keeps default ports, so
    /// `http://host:80` is still tried over UDP on port 80.
    #[serde(default)]
    pub port: Option<u16>,
    /// IPv6 first, without duplicates.
    pub ips: Vec<IpAddr>,
    /// Every IP the host resolved to recently and when it was last seen.
    #[serde_as(as = "BTreeMap<_, DurationSeconds<u64>>")]
    pub recent_ips: BTreeMap<IpAddr, DurationSinceUnixEpoch>,
    /// Milliseconds, of the last successful announce.
    pub latency: Option<u64>,
    #[serde_as(as = "DurationSeconds<u64>")]
    pub last_checked: DurationSinceUnixEpoch,
    /// Seconds between checks.
    pub interval: Option<u64>,
    pub status: TrackerStatus,
    /// Percentage of successful checks in `historic`.
    pub uptime: f64,
    pub countries: Vec<String>,
    pub country_codes: Vec<String>,
    pub networks: Vec<String>,
    /// `1` for every successful check and `0` for every failed one, oldest first.
    pub historic: VecDeque<u8>,
    #[serde_as(as = "DurationSeconds<u64>")]
    pub added: DurationSinceUnixEpoch,
    #[serde_as(as = "DurationSeconds<u64>")]
    pub last_downtime: DurationSinceUnixEpoch,
    #[serde_as(as = "DurationSeconds<u64>")]
    pub last_uptime: DurationSinceUnixEpoch,
    pub to_be_deleted: bool,
}

/// What [`Tracker::update_status`] needs to check a tracker.
pub struct CheckContext<'a> {
    pub announcer: &'a Announcer,
    pub resolver: &'a dyn HostResolver,
    pub geoip: &'a dyn GeoIp,
    pub policy: &'a Core,
    pub history: &'a DebugHistory,
}

/// Current time, in whole seconds.
fn now() -> DurationSinceUnixEpoch {
    Duration::from_secs(CurrentClock::now().as_secs())
}

/// Validates a submitted URL and rewrites it into the canonical announce URL:
/// lowercase, `udp`, `http` or `https` scheme, no credentials, path
/// `/announce`.
///
/// # Errors
///
/// Will return an error if the URL can't be parsed, has another scheme, its
/// host or port has unexpected characters, or it's a UDP URL without port.
pub fn normalize_url(raw: &str) -> Result<Url, Error> {
    let url = Url::parse(&raw.trim().to_lowercase()).map_err(|err| Error::InvalidUrl {
        url: raw.to_owned(),
        message: err.to_string(),
    })?;

    let scheme = Scheme::from_str(url.scheme()).map_err(|_| Error::UnsupportedScheme {
        url: raw.to_owned(),
        scheme: url.scheme().to_owned(),
    })?;

    if !url.username().is_empty() || url.password().is_some() {
        return Err(Error::InvalidUrl {
            url: raw.to_owned(),
            message: "credentials are not allowed".to_string(),
        });
    }

    let host = match url.host_str() {
        Some(host) if !host.is_empty() => host,
        _ => {
            return Err(Error::InvalidUrl {
                url: raw.to_owned(),
                message: "missing host".to_string(),
            })
        }
    };

    let authority = match url.port() {
        Some(port) => format!("{host}:{port}"),
        None => host.to_owned(),
    };

    if !authority
        .chars()
        .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || matches!(c, '-' | '.' | ':' | '[' | ']'))
    {
        return Err(Error::InvalidHost { host: authority });
    }

    if scheme == Scheme::Udp && url.port().is_none() {
        return Err(Error::MissingPort { url: raw.to_owned() });
    }

    let canonical = format!("{scheme}://{authority}/announce");

    Url::parse(&canonical).map_err(|err| Error::InvalidUrl {
        url: canonical.clone(),
        message: err.to_string(),
    })
}

/// The port written in a submitted URL, including the default port of its
/// scheme which a parsed [`Url`] drops.
#[must_use]
pub fn explicit_port(raw: &str) -> Option<u16> {
    let url = Url::parse(&raw.trim().to_lowercase()).ok()?;

    if let Some(port) = url.port() {
        return Some(port);
    }

    let without_scheme = raw.trim().split_once("://").map_or(raw.trim(), |(_, rest)| rest);
    let authority = without_scheme.split(['/', '?', '#']).next().unwrap_or_default();
    let host_and_port = authority.rsplit_once('@').map_or(authority, |(_, host_and_port)| host_and_port);

    if host_and_port.ends_with(']') {
        return None;
    }

    let (_, port) = host_and_port.rsplit_once(':')?;

    if port.is_empty() || !port.chars().all(|c| c.is_ascii_digit()) {
        return None;
    }

    port.parse().ok().filter(|port| Some(*port) == url.port_or_known_default())
}

/// Whether the URL host is an IP address instead of a name.
#[must_use]
pub fn has_ip_literal_host(url: &Url) -> bool {
    url.host_str()
        .map(|host| host.trim_start_matches('[').trim_end_matches(']'))
        .is_some_and(|host| host.parse::<IpAddr>().is_ok())
}

impl Tracker {
    /// A new candidate. It's down and has no checks yet.
    #[must_use]
    pub fn new(url: Url, ips: Vec<IpAddr>, recent_ip_ttl: u64) -> Self {
        let now = now();

        let mut tracker = Self {
            host: url.host_str().unwrap_or_default().to_owned(),
            port: url.port(),
            url,
            ips: vec![],
            recent_ips: BTreeMap::new(),
            latency: None,
            last_checked: now,
            interval: None,
            status: TrackerStatus::Down,
            uptime: 0.0,
            countries: vec![],
            country_codes: vec![],
            networks: vec![],
            historic: VecDeque::with_capacity(HISTORIC_CAPACITY),
            added: now,
            last_downtime: now,
            last_uptime: now,
            to_be_deleted: false,
        };

        tracker.set_ips(ips, recent_ip_ttl);

        tracker
    }

    /// Validates the URL and resolves its host.
    ///
    /// # Errors
    ///
    /// Will return an error if the URL is not valid or the host can't be
    /// resolved.
    pub async fn from_url(raw: &str, resolver: &dyn HostResolver, recent_ip_ttl: u64) -> Result<Self, Error> {
        let url = normalize_url(raw)?;

        let host = url.host_str().unwrap_or_default().to_owned();

        let ips = resolver.resolve(host).await?;

        let mut tracker = Self::new(url, ips, recent_ip_ttl);
        tracker.port = explicit_port(raw);

        Ok(tracker)
    }

    /// Replaces the current IPs. They are recorded as recent IPs and recent
    /// IPs not seen for `recent_ip_ttl` seconds are forgotten. The location
    /// lists are reset.
    pub fn set_ips(&mut self, ips: Vec<IpAddr>, recent_ip_ttl: u64) {
        let now = now();

        for ip in &ips {
            self.recent_ips.insert(*ip, now);
        }

        self.recent_ips
            .retain(|_, last_seen| now.saturating_sub(*last_seen).as_secs() <= recent_ip_ttl);

        self.countries = vec![String::new(); ips.len()];
        self.country_codes = vec![String::new(); ips.len()];
        self.networks = vec![String::new(); ips.len()];
        self.ips = ips;
    }

    /// Fills the location lists, one entry per IP.
    pub fn locate(&mut self, geoip: &dyn GeoIp) {
        let locations = locate_all(geoip, &self.ips);

        self.countries = locations.iter().map(|location| location.country.clone()).collect();
        self.country_codes = locations.iter().map(|location| location.country_code.clone()).collect();
        self.networks = locations.into_iter().map(|location| location.network).collect();
    }

    pub fn is_up(&mut self) {
        self.status = TrackerStatus::Up;
        self.last_uptime = now();
        self.push_sample(TrackerStatus::Up);
    }

    pub fn is_down(&mut self) {
        self.status = TrackerStatus::Down;
        self.last_downtime = now();
        self.push_sample(TrackerStatus::Down);
    }

    fn push_sample(&mut self, status: TrackerStatus) {
        self.historic.push_back(status.as_sample());

        while self.historic.len() > HISTORIC_CAPACITY {
            self.historic.pop_front();
        }
    }

    /// Recomputes the uptime from the check history. Callers make sure the
    /// history is not empty.
    #[allow(clippy::cast_precision_loss)]
    pub fn update_uptime(&mut self) {
        debug_assert!(!self.historic.is_empty(), "the uptime of a tracker without checks");

        if self.historic.is_empty() {
            return;
        }

        let successful: u64 = self.historic.iter().map(|sample| u64::from(*sample)).sum();

        self.uptime = 100.0 * successful as f64 / self.historic.len() as f64;
    }

    /// Whether the last check is older than the tracker interval. Trackers
    /// without interval are checked every `default_interval` seconds.
    #[must_use]
    pub fn needs_check(&self, now: DurationSinceUnixEpoch, default_interval: u64) -> bool {
        now.saturating_sub(self.last_checked).as_secs() > self.interval.unwrap_or(default_interval)
    }

    /// Whether the tracker has been down longer than `max_downtime` seconds.
    #[must_use]
    pub fn is_dead(&self, max_downtime: u64) -> bool {
        CurrentClock::seconds_since(self.last_uptime) > max_downtime
    }

    /// Checks the tracker and records the result.
    ///
    /// - Down for longer than the maximum downtime: marked for deletion, no
    ///   network call.
    /// - BEP 34 record denying a tracker: marked for deletion.
    /// - Host can't be resolved: down.
    /// - Otherwise the tracker is up if any announce attempt succeeds.
    ///
    /// The uptime is recomputed and trackers with no successful check in the
    /// history are checked every `dead_tracker_interval` seconds.
    pub async fn update_status(&mut self, ctx: &CheckContext<'_>) {
        if self.is_dead(ctx.policy.max_downtime) {
            info!("{} has been down for more than {}s, deleting it", self.host, ctx.policy.max_downtime);
            self.to_be_deleted = true;
            return;
        }

        let preference = ctx.announcer.preference(&self.host).await;

        if preference == Preference::Denied {
            info!("{} denies running a tracker, deleting it", self.host);
            self.to_be_deleted = true;
            return;
        }

        match ctx.resolver.resolve(self.host.clone()).await {
            Ok(ips) => {
                self.set_ips(ips, ctx.policy.recent_ip_ttl);
                self.locate(ctx.geoip);

                let fallback_ip = self.ips.first().copied();

                match ctx
                    .announcer
                    .announce_with_preference(&self.url, self.port, &preference, fallback_ip, ctx.history)
                    .await
                {
                    Ok(result) => {
                        debug!("{} is up, interval {:?}, latency {}ms", self.host, result.interval, result.latency);
                        self.url = result.url;
                        self.interval = result.interval;
                        self.latency = Some(result.latency);
                        self.is_up();
                    }
                    Err(err) => {
                        debug!("{} is down: {err}", self.host);
                        self.is_down();
                    }
                }
            }
            Err(err) => {
                debug!("{} is down: {err}", self.host);
                ctx.history.push(DebugEntry::new(
                    self.url.as_str(),
                    TrackerStatus::Down,
                    self.ips.first().copied(),
                    vec![err.to_string()],
                ));
                self.is_down();
            }
        }

        self.update_uptime();

        if self.uptime <= 0.0 {
            self.interval = Some(ctx.policy.dead_tracker_interval);
        }

        self.last_checked = now();
    }
}
