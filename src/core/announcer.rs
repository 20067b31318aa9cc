//! Announce orchestration.
//!
//! A tracker can be reachable over UDP, HTTPS or HTTP, on the port of its
//! URL or on the ports listed in its [BEP 34](crate::shared::bit_torrent::bep34)
//! preferences. The [`Announcer`] decides which attempts to make and in which
//! order, stops at the first one that succeeds and records every attempt in
//! a [`DebugHistory`].
//!
//! Attempt order:
//!
//! Preferences | Attempts
//! ---|---
//! `UDP:p` | UDP on `p`
//! `TCP:p` | HTTPS on `p`, then HTTP on `p`
//! None, URL with a port `p` | UDP on `p`, then HTTPS, then HTTP
//! None, URL without a port | HTTPS on `443`, then HTTP on `80`
//! Denied | None, the tracker must not be contacted
use std::net::{IpAddr, Ipv4Addr, Ipv6Addr};
use std::sync::Arc;
use std::time::{Duration, Instant};

use async_trait::async_trait;
#[cfg(test)]
use mockall::automock;
use regex::Regex;
use serde_json::json;
use thiserror::Error;
use torrust_tracker_monitor_configuration::Probe;
use torrust_tracker_monitor_primitives::scheme::Scheme;
use torrust_tracker_monitor_primitives::status::TrackerStatus;
use tracing::{debug, warn};
use url::Url;

use crate::core::debug_log::{DebugEntry, DebugHistory};
use crate::core::error::ErrorKind;
use crate::shared::bit_torrent::bep34::{self, Preference, Protocol, TxtResolver};
use crate::shared::bit_torrent::tracker::http::client::responses::announce::Announce;
use crate::shared::bit_torrent::tracker::http;
use crate::shared::bit_torrent::tracker::http::client::{announce_url, Client as HttpClient, ANNOUNCE_PORT};
use crate::shared::bit_torrent::tracker::udp::client::UdpTrackerClient;
use crate::shared::bit_torrent::tracker::udp::{self, AnnounceResponse, PROBE_PORT};

#[derive(Debug, Clone, Error)]
pub enum Error {
    #[error("denied: {host} does not run a tracker")]
    Denied { host: String },

    #[error("all the announce attempts to {url} failed")]
    Exhausted { url: String, attempts: usize },
}

impl Error {
    #[must_use]
    pub fn kind(&self) -> ErrorKind {
        match self {
            Error::Denied { .. } => ErrorKind::Validation,
            Error::Exhausted { .. } => ErrorKind::Network,
        }
    }
}

/// Result of a successful announce.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AttemptResult {
    /// The re-announce interval in seconds, if the tracker sent one.
    pub interval: Option<u64>,
    /// The URL that answered.
    pub url: Url,
    /// Milliseconds.
    pub latency: u64,
}

/// The network side of an announce attempt.
#[async_trait]
#[cfg_attr(test, automock)]
pub trait Transport: Sync + Send {
    /// # Errors
    ///
    /// Will return an error if the UDP handshake fails.
    async fn announce_udp(&self, host: String, port: u16) -> Result<AnnounceResponse, udp::Error>;

    /// # Errors
    ///
    /// Will return an error if the HTTP request fails or the response is not
    /// a valid announce response.
    async fn announce_http(&self, url: Url, scheme: Scheme) -> Result<(Url, Announce), http::Error>;
}

/// Announces to real trackers.
pub struct NetworkTransport {
    udp: UdpTrackerClient,
    http: HttpClient,
}

impl NetworkTransport {
    /// # Errors
    ///
    /// Will return an error if the HTTP client can't be built.
    pub fn new(probe: &Probe) -> Result<Self, http::Error> {
        Ok(Self {
            udp: UdpTrackerClient::new(Duration::from_secs(probe.timeout)),
            http: HttpClient::new(probe)?,
        })
    }
}

#[async_trait]
impl Transport for NetworkTransport {
    async fn announce_udp(&self, host: String, port: u16) -> Result<AnnounceResponse, udp::Error> {
        self.udp.announce(&host, port).await
    }

    async fn announce_http(&self, url: Url, scheme: Scheme) -> Result<(Url, Announce), http::Error> {
        self.http.announce(&url, scheme).await
    }
}

/// Removes the monitor's own public IPs and peer ports from the text stored
/// in the debug history. Trackers echo them back in their responses.
#[derive(Debug, Clone)]
pub struct Redactor {
    pattern: Option<Regex>,
}

impl Redactor {
    #[must_use]
    pub fn new(public_ipv4: Option<Ipv4Addr>, public_ipv6: Option<Ipv6Addr>) -> Self {
        let mut alternatives = vec![format!(r"\b{PROBE_PORT}\b"), format!(r"\b{ANNOUNCE_PORT}\b")];

        if let Some(ip) = public_ipv4 {
            alternatives.push(regex::escape(&ip.to_string()));
        }
        if let Some(ip) = public_ipv6 {
            alternatives.push(regex::escape(&ip.to_string()));
        }

        let pattern = match Regex::new(&alternatives.join("|")) {
            Ok(pattern) => Some(pattern),
            Err(err) => {
                warn!("unable to build the redaction pattern: {err}");
                None
            }
        };

        Self { pattern }
    }

    #[must_use]
    pub fn redact(&self, text: &str) -> String {
        match &self.pattern {
            Some(pattern) => pattern.replace_all(text, "redacted").into_owned(),
            None => text.to_owned(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Attempt {
    Udp { port: u16 },
    Http { scheme: Scheme, port: Option<u16> },
}

pub struct Announcer {
    transport: Arc<dyn Transport>,
    txt_resolver: Arc<dyn TxtResolver>,
    redactor: Redactor,
}

impl Announcer {
    #[must_use]
    pub fn new(transport: Arc<dyn Transport>, txt_resolver: Arc<dyn TxtResolver>, redactor: Redactor) -> Self {
        Self {
            transport,
            txt_resolver,
            redactor,
        }
    }

    /// The BEP 34 preferences of `host`.
    pub async fn preference(&self, host: &str) -> Preference {
        bep34::preference(self.txt_resolver.as_ref(), host).await
    }

    /// Looks up the preferences of the tracker host and announces.
    ///
    /// `port` is the port given when the tracker was submitted, including
    /// default ports a parsed [`Url`] drops.
    ///
    /// # Errors
    ///
    /// Will return an error if the host denies being a tracker or every
    /// attempt fails.
    pub async fn announce(
        &self,
        url: &Url,
        port: Option<u16>,
        fallback_ip: Option<IpAddr>,
        history: &DebugHistory,
    ) -> Result<AttemptResult, Error> {
        let host = url.host_str().unwrap_or_default().to_owned();
        let preference = self.preference(&host).await;
        self.announce_with_preference(url, port, &preference, fallback_ip, history).await
    }

    /// Announces following already resolved preferences.
    ///
    /// Without BEP 34 preferences, UDP is tried first on `port` (or the URL
    /// port) and HTTPS and HTTP are tried on that same port. `fallback_ip` is
    /// the address recorded in the debug entries.
    ///
    /// # Errors
    ///
    /// Will return an error if the preferences deny the host or every
    /// attempt fails.
    pub async fn announce_with_preference(
        &self,
        url: &Url,
        port: Option<u16>,
        preference: &Preference,
        fallback_ip: Option<IpAddr>,
        history: &DebugHistory,
    ) -> Result<AttemptResult, Error> {
        let host = url.host_str().unwrap_or_default().to_owned();
        let port = port.or_else(|| url.port());

        let attempts = match preference {
            Preference::Denied => {
                history.push(DebugEntry::new(
                    url.as_str(),
                    TrackerStatus::Down,
                    fallback_ip,
                    vec![format!("{host} publishes a BEP 34 TXT record without trackers, it must not be contacted")],
                ));
                return Err(Error::Denied { host });
            }
            Preference::Ordered(entries) => ordered_attempts(entries),
            Preference::NoRecord => default_attempts(port),
        };

        for attempt in &attempts {
            let started = Instant::now();

            let outcome = self.attempt(&host, url, *attempt).await;

            let latency = u64::try_from(started.elapsed().as_millis()).unwrap_or(u64::MAX);

            match outcome {
                Ok((attempt_url, interval, response)) => {
                    debug!("{attempt_url} answered in {latency}ms");
                    history.push(DebugEntry::new(
                        attempt_url.as_str(),
                        TrackerStatus::Up,
                        fallback_ip,
                        vec![
                            format!("{} announce to {attempt_url} succeeded in {latency}ms", attempt.protocol()),
                            self.redactor.redact(&response),
                        ],
                    ));
                    return Ok(AttemptResult {
                        interval,
                        url: attempt_url,
                        latency,
                    });
                }
                Err((attempt_url, err)) => {
                    debug!("{attempt_url} failed: {err}");
                    history.push(DebugEntry::new(
                        &attempt_url,
                        TrackerStatus::Down,
                        fallback_ip,
                        vec![
                            format!("{} announce to {attempt_url} failed", attempt.protocol()),
                            self.redactor.redact(&err),
                        ],
                    ));
                }
            }
        }

        warn!("no announce to {url} succeeded after {} attempts", attempts.len());

        Err(Error::Exhausted {
            url: url.to_string(),
            attempts: attempts.len(),
        })
    }

    /// Returns the URL that answered, the interval and the pretty-printed
    /// response, or the URL tried and the error message.
    async fn attempt(&self, host: &str, url: &Url, attempt: Attempt) -> Result<(Url, Option<u64>, String), (String, String)> {
        match attempt {
            Attempt::Udp { port } => {
                let attempt_url = format!("udp://{host}:{port}/announce");

                let response = self
                    .transport
                    .announce_udp(host.to_owned(), port)
                    .await
                    .map_err(|err| (attempt_url.clone(), err.to_string()))?;

                let parsed = Url::parse(&attempt_url).map_err(|err| (attempt_url.clone(), err.to_string()))?;

                let pretty = json!({
                    "interval": response.interval,
                    "leechers": response.leechers,
                    "seeders": response.seeders,
                    "peers": response.peers.iter().map(ToString::to_string).collect::<Vec<_>>(),
                });

                Ok((
                    parsed,
                    u64::try_from(response.interval).ok(),
                    serde_json::to_string_pretty(&pretty).unwrap_or_default(),
                ))
            }
            Attempt::Http { scheme, port } => {
                let target = match port {
                    Some(port) => Url::parse(&format!("{scheme}://{host}:{port}/announce")),
                    None => Ok(url.clone()),
                }
                .map_err(|err| (url.to_string(), err.to_string()))?;

                let (attempt_url, announce) = self
                    .transport
                    .announce_http(target.clone(), scheme)
                    .await
                    .map_err(|err| {
                        let attempt_url = announce_url(&target, scheme).map_or_else(|_| target.to_string(), |url| url.to_string());
                        (attempt_url, err.to_string())
                    })?;

                let interval = announce.interval.and_then(|interval| u64::try_from(interval).ok());

                Ok((attempt_url, interval, announce.to_pretty_json()))
            }
        }
    }
}

impl Attempt {
    fn protocol(self) -> &'static str {
        match self {
            Attempt::Udp { .. } => "UDP",
            Attempt::Http {
                scheme: Scheme::Https, ..
            } => "HTTPS",
            Attempt::Http { .. } => "HTTP",
        }
    }
}

fn ordered_attempts(entries: &[(Protocol, u16)]) -> Vec<Attempt> {
    let mut attempts = vec![];

    for (protocol, port) in entries {
        match protocol {
            Protocol::Udp => attempts.push(Attempt::Udp { port: *port }),
            Protocol::Tcp => {
                attempts.push(Attempt::Http {
                    scheme: Scheme::Https,
                    port: Some(*port),
                });
                attempts.push(Attempt::Http {
                    scheme: Scheme::Http,
                    port: Some(*port),
                });
            }
        }
    }

    attempts
}

fn default_attempts(port: Option<u16>) -> Vec<Attempt> {
    let mut attempts = vec![];

    if let Some(port) = port {
        attempts.push(Attempt::Udp { port });
    }

    attempts.push(Attempt::Http {
        scheme: Scheme::Https,
        port,
    });
    attempts.push(Attempt::Http {
        scheme: Scheme::Http,
        port,
    });

    attempts
}
