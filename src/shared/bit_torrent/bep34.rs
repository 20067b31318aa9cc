//! DNS Tracker Preferences.
//!
//! See [BEP 34. DNS Tracker Preferences](https://www.bittorrent.org/beps/bep_0034.html).
//!
//! A tracker operator can publish a TXT record on the tracker host name
//! listing the protocols and ports clients should use, in order of
//! preference:
//!
//! ```text
//! tracker.example.com. IN TXT "BITTORRENT UDP:6969 TCP:443 TCP:80"
//! ```
//!
//! A record with the `BITTORRENT` token and no entries means the host does
//! not run a tracker and clients should not contact it.
use std::time::Duration;

use async_trait::async_trait;
use hickory_resolver::config::{ResolverConfig, ResolverOpts};
use hickory_resolver::TokioAsyncResolver;
#[cfg(test)]
use mockall::automock;
use tracing::debug;

/// The first token of a preferences record.
pub const BITTORRENT_TOKEN: &str = "BITTORRENT";

/// Only the first entries after the `BITTORRENT` token are read.
pub const MAX_ENTRIES: usize = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Protocol {
    Udp,
    /// HTTP or HTTPS.
    Tcp,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Preference {
    /// The host publishes no preferences.
    NoRecord,
    /// The host does not run a tracker.
    Denied,
    /// Protocols and ports to try, in order.
    Ordered(Vec<(Protocol, u16)>),
}

/// Looks up the TXT records of a host name.
#[async_trait]
#[cfg_attr(test, automock)]
pub trait TxtResolver: Sync + Send {
    /// Returns the text of every TXT record of `host`. Lookup failures are
    /// returned as no records.
    async fn txt_records(&self, host: String) -> Vec<String>;
}

/// Resolves the tracker preferences of `host`.
pub async fn preference(resolver: &dyn TxtResolver, host: &str) -> Preference {
    let records = resolver.txt_records(host.to_owned()).await;

    let preference = parse_txt_records(&records);

    debug!("tracker preferences for {host}: {preference:?}");

    preference
}

/// Picks the first record that starts with `BITTORRENT` and reads its
/// entries. Only the uppercase `UDP:<port>` and `TCP:<port>` forms are
/// entries, anything else is skipped.
#[must_use]
pub fn parse_txt_records(records: &[String]) -> Preference {
    let Some(record) = records
        .iter()
        .find(|record| record.split_whitespace().next() == Some(BITTORRENT_TOKEN))
    else {
        return Preference::NoRecord;
    };

    let entries: Vec<(Protocol, u16)> = record
        .split_whitespace()
        .skip(1)
        .take(MAX_ENTRIES)
        .filter_map(parse_entry)
        .collect();

    if entries.is_empty() {
        Preference::Denied
    } else {
        Preference::Ordered(entries)
    }
}

fn parse_entry(token: &str) -> Option<(Protocol, u16)> {
    let (protocol, port) = token.split_once(':')?;

    let protocol = match protocol {
        "UDP" => Protocol::Udp,
        "TCP" => Protocol::Tcp,
        _ => return None,
    };

    let port = port.parse::<u16>().ok().filter(|port| *port != 0)?;

    Some((protocol, port))
}

/// TXT resolver backed by the system DNS configuration.
pub struct DnsTxtResolver {
    resolver: TokioAsyncResolver,
    timeout: Duration,
}

impl DnsTxtResolver {
    /// Uses the system resolver configuration, or the default public
    /// resolvers when it can't be read.
    #[must_use]
    pub fn new(timeout: Duration) -> Self {
        let (config, mut opts) = match hickory_resolver::system_conf::read_system_conf() {
            Ok((config, opts)) => (config, opts),
            Err(err) => {
                debug!("unable to read the system DNS configuration, using defaults: {err}");
                (ResolverConfig::default(), ResolverOpts::default())
            }
        };

        opts.timeout = timeout;

        Self {
            resolver: TokioAsyncResolver::tokio(config, opts),
            timeout,
        }
    }
}

#[async_trait]
impl TxtResolver for DnsTxtResolver {
    async fn txt_records(&self, host: String) -> Vec<String> {
        let lookup = match tokio::time::timeout(self.timeout, self.resolver.txt_lookup(host.as_str())).await {
            Ok(Ok(lookup)) => lookup,
            Ok(Err(err)) => {
                debug!("no TXT record for {host}: {err}");
                return vec![];
            }
            Err(_) => {
                debug!("timeout while looking up the TXT records of {host}");
                return vec![];
            }
        };

        lookup
            .iter()
            .map(|txt| {
                txt.txt_data()
                    .iter()
                    .map(|data| String::from_utf8_lossy(data).into_owned())
                    .collect::<String>()
            })
            .collect()
    }
}
