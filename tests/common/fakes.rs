//! Collaborators with fixed answers.
use std::collections::HashMap;
use std::net::IpAddr;
use std::sync::Arc;

use async_trait::async_trait;
use parking_lot::Mutex;
use torrust_tracker_monitor::core::announcer::{Announcer, Redactor, Transport};
use torrust_tracker_monitor::core::databases::driver;
use torrust_tracker_monitor::core::dns::{self, HostResolver};
use torrust_tracker_monitor::core::geoip::NoGeoIp;
use torrust_tracker_monitor::core::Monitor;
use torrust_tracker_monitor::shared::bit_torrent::bep34::TxtResolver;
use torrust_tracker_monitor::shared::bit_torrent::tracker::http::client::responses::announce::Announce;
use torrust_tracker_monitor::shared::bit_torrent::tracker::{http, udp};
use torrust_tracker_monitor_configuration::Configuration;
use torrust_tracker_monitor_primitives::scheme::Scheme;
use url::Url;

/// Resolves the given hosts only.
pub struct FixedResolver {
    ips: HashMap<String, Vec<IpAddr>>,
}

impl FixedResolver {
    /// `(host, ip)` pairs, a host may appear more than once.
    pub fn new(entries: &[(&str, &str)]) -> Self {
        let mut ips: HashMap<String, Vec<IpAddr>> = HashMap::new();

        for (host, ip) in entries {
            ips.entry((*host).to_string()).or_default().push(ip.parse().unwrap());
        }

        Self { ips }
    }
}

#[async_trait]
impl HostResolver for FixedResolver {
    async fn resolve(&self, host: String) -> Result<Vec<IpAddr>, dns::Error> {
        self.ips.get(&host).cloned().ok_or(dns::Error::NoAddressFound { host })
    }
}

/// Returns the same TXT records for every host.
pub struct FixedTxtRecords(pub Vec<String>);

#[async_trait]
impl TxtResolver for FixedTxtRecords {
    async fn txt_records(&self, _host: String) -> Vec<String> {
        self.0.clone()
    }
}

/// Answers UDP announces with a configurable interval, fails every HTTP
/// announce, and records the calls.
#[derive(Default)]
pub struct RecordingTransport {
    udp_interval: Mutex<Option<i32>>,
    udp_calls: Mutex<Vec<(String, u16)>>,
    http_calls: Mutex<Vec<(Url, Scheme)>>,
}

impl RecordingTransport {
    pub fn answering(interval: i32) -> Arc<Self> {
        let transport = Self::default();
        transport.set_udp_interval(Some(interval));
        Arc::new(transport)
    }

    /// `None` makes the UDP announces fail.
    pub fn set_udp_interval(&self, interval: Option<i32>) {
        *self.udp_interval.lock() = interval;
    }

    pub fn udp_calls(&self) -> Vec<(String, u16)> {
        self.udp_calls.lock().clone()
    }

    pub fn calls(&self) -> usize {
        self.udp_calls.lock().len() + self.http_calls.lock().len()
    }
}

#[async_trait]
impl Transport for RecordingTransport {
    async fn announce_udp(&self, host: String, port: u16) -> Result<udp::AnnounceResponse, udp::Error> {
        self.udp_calls.lock().push((host.clone(), port));

        let interval = *self.udp_interval.lock();

        match interval {
            Some(interval) => Ok(udp::AnnounceResponse {
                interval,
                leechers: 0,
                seeders: 1,
                peers: vec![],
            }),
            None => Err(udp::Error::NoAddressFound { host }),
        }
    }

    async fn announce_http(&self, url: Url, scheme: Scheme) -> Result<(Url, Announce), http::Error> {
        self.http_calls.lock().push((url.clone(), scheme));

        Err(http::Error::Timeout { url: url.to_string() })
    }
}

pub fn monitor(
    config: Configuration,
    resolver: FixedResolver,
    txt_records: Vec<String>,
    transport: &Arc<RecordingTransport>,
) -> Monitor {
    let config = Arc::new(config);
    let database = Arc::new(driver::build(&config.core.database.driver, &config.core.database.path).unwrap());
    let announcer = Announcer::new(transport.clone(), Arc::new(FixedTxtRecords(txt_records)), Redactor::new(None, None));

    Monitor::new(&config, database, announcer, Arc::new(resolver), Arc::new(NoGeoIp))
}
