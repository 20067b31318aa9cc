pub mod requests;
pub mod responses;

use std::net::{Ipv4Addr, Ipv6Addr};
use std::sync::Arc;
use std::time::Duration;

use requests::announce::QueryBuilder;
use reqwest::header::CONNECTION;
use reqwest::{Client as ReqwestClient, StatusCode, Url};
use responses::announce::Announce;
use torrust_tracker_monitor_configuration::Probe;
use torrust_tracker_monitor_primitives::scheme::Scheme;
use tracing::debug;

use crate::shared::bit_torrent::info_hash::InfoHash;
use crate::shared::bit_torrent::tracker::http::Error;

/// The port the monitor announces as a peer on HTTP trackers.
pub const ANNOUNCE_PORT: u16 = 1337;

/// HTTP Tracker Client
///
/// URL components in this context:
///
/// ```text
/// https://tracker.example.com:443/announce?info_hash=%9C8B%22%13%E3%0B%FF%21%2B0%C3%60%D2o%9A%02%13d%22
/// \__________________________/\_______/ \__________________________________________________________/
///              |                  |                                    |
///          base url             path                                query
/// ```
#[derive(Debug, Clone)]
pub struct Client {
    reqwest: ReqwestClient,
    max_response_size: usize,
    public_ipv4: Option<Ipv4Addr>,
    public_ipv6: Option<Ipv6Addr>,
}

impl Client {
    /// # Errors
    ///
    /// Will return an error if the underlying HTTP client can't be built.
    pub fn new(probe: &Probe) -> Result<Self, Error> {
        let reqwest = reqwest::Client::builder()
            .user_agent(probe.user_agent.clone())
            .timeout(Duration::from_secs(probe.timeout))
            .gzip(true)
            .build()
            .map_err(|err| Error::UnableToBuildClient { err: Arc::new(err) })?;

        Ok(Self {
            reqwest,
            max_response_size: probe.max_response_size,
            public_ipv4: probe.public_ipv4,
            public_ipv6: probe.public_ipv6,
        })
    }

    /// Announces a random info-hash to the tracker using `scheme`.
    ///
    /// Returns the URL actually requested, without query, and the decoded
    /// response.
    ///
    /// # Errors
    ///
    /// Will return an error if the request fails, the status is not `200`,
    /// the body is larger than the configured maximum or it's not a valid
    /// announce response.
    pub async fn announce(&self, url: &Url, scheme: Scheme) -> Result<(Url, Announce), Error> {
        let announce_url = announce_url(url, scheme)?;

        let request = QueryBuilder::new(InfoHash::random(), rand::random::<[u8; 20]>(), ANNOUNCE_PORT)
            .with_compact()
            .with_ipv4(self.public_ipv4)
            .with_ipv6(self.public_ipv6)
            .build();

        let request_url = format!("{announce_url}?{request}");

        debug!(target: "HTTP client", "GET {request_url}");

        let mut response = self
            .reqwest
            .get(&request_url)
            .header(CONNECTION, "close")
            .send()
            .await
            .map_err(|err| request_error(&announce_url, err))?;

        if response.status() != StatusCode::OK {
            return Err(Error::UnexpectedStatus {
                status: response.status().as_u16(),
            });
        }

        let mut body = Vec::new();

        while let Some(chunk) = response.chunk().await.map_err(|err| request_error(&announce_url, err))? {
            if body.len() + chunk.len() > self.max_response_size {
                return Err(Error::ResponseTooLarge);
            }
            body.extend_from_slice(&chunk);
        }

        debug!(target: "HTTP client", "{} bytes received from {announce_url}", body.len());

        Ok((announce_url, Announce::from_bytes(&body)?))
    }
}

/// Rewrites a tracker URL into the announce URL for `scheme`.
///
/// The host is kept. The port is kept when the URL has one, otherwise the
/// default port of `scheme` is used. The path is always `/announce`.
///
/// A parsed URL drops the default port of its own scheme. Callers that need
/// a submitted default port build the URL with the target scheme first, see
/// [`Announcer`](crate::core::announcer::Announcer).
///
/// # Errors
///
/// Will return an error if the URL has no host.
pub fn announce_url(url: &Url, scheme: Scheme) -> Result<Url, Error> {
    let host = url.host_str().ok_or_else(|| Error::InvalidUrl {
        url: url.to_string(),
        message: "missing host".to_string(),
    })?;

    let rewritten = match url.port().or_else(|| scheme.default_port()) {
        Some(port) => format!("{scheme}://{host}:{port}/announce"),
        None => format!("{scheme}://{host}/announce"),
    };

    Url::parse(&rewritten).map_err(|err| Error::InvalidUrl {
        url: rewritten.clone(),
        message: err.to_string(),
    })
}

fn request_error(url: &Url, err: reqwest::Error) -> Error {
    if err.is_timeout() {
        Error::Timeout { url: url.to_string() }
    } else {
        Error::RequestFailed {
            url: url.to_string(),
            err: Arc::new(err),
        }
    }
}
