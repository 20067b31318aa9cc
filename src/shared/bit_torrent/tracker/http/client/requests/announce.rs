use std::fmt;
use std::net::{Ipv4Addr, Ipv6Addr};

use super::Announce;
use crate::shared::bit_torrent::info_hash::InfoHash;
use crate::shared::bit_torrent::tracker::http::{percent_encode_byte_array, ByteArray20};

#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub struct Query {
    pub info_hash: ByteArray20,
    pub peer_id: ByteArray20,
    pub port: PortNumber,
    pub uploaded: BaseTenASCII,
    pub downloaded: BaseTenASCII,
    pub left: BaseTenASCII,
    /// Asks for the compact peer list.
    pub compact: bool,
    pub ipv4: Option<Ipv4Addr>,
    pub ipv6: Option<Ipv6Addr>,
}

impl fmt::Display for Query {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", QueryParams::from(self))
    }
}

pub type BaseTenASCII = u64;
pub type PortNumber = u16;

#[derive(Debug)]
pub struct QueryBuilder {
    query: Query,
}

impl QueryBuilder {
    /// A query for a peer that has nothing to download nor to upload.
    #[must_use]
    pub fn new(info_hash: InfoHash, peer_id: ByteArray20, port: u16) -> QueryBuilder {
        Self {
            query: Query {
                info_hash: info_hash.0,
                peer_id,
                port,
                uploaded: 0,
                downloaded: 0,
                left: 0,
                compact: false,
                ipv4: None,
                ipv6: None,
            },
        }
    }

    #[must_use]
    pub fn with_compact(mut self) -> Self {
        self.query.compact = true;
        self
    }

    #[must_use]
    pub fn with_ipv4(mut self, ipv4: Option<Ipv4Addr>) -> Self {
        self.query.ipv4 = ipv4;
        self
    }

    #[must_use]
    pub fn with_ipv6(mut self, ipv6: Option<Ipv6Addr>) -> Self {
        self.query.ipv6 = ipv6;
        self
    }

    #[must_use]
    pub fn build(self) -> Announce {
        self.query.into()
    }
}

/// It contains all the GET parameters the monitor sends in a HTTP Announce request.
///
/// Sample Announce URL:
///
/// ```text
/// http://tracker.example.com:6969/announce?
///     info_hash=%9C8B%22%13%E3%0B%FF%21%2B0%C3%60%D2o%9A%02%13d%22 (mandatory)
///     peer_id=%9C8B%22%13%E3%0B%FF%21%2B0%C3%60%D2o%9A%02%13d%22 (mandatory)
///     port=1337 (mandatory)
///     uploaded=0
///     downloaded=0
///     left=0
///     compact=1
///     ipv4=203.0.113.7
///     ipv6=2001:db8::7
/// ```
pub struct QueryParams {
    pub info_hash: String,
    pub peer_id: String,
    pub port: String,
    pub uploaded: String,
    pub downloaded: String,
    pub left: String,
    pub compact: Option<String>,
    pub ipv4: Option<String>,
    pub ipv6: Option<String>,
}

/// It builds the URL query component for the announce request.
///
/// This custom URL query params encoding is needed because `reqwest` does not allow
/// bytes arrays in query parameters. More info on this issue:
///
/// <https://github.com/seanmonstar/reqwest/issues/1613>
impl std::fmt::Display for QueryParams {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut params = vec![
            ("info_hash", &self.info_hash),
            ("peer_id", &self.peer_id),
            ("port", &self.port),
            ("uploaded", &self.uploaded),
            ("downloaded", &self.downloaded),
            ("left", &self.left),
        ];

        if let Some(compact) = &self.compact {
            params.push(("compact", compact));
        }
        if let Some(ipv4) = &self.ipv4 {
            params.push(("ipv4", ipv4));
        }
        if let Some(ipv6) = &self.ipv6 {
            params.push(("ipv6", ipv6));
        }

        let query = params
            .iter()
            .map(|param| format!("{}={}", param.0, param.1))
            .collect::<Vec<String>>()
            .join("&");

        write!(f, "{query}")
    }
}

impl From<&Announce> for QueryParams {
    fn from(value: &Announce) -> Self {
        let query: &Query = &Announce::into(*value);
        query.into()
    }
}

impl From<&Query> for QueryParams {
    fn from(value: &Query) -> Self {
        let query = value;

        Self {
            info_hash: percent_encode_byte_array(&query.info_hash),
            peer_id: percent_encode_byte_array(&query.peer_id),
            port: query.port.to_string(),
            uploaded: query.uploaded.to_string(),
            downloaded: query.downloaded.to_string(),
            left: query.left.to_string(),
            compact: query.compact.then(|| "1".to_string()),
            ipv4: query.ipv4.as_ref().map(std::string::ToString::to_string),
            ipv6: query.ipv6.as_ref().map(std::string::ToString::to_string),
        }
    }
}
