//! HTTP tracker client.
//!
//! Announces to HTTP and HTTPS trackers as described in
//! [BEP 3. The `BitTorrent` Protocol Specification](https://www.bittorrent.org/beps/bep_0003.html).
pub mod client;

use std::sync::Arc;

use percent_encoding::NON_ALPHANUMERIC;
use thiserror::Error;

use crate::core::error::ErrorKind;

pub type ByteArray20 = [u8; 20];

#[must_use]
pub fn percent_encode_byte_array(bytes: &ByteArray20) -> String {
    percent_encoding::percent_encode(bytes, NON_ALPHANUMERIC).to_string()
}

#[derive(Debug, Clone, Error)]
pub enum Error {
    #[error("invalid announce url {url}: {message}")]
    InvalidUrl { url: String, message: String },

    #[error("unable to build the http client: {err}")]
    UnableToBuildClient { err: Arc<reqwest::Error> },

    #[error("request to {url} failed: {err}")]
    RequestFailed { url: String, err: Arc<reqwest::Error> },

    #[error("timeout while requesting {url}")]
    Timeout { url: String },

    #[error("unexpected status code: {status}")]
    UnexpectedStatus { status: u16 },

    #[error("empty response")]
    EmptyResponse,

    #[error("response too large")]
    ResponseTooLarge,

    #[error("unable to decode the response: {message}")]
    UnableToDecode { message: String },

    #[error("tracker failure: {reason}")]
    TrackerFailure { reason: String },

    #[error("missing peers")]
    MissingPeers,
}

impl Error {
    #[must_use]
    pub fn kind(&self) -> ErrorKind {
        match self {
            Error::InvalidUrl { .. } => ErrorKind::Validation,
            Error::UnableToBuildClient { .. } | Error::ResponseTooLarge => ErrorKind::Resource,
            Error::RequestFailed { .. } | Error::Timeout { .. } => ErrorKind::Network,
            Error::UnableToDecode { .. } => ErrorKind::Format,
            Error::UnexpectedStatus { .. } | Error::EmptyResponse | Error::TrackerFailure { .. } | Error::MissingPeers => {
                ErrorKind::Protocol
            }
        }
    }
}
