use std::str::FromStr;

use derive_more::Display;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// The URL schemes a monitored tracker can be announced on.
#[derive(Hash, Clone, Copy, Debug, Display, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Scheme {
    #[display("udp")]
    Udp,
    #[display("http")]
    Http,
    #[display("https")]
    Https,
}

impl Scheme {
    /// Port used when the announce URL does not carry one.
    #[must_use]
    pub fn default_port(self) -> Option<u16> {
        match self {
            Scheme::Udp => None,
            Scheme::Http => Some(80),
            Scheme::Https => Some(443),
        }
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("unsupported scheme: {0}")]
pub struct UnsupportedScheme(pub String);

impl FromStr for Scheme {
    type Err = UnsupportedScheme;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "udp" => Ok(Scheme::Udp),
            "http" => Ok(Scheme::Http),
            "https" => Ok(Scheme::Https),
            other => Err(UnsupportedScheme(other.to_owned())),
        }
    }
}
