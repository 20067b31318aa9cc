use std::net::{Ipv4Addr, Ipv6Addr};

use serde::{Deserialize, Serialize};

/// Options for a single announce attempt.
#[derive(Serialize, Deserialize, PartialEq, Eq, Debug, Clone)]
pub struct Probe {
    /// Timeout in seconds of every network operation (DNS, connect, send,
    /// receive, HTTP request).
    #[serde(default = "Probe::default_timeout")]
    pub timeout: u64,

    /// Maximum number of bytes read from an HTTP tracker response.
    #[serde(default = "Probe::default_max_response_size")]
    pub max_response_size: usize,

    /// `User-Agent` header sent to HTTP trackers.
    #[serde(default = "Probe::default_user_agent")]
    pub user_agent: String,

    /// Public IPv4 address of the monitor. Sent to HTTP trackers as the
    /// `ipv4` hint and removed from the debug history.
    #[serde(default = "Probe::default_public_ipv4")]
    pub public_ipv4: Option<Ipv4Addr>,

    /// Public IPv6 address of the monitor. Sent to HTTP trackers as the
    /// `ipv6` hint and removed from the debug history.
    #[serde(default = "Probe::default_public_ipv6")]
    pub public_ipv6: Option<Ipv6Addr>,
}

impl Default for Probe {
    fn default() -> Self {
        Self {
            timeout: Self::default_timeout(),
            max_response_size: Self::default_max_response_size(),
            user_agent: Self::default_user_agent(),
            public_ipv4: Self::default_public_ipv4(),
            public_ipv6: Self::default_public_ipv6(),
        }
    }
}

impl Probe {
    fn default_timeout() -> u64 {
        10
    }

    fn default_max_response_size() -> usize {
        1_048_576
    }

    fn default_user_agent() -> String {
        format!("torrust-tracker-monitor/{}", env!("CARGO_PKG_VERSION"))
    }

    fn default_public_ipv4() -> Option<Ipv4Addr> {
        None
    }

    fn default_public_ipv6() -> Option<Ipv6Addr> {
        None
    }
}
