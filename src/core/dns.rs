//! Host name resolution.
use std::net::IpAddr;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
#[cfg(test)]
use mockall::automock;
use thiserror::Error;
use tokio::net::lookup_host;

use crate::core::error::ErrorKind;

#[derive(Debug, Clone, Error)]
pub enum Error {
    #[error("unable to resolve {host}: {err}")]
    UnableToResolve { host: String, err: Arc<std::io::Error> },

    #[error("timeout while resolving {host}")]
    Timeout { host: String },

    #[error("no address found for {host}")]
    NoAddressFound { host: String },
}

impl Error {
    #[must_use]
    pub fn kind(&self) -> ErrorKind {
        ErrorKind::Network
    }
}

/// Resolves a host name into its IP addresses.
#[async_trait]
#[cfg_attr(test, automock)]
pub trait HostResolver: Sync + Send {
    /// Returns the addresses of `host`, IPv6 first and without duplicates.
    ///
    /// # Errors
    ///
    /// Will return an error if the host has no address.
    async fn resolve(&self, host: String) -> Result<Vec<IpAddr>, Error>;
}

/// Resolver that uses the operating system through `tokio`.
pub struct TokioHostResolver {
    timeout: Duration,
}

impl TokioHostResolver {
    #[must_use]
    pub fn new(timeout: Duration) -> Self {
        Self { timeout }
    }
}

#[async_trait]
impl HostResolver for TokioHostResolver {
    async fn resolve(&self, host: String) -> Result<Vec<IpAddr>, Error> {
        let host_without_brackets = host.trim_start_matches('[').trim_end_matches(']').to_owned();

        let lookup = tokio::time::timeout(self.timeout, lookup_host((host_without_brackets.as_str(), 0))).await;

        let ips = match lookup {
            Ok(Ok(addrs)) => order_ips(addrs.map(|addr| addr.ip())),
            Ok(Err(err)) => return Err(Error::UnableToResolve { host, err: Arc::new(err) }),
            Err(_) => return Err(Error::Timeout { host }),
        };

        if ips.is_empty() {
            return Err(Error::NoAddressFound { host });
        }

        Ok(ips)
    }
}

/// Puts IPv6 addresses before IPv4 ones and removes duplicates. The
/// resolver order is kept within each family.
pub fn order_ips(ips: impl IntoIterator<Item = IpAddr>) -> Vec<IpAddr> {
    let mut ordered: Vec<IpAddr> = vec![];

    for ip in ips {
        if !ordered.contains(&ip) {
            ordered.push(ip);
        }
    }

    // Stable sort, `false` (IPv6) first.
    ordered.sort_by_key(IpAddr::is_ipv4);

    ordered
}

#[cfg(test)]
mod tests {
    use std::net::IpAddr;

    use super::order_ips;

    fn ip(ip: &str) -> IpAddr {
        ip.parse().unwrap()
    }

    #[test]
    fn it_should_put_ipv6_addresses_first_and_remove_duplicates() {
        let ips = order_ips(vec![ip("1.2.3.4"), ip("2001:db8::1"), ip("1.2.3.4"), ip("5.6.7.8"), ip("2001:db8::2")]);

        assert_eq!(
            ips,
            vec![ip("2001:db8::1"), ip("2001:db8::2"), ip("1.2.3.4"), ip("5.6.7.8")]
        );
    }

    #[tokio::test]
    async fn it_should_resolve_an_ip_literal_to_itself() {
        use std::time::Duration;

        use super::{HostResolver, TokioHostResolver};

        let resolver = TokioHostResolver::new(Duration::from_secs(1));

        assert_eq!(resolver.resolve("127.0.0.1".to_string()).await.unwrap(), vec![ip("127.0.0.1")]);
        assert_eq!(resolver.resolve("[::1]".to_string()).await.unwrap(), vec![ip("::1")]);
    }
}
