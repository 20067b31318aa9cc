use std::net::{Ipv4Addr, Ipv6Addr, SocketAddr};
use std::sync::Arc;
use std::time::Duration;

use tokio::net::{lookup_host, UdpSocket};
use tokio::time;
use tracing::debug;

use crate::shared::bit_torrent::info_hash::InfoHash;
use crate::shared::bit_torrent::tracker::udp::{
    build_announce_request, build_connect_request, parse_announce_response, parse_connect_response, peer_entry_len,
    random_transaction_id, AnnounceResponse, Error, MAX_PACKET_SIZE,
};

/// Default timeout for resolving, sending and receiving.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// A client that probes UDP trackers with a `connect` + `announce` handshake.
#[allow(clippy::module_name_repetitions)]
#[derive(Debug, Clone)]
pub struct UdpTrackerClient {
    /// Timeout for every step of the handshake.
    pub timeout: Duration,
}

impl Default for UdpTrackerClient {
    fn default() -> Self {
        Self::new(DEFAULT_TIMEOUT)
    }
}

impl UdpTrackerClient {
    #[must_use]
    pub fn new(timeout: Duration) -> Self {
        Self { timeout }
    }

    /// Announces a random info-hash to the tracker at `host:port`.
    ///
    /// # Errors
    ///
    /// Will return an error if the host can't be resolved, no socket can be
    /// connected or any of the two rounds fails.
    pub async fn announce(&self, host: &str, port: u16) -> Result<AnnounceResponse, Error> {
        let remote_addrs = self.resolve(host, port).await?;

        let (socket, remote_addr) = self.connect(host, &remote_addrs).await?;

        let transaction_id = random_transaction_id();
        self.send(&socket, remote_addr, &build_connect_request(transaction_id)).await?;
        let response = self.receive(&socket, remote_addr).await?;
        let connection_id = parse_connect_response(&response, transaction_id)?;

        debug!(target: "UDP client", "connected to {remote_addr}, connection id {connection_id}");

        let transaction_id = random_transaction_id();
        let request = build_announce_request(connection_id, transaction_id, &InfoHash::random(), rand::random::<u32>());
        self.send(&socket, remote_addr, &request).await?;
        let response = self.receive(&socket, remote_addr).await?;

        parse_announce_response(&response, transaction_id, peer_entry_len(&remote_addr))
    }

    async fn resolve(&self, host: &str, port: u16) -> Result<Vec<SocketAddr>, Error> {
        let host_without_brackets = host.trim_start_matches('[').trim_end_matches(']');

        let addrs = match time::timeout(self.timeout, lookup_host((host_without_brackets, port))).await {
            Ok(Ok(addrs)) => addrs.collect::<Vec<_>>(),
            Ok(Err(err)) => {
                return Err(Error::UnableToResolve {
                    host: host.to_owned(),
                    err: Arc::new(err),
                })
            }
            Err(_) => return Err(Error::TimeoutWhileResolving { host: host.to_owned() }),
        };

        if addrs.is_empty() {
            return Err(Error::NoAddressFound { host: host.to_owned() });
        }

        Ok(addrs)
    }

    /// Returns a socket connected to the first address that accepts it.
    async fn connect(&self, host: &str, remote_addrs: &[SocketAddr]) -> Result<(UdpSocket, SocketAddr), Error> {
        let mut last_error = Error::NoAddressFound { host: host.to_owned() };

        for remote_addr in remote_addrs {
            let local_addr = if remote_addr.is_ipv6() {
                SocketAddr::from((Ipv6Addr::UNSPECIFIED, 0))
            } else {
                SocketAddr::from((Ipv4Addr::UNSPECIFIED, 0))
            };

            let socket = match UdpSocket::bind(local_addr).await {
                Ok(socket) => socket,
                Err(err) => {
                    last_error = Error::UnableToBindToSocket {
                        err: Arc::new(err),
                        addr: local_addr,
                    };
                    continue;
                }
            };

            match socket.connect(remote_addr).await {
                Ok(()) => return Ok((socket, *remote_addr)),
                Err(err) => {
                    debug!(target: "UDP client", "unable to connect to {remote_addr}: {err}");
                    last_error = Error::UnableToConnectToRemote {
                        err: Arc::new(err),
                        remote_addr: *remote_addr,
                    };
                }
            }
        }

        Err(last_error)
    }

    async fn send(&self, socket: &UdpSocket, remote_addr: SocketAddr, bytes: &[u8]) -> Result<usize, Error> {
        debug!(target: "UDP client", "sending {bytes:?} ...");

        match time::timeout(self.timeout, socket.send(bytes)).await {
            Ok(Ok(size)) => Ok(size),
            Ok(Err(err)) => Err(Error::UnableToSendData {
                err: Arc::new(err),
                remote_addr,
            }),
            Err(_) => Err(Error::TimeoutWhileSendingData { remote_addr }),
        }
    }

    async fn receive(&self, socket: &UdpSocket, remote_addr: SocketAddr) -> Result<Vec<u8>, Error> {
        debug!(target: "UDP client", "receiving ...");

        let mut buffer = [0u8; MAX_PACKET_SIZE];

        let size = match time::timeout(self.timeout, socket.recv(&mut buffer)).await {
            Ok(Ok(size)) => size,
            Ok(Err(err)) => {
                return Err(Error::UnableToReceiveData {
                    err: Arc::new(err),
                    remote_addr,
                })
            }
            Err(_) => return Err(Error::TimeoutWhileReceivingData { remote_addr }),
        };

        debug!(target: "UDP client", "{size} bytes received {:?}", &buffer[..size]);

        Ok(buffer[..size].to_vec())
    }
}
