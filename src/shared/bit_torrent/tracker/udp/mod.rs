//! UDP tracker client.
//!
//! Implements the client side of the
//! [BEP 15. UDP Tracker Protocol for `BitTorrent`](https://www.bittorrent.org/beps/bep_0015.html).
//!
//! A probe is a `connect` round followed by an `announce` round:
//!
//! ```text
//! connect request:  connection_id (i64) | action = 0 (i32) | transaction_id (i32)
//! connect response: action (i32) | transaction_id (i32) | connection_id (i64)
//!
//! announce request:  connection_id | action = 1 | transaction_id | info_hash (20)
//!                    | peer_id (20) | downloaded (i64) | left (i64) | uploaded (i64)
//!                    | event (i32) | ip (u32) | key (u32) | num_want (i32) | port (u16)
//! announce response: action | transaction_id | interval (i32) | leechers (i32)
//!                    | seeders (i32) | compact peer list
//! ```
//!
//! All integers are big endian. A response with action `3` carries an error
//! message from the tracker after the transaction id.
//!
//! This module holds the byte layout. The socket handling lives in [`client`].
use std::net::SocketAddr;
use std::sync::Arc;

use bencode::{decode_peers, IPV4_PEER_LEN, IPV6_PEER_LEN};
use thiserror::Error;
use torrust_tracker_monitor_primitives::announce_event::AnnounceEvent;

use crate::core::error::ErrorKind;
use crate::shared::bit_torrent::info_hash::InfoHash;

pub mod client;

/// The maximum number of bytes in a UDP packet.
pub const MAX_PACKET_SIZE: usize = 1496;
/// A magic 64-bit integer constant defined in the protocol that is used to
/// identify the protocol.
pub const PROTOCOL_ID: i64 = 0x0417_2710_1980;

pub const ACTION_CONNECT: i32 = 0;
pub const ACTION_ANNOUNCE: i32 = 1;
pub const ACTION_ERROR: i32 = 3;

pub const CONNECT_REQUEST_LEN: usize = 16;
pub const CONNECT_RESPONSE_LEN: usize = 16;
pub const ANNOUNCE_REQUEST_LEN: usize = 98;
pub const ANNOUNCE_RESPONSE_HEADER_LEN: usize = 20;

/// The port the monitor announces as a peer (`30461`).
pub const PROBE_PORT: u16 = 0x76FD;

/// Action and transaction id.
const RESPONSE_PREFIX_LEN: usize = 8;

#[derive(Debug, Clone, Error)]
pub enum Error {
    #[error("unable to resolve {host}: {err}")]
    UnableToResolve { host: String, err: Arc<std::io::Error> },

    #[error("timeout while resolving {host}")]
    TimeoutWhileResolving { host: String },

    #[error("no address found for {host}")]
    NoAddressFound { host: String },

    #[error("failed to bind to socket: {addr}, with error: {err}")]
    UnableToBindToSocket { err: Arc<std::io::Error>, addr: SocketAddr },

    #[error("failed to connect to remote: {remote_addr}, with error: {err}")]
    UnableToConnectToRemote {
        err: Arc<std::io::Error>,
        remote_addr: SocketAddr,
    },

    #[error("timeout while sending data to {remote_addr}")]
    TimeoutWhileSendingData { remote_addr: SocketAddr },

    #[error("failed to send data to {remote_addr}, with error: {err}")]
    UnableToSendData {
        err: Arc<std::io::Error>,
        remote_addr: SocketAddr,
    },

    #[error("timeout while receiving data from {remote_addr}")]
    TimeoutWhileReceivingData { remote_addr: SocketAddr },

    #[error("failed to receive data from {remote_addr}, with error: {err}")]
    UnableToReceiveData {
        err: Arc<std::io::Error>,
        remote_addr: SocketAddr,
    },

    #[error("wrong response length")]
    WrongResponseLength { len: usize },

    #[error("transaction id mismatch")]
    TransactionIdMismatch { expected: u32, received: u32 },

    #[error("{message}")]
    TrackerError { message: String },

    #[error("unexpected action: {action}")]
    UnexpectedAction { action: i32 },
}

impl Error {
    /// Every UDP failure is reported as a network failure. The message tells
    /// them apart.
    #[must_use]
    pub fn kind(&self) -> ErrorKind {
        ErrorKind::Network
    }
}

/// A transaction id. The monitor picks them in `[0, 255]`.
#[must_use]
pub fn random_transaction_id() -> u32 {
    u32::from(rand::random::<u8>())
}

/// The parsed tail of a successful announce.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnnounceResponse {
    pub interval: i32,
    pub leechers: i32,
    pub seeders: i32,
    pub peers: Vec<SocketAddr>,
}

#[must_use]
pub fn build_connect_request(transaction_id: u32) -> Vec<u8> {
    let mut request = Vec::with_capacity(CONNECT_REQUEST_LEN);
    request.extend_from_slice(&PROTOCOL_ID.to_be_bytes());
    request.extend_from_slice(&ACTION_CONNECT.to_be_bytes());
    request.extend_from_slice(&transaction_id.to_be_bytes());
    request
}

/// Parses a connect response and returns the connection id.
///
/// # Errors
///
/// Will return an error if the response is too short, belongs to another
/// transaction, carries a tracker error or a different action.
pub fn parse_connect_response(bytes: &[u8], transaction_id: u32) -> Result<i64, Error> {
    let action = parse_response_prefix(bytes, transaction_id, CONNECT_RESPONSE_LEN)?;

    if action != ACTION_CONNECT {
        return Err(Error::UnexpectedAction { action });
    }

    Ok(i64::from_be_bytes(read_array(bytes, 8)))
}

/// Builds the 98 bytes announce request. The peer id is the info-hash.
#[must_use]
pub fn build_announce_request(connection_id: i64, transaction_id: u32, info_hash: &InfoHash, key: u32) -> Vec<u8> {
    let mut request = Vec::with_capacity(ANNOUNCE_REQUEST_LEN);
    request.extend_from_slice(&connection_id.to_be_bytes());
    request.extend_from_slice(&ACTION_ANNOUNCE.to_be_bytes());
    request.extend_from_slice(&transaction_id.to_be_bytes());
    request.extend_from_slice(&info_hash.bytes());
    request.extend_from_slice(&info_hash.bytes()); // peer id
    request.extend_from_slice(&0i64.to_be_bytes()); // downloaded
    request.extend_from_slice(&0i64.to_be_bytes()); // left
    request.extend_from_slice(&0i64.to_be_bytes()); // uploaded
    request.extend_from_slice(&AnnounceEvent::Started.to_udp_code().to_be_bytes());
    request.extend_from_slice(&0u32.to_be_bytes()); // ip
    request.extend_from_slice(&key.to_be_bytes());
    request.extend_from_slice(&(-1i32).to_be_bytes()); // num_want
    request.extend_from_slice(&PROBE_PORT.to_be_bytes());
    request
}

/// Parses an announce response. `peer_entry_len` is 6 for IPv4 sockets and
/// 18 for IPv6 sockets.
///
/// # Errors
///
/// Will return an error if the response is too short, belongs to another
/// transaction, carries a tracker error or a different action.
pub fn parse_announce_response(bytes: &[u8], transaction_id: u32, peer_entry_len: usize) -> Result<AnnounceResponse, Error> {
    let action = parse_response_prefix(bytes, transaction_id, ANNOUNCE_RESPONSE_HEADER_LEN)?;

    if action != ACTION_ANNOUNCE {
        return Err(Error::UnexpectedAction { action });
    }

    Ok(AnnounceResponse {
        interval: i32::from_be_bytes(read_array(bytes, 8)),
        leechers: i32::from_be_bytes(read_array(bytes, 12)),
        seeders: i32::from_be_bytes(read_array(bytes, 16)),
        peers: decode_peers(&bytes[ANNOUNCE_RESPONSE_HEADER_LEN..], peer_entry_len),
    })
}

/// Peer entry length for a socket connected to `remote_addr`.
#[must_use]
pub fn peer_entry_len(remote_addr: &SocketAddr) -> usize {
    if remote_addr.is_ipv6() {
        IPV6_PEER_LEN
    } else {
        IPV4_PEER_LEN
    }
}

/// Checks the length, then the transaction id, and returns the action.
/// Error responses are turned into [`Error::TrackerError`].
fn parse_response_prefix(bytes: &[u8], transaction_id: u32, min_len: usize) -> Result<i32, Error> {
    if bytes.len() < min_len.max(RESPONSE_PREFIX_LEN) {
        return Err(Error::WrongResponseLength { len: bytes.len() });
    }

    let action = i32::from_be_bytes(read_array(bytes, 0));
    let received = u32::from_be_bytes(read_array(bytes, 4));

    if received != transaction_id {
        return Err(Error::TransactionIdMismatch {
            expected: transaction_id,
            received,
        });
    }

    if action == ACTION_ERROR {
        return Err(Error::TrackerError {
            message: String::from_utf8_lossy(&bytes[RESPONSE_PREFIX_LEN..]).trim_end_matches('\0').to_owned(),
        });
    }

    Ok(action)
}

/// Callers check the length first.
fn read_array<const N: usize>(bytes: &[u8], offset: usize) -> [u8; N] {
    let mut array = [0u8; N];
    array.copy_from_slice(&bytes[offset..offset + N]);
    array
}
