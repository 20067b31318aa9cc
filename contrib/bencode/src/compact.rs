use std::net::{IpAddr, Ipv4Addr, Ipv6Addr, SocketAddr, SocketAddrV4, SocketAddrV6};

use crate::error::{BencodeParseError, BencodeParseErrorKind, BencodeParseResult};

/// Size of one compact IPv4 peer entry: 4 bytes address, 2 bytes port.
pub const IPV4_PEER_LEN: usize = 6;

/// Size of one compact IPv6 peer entry: 16 bytes address, 2 bytes port.
pub const IPV6_PEER_LEN: usize = 18;

/// Unpacks a compact IPv4 peer list. A trailing partial entry is dropped.
#[must_use]
pub fn decode_peers_v4(bytes: &[u8]) -> Vec<SocketAddr> {
    bytes
        .chunks_exact(IPV4_PEER_LEN)
        .map(|chunk| {
            let ip = Ipv4Addr::new(chunk[0], chunk[1], chunk[2], chunk[3]);
            let port = u16::from_be_bytes([chunk[4], chunk[5]]);
            SocketAddr::V4(SocketAddrV4::new(ip, port))
        })
        .collect()
}

/// Unpacks a compact IPv6 peer list. A trailing partial entry is dropped.
#[must_use]
pub fn decode_peers_v6(bytes: &[u8]) -> Vec<SocketAddr> {
    bytes
        .chunks_exact(IPV6_PEER_LEN)
        .map(|chunk| {
            let mut octets = [0u8; 16];
            octets.copy_from_slice(&chunk[..16]);
            let port = u16::from_be_bytes([chunk[16], chunk[17]]);
            SocketAddr::V6(SocketAddrV6::new(Ipv6Addr::from(octets), port, 0, 0))
        })
        .collect()
}

/// Unpacks a compact peer list whose entries are `entry_len` bytes long.
///
/// Any length other than 18 is read as IPv4 entries.
#[must_use]
pub fn decode_peers(bytes: &[u8], entry_len: usize) -> Vec<SocketAddr> {
    if entry_len == IPV6_PEER_LEN {
        decode_peers_v6(bytes)
    } else {
        decode_peers_v4(bytes)
    }
}

/// Reads the `external ip` field of an announce response.
///
/// # Errors
///
/// Will return an error if the field is neither 4 nor 16 bytes long.
pub fn decode_external_ip(bytes: &[u8]) -> BencodeParseResult<IpAddr> {
    if let Ok(octets) = <[u8; 4]>::try_from(bytes) {
        return Ok(IpAddr::V4(Ipv4Addr::from(octets)));
    }

    if let Ok(octets) = <[u8; 16]>::try_from(bytes) {
        return Ok(IpAddr::V6(Ipv6Addr::from(octets)));
    }

    Err(BencodeParseError::from_kind(BencodeParseErrorKind::InvalidExternalIpSize {
        size: bytes.len(),
    }))
}

#[cfg(test)]
mod tests {
    use std::net::{IpAddr, Ipv4Addr, Ipv6Addr, SocketAddr};

    use super::{decode_external_ip, decode_peers_v4, decode_peers_v6};
    use crate::error::BencodeParseErrorKind;

    #[test]
    fn it_should_unpack_one_peer_for_each_complete_ipv4_entry() {
        let bytes = [127, 0, 0, 1, 0x1A, 0xE1, 10, 0, 0, 2, 0x00, 0x50];

        let peers = decode_peers_v4(&bytes);

        assert_eq!(
            peers,
            vec![
                "127.0.0.1:6881".parse::<SocketAddr>().unwrap(),
                "10.0.0.2:80".parse::<SocketAddr>().unwrap()
            ]
        );
    }

    #[test]
    fn it_should_drop_a_trailing_partial_ipv4_entry() {
        let bytes = [127, 0, 0, 1, 0x1A, 0xE1, 10, 0, 0];

        assert_eq!(decode_peers_v4(&bytes).len(), 1);
    }

    #[test]
    fn it_should_unpack_ipv6_entries() {
        let mut bytes = Ipv6Addr::LOCALHOST.octets().to_vec();
        bytes.extend_from_slice(&[0x1A, 0xE1]);
        bytes.extend_from_slice(&[0xFF; 5]);

        let peers = decode_peers_v6(&bytes);

        assert_eq!(peers, vec!["[::1]:6881".parse::<SocketAddr>().unwrap()]);
    }

    #[test]
    fn it_should_read_an_ipv4_or_ipv6_external_ip() {
        assert_eq!(
            decode_external_ip(&[192, 168, 1, 1]).unwrap(),
            IpAddr::V4(Ipv4Addr::new(192, 168, 1, 1))
        );
        assert_eq!(
            decode_external_ip(&Ipv6Addr::LOCALHOST.octets()).unwrap(),
            IpAddr::V6(Ipv6Addr::LOCALHOST)
        );
    }

    #[test]
    fn it_should_fail_on_an_external_ip_with_an_unexpected_size() {
        let err = decode_external_ip(&[1, 2, 3]).unwrap_err();

        assert!(matches!(err.kind(), BencodeParseErrorKind::InvalidExternalIpSize { size: 3 }));
        assert_eq!(err.to_string(), "invalid external IP size: 3");
    }
}
