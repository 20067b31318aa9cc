//! Bencoded tracker responses.

/// The compact entry of the peer `127.0.0.1:6881`.
pub const COMPACT_PEER: [u8; 6] = [127, 0, 0, 1, 0x1a, 0xe1];

/// An announce response with one IPv4 peer.
pub fn announce_body(interval: i64) -> Vec<u8> {
    let mut body = format!("d8:completei1e10:incompletei0e8:intervali{interval}e5:peers6:").into_bytes();
    body.extend_from_slice(&COMPACT_PEER);
    body.push(b'e');
    body
}

pub fn failure_body(reason: &str) -> Vec<u8> {
    format!("d14:failure reason{}:{reason}e", reason.len()).into_bytes()
}

/// A response that is valid bencode but has no peer list.
pub fn body_without_peers() -> Vec<u8> {
    b"d8:intervali1800ee".to_vec()
}
