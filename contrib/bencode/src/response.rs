use std::net::{IpAddr, SocketAddr};

use crate::compact::{decode_external_ip, decode_peers_v4, decode_peers_v6};
use crate::decode::decode;
use crate::error::{BencodeParseError, BencodeParseErrorKind, BencodeParseResult};
use crate::value::Value;

/// A top level field of a tracker response after post-processing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Field {
    Value(Value),
    Peers(Vec<SocketAddr>),
    ExternalIp(IpAddr),
}

impl Field {
    #[must_use]
    pub fn int(&self) -> Option<i64> {
        match self {
            Field::Value(value) => value.int(),
            _ => None,
        }
    }

    #[must_use]
    pub fn text(&self) -> Option<String> {
        match self {
            Field::Value(value) => value.text(),
            _ => None,
        }
    }
}

/// A decoded tracker response. Fields keep the order in which the tracker sent them.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct TrackerResponse {
    fields: Vec<(String, Field)>,
}

impl TrackerResponse {
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&Field> {
        self.fields
            .iter()
            .find_map(|(existing, field)| (existing == key).then_some(field))
    }

    #[must_use]
    pub fn contains_key(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    #[must_use]
    pub fn int(&self, key: &str) -> Option<i64> {
        self.get(key).and_then(Field::int)
    }

    #[must_use]
    pub fn text(&self, key: &str) -> Option<String> {
        self.get(key).and_then(Field::text)
    }

    pub fn iter(&self) -> impl Iterator<Item = &(String, Field)> {
        self.fields.iter()
    }
}

/// Decodes a tracker response.
///
/// The root must be a dictionary. `peers` and `peers6` byte strings are
/// unpacked into socket addresses and `external ip` into an IP address.
/// Keys are exposed as text, invalid UTF-8 sequences are replaced.
///
/// # Errors
///
/// Will return an error if the payload is not valid bencode, if the root is
/// not a dictionary or if `external ip` has an unexpected size.
pub fn decode_response(bytes: &[u8]) -> BencodeParseResult<TrackerResponse> {
    let Value::Dict(dict) = decode(bytes)? else {
        return Err(BencodeParseError::from_kind(BencodeParseErrorKind::NotADict));
    };

    let mut fields: Vec<(String, Field)> = Vec::with_capacity(dict.len());

    for (key, value) in dict {
        let key = String::from_utf8_lossy(&key).into_owned();

        let field = match (key.as_str(), value) {
            ("peers", Value::Bytes(bytes)) => Field::Peers(decode_peers_v4(&bytes)),
            ("peers6", Value::Bytes(bytes)) => Field::Peers(decode_peers_v6(&bytes)),
            ("external ip", Value::Bytes(bytes)) => Field::ExternalIp(decode_external_ip(&bytes)?),
            (_, value) => Field::Value(value),
        };

        // Two raw keys can collapse into the same lossy key, the later one wins.
        match fields.iter_mut().find(|(existing, _)| *existing == key) {
            Some((_, slot)) => *slot = field,
            None => fields.push((key, field)),
        }
    }

    Ok(TrackerResponse { fields })
}
