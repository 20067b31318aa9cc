use bencode::{decode_response, Field, TrackerResponse, Value};
use serde_json::{Map, Value as JsonValue};

use crate::shared::bit_torrent::tracker::http::Error;

/// A successful HTTP announce response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Announce {
    /// The re-announce interval, when the tracker sends one.
    pub interval: Option<i64>,
    pub response: TrackerResponse,
}

impl Announce {
    /// Decodes and validates the body of an announce response.
    ///
    /// # Errors
    ///
    /// Will return an error if the body is empty, is not a bencoded
    /// dictionary, carries a `failure reason` or has no peer list.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, Error> {
        if bytes.is_empty() {
            return Err(Error::EmptyResponse);
        }

        let response = decode_response(bytes).map_err(|err| Error::UnableToDecode { message: err.to_string() })?;

        if let Some(field) = response.get("failure reason") {
            return Err(Error::TrackerFailure {
                reason: field.text().unwrap_or_default(),
            });
        }

        if !response.contains_key("peers") && !response.contains_key("peers6") {
            return Err(Error::MissingPeers);
        }

        Ok(Self {
            interval: response.int("interval"),
            response,
        })
    }

    /// Pretty-printed JSON view of the response.
    #[must_use]
    pub fn to_pretty_json(&self) -> String {
        let json = response_to_json(&self.response);
        serde_json::to_string_pretty(&json).unwrap_or_else(|_| json.to_string())
    }
}

fn response_to_json(response: &TrackerResponse) -> JsonValue {
    let mut map = Map::new();

    for (key, field) in response.iter() {
        let value = match field {
            Field::Value(value) => value_to_json(value),
            Field::Peers(peers) => JsonValue::Array(peers.iter().map(|peer| JsonValue::String(peer.to_string())).collect()),
            Field::ExternalIp(ip) => JsonValue::String(ip.to_string()),
        };
        map.insert(key.clone(), value);
    }

    JsonValue::Object(map)
}

fn value_to_json(value: &Value) -> JsonValue {
    match value {
        Value::Int(n) => JsonValue::from(*n),
        Value::Bytes(bytes) => JsonValue::String(String::from_utf8_lossy(bytes).into_owned()),
        Value::List(list) => JsonValue::Array(list.iter().map(value_to_json).collect()),
        Value::Dict(dict) => JsonValue::Object(
            dict.iter()
                .map(|(key, value)| (String::from_utf8_lossy(key).into_owned(), value_to_json(value)))
                .collect(),
        ),
    }
}
