//! Library for decoding and encoding bencoded tracker responses.
//!
//! # Examples
//!
//! Decoding bencoded data:
//!
//! ```rust
//!     use bencode::Value;
//!
//!     let data = b"d8:intervali1800ee"; // cspell:disable-line
//!     let value = bencode::decode(data).unwrap();
//!
//!     assert_eq!(Some(1800), value.dict().unwrap().get(b"interval").and_then(Value::int));
//! ```
//!
//! Encoding bencoded data:
//!
//! ```rust
//!     #[macro_use]
//!     extern crate bencode;
//!
//!     fn main() {
//!         let message = (ben_map!{
//!             "interval" => ben_int!(1800),
//!             "peers" => ben_bytes!("")
//!         }).encode();
//!
//!         let data = b"d8:intervali1800e5:peers0:e"; // cspell:disable-line
//!         assert_eq!(&data[..], &message[..]);
//!     }
//! ```
//!
//! Decoding a tracker announce response, which also unpacks the compact
//! peer lists (`peers`, `peers6`) and the `external ip` field:
//!
//! ```rust
//!     use bencode::{decode_response, Field};
//!
//!     let data = b"d8:intervali1800e5:peers6:\x7f\x00\x00\x01\x1a\xe1e"; // cspell:disable-line
//!     let response = decode_response(data).unwrap();
//!
//!     match response.get("peers") {
//!         Some(Field::Peers(peers)) => assert_eq!(peers[0].to_string(), "127.0.0.1:6881"),
//!         _ => panic!("peers should be unpacked"),
//!     }
//! ```

const BEN_END: u8 = b'e';
const DICT_START: u8 = b'd';
const LIST_START: u8 = b'l';
const INT_START: u8 = b'i';

const BYTE_LEN_LOW: u8 = b'0';
const BYTE_LEN_HIGH: u8 = b'9';
const BYTE_LEN_END: u8 = b':';

/// Construct a `Value` dictionary by supplying string references as keys and `Value`s as values.
///
/// Keys keep the order in which they are written.
#[macro_export]
macro_rules! ben_map {
( $($key:expr => $val:expr),* ) => {
        {
            let mut dictionary = $crate::Dictionary::new();
            $(
                dictionary.insert($key, $val);
            )*

            $crate::Value::Dict(dictionary)
        }
    }
}

/// Construct a `Value` list by supplying a list of `Value`s.
#[macro_export]
macro_rules! ben_list {
    ( $($ben:expr),* ) => {
        {
            $crate::Value::List(vec![$($ben),*])
        }
    }
}

/// Construct `Value` bytes by supplying a type convertible to `Vec<u8>`.
#[macro_export]
macro_rules! ben_bytes {
    ( $ben:expr ) => {{
        $crate::Value::Bytes(::std::convert::Into::<Vec<u8>>::into($ben))
    }};
}

/// Construct a `Value` integer by supplying an `i64`.
#[macro_export]
macro_rules! ben_int {
    ( $ben:expr ) => {{
        $crate::Value::Int($ben)
    }};
}

mod compact;
mod decode;
mod encode;
mod error;
mod response;
mod value;

pub use crate::compact::{decode_external_ip, decode_peers, decode_peers_v4, decode_peers_v6, IPV4_PEER_LEN, IPV6_PEER_LEN};
pub use crate::decode::{decode, MAX_RECURSION};
pub use crate::error::{BencodeParseError, BencodeParseErrorKind, BencodeParseResult};
pub use crate::response::{decode_response, Field, TrackerResponse};
pub use crate::value::{Dictionary, Value};
