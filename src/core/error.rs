//! Classification shared by the errors of every module.
//!
//! Kind | Examples | Retried
//! ---|---|---
//! `Format` | Undecodable bencode, invalid external IP size | No
//! `Protocol` | Tracker `failure reason`, missing peers, non `200` status | Next protocol
//! `Network` | Timeouts, refused connections, DNS failures, UDP handshake errors | Next protocol
//! `Validation` | Bad URL, IP conflict, interval out of range, BEP 34 denial | No
//! `Resource` | Queue full, response too large | No
//!
//! A probe tries the next protocol after any failed attempt. Only the
//! exhaustion of all of them reaches the tracker state or the submitter.
use derive_more::Display;

#[derive(Debug, Display, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    #[display("format")]
    Format,
    #[display("protocol")]
    Protocol,
    #[display("network")]
    Network,
    #[display("validation")]
    Validation,
    #[display("resource")]
    Resource,
}

