//! Common code for the `BitTorrent` protocol.
//!
//! # Glossary
//!
//! - [Announce](#announce)
//! - [Announce Interval](#announce-interval)
//! - [Compact Peer List](#compact-peer-list)
//! - [Info Hash](#info-hash)
//! - [Peer ID](#peer-id)
//! - [Tracker](#tracker)
//! - [Tracker Preferences](#tracker-preferences)
//!
//! ## Announce
//!
//! A request to the tracker to announce the presence of a peer. The monitor
//! uses it as a liveness probe.
//!
//! ## Announce Interval
//!
//! The number of seconds a peer should wait before announcing again.
//!
//! ## Compact Peer List
//!
//! A byte string with one entry per peer: 4 bytes IPv4 address and 2 bytes
//! port, or 16 bytes IPv6 address and 2 bytes port.
//!
//! ## Info Hash
//!
//! A unique identifier for a torrent.
//!
//! ## Peer ID
//!
//! A unique identifier for a peer.
//!
//! ## Tracker
//!
//! A server that keeps track of peers that are downloading a torrent.
//!
//! ## Tracker Preferences
//!
//! A DNS TXT record where the tracker operator lists the protocols and ports
//! clients should use, in order.
//!
//! # Links
//!
//! Description | Link
//! ---|---
//! `BitTorrent.org`. A forum for developers to exchange ideas about the direction of the `BitTorrent` protocol | <https://www.bittorrent.org>
//! `BitTorrent` Specification Wiki | <https://wiki.theory.org/BitTorrentSpecification>
//! UDP Tracker Protocol docs by `libtorrent` | <https://www.rasterbar.com/products/libtorrent/udp_tracker_protocol.html>
//! DNS Tracker Preferences | <https://www.bittorrent.org/beps/bep_0034.html>
//! Percent Encoding spec | <https://datatracker.ietf.org/doc/html/rfc3986#section-2.1>
pub mod bep34;
pub mod info_hash;
pub mod tracker;
