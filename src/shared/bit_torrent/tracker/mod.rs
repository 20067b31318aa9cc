//! Clients for the two tracker protocols the monitor probes.
//!
//! - [`udp`]: [BEP 15. UDP Tracker Protocol](https://www.bittorrent.org/beps/bep_0015.html)
//! - [`http`]: [BEP 3. HTTP tracker announce](https://www.bittorrent.org/beps/bep_0003.html)
pub mod http;
pub mod udp;
