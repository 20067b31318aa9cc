//! **Torrust Tracker Monitor** keeps a list of public `BitTorrent` trackers
//! and probes them periodically to know whether they are alive.
//!
//! For every tracker the monitor records:
//!
//! - Whether the last announce succeeded (`up`) or not (`down`).
//! - The latency of the last successful announce.
//! - The re-announce interval advertised by the tracker.
//! - The uptime over the last 1000 checks.
//!
//! New trackers enter the monitored set through a submission pipeline that
//! validates the URL, rejects duplicates and IP conflicts with trackers
//! already monitored, and probes the candidate before admitting it.
//!
//! # Protocols
//!
//! The monitor announces to trackers like a regular peer would:
//!
//! - [BEP 15. UDP Tracker Protocol for `BitTorrent`](https://www.bittorrent.org/beps/bep_0015.html)
//! - [BEP 3. The `BitTorrent` Protocol Specification](https://www.bittorrent.org/beps/bep_0003.html) (HTTP trackers)
//! - [BEP 34. DNS Tracker Preferences](https://www.bittorrent.org/beps/bep_0034.html)
//!
//! Responses are decoded with the [`bencode`] package.
//!
//! # Components
//!
//! - [`shared::bit_torrent`]: the tracker clients and the DNS preferences resolver.
//! - [`core`]: the [`Monitor`](crate::core::Monitor) service, the tracker
//!   state machine, the announce orchestrator, the submission pipeline and the
//!   maintenance tasks.
//! - [`bootstrap`]: configuration, logging and the background jobs.
//! - [`app`]: starts the jobs.
//!
//! # Configuration
//!
//! The configuration is loaded from a TOML file. By default:
//!
//! ```text
//! ./share/default/config/monitor.development.sqlite3.toml
//! ```
//!
//! Refer to the [`torrust-tracker-monitor-configuration`](torrust_tracker_monitor_configuration)
//! package for the available options and the env vars that override them.
//!
//! # Run
//!
//! ```text
//! cargo run
//! ```
use torrust_tracker_monitor_clock::clock;

pub mod app;
pub mod bootstrap;
pub mod core;
pub mod shared;


/// This code needs to be copied into each crate.
/// Working version, for production.
#[cfg(not(test))]
#[allow(dead_code)]
pub(crate) type CurrentClock = clock::Working;

/// Stopped version, for testing.
#[cfg(test)]
#[allow(dead_code)]
pub(crate) type CurrentClock = clock::Stopped;
