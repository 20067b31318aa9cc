//! Time related functions and types for the tracker monitor.
//!
//! Every timestamp the monitor stores (last check, last uptime, debug entries)
//! is a [`DurationSinceUnixEpoch`](torrust_tracker_monitor_primitives::DurationSinceUnixEpoch)
//! taken from a clock implementing [`clock::Time`].
//!
//! Production code uses the [`clock::Working`] clock. Tests use the
//! [`clock::Stopped`] clock, which returns a per-thread fixed time that
//! the test can move forward and backward:
//!
//! ```rust
//! use std::time::Duration;
//!
//! use torrust_tracker_monitor_clock::clock::stopped::Stopped as _;
//! use torrust_tracker_monitor_clock::clock::{Stopped, Time};
//!
//! Stopped::local_set(&Duration::from_secs(1_000));
//! Stopped::local_add(&Duration::from_secs(5)).unwrap();
//!
//! assert_eq!(Stopped::now(), Duration::from_secs(1_005));
//! assert_eq!(Stopped::seconds_since(Duration::from_secs(1_000)), 5);
//! ```
pub mod clock;
pub mod static_time;

#[macro_use]
extern crate lazy_static;

/// This code needs to be copied into each crate.
/// Working version, for production.
#[cfg(not(test))]
#[allow(dead_code)]
pub(crate) type CurrentClock = clock::Working;

/// Stopped version, for testing.
#[cfg(test)]
#[allow(dead_code)]
pub(crate) type CurrentClock = clock::Stopped;
