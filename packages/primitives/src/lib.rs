//! Primitive types for the Torrust tracker monitor.
//!
//! These types are shared by the monitor crate and its configuration package.
use std::time::Duration;

use serde::{Deserialize, Serialize};

pub mod announce_event;
pub mod scheme;
pub mod status;

/// Duration since the Unix Epoch.
pub type DurationSinceUnixEpoch = Duration;

/// The database management system used to persist the monitored trackers.
#[derive(Serialize, Deserialize, PartialEq, Eq, Debug, Clone, Copy, derive_more::Display)]
pub enum DatabaseDriver {
    /// The `SQLite3` database driver.
    Sqlite3,
}
