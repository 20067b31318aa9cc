use serde::{Deserialize, Serialize};

use super::database::Database;

/// Tracker lifecycle policy.
#[derive(Serialize, Deserialize, PartialEq, Eq, Debug, Clone)]
pub struct Core {
    /// Seconds a tracker may stay down before it is deleted. Default is one
    /// and a half years.
    #[serde(default = "Core::default_max_downtime")]
    pub max_downtime: u64,

    /// Re-check interval, in seconds, forced on trackers whose uptime dropped
    /// to zero.
    #[serde(default = "Core::default_dead_tracker_interval")]
    pub dead_tracker_interval: u64,

    /// Seconds an IP address previously used by a tracker is still
    /// considered as belonging to it when looking for conflicts.
    #[serde(default = "Core::default_recent_ip_ttl")]
    pub recent_ip_ttl: u64,

    // Database configuration.
    #[serde(default = "Core::default_database")]
    pub database: Database,
}

impl Default for Core {
    fn default() -> Self {
        Self {
            max_downtime: Self::default_max_downtime(),
            dead_tracker_interval: Self::default_dead_tracker_interval(),
            recent_ip_ttl: Self::default_recent_ip_ttl(),
            database: Self::default_database(),
        }
    }
}

impl Core {
    fn default_max_downtime() -> u64 {
        47_304_000
    }

    fn default_dead_tracker_interval() -> u64 {
        10_800
    }

    fn default_recent_ip_ttl() -> u64 {
        604_800
    }

    fn default_database() -> Database {
        Database::default()
    }
}
