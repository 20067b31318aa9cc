use serde::{Deserialize, Serialize};

/// Options for the submission pipeline.
#[derive(Serialize, Deserialize, PartialEq, Eq, Debug, Clone)]
pub struct Ingestion {
    /// Maximum number of submissions waiting to be probed.
    #[serde(default = "Ingestion::default_queue_capacity")]
    pub queue_capacity: usize,

    /// Smallest announce interval, in seconds, accepted from a new tracker.
    #[serde(default = "Ingestion::default_min_interval")]
    pub min_interval: u64,

    /// Largest announce interval, in seconds, accepted from a new tracker.
    #[serde(default = "Ingestion::default_max_interval")]
    pub max_interval: u64,

    /// Number of entries kept in each debug history.
    #[serde(default = "Ingestion::default_history_capacity")]
    pub history_capacity: usize,

    /// Tracker URLs submitted when the monitor starts.
    #[serde(default = "Ingestion::default_initial_submissions")]
    pub initial_submissions: Vec<String>,
}

impl Default for Ingestion {
    fn default() -> Self {
        Self {
            queue_capacity: Self::default_queue_capacity(),
            min_interval: Self::default_min_interval(),
            max_interval: Self::default_max_interval(),
            history_capacity: Self::default_history_capacity(),
            initial_submissions: Self::default_initial_submissions(),
        }
    }
}

impl Ingestion {
    fn default_queue_capacity() -> usize {
        150
    }

    fn default_min_interval() -> u64 {
        300
    }

    fn default_max_interval() -> u64 {
        10_800
    }

    fn default_history_capacity() -> usize {
        600
    }

    fn default_initial_submissions() -> Vec<String> {
        Vec::new()
    }
}
