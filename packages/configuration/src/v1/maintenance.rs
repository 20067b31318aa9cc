use serde::{Deserialize, Serialize};

/// Periods of the background loops, in seconds.
#[derive(Serialize, Deserialize, PartialEq, Eq, Debug, Clone)]
pub struct Maintenance {
    /// How often outdated trackers are looked for and re-checked.
    #[serde(default = "Maintenance::default_check_interval")]
    pub check_interval: u64,

    /// How often the IP conflict audit runs.
    #[serde(default = "Maintenance::default_audit_interval")]
    pub audit_interval: u64,
}

impl Default for Maintenance {
    fn default() -> Self {
        Self {
            check_interval: Self::default_check_interval(),
            audit_interval: Self::default_audit_interval(),
        }
    }
}

impl Maintenance {
    fn default_check_interval() -> u64 {
        5
    }

    fn default_audit_interval() -> u64 {
        120
    }
}
