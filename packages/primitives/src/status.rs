use serde_repr::{Deserialize_repr, Serialize_repr};

/// Result of the last check of a tracker. Persisted as `0` or `1`.
#[derive(Serialize_repr, Deserialize_repr, Hash, Clone, Copy, Debug, PartialEq, Eq, Default)]
#[repr(u8)]
pub enum TrackerStatus {
    #[default]
    Down = 0,
    Up = 1,
}

impl TrackerStatus {
    /// The sample appended to the tracker history for this status.
    #[must_use]
    pub fn as_sample(self) -> u8 {
        self as u8
    }
}
