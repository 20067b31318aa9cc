use derive_more::Display;
use serde::{Deserialize, Serialize};

/// Announce events. Described on the
/// [BEP 3. The `BitTorrent` Protocol Specification](https://www.bittorrent.org/beps/bep_0003.html)
/// and, for their numeric form, on
/// [BEP 15. UDP Tracker Protocol](https://www.bittorrent.org/beps/bep_0015.html).
///
/// The monitor announces as a peer that just started so trackers do not
/// expect it to have announced before.
#[derive(Hash, Clone, Copy, Debug, Display, Serialize, Deserialize, PartialEq, Eq)]
pub enum AnnounceEvent {
    #[display("")]
    None,
    #[display("completed")]
    Completed,
    #[display("started")]
    Started,
    #[display("stopped")]
    Stopped,
}

impl AnnounceEvent {
    /// The value of the event field in a UDP announce request.
    #[inline]
    #[must_use]
    pub fn to_udp_code(self) -> i32 {
        match self {
            AnnounceEvent::None => 0,
            AnnounceEvent::Completed => 1,
            AnnounceEvent::Started => 2,
            AnnounceEvent::Stopped => 3,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::AnnounceEvent;

    #[test]
    fn the_started_event_should_be_encoded_as_2_for_udp() {
        assert_eq!(AnnounceEvent::Started.to_udp_code(), 2);
        assert_eq!(AnnounceEvent::Started.to_string(), "started");
    }
}
