//! Bounded logs of the last probes.
//!
//! The monitor keeps two of them: one for the periodic checks and one for
//! the submissions. Every announce attempt adds an entry with the URL, the
//! result and the tracker response or the error. Newest entries come first.
use std::collections::VecDeque;
use std::net::IpAddr;
use std::time::Duration;

use parking_lot::RwLock;
use serde::Serialize;
use serde_with::{serde_as, DurationSeconds};
use torrust_tracker_monitor_clock::clock::Time;
use torrust_tracker_monitor_primitives::status::TrackerStatus;
use torrust_tracker_monitor_primitives::DurationSinceUnixEpoch;

use crate::CurrentClock;

#[serde_as]
#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct DebugEntry {
    pub url: String,
    #[serde_as(as = "DurationSeconds<u64>")]
    pub time: DurationSinceUnixEpoch,
    pub status: TrackerStatus,
    pub ip: Option<IpAddr>,
    /// Human readable lines, in the order they were added.
    pub info: Vec<String>,
}

impl DebugEntry {
    #[must_use]
    pub fn new(url: &str, status: TrackerStatus, ip: Option<IpAddr>, info: Vec<String>) -> Self {
        Self {
            url: url.to_owned(),
            time: Duration::from_secs(CurrentClock::now().as_secs()),
            status,
            ip,
            info,
        }
    }
}

#[derive(Debug)]
pub struct DebugHistory {
    capacity: usize,
    entries: RwLock<VecDeque<DebugEntry>>,
}

impl DebugHistory {
    #[must_use]
    pub fn new(capacity: usize) -> Self {
        Self {
            capacity,
            entries: RwLock::new(VecDeque::with_capacity(capacity)),
        }
    }

    /// Adds an entry at the front. The oldest entry is dropped when the
    /// history is full.
    pub fn push(&self, entry: DebugEntry) {
        let mut entries = self.entries.write();
        entries.push_front(entry);
        entries.truncate(self.capacity);
    }

    /// Newest first.
    #[must_use]
    pub fn entries(&self) -> Vec<DebugEntry> {
        self.entries.read().iter().cloned().collect()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.read().len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.read().is_empty()
    }

    /// Edits the newest entry for `url`. Returns `false` if there is none.
    pub fn edit_latest<F>(&self, url: &str, edit: F) -> bool
    where
        F: FnOnce(&mut DebugEntry),
    {
        let mut entries = self.entries.write();

        match entries.iter_mut().find(|entry| entry.url == url) {
            Some(entry) => {
                edit(entry);
                true
            }
            None => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use torrust_tracker_monitor_clock::clock::stopped::Stopped as _;
    use torrust_tracker_monitor_clock::clock::Stopped;
    use torrust_tracker_monitor_primitives::status::TrackerStatus;

    use super::{DebugEntry, DebugHistory};

    fn entry(url: &str) -> DebugEntry {
        DebugEntry::new(url, TrackerStatus::Up, None, vec![])
    }

    #[test]
    fn it_should_keep_the_newest_entries_first() {
        let history = DebugHistory::new(10);

        history.push(entry("udp://a.example:1/announce"));
        history.push(entry("udp://b.example:1/announce"));

        let urls: Vec<String> = history.entries().into_iter().map(|entry| entry.url).collect();
        assert_eq!(urls, vec!["udp://b.example:1/announce", "udp://a.example:1/announce"]);
    }

    #[test]
    fn it_should_drop_the_oldest_entry_when_it_is_full() {
        let history = DebugHistory::new(2);

        history.push(entry("udp://a.example:1/announce"));
        history.push(entry("udp://b.example:1/announce"));
        history.push(entry("udp://c.example:1/announce"));

        assert_eq!(history.len(), 2);
        assert_eq!(history.entries()[1].url, "udp://b.example:1/announce");
    }

    #[test]
    fn it_should_edit_the_newest_entry_of_a_url() {
        let history = DebugHistory::new(10);
        history.push(entry("udp://a.example:1/announce"));
        history.push(entry("udp://a.example:1/announce"));

        let edited = history.edit_latest("udp://a.example:1/announce", |entry| {
            entry.status = TrackerStatus::Down;
            entry.info.push("rejected".to_string());
        });

        assert!(edited);
        assert_eq!(history.entries()[0].status, TrackerStatus::Down);
        assert_eq!(history.entries()[1].status, TrackerStatus::Up);
        assert!(!history.edit_latest("udp://missing.example:1/announce", |_| {}));
    }

    #[test]
    fn the_entry_time_should_be_the_current_time_in_whole_seconds() {
        Stopped::local_set(&Duration::new(1_700_000_000, 500));

        assert_eq!(entry("udp://a.example:1/announce").time, Duration::from_secs(1_700_000_000));
    }
}
