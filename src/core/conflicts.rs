//! IP conflicts between monitored trackers.
//!
//! Two trackers sharing an IP are very likely the same tracker reachable
//! through two names. Submissions are rejected when one of the candidate IPs
//! is a current IP of a monitored tracker, or when a candidate IP matches an
//! IP a monitored tracker used recently. The audit loop only reports
//! conflicts between monitored trackers.
use std::collections::HashMap;
use std::fmt;
use std::net::IpAddr;

use crate::core::tracker::Tracker;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Conflict {
    /// Two or more trackers currently resolve to the same IP.
    SharedCurrentIp { ip: IpAddr, hosts: Vec<String> },
    /// A current IP of a tracker was recently used by another one.
    CurrentMatchesRecent {
        ip: IpAddr,
        current_host: String,
        recent_host: String,
    },
}

impl fmt::Display for Conflict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Conflict::SharedCurrentIp { ip, hosts } => write!(f, "{ip} is a current IP of {}", hosts.join(", ")),
            Conflict::CurrentMatchesRecent {
                ip,
                current_host,
                recent_host,
            } => write!(f, "{ip} is a current IP of {current_host} and a recent IP of {recent_host}"),
        }
    }
}

/// Hosts by IP, built from the monitored trackers.
#[derive(Debug, Default)]
pub struct IpIndex {
    current: HashMap<IpAddr, Vec<String>>,
    recent: HashMap<IpAddr, Vec<String>>,
}

impl IpIndex {
    #[must_use]
    pub fn build(trackers: &[Tracker]) -> Self {
        let mut index = Self::default();

        for tracker in trackers {
            for ip in &tracker.ips {
                index.current.entry(*ip).or_default().push(tracker.host.clone());
            }
            for ip in tracker.recent_ips.keys() {
                index.recent.entry(*ip).or_default().push(tracker.host.clone());
            }
        }

        index
    }

    /// The first IP of `ips` that is a current IP of another tracker, with
    /// that tracker host.
    #[must_use]
    pub fn current_conflict(&self, host: &str, ips: &[IpAddr]) -> Option<(IpAddr, String)> {
        Self::find(&self.current, host, ips)
    }

    /// The first IP of `ips` that was recently used by another tracker, with
    /// that tracker host.
    #[must_use]
    pub fn recent_conflict(&self, host: &str, ips: &[IpAddr]) -> Option<(IpAddr, String)> {
        Self::find(&self.recent, host, ips)
    }

    fn find(hosts_by_ip: &HashMap<IpAddr, Vec<String>>, host: &str, ips: &[IpAddr]) -> Option<(IpAddr, String)> {
        ips.iter().find_map(|ip| {
            hosts_by_ip
                .get(ip)
                .and_then(|hosts| hosts.iter().find(|other| *other != host))
                .map(|other| (*ip, other.clone()))
        })
    }

    /// Every conflict between the indexed trackers, sorted by IP.
    #[must_use]
    pub fn audit(&self) -> Vec<Conflict> {
        let mut conflicts = vec![];

        let mut ips: Vec<&IpAddr> = self.current.keys().collect();
        ips.sort();

        for ip in ips {
            let hosts = &self.current[ip];

            if hosts.len() > 1 {
                conflicts.push(Conflict::SharedCurrentIp {
                    ip: *ip,
                    hosts: hosts.clone(),
                });
            }

            // Hosts still using the IP are already part of the shared IP conflict.
            if let Some(recent_hosts) = self.recent.get(ip) {
                for current_host in hosts {
                    for recent_host in recent_hosts.iter().filter(|recent_host| !hosts.contains(*recent_host)) {
                        conflicts.push(Conflict::CurrentMatchesRecent {
                            ip: *ip,
                            current_host: current_host.clone(),
                            recent_host: recent_host.clone(),
                        });
                    }
                }
            }
        }

        conflicts
    }
}
