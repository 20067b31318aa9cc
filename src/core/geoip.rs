//! Location of tracker IPs.
//!
//! The monitor shows a country and a network for every IP of a tracker.
//! The lookup database is not part of the monitor, it's provided through the
//! [`GeoIp`] trait. [`NoGeoIp`] is used when there is none.
use std::net::IpAddr;

#[cfg(test)]
use mockall::automock;

/// Location of an IP address.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct GeoInfo {
    pub country: String,
    pub country_code: String,
    pub network: String,
}

#[cfg_attr(test, automock)]
pub trait GeoIp: Sync + Send {
    /// Returns `None` when the IP is not in the database.
    fn lookup(&self, ip: IpAddr) -> Option<GeoInfo>;
}

/// A lookup that knows no IP.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoGeoIp;

impl GeoIp for NoGeoIp {
    fn lookup(&self, _ip: IpAddr) -> Option<GeoInfo> {
        None
    }
}

/// Locates every IP. Unknown IPs get empty values so the three lists keep
/// one entry per IP.
pub fn locate_all(geoip: &dyn GeoIp, ips: &[IpAddr]) -> Vec<GeoInfo> {
    ips.iter().map(|ip| geoip.lookup(*ip).unwrap_or_default()).collect()
}
