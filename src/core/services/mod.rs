//! Monitor domain services.
//!
//! It builds the [`Monitor`] with the collaborators used in production.
use std::sync::Arc;
use std::time::Duration;

use thiserror::Error;
use torrust_tracker_monitor_configuration::Configuration;

use crate::core::announcer::{Announcer, NetworkTransport, Redactor};
use crate::core::databases::{self, driver};
use crate::core::dns::TokioHostResolver;
use crate::core::geoip::NoGeoIp;
use crate::core::Monitor;
use crate::shared::bit_torrent::bep34::DnsTxtResolver;
use crate::shared::bit_torrent::tracker::http;

#[derive(Debug, Clone, Error)]
pub enum Error {
    #[error("unable to set up the database: {source}")]
    Database { source: databases::error::Error },

    #[error("unable to set up the HTTP client: {source}")]
    HttpClient { source: http::Error },
}

/// It returns a new monitor building its dependencies.
///
/// # Errors
///
/// Will return an error if the database can't be opened or the HTTP client
/// can't be built.
pub fn monitor_factory(config: &Arc<Configuration>) -> Result<Monitor, Error> {
    let database = driver::build(&config.core.database.driver, &config.core.database.path)
        .map_err(|source| Error::Database { source })?;

    let timeout = Duration::from_secs(config.probe.timeout);

    let transport = NetworkTransport::new(&config.probe).map_err(|source| Error::HttpClient { source })?;

    let announcer = Announcer::new(
        Arc::new(transport),
        Arc::new(DnsTxtResolver::new(timeout)),
        Redactor::new(config.probe.public_ipv4, config.probe.public_ipv6),
    );

    Ok(Monitor::new(
        config,
        Arc::new(database),
        announcer,
        Arc::new(TokioHostResolver::new(timeout)),
        Arc::new(NoGeoIp),
    ))
}
