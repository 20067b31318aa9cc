//! Setup of the application: configuration, logging and the [`Monitor`] with
//! its production collaborators.
use std::sync::Arc;

use torrust_tracker_monitor_configuration::Configuration;

use crate::bootstrap;
use crate::core::services::monitor_factory;
use crate::core::Monitor;

/// It loads the configuration, sets up logging and builds the monitor.
///
/// # Errors
///
/// Will return an error if the configuration can't be loaded or the monitor
/// can't be built.
pub fn setup() -> anyhow::Result<(Arc<Configuration>, Arc<Monitor>)> {
    let configuration = Arc::new(bootstrap::config::initialize_configuration()?);
    let monitor = initialize_with_configuration(&configuration)?;

    Ok((configuration, monitor))
}

/// # Errors
///
/// Will return an error if the monitor can't be built.
pub fn initialize_with_configuration(configuration: &Arc<Configuration>) -> anyhow::Result<Arc<Monitor>> {
    initialize_logging(configuration);
    Ok(Arc::new(initialize_monitor(configuration)?))
}

/// # Errors
///
/// Will return an error if the database or the HTTP client can't be set up.
pub fn initialize_monitor(config: &Arc<Configuration>) -> Result<Monitor, crate::core::services::Error> {
    monitor_factory(config)
}

pub fn initialize_logging(config: &Arc<Configuration>) {
    bootstrap::logging::setup(config);
}
