//! Configuration data structures for the Torrust tracker monitor.
//!
//! The configuration is loaded with [`figment`] from, in order of priority:
//!
//! 1. Per-key environment overrides: `TORRUST_MONITOR_CONFIG_OVERRIDE_<SECTION>__<KEY>`,
//!    for example `TORRUST_MONITOR_CONFIG_OVERRIDE_CORE__MAX_DOWNTIME=86400`.
//! 2. The whole TOML document in the `TORRUST_MONITOR_CONFIG_TOML` env var.
//! 3. The TOML file at `TORRUST_MONITOR_CONFIG_TOML_PATH`, or the default path
//!    given by the application.
//!
//! Every option has a default, so an empty TOML document is a valid
//! configuration. The current version for configuration is [`v1`].
pub mod v1;

use std::env;
use std::sync::Arc;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Default timeout for every network operation of a probe.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

// Environment variables

/// The whole `monitor.toml` file content. It has priority over the config file.
/// Even if the file is not on the default path.
const ENV_VAR_CONFIG_TOML: &str = "TORRUST_MONITOR_CONFIG_TOML";

/// The `monitor.toml` file location.
pub const ENV_VAR_CONFIG_TOML_PATH: &str = "TORRUST_MONITOR_CONFIG_TOML_PATH";

/// Prefix of the env vars overriding a single option. Sections are
/// separated with a double underscore.
pub const CONFIG_OVERRIDE_PREFIX: &str = "TORRUST_MONITOR_CONFIG_OVERRIDE_";

/// Separator between sections in the override env var names.
pub const CONFIG_OVERRIDE_SEPARATOR: &str = "__";

pub type Configuration = v1::Configuration;
pub type Logging = v1::logging::Logging;
pub type Core = v1::core::Core;
pub type Database = v1::database::Database;
pub type Probe = v1::probe::Probe;
pub type Ingestion = v1::ingestion::Ingestion;
pub type Maintenance = v1::maintenance::Maintenance;

/// Information required for loading config
#[derive(Debug, Default, Clone)]
pub struct Info {
    config_toml: Option<String>,
    config_toml_path: String,
}

impl Info {
    /// Build Configuration Info
    ///
    /// # Errors
    ///
    /// Will return `Err` if unable to obtain a configuration.
    ///
    #[allow(clippy::needless_pass_by_value)]
    pub fn new(default_config_toml_path: String) -> Result<Self, Error> {
        let config_toml = if let Ok(config_toml) = env::var(ENV_VAR_CONFIG_TOML) {
            println!("Loading configuration from environment variable:\n {config_toml}");
            Some(config_toml)
        } else {
            None
        };

        let config_toml_path = if let Ok(config_toml_path) = env::var(ENV_VAR_CONFIG_TOML_PATH) {
            println!("Loading configuration from file: `{config_toml_path}` ...");
            config_toml_path
        } else {
            println!("Loading configuration from default configuration file: `{default_config_toml_path}` ...");
            default_config_toml_path
        };

        Ok(Self {
            config_toml,
            config_toml_path,
        })
    }

    /// Info for an inline TOML document, ignoring the environment.
    #[must_use]
    pub fn from_toml(config_toml: &str) -> Self {
        Self {
            config_toml: Some(config_toml.to_owned()),
            config_toml_path: String::new(),
        }
    }
}

/// The log level threshold.
#[derive(Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Debug, Hash, Clone, Copy, derive_more::Display)]
#[serde(rename_all = "lowercase")]
pub enum Threshold {
    /// A threshold lower than all security levels.
    #[display("off")]
    Off,
    #[display("error")]
    Error,
    #[display("warn")]
    Warn,
    #[display("info")]
    Info,
    #[display("debug")]
    Debug,
    /// A threshold higher than all security levels.
    #[display("trace")]
    Trace,
}

/// Errors that can occur when loading the configuration.
#[derive(Error, Debug, Clone)]
pub enum Error {
    /// Unable to load the configuration from the configuration file or the
    /// environment.
    #[error("Failed processing the configuration: {source}")]
    ConfigError { source: Arc<figment::Error> },

    /// Unable to write the configuration file.
    #[error("Unable to save the configuration to `{path}`: {source}")]
    UnableToSaveToFile { path: String, source: Arc<std::io::Error> },

    /// Unable to encode the configuration as TOML.
    #[error("Unable to encode the configuration as TOML: {source}")]
    UnableToEncode { source: Arc<toml::ser::Error> },
}

impl From<figment::Error> for Error {
    fn from(err: figment::Error) -> Self {
        Self::ConfigError { source: Arc::new(err) }
    }
}
