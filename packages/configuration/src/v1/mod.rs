//! Version `1` of the monitor configuration.
//!
//! A complete configuration file with the default values:
//!
//! ```toml
//! [logging]
//! threshold = "info"
//!
//! [core]
//! max_downtime = 47304000
//! dead_tracker_interval = 10800
//! recent_ip_ttl = 604800
//!
//! [core.database]
//! driver = "Sqlite3"
//! path = "./storage/monitor/lib/database/sqlite3.db"
//!
//! [probe]
//! timeout = 10
//! max_response_size = 1048576
//! user_agent = "torrust-tracker-monitor/3.0.0-develop"
//! # public_ipv4 = "203.0.113.7"
//! # public_ipv6 = "2001:db8::7"
//!
//! [ingestion]
//! queue_capacity = 150
//! min_interval = 300
//! max_interval = 10800
//! history_capacity = 600
//! initial_submissions = []
//!
//! [maintenance]
//! check_interval = 5
//! audit_interval = 120
//! ```
pub mod core;
pub mod database;
pub mod ingestion;
pub mod logging;
pub mod maintenance;
pub mod probe;

use std::fs;
use std::sync::Arc;

use figment::providers::{Env, Format, Toml};
use figment::Figment;
use serde::{Deserialize, Serialize};

use self::core::Core;
use self::ingestion::Ingestion;
use self::logging::Logging;
use self::maintenance::Maintenance;
use self::probe::Probe;
use crate::{Error, Info, CONFIG_OVERRIDE_PREFIX, CONFIG_OVERRIDE_SEPARATOR};

/// The whole monitor configuration.
#[derive(Serialize, Deserialize, PartialEq, Eq, Debug, Clone, Default)]
pub struct Configuration {
    /// Logging configuration
    #[serde(default)]
    pub logging: Logging,

    /// Tracker lifecycle and persistence configuration.
    #[serde(default)]
    pub core: Core,

    /// Announce probe configuration.
    #[serde(default)]
    pub probe: Probe,

    /// Submission pipeline configuration.
    #[serde(default)]
    pub ingestion: Ingestion,

    /// Background loops configuration.
    #[serde(default)]
    pub maintenance: Maintenance,
}

impl Configuration {
    /// Loads the configuration from the `Info` struct. The inline TOML has
    /// priority over the configuration file. Env var overrides are applied
    /// last.
    ///
    /// # Errors
    ///
    /// Will return `Err` if the sources can't be read or contain a bad configuration.
    pub fn load(info: &Info) -> Result<Configuration, Error> {
        let figment = if let Some(config_toml) = &info.config_toml {
            Figment::from(Toml::string(config_toml))
        } else {
            Figment::from(Toml::file(&info.config_toml_path))
        };

        let figment = figment.merge(Env::prefixed(CONFIG_OVERRIDE_PREFIX).split(CONFIG_OVERRIDE_SEPARATOR));

        let config: Configuration = figment.extract()?;

        Ok(config)
    }

    /// Loads the configuration from the configuration file.
    ///
    /// # Errors
    ///
    /// Will return `Err` if `path` has a bad configuration.
    pub fn load_from_file(path: &str) -> Result<Configuration, Error> {
        let info = Info {
            config_toml: None,
            config_toml_path: path.to_owned(),
        };

        Self::load(&info)
    }

    /// Saves the configuration to the configuration file.
    ///
    /// # Errors
    ///
    /// Will return `Err` if the configuration can't be encoded or the file
    /// can't be written.
    pub fn save_to_file(&self, path: &str) -> Result<(), Error> {
        fs::write(path, self.to_toml()?).map_err(|err| Error::UnableToSaveToFile {
            path: path.to_owned(),
            source: Arc::new(err),
        })
    }

    /// Encodes the configuration to TOML.
    ///
    /// # Errors
    ///
    /// Will return `Err` if the configuration can't be encoded.
    pub fn to_toml(&self) -> Result<String, Error> {
        toml::to_string(self).map_err(|err| Error::UnableToEncode { source: Arc::new(err) })
    }
}
