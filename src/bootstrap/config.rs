//! Initialize configuration from file or env var.
//!
//! All environment variables are prefixed with `TORRUST_MONITOR_`.
//! Refer to the [configuration package](torrust_tracker_monitor_configuration)
//! for the list of variables.
use torrust_tracker_monitor_configuration::{Configuration, Error, Info};

// Default values
pub const DEFAULT_PATH_CONFIG: &str = "./share/default/config/monitor.development.sqlite3.toml";

/// It loads the application configuration from the environment.
///
/// There are two methods to inject the configuration:
///
/// 1. By using a config file: `monitor.toml`.
/// 2. Environment variable: `TORRUST_MONITOR_CONFIG_TOML`. The variable contains the same contents as the `monitor.toml` file.
///
/// Environment variable has priority over the config file.
///
/// # Errors
///
/// Will return an error if the configuration can't be loaded or has invalid
/// values.
pub fn initialize_configuration() -> Result<Configuration, Error> {
    let info = Info::new(DEFAULT_PATH_CONFIG.to_string())?;

    Configuration::load(&info)
}

#[cfg(test)]
mod tests {

    #[test]
    fn it_should_load_with_default_config() {
        use crate::bootstrap::config::initialize_configuration;

        drop(initialize_configuration().unwrap());
    }
}
