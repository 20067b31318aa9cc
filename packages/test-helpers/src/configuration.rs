use std::env;

use torrust_tracker_monitor_configuration::{Configuration, Threshold};
use torrust_tracker_monitor_primitives::DatabaseDriver;

use crate::random;

/// This configuration is used for testing. It uses a random `SQLite` database
/// file, so tests running at the same time do not share trackers, and short
/// probe timeouts.
#[must_use]
pub fn ephemeral() -> Configuration {
    let mut config = Configuration::default();

    config.logging.threshold = Threshold::Off; // Change to `debug` for tests debugging

    // Ephemeral sqlite database
    let temp_directory = env::temp_dir();
    let random_db_id = random::string(16);
    let temp_file = temp_directory.join(format!("monitor_{random_db_id}.db"));
    config.core.database.driver = DatabaseDriver::Sqlite3;
    config.core.database.path = temp_file.to_string_lossy().into_owned();

    // Fake trackers answer on loopback straight away
    config.probe.timeout = 2;

    config
}

/// Ephemeral configuration with a small submission queue.
#[must_use]
pub fn ephemeral_with_queue_capacity(queue_capacity: usize) -> Configuration {
    let mut config = ephemeral();

    config.ingestion.queue_capacity = queue_capacity;

    config
}
