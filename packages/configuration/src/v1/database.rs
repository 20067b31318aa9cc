use serde::{Deserialize, Serialize};
use torrust_tracker_monitor_primitives::DatabaseDriver;

#[derive(Serialize, Deserialize, PartialEq, Eq, Debug, Clone)]
pub struct Database {
    /// Database driver. Possible values are: `Sqlite3`.
    #[serde(default = "Database::default_driver")]
    pub driver: DatabaseDriver,

    /// Database connection string. For `Sqlite3` it is the path of the
    /// database file, for example `./storage/monitor/lib/database/sqlite3.db`.
    #[serde(default = "Database::default_path")]
    pub path: String,
}

impl Default for Database {
    fn default() -> Self {
        Self {
            driver: Self::default_driver(),
            path: Self::default_path(),
        }
    }
}

impl Database {
    fn default_driver() -> DatabaseDriver {
        DatabaseDriver::Sqlite3
    }

    fn default_path() -> String {
        String::from("./storage/monitor/lib/database/sqlite3.db")
    }
}
