//! Database driver factory.
//!
//! See [`databases::driver::build`](crate::core::databases::driver::build)
//! function for more information.
use torrust_tracker_monitor_primitives::DatabaseDriver;

use super::error::Error;
use super::sqlite::Sqlite;
use super::{Builder, Database};

/// It builds a new database driver and creates its tables.
///
/// Example for `SQLite3`:
///
/// ```rust,no_run
/// use torrust_tracker_monitor::core::databases;
/// use torrust_tracker_monitor_primitives::DatabaseDriver;
///
/// let db_driver = DatabaseDriver::Sqlite3;
/// let db_path = "./storage/monitor/lib/database/sqlite3.db".to_string();
/// let database = databases::driver::build(&db_driver, &db_path);
/// ```
///
/// # Errors
///
/// This function will return an error if unable to connect to the database
/// or to create its tables.
pub fn build(driver: &DatabaseDriver, db_path: &str) -> Result<Box<dyn Database>, Error> {
    let database = match driver {
        DatabaseDriver::Sqlite3 => Builder::<Sqlite>::build(db_path),
    }?;

    database.create_database_tables()?;

    Ok(database)
}
