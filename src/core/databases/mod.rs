//! The persistence module.
//!
//! Persistence is implemented with one [`Database`] trait. There is one
//! implementation of the trait (one driver):
//!
//! - [`Sqlite`](crate::core::databases::sqlite::Sqlite)
//!
//! > **NOTICE**: There are no database migrations. The tracker record is
//! stored as JSON so new fields with defaults don't need a schema change.
//!
//! # Trackers
//!
//!  Field  | Sample data                                   | Description
//! ---|---|---
//!  `host` | `tracker.example.com`                         | Tracker host, primary key
//!  `data` | `{"host":"tracker.example.com","url":"udp://...` | The [`Tracker`](crate::core::tracker::Tracker) serialized as JSON
pub mod driver;
pub mod error;
pub mod sqlite;

use std::marker::PhantomData;

use async_trait::async_trait;

use self::error::Error;
use crate::core::tracker::Tracker;

struct Builder<T>
where
    T: Database,
{
    phantom: PhantomData<T>,
}

impl<T> Builder<T>
where
    T: Database + 'static,
{
    /// .
    ///
    /// # Errors
    ///
    /// Will return `r2d2::Error` if `db_path` is not able to create a database.
    pub(self) fn build(db_path: &str) -> Result<Box<dyn Database>, Error> {
        Ok(Box::new(T::new(db_path)?))
    }
}

/// The persistence trait. It contains all the methods to interact with the database.
#[async_trait]
pub trait Database: Sync + Send {
    /// It instantiates a new database driver.
    ///
    /// # Errors
    ///
    /// Will return `r2d2::Error` if `db_path` is not able to create a database.
    fn new(db_path: &str) -> Result<Self, Error>
    where
        Self: std::marker::Sized;

    // Schema

    /// It generates the database tables.
    ///
    /// # Errors
    ///
    /// Will return `Error` if unable to create own tables.
    fn create_database_tables(&self) -> Result<(), Error>;

    /// It drops the database tables.
    ///
    /// # Errors
    ///
    /// Will return `Err` if unable to drop tables.
    fn drop_database_tables(&self) -> Result<(), Error>;

    // Trackers

    /// It loads every monitored tracker. Rows that can't be decoded are
    /// skipped.
    ///
    /// # Errors
    ///
    /// Will return `Err` if unable to load.
    async fn load_trackers(&self) -> Result<Vec<Tracker>, Error>;

    /// It returns `Some(Tracker)` if a tracker with that host is monitored,
    /// `None` otherwise.
    ///
    /// # Errors
    ///
    /// Will return `Err` if unable to load.
    async fn get_tracker(&self, host: String) -> Result<Option<Tracker>, Error>;

    /// It inserts the tracker or replaces the one with the same host.
    ///
    /// # Errors
    ///
    /// Will return `Err` if unable to save.
    async fn save_tracker(&self, tracker: Tracker) -> Result<(), Error>;

    /// It removes the tracker with that host. It returns the number of
    /// removed rows.
    ///
    /// # Errors
    ///
    /// Will return `Err` if unable to remove.
    async fn remove_tracker(&self, host: String) -> Result<usize, Error>;
}
