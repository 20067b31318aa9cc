//! Database errors.
//!
//! This module contains the [Database errors](crate::core::databases::error::Error).
use std::sync::Arc;

use torrust_tracker_monitor_primitives::DatabaseDriver;

use crate::core::error::ErrorKind;

#[derive(thiserror::Error, Debug, Clone)]
pub enum Error {
    /// The query unexpectedly returned nothing.
    #[error("The {driver} query unexpectedly returned nothing: {source}")]
    QueryReturnedNoRows {
        source: Arc<r2d2_sqlite::rusqlite::Error>,
        driver: DatabaseDriver,
    },

    /// The query was malformed.
    #[error("The {driver} query was malformed: {source}")]
    InvalidQuery {
        source: Arc<r2d2_sqlite::rusqlite::Error>,
        driver: DatabaseDriver,
    },

    /// Unable to serialize a record.
    #[error("Unable to serialize a {driver} record: {source}")]
    UnableToSerialize {
        source: Arc<serde_json::Error>,
        driver: DatabaseDriver,
    },

    /// Unable to create a connection pool
    #[error("Failed to create r2d2 {driver} connection pool: {source}")]
    ConnectionPool {
        source: Arc<r2d2::Error>,
        driver: DatabaseDriver,
    },
}

impl Error {
    #[must_use]
    pub fn kind(&self) -> ErrorKind {
        ErrorKind::Resource
    }
}

impl From<r2d2_sqlite::rusqlite::Error> for Error {
    fn from(err: r2d2_sqlite::rusqlite::Error) -> Self {
        match err {
            r2d2_sqlite::rusqlite::Error::QueryReturnedNoRows => Error::QueryReturnedNoRows {
                source: Arc::new(err),
                driver: DatabaseDriver::Sqlite3,
            },
            _ => Error::InvalidQuery {
                source: Arc::new(err),
                driver: DatabaseDriver::Sqlite3,
            },
        }
    }
}

impl From<(serde_json::Error, DatabaseDriver)> for Error {
    fn from(e: (serde_json::Error, DatabaseDriver)) -> Self {
        let (err, driver) = e;
        Self::UnableToSerialize {
            source: Arc::new(err),
            driver,
        }
    }
}

impl From<(r2d2::Error, DatabaseDriver)> for Error {
    fn from(e: (r2d2::Error, DatabaseDriver)) -> Self {
        let (err, driver) = e;
        Self::ConnectionPool {
            source: Arc::new(err),
            driver,
        }
    }
}
