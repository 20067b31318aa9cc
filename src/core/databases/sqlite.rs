//! The `SQLite3` database driver.
use async_trait::async_trait;
use r2d2::Pool;
use r2d2_sqlite::rusqlite::{params, OptionalExtension};
use r2d2_sqlite::SqliteConnectionManager;
use torrust_tracker_monitor_primitives::DatabaseDriver;
use tracing::warn;

use super::{Database, Error};
use crate::core::tracker::Tracker;

const DRIVER: DatabaseDriver = DatabaseDriver::Sqlite3;

pub struct Sqlite {
    pool: Pool<SqliteConnectionManager>,
}

fn decode_tracker(host: &str, data: &str) -> Option<Tracker> {
    match serde_json::from_str::<Tracker>(data) {
        Ok(tracker) => Some(tracker),
        Err(err) => {
            warn!("Skipping the stored tracker {host}, unable to decode it: {err}");
            None
        }
    }
}

#[async_trait]
impl Database for Sqlite {
    /// It instantiates a new `SQLite3` database driver.
    ///
    /// Refer to [`databases::Database::new`](crate::core::databases::Database::new).
    ///
    /// # Errors
    ///
    /// Will return `r2d2::Error` if `db_path` is not able to create `SqLite` database.
    fn new(db_path: &str) -> Result<Sqlite, Error> {
        let cm = SqliteConnectionManager::file(db_path);
        Pool::new(cm).map_or_else(|err| Err((err, DatabaseDriver::Sqlite3).into()), |pool| Ok(Sqlite { pool }))
    }

    /// Refer to [`databases::Database::create_database_tables`](crate::core::databases::Database::create_database_tables).
    fn create_database_tables(&self) -> Result<(), Error> {
        let create_trackers_table = "
        CREATE TABLE IF NOT EXISTS trackers (
            host TEXT PRIMARY KEY NOT NULL,
            data TEXT NOT NULL
        );"
        .to_string();

        let conn = self.pool.get().map_err(|e| (e, DRIVER))?;

        conn.execute(&create_trackers_table, [])?;

        Ok(())
    }

    /// Refer to [`databases::Database::drop_database_tables`](crate::core::databases::Database::drop_database_tables).
    fn drop_database_tables(&self) -> Result<(), Error> {
        let drop_trackers_table = "
        DROP TABLE trackers;"
            .to_string();

        let conn = self.pool.get().map_err(|e| (e, DRIVER))?;

        conn.execute(&drop_trackers_table, [])?;

        Ok(())
    }

    /// Refer to [`databases::Database::load_trackers`](crate::core::databases::Database::load_trackers).
    async fn load_trackers(&self) -> Result<Vec<Tracker>, Error> {
        let conn = self.pool.get().map_err(|e| (e, DRIVER))?;

        let mut stmt = conn.prepare("SELECT host, data FROM trackers ORDER BY host")?;

        let rows_iter = stmt.query_map([], |row| {
            let host: String = row.get(0)?;
            let data: String = row.get(1)?;
            Ok((host, data))
        })?;

        let trackers: Vec<Tracker> = rows_iter
            .filter_map(|row| match row {
                Ok(row) => Some(row),
                Err(err) => {
                    warn!("Skipping a stored tracker, unable to read its row: {err}");
                    None
                }
            })
            .filter_map(|(host, data)| decode_tracker(&host, &data))
            .collect();

        Ok(trackers)
    }

    /// Refer to [`databases::Database::get_tracker`](crate::core::databases::Database::get_tracker).
    async fn get_tracker(&self, host: String) -> Result<Option<Tracker>, Error> {
        let conn = self.pool.get().map_err(|e| (e, DRIVER))?;

        let mut stmt = conn.prepare("SELECT data FROM trackers WHERE host = ?")?;

        let data: Option<String> = stmt.query_row([&host], |row| row.get(0)).optional()?;

        Ok(data.and_then(|data| decode_tracker(&host, &data)))
    }

    /// Refer to [`databases::Database::save_tracker`](crate::core::databases::Database::save_tracker).
    async fn save_tracker(&self, tracker: Tracker) -> Result<(), Error> {
        let data = serde_json::to_string(&tracker).map_err(|e| (e, DRIVER))?;

        let conn = self.pool.get().map_err(|e| (e, DRIVER))?;

        conn.execute(
            "INSERT INTO trackers (host, data) VALUES (?1, ?2) ON CONFLICT(host) DO UPDATE SET data = excluded.data",
            params![tracker.host, data],
        )?;

        Ok(())
    }

    /// Refer to [`databases::Database::remove_tracker`](crate::core::databases::Database::remove_tracker).
    async fn remove_tracker(&self, host: String) -> Result<usize, Error> {
        let conn = self.pool.get().map_err(|e| (e, DRIVER))?;

        let deleted = conn.execute("DELETE FROM trackers WHERE host = ?", [&host])?;

        Ok(deleted)
    }
}

#[cfg(test)]
mod tests {
    use std::net::IpAddr;

    use torrust_tracker_monitor_primitives::DatabaseDriver;
    use torrust_tracker_monitor_test_helpers::configuration;
    use url::Url;

    use super::Sqlite;
    use crate::core::databases::{driver, Database};
    use crate::core::tracker::Tracker;

    fn database() -> Box<dyn Database> {
        let config = configuration::ephemeral();
        driver::build(&DatabaseDriver::Sqlite3, &config.core.database.path).unwrap()
    }

    fn tracker(host: &str) -> Tracker {
        Tracker::new(
            Url::parse(&format!("udp://{host}:6969/announce")).unwrap(),
            vec!["1.2.3.4".parse::<IpAddr>().unwrap()],
            604_800,
        )
    }

    #[tokio::test]
    async fn it_should_save_and_load_trackers() {
        let database = database();

        database.save_tracker(tracker("a.example.com")).await.unwrap();
        database.save_tracker(tracker("b.example.com")).await.unwrap();

        let hosts: Vec<String> = database
            .load_trackers()
            .await
            .unwrap()
            .into_iter()
            .map(|tracker| tracker.host)
            .collect();

        assert_eq!(hosts, vec!["a.example.com", "b.example.com"]);
        assert_eq!(
            database.get_tracker("a.example.com".to_string()).await.unwrap(),
            Some(tracker("a.example.com"))
        );
    }

    #[tokio::test]
    async fn saving_a_tracker_twice_should_replace_it() {
        let database = database();

        let mut updated = tracker("a.example.com");
        database.save_tracker(updated.clone()).await.unwrap();

        updated.is_up();
        updated.update_uptime();
        database.save_tracker(updated.clone()).await.unwrap();

        let trackers = database.load_trackers().await.unwrap();
        assert_eq!(trackers, vec![updated]);
    }

    #[tokio::test]
    async fn it_should_remove_trackers() {
        let database = database();
        database.save_tracker(tracker("a.example.com")).await.unwrap();

        assert_eq!(database.remove_tracker("a.example.com".to_string()).await.unwrap(), 1);
        assert_eq!(database.get_tracker("a.example.com".to_string()).await.unwrap(), None);
        assert_eq!(database.remove_tracker("a.example.com".to_string()).await.unwrap(), 0);
    }

    #[tokio::test]
    async fn it_should_skip_the_rows_it_can_not_read_or_decode() {
        let config = configuration::ephemeral();
        let database = Sqlite::new(&config.core.database.path).unwrap();
        database.create_database_tables().unwrap();
        database.save_tracker(tracker("a.example.com")).await.unwrap();

        let conn = database.pool.get().unwrap();
        conn.execute("INSERT INTO trackers (host, data) VALUES ('b.example.com', X'FF')", [])
            .unwrap();
        conn.execute("INSERT INTO trackers (host, data) VALUES ('c.example.com', 'not json')", [])
            .unwrap();
        drop(conn);

        assert_eq!(database.load_trackers().await.unwrap(), vec![tracker("a.example.com")]);
    }
}
