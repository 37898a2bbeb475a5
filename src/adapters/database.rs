//! Explicitly passed database handle.
//!
//! Every clone of a [`Database`] shares the same underlying connection slot.
//! The connection is opened on first use, released by [`Database::close`]
//! and reopened by the next access. Nothing in the staffing model is
//! persisted through it.

use crate::utils::error::Result;
use rusqlite::Connection;
use std::cell::RefCell;
use std::path::{Path, PathBuf};
use std::rc::Rc;
use std::time::Instant;

const BOOTSTRAP_SQL: &str = "
    CREATE TABLE IF NOT EXISTS employees (
        id INTEGER PRIMARY KEY,
        name TEXT NOT NULL,
        department TEXT NOT NULL,
        base_salary REAL NOT NULL,
        employee_type TEXT NOT NULL,
        data_json TEXT
    );
    CREATE TABLE IF NOT EXISTS departments (
        name TEXT PRIMARY KEY,
        data_json TEXT
    );
";

#[derive(Debug, Clone)]
enum Location {
    File(PathBuf),
    Memory,
}

impl Location {
    fn mode(&self) -> &'static str {
        match self {
            Location::File(_) => "file",
            Location::Memory => "memory",
        }
    }

    fn connect(&self) -> Result<Connection> {
        let started_at = Instant::now();
        let connection = match self {
            Location::File(path) => Connection::open(path),
            Location::Memory => Connection::open_in_memory(),
        };
        let connection = connection.inspect_err(|err| {
            tracing::error!(mode = self.mode(), error = %err, "Database open failed");
        })?;
        connection.execute_batch(BOOTSTRAP_SQL)?;
        tracing::info!(
            mode = self.mode(),
            duration_ms = started_at.elapsed().as_millis() as u64,
            "Database opened"
        );
        Ok(connection)
    }
}

struct Shared {
    location: Location,
    connection: RefCell<Option<Connection>>,
}

#[derive(Clone)]
pub struct Database {
    shared: Rc<Shared>,
}

impl Database {
    /// Opens (creating if needed) a database file and bootstraps its tables.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        Self::connect(Location::File(path.as_ref().to_path_buf()))
    }

    /// A private in-memory database. Reopening after `close` starts empty.
    pub fn in_memory() -> Result<Self> {
        Self::connect(Location::Memory)
    }

    fn connect(location: Location) -> Result<Self> {
        let connection = location.connect()?;
        Ok(Self {
            shared: Rc::new(Shared {
                location,
                connection: RefCell::new(Some(connection)),
            }),
        })
    }

    pub fn path(&self) -> Option<&Path> {
        match &self.shared.location {
            Location::File(path) => Some(path),
            Location::Memory => None,
        }
    }

    pub fn is_open(&self) -> bool {
        self.shared.connection.borrow().is_some()
    }

    /// True when both handles refer to the same connection slot.
    pub fn shares_connection(&self, other: &Database) -> bool {
        Rc::ptr_eq(&self.shared, &other.shared)
    }

    /// Runs `f` against the shared connection, reopening it if it was closed.
    ///
    /// `f` must not call back into the same handle.
    pub fn with_connection<T>(
        &self,
        f: impl FnOnce(&Connection) -> rusqlite::Result<T>,
    ) -> Result<T> {
        let mut slot = self.shared.connection.borrow_mut();
        let connection = match slot.take() {
            Some(connection) => connection,
            None => {
                tracing::debug!("Reopening closed database connection");
                self.shared.location.connect()?
            }
        };
        let connection = slot.insert(connection);
        Ok(f(connection)?)
    }

    /// Releases the connection for every clone. Closing twice is a no-op.
    pub fn close(&self) -> Result<()> {
        let connection = self.shared.connection.borrow_mut().take();
        if let Some(connection) = connection {
            connection.close().map_err(|(_, err)| err)?;
            tracing::info!(mode = self.shared.location.mode(), "Database closed");
        }
        Ok(())
    }

    pub fn table_names(&self) -> Result<Vec<String>> {
        self.with_connection(|connection| {
            let mut statement = connection
                .prepare("SELECT name FROM sqlite_master WHERE type = 'table' ORDER BY name")?;
            let names = statement
                .query_map([], |row| row.get::<_, String>(0))?
                .collect::<rusqlite::Result<Vec<_>>>()?;
            Ok(names)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_bootstrap_creates_tables() {
        let database = Database::in_memory().unwrap();
        assert_eq!(
            database.table_names().unwrap(),
            vec!["departments".to_string(), "employees".to_string()]
        );
    }

    #[test]
    fn test_clones_share_one_connection() {
        let database = Database::in_memory().unwrap();
        let other = database.clone();
        assert!(database.shares_connection(&other));

        database
            .with_connection(|conn| {
                conn.execute(
                    "INSERT INTO departments (name, data_json) VALUES (?1, ?2)",
                    ["IT", "{}"],
                )
            })
            .unwrap();
        let count: i64 = other
            .with_connection(|conn| {
                conn.query_row("SELECT COUNT(*) FROM departments", [], |row| row.get(0))
            })
            .unwrap();
        assert_eq!(count, 1);

        assert!(!database.shares_connection(&Database::in_memory().unwrap()));
    }

    #[test]
    fn test_close_then_access_reopens() {
        let temp_dir = TempDir::new().unwrap();
        let database = Database::open(temp_dir.path().join("company.db")).unwrap();
        let other = database.clone();

        database
            .with_connection(|conn| {
                conn.execute(
                    "INSERT INTO departments (name, data_json) VALUES (?1, NULL)",
                    ["Sales"],
                )
            })
            .unwrap();

        other.close().unwrap();
        assert!(!database.is_open());
        database.close().unwrap();

        let count: i64 = database
            .with_connection(|conn| {
                conn.query_row("SELECT COUNT(*) FROM departments", [], |row| row.get(0))
            })
            .unwrap();
        assert_eq!(count, 1);
        assert!(other.is_open());
    }
}
