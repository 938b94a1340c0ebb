//! Database connection and operations

use parking_lot::Mutex;
use rusqlite::Connection;
use std::path::Path;
use std::sync::Arc;

use crate::migrations::run_migrations;
use crate::Result;

/// Shared handle to the tabs database. Clones share one connection.
#[derive(Clone)]
pub struct Database {
    conn: Arc<Mutex<Connection>>,
}

impl Database {
    /// Open (or create) the database file, creating missing parent
    /// directories. The file is switched to WAL mode.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }

        let conn = Connection::open(path)?;
        let _: String =
            conn.pragma_update_and_check(None, "journal_mode", "WAL", |row| row.get(0))?;

        let db = Self::prepare(conn)?;
        tracing::info!(path = %path.display(), "Opened tabs database");
        Ok(db)
    }

    pub fn open_in_memory() -> Result<Self> {
        Self::prepare(Connection::open_in_memory()?)
    }

    /// Foreign keys carry the entry cascade; they are per connection.
    fn prepare(conn: Connection) -> Result<Self> {
        conn.pragma_update(None, "foreign_keys", "ON")?;
        run_migrations(&conn)?;
        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
        })
    }

    pub fn with_connection<F, T>(&self, f: F) -> Result<T>
    where
        F: FnOnce(&Connection) -> Result<T>,
    {
        let conn = self.conn.lock();
        f(&conn)
    }

    /// Run `f` inside a transaction; any error rolls back.
    pub fn transaction<F, T>(&self, f: F) -> Result<T>
    where
        F: FnOnce(&Connection) -> Result<T>,
    {
        let mut conn = self.conn.lock();
        let tx = conn.transaction()?;
        let result = f(&tx)?;
        tx.commit()?;
        Ok(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn count(db: &Database, table: &str) -> i64 {
        db.with_connection(|conn| {
            Ok(conn.query_row(&format!("SELECT COUNT(*) FROM {table}"), [], |row| row.get(0))?)
        })
        .unwrap()
    }

    #[test]
    fn test_open_in_memory() {
        let db = Database::open_in_memory().unwrap();
        assert_eq!(count(&db, "tabs_instances"), 0);
        assert_eq!(count(&db, "tab_entries"), 0);
    }

    #[test]
    fn test_open_creates_parent_dirs() {
        let dir = std::env::temp_dir().join(format!("blocktabs-db-{}", uuid::Uuid::new_v4()));
        let path = dir.join("nested").join("tabs.db");

        let db = Database::open(&path).unwrap();
        assert!(path.exists());
        assert_eq!(count(&db, "tabs_instances"), 0);

        drop(db);
        std::fs::remove_dir_all(dir).unwrap();
    }

    #[test]
    fn test_failed_transaction_rolls_back() {
        let db = Database::open_in_memory().unwrap();
        let result: Result<()> = db.transaction(|conn| {
            conn.execute(
                "INSERT INTO tabs_instances (id, created_at, updated_at) VALUES ('i', 'now', 'now')",
                [],
            )?;
            // second row violates the primary key
            conn.execute(
                "INSERT INTO tabs_instances (id, created_at, updated_at) VALUES ('i', 'now', 'now')",
                [],
            )?;
            Ok(())
        });
        assert!(result.is_err());
        assert_eq!(count(&db, "tabs_instances"), 0);
    }

    #[test]
    fn test_entries_cascade_with_instance() {
        let db = Database::open_in_memory().unwrap();
        db.with_connection(|conn| {
            conn.execute(
                "INSERT INTO tabs_instances (id, created_at, updated_at) VALUES ('i', 'now', 'now')",
                [],
            )?;
            conn.execute(
                "INSERT INTO tab_entries (instance_id, position, tab_id) VALUES ('i', 0, 'tab-a')",
                [],
            )?;
            conn.execute("DELETE FROM tabs_instances WHERE id = 'i'", [])?;
            Ok(())
        })
        .unwrap();
        assert_eq!(count(&db, "tab_entries"), 0);
    }
}
