//! The store handle shared by the lookup, import and export services.

use std::path::{Path, PathBuf};

use rusqlite::Connection;

use crate::error::Result;

use super::schema::init_schema;

/// SQLite-backed storage for a key directory.
///
/// A `Store` owns one database connection and is the session the service
/// types ([`KeyLookup`](super::KeyLookup), [`KeyImporter`](super::KeyImporter),
/// [`KeyExporter`](super::KeyExporter)) are constructed over. It carries no
/// lookup or import logic of its own.
///
/// # Thread Safety
///
/// The handle is not `Sync`; open one `Store` per thread and let SQLite
/// coordinate access to the underlying file.
pub struct Store {
    conn: Connection,
    path: Option<PathBuf>,
}

impl Store {
    /// Open or create a key directory database at the given path.
    ///
    /// # Arguments
    /// * `path` - Path to the SQLite database file
    ///
    /// # Example
    /// ```no_run
    /// use keydir::Store;
    ///
    /// let store = Store::open("keys.db").unwrap();
    /// ```
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let conn = Connection::open(path)?;

        // Enable foreign keys
        conn.execute("PRAGMA foreign_keys = ON", [])?;

        init_schema(&conn)?;

        log::debug!("opened key directory at {}", path.display());

        Ok(Self {
            conn,
            path: Some(path.to_path_buf()),
        })
    }

    /// Create an in-memory store (useful for testing).
    pub fn open_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()?;

        conn.execute("PRAGMA foreign_keys = ON", [])?;

        init_schema(&conn)?;

        Ok(Self { conn, path: None })
    }

    /// Get the number of stored keys.
    pub fn count(&self) -> Result<usize> {
        let count: i64 = self
            .conn
            .query_row("SELECT COUNT(*) FROM keys", [], |row| row.get(0))?;
        Ok(count as usize)
    }

    /// Check whether a key with the given fingerprint is stored.
    pub fn contains(&self, fingerprint: &[u8]) -> Result<bool> {
        let count: i64 = self.conn.query_row(
            "SELECT COUNT(*) FROM keys WHERE fingerprint = ?1",
            [fingerprint],
            |row| row.get(0),
        )?;
        Ok(count > 0)
    }

    /// Get the database path (None for in-memory stores).
    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    pub(crate) fn conn(&self) -> &Connection {
        &self.conn
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_open_in_memory() {
        let store = Store::open_in_memory().unwrap();
        assert_eq!(store.count().unwrap(), 0);
        assert!(store.path().is_none());
    }

    #[test]
    fn test_contains_unknown_fingerprint() {
        let store = Store::open_in_memory().unwrap();
        assert!(!store.contains(&[0u8; 20]).unwrap());
    }
}
