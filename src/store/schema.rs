//! Database schema and migrations for the key directory.

use rusqlite::Connection;

/// Current schema version.
pub const SCHEMA_VERSION: u32 = 20260114;

/// Initialize the database schema.
///
/// Creates all tables if they don't exist and runs any pending
/// migrations.
pub fn init_schema(conn: &Connection) -> rusqlite::Result<()> {
    conn.execute(
        "CREATE TABLE IF NOT EXISTS schema_version (
            version INTEGER PRIMARY KEY
        )",
        [],
    )?;

    let current_version: u32 = conn
        .query_row(
            "SELECT COALESCE(MAX(version), 0) FROM schema_version",
            [],
            |row| row.get(0),
        )
        .unwrap_or(0);

    if current_version < SCHEMA_VERSION {
        migrate(conn, current_version)?;
    }

    Ok(())
}

/// Run migrations from the current version to the latest.
fn migrate(conn: &Connection, from_version: u32) -> rusqlite::Result<()> {
    if from_version < 1 {
        migrate_v1(conn)?;
    }

    conn.execute("DELETE FROM schema_version", [])?;
    conn.execute(
        "INSERT INTO schema_version (version) VALUES (?1)",
        [SCHEMA_VERSION],
    )?;

    Ok(())
}

/// Migration to version 1 - initial schema.
fn migrate_v1(conn: &Connection) -> rusqlite::Result<()> {
    // One row per key; packets holds the serialized certificate verbatim
    conn.execute(
        "CREATE TABLE IF NOT EXISTS keys (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            fingerprint BLOB NOT NULL UNIQUE,
            keyid64 INTEGER NOT NULL,
            keyid32 INTEGER NOT NULL,
            creation_time TEXT NOT NULL,
            expiration_time TEXT,
            algo INTEGER NOT NULL,
            bit_length INTEGER NOT NULL,
            packets BLOB NOT NULL
        )",
        [],
    )?;

    // One row per user identity bound to a key
    conn.execute(
        "CREATE TABLE IF NOT EXISTS identities (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            key INTEGER NOT NULL,
            name TEXT NOT NULL,
            creation_time TEXT NOT NULL,
            expiration_time TEXT,
            wkd_hash TEXT NOT NULL,
            FOREIGN KEY (key) REFERENCES keys(id) ON DELETE CASCADE
        )",
        [],
    )?;

    conn.execute(
        "CREATE INDEX IF NOT EXISTS idx_keys_keyid64 ON keys(keyid64)",
        [],
    )?;
    conn.execute(
        "CREATE INDEX IF NOT EXISTS idx_keys_keyid32 ON keys(keyid32)",
        [],
    )?;
    conn.execute(
        "CREATE INDEX IF NOT EXISTS idx_identities_key ON identities(key)",
        [],
    )?;
    conn.execute(
        "CREATE INDEX IF NOT EXISTS idx_identities_name ON identities(name)",
        [],
    )?;
    conn.execute(
        "CREATE INDEX IF NOT EXISTS idx_identities_wkd_hash ON identities(wkd_hash)",
        [],
    )?;

    Ok(())
}
