//! Connection pool setup.

use std::path::Path;
use std::time::Duration;

use r2d2_sqlite::SqliteConnectionManager;
use rusqlite::Connection;

use crate::errors::Result;
use crate::sqlite::schema;

/// Pooled SQLite connections.
pub type ConnectionPool = r2d2::Pool<SqliteConnectionManager>;

/// One checked-out connection.
pub type PooledConnection = r2d2::PooledConnection<SqliteConnectionManager>;

/// Open (or create) the database at `path` and apply the schema.
pub fn open_pool(path: &Path) -> Result<ConnectionPool> {
    let manager = SqliteConnectionManager::file(path).with_init(configure_connection);
    build(manager, 8)
}

/// Open a private in-memory database (single connection, tests and tools).
pub fn open_pool_in_memory() -> Result<ConnectionPool> {
    let manager = SqliteConnectionManager::memory().with_init(configure_connection);
    build(manager, 1)
}

fn build(manager: SqliteConnectionManager, max_size: u32) -> Result<ConnectionPool> {
    let pool = r2d2::Pool::builder()
        .max_size(max_size)
        .connection_timeout(Duration::from_secs(5))
        .build(manager)?;
    let conn = pool.get()?;
    schema::apply(&conn)?;
    drop(conn);
    Ok(pool)
}

fn configure_connection(conn: &mut Connection) -> rusqlite::Result<()> {
    // WAL keeps readers unblocked during writes; busy_timeout covers the
    // window before our own retry loop kicks in.
    conn.execute_batch(
        "PRAGMA journal_mode = WAL;
         PRAGMA synchronous = NORMAL;
         PRAGMA foreign_keys = ON;
         PRAGMA busy_timeout = 250;",
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table_count(pool: &ConnectionPool) -> i64 {
        let conn = pool.get().unwrap();
        conn.query_row(
            "SELECT COUNT(*) FROM sqlite_master WHERE type = 'table'
             AND name IN ('contacts', 'sessions', 'messages', 'business_profile')",
            [],
            |row| row.get(0),
        )
        .unwrap()
    }

    #[test]
    fn in_memory_pool_applies_schema_on_build() {
        let pool = open_pool_in_memory().unwrap();
        assert_eq!(table_count(&pool), 4);
    }

    #[test]
    fn on_disk_pool_applies_schema_on_build() {
        let dir = tempfile::tempdir().unwrap();
        let pool = open_pool(&dir.path().join("frontdesk.db")).unwrap();
        assert_eq!(table_count(&pool), 4);
    }
}
