//! Session repository — CRUD for the `sessions` table.
//!
//! Exactly one row per address holding the nullable continuation tag. The
//! tag is opaque at this layer; decoding against the business configuration
//! happens in the runtime.

use rusqlite::{Connection, OptionalExtension, params};

use crate::errors::Result;
use crate::sqlite::row_types::SessionRow;

/// Session repository — stateless, every method takes `&Connection`.
pub struct SessionRepo;

impl SessionRepo {
    /// Get the session for `address`, creating a null-state row if absent.
    ///
    /// Idempotent absent an intervening [`Self::set_state`].
    pub fn get_or_create(conn: &Connection, address: &str, now: &str) -> Result<SessionRow> {
        if let Some(row) = Self::get(conn, address)? {
            return Ok(row);
        }
        // INSERT OR IGNORE keeps this race-safe: if another writer created
        // the row between the read and here, re-read theirs.
        let _ = conn.execute(
            "INSERT OR IGNORE INTO sessions (address, state, updated_at) VALUES (?1, NULL, ?2)",
            params![address, now],
        )?;
        Self::get(conn, address)?.ok_or_else(|| {
            crate::errors::StoreError::Internal(format!("session vanished for {address}"))
        })
    }

    /// Get the session row, if any.
    pub fn get(conn: &Connection, address: &str) -> Result<Option<SessionRow>> {
        let row = conn
            .query_row(
                "SELECT address, state, updated_at FROM sessions WHERE address = ?1",
                params![address],
                |row| {
                    Ok(SessionRow {
                        address: row.get(0)?,
                        state: row.get(1)?,
                        updated_at: row.get(2)?,
                    })
                },
            )
            .optional()?;
        Ok(row)
    }

    /// Upsert the continuation tag. `None` clears it.
    pub fn set_state(
        conn: &Connection,
        address: &str,
        state: Option<&str>,
        now: &str,
    ) -> Result<()> {
        let _ = conn.execute(
            "INSERT INTO sessions (address, state, updated_at) VALUES (?1, ?2, ?3)
             ON CONFLICT(address) DO UPDATE SET
                 state = excluded.state,
                 updated_at = excluded.updated_at",
            params![address, state, now],
        )?;
        Ok(())
    }
}
