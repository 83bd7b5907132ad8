//! Message repository — the append-only message log.
//!
//! Rows are never updated or reordered. "Recent" means timestamp
//! descending with row id descending as tie-break; ids are UUIDv7 so the
//! tie-break follows insert order even within one clock tick.

use rusqlite::{Connection, params};
use uuid::Uuid;

use crate::errors::Result;
use crate::sqlite::row_types::MessageRow;

/// Message repository — stateless, every method takes `&Connection`.
pub struct MessageRepo;

impl MessageRepo {
    /// Append one record.
    pub fn append(
        conn: &Connection,
        address: &str,
        role: &str,
        content: &str,
        sentiment: &str,
        timestamp: &str,
    ) -> Result<MessageRow> {
        let id = format!("msg_{}", Uuid::now_v7());
        let _ = conn.execute(
            "INSERT INTO messages (id, address, role, content, sentiment, timestamp)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
            params![id, address, role, content, sentiment, timestamp],
        )?;
        Ok(MessageRow {
            id,
            address: address.to_owned(),
            role: role.to_owned(),
            content: content.to_owned(),
            sentiment: sentiment.to_owned(),
            timestamp: timestamp.to_owned(),
        })
    }

    /// The last `limit` records for `address`, most recent first.
    pub fn last_n(conn: &Connection, address: &str, limit: usize) -> Result<Vec<MessageRow>> {
        let mut stmt = conn.prepare(
            "SELECT id, address, role, content, sentiment, timestamp
             FROM messages WHERE address = ?1
             ORDER BY timestamp DESC, id DESC LIMIT ?2",
        )?;
        let rows = stmt
            .query_map(params![address, limit as i64], |row| {
                Ok(MessageRow {
                    id: row.get(0)?,
                    address: row.get(1)?,
                    role: row.get(2)?,
                    content: row.get(3)?,
                    sentiment: row.get(4)?,
                    timestamp: row.get(5)?,
                })
            })?
            .collect::<std::result::Result<Vec<_>, _>>()?;
        Ok(rows)
    }

    /// Contents of the last `limit` records, most recent first (topic scan).
    pub fn recent_texts(conn: &Connection, address: &str, limit: usize) -> Result<Vec<String>> {
        let mut stmt = conn.prepare(
            "SELECT content FROM messages WHERE address = ?1
             ORDER BY timestamp DESC, id DESC LIMIT ?2",
        )?;
        let rows = stmt
            .query_map(params![address, limit as i64], |row| row.get(0))?
            .collect::<std::result::Result<Vec<_>, _>>()?;
        Ok(rows)
    }

    /// Delete every record for `address` (the reset command). Returns the
    /// number of deleted rows.
    pub fn clear(conn: &Connection, address: &str) -> Result<u64> {
        let deleted = conn.execute("DELETE FROM messages WHERE address = ?1", params![address])?;
        Ok(deleted as u64)
    }
}
