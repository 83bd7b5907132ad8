//! Contact repository — CRUD for the `contacts` table.
//!
//! One row per address. `record_interaction` is the single write path the
//! engine uses: it creates the row on first contact and bumps the counter
//! atomically, so first-contact detection cannot misfire under races.

use rusqlite::{Connection, OptionalExtension, params};

use crate::errors::Result;
use crate::sqlite::row_types::ContactRow;

/// Contact repository — stateless, every method takes `&Connection`.
pub struct ContactRepo;

impl ContactRepo {
    /// Upsert the contact for `address`: create on first contact, then
    /// increment the message counter and stamp the interaction time.
    ///
    /// Returns the row after the increment; the caller derives
    /// "first contact" from `total_messages == 1`.
    pub fn record_interaction(conn: &Connection, address: &str, now: &str) -> Result<ContactRow> {
        let row = conn.query_row(
            "INSERT INTO contacts (address, first_seen, last_interaction, total_messages)
             VALUES (?1, ?2, ?2, 1)
             ON CONFLICT(address) DO UPDATE SET
                 total_messages = total_messages + 1,
                 last_interaction = excluded.last_interaction
             RETURNING address, name, is_business, tags, first_seen, last_interaction,
                       total_messages",
            params![address, now],
            Self::map_row,
        )?;
        Ok(row)
    }

    /// Get a contact by address.
    pub fn get(conn: &Connection, address: &str) -> Result<Option<ContactRow>> {
        let row = conn
            .query_row(
                "SELECT address, name, is_business, tags, first_seen, last_interaction,
                        total_messages
                 FROM contacts WHERE address = ?1",
                params![address],
                Self::map_row,
            )
            .optional()?;
        Ok(row)
    }

    /// Set the display name reported by the transport adapter.
    pub fn set_name(conn: &Connection, address: &str, name: Option<&str>) -> Result<()> {
        let _ = conn.execute(
            "UPDATE contacts SET name = ?2 WHERE address = ?1",
            params![address, name],
        )?;
        Ok(())
    }

    fn map_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<ContactRow> {
        let tags_json: String = row.get(3)?;
        Ok(ContactRow {
            address: row.get(0)?,
            name: row.get(1)?,
            is_business: row.get(2)?,
            tags: serde_json::from_str(&tags_json).unwrap_or_default(),
            first_seen: row.get(4)?,
            last_interaction: row.get(5)?,
            total_messages: row.get(6)?,
        })
    }
}
