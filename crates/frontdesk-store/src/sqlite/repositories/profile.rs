//! Business profile repository — the single tenant configuration document.
//!
//! The engine only reads this; writes come from the admin surface, which is
//! outside this workspace. Stored as one JSON document so the admin panel
//! and the engine share the exact camelCase wire shape.

use frontdesk_core::config::BusinessProfile;
use rusqlite::{Connection, OptionalExtension, params};

use crate::errors::Result;

/// Business profile repository — stateless, every method takes `&Connection`.
pub struct ProfileRepo;

impl ProfileRepo {
    /// Load the profile document, if one has been configured.
    pub fn get(conn: &Connection) -> Result<Option<BusinessProfile>> {
        let document: Option<String> = conn
            .query_row(
                "SELECT document FROM business_profile WHERE id = 1",
                [],
                |row| row.get(0),
            )
            .optional()?;
        match document {
            Some(raw) => Ok(Some(serde_json::from_str(&raw)?)),
            None => Ok(None),
        }
    }

    /// Replace the profile document (admin seeding and tests).
    pub fn set(conn: &Connection, profile: &BusinessProfile, now: &str) -> Result<()> {
        let document = serde_json::to_string(profile)?;
        let _ = conn.execute(
            "INSERT INTO business_profile (id, document, updated_at) VALUES (1, ?1, ?2)
             ON CONFLICT(id) DO UPDATE SET
                 document = excluded.document,
                 updated_at = excluded.updated_at",
            params![document, now],
        )?;
        Ok(())
    }
}
