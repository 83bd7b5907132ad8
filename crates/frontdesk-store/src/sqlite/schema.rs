//! Schema definition and idempotent application.

use rusqlite::Connection;

use crate::errors::Result;

const SCHEMA: &str = "
CREATE TABLE IF NOT EXISTS contacts (
    address          TEXT PRIMARY KEY,
    name             TEXT,
    is_business      INTEGER NOT NULL DEFAULT 0,
    tags             TEXT NOT NULL DEFAULT '[]',
    first_seen       TEXT NOT NULL,
    last_interaction TEXT NOT NULL,
    total_messages   INTEGER NOT NULL DEFAULT 0
);
CREATE INDEX IF NOT EXISTS idx_contacts_last_interaction
    ON contacts (last_interaction DESC);

CREATE TABLE IF NOT EXISTS sessions (
    address    TEXT PRIMARY KEY,
    state      TEXT,
    updated_at TEXT NOT NULL
);

CREATE TABLE IF NOT EXISTS messages (
    id        TEXT PRIMARY KEY,
    address   TEXT NOT NULL,
    role      TEXT NOT NULL CHECK (role IN ('user', 'bot', 'agent')),
    content   TEXT NOT NULL,
    sentiment TEXT NOT NULL DEFAULT 'neutral',
    timestamp TEXT NOT NULL
);
CREATE INDEX IF NOT EXISTS idx_messages_address_recency
    ON messages (address, timestamp DESC, id DESC);

CREATE TABLE IF NOT EXISTS business_profile (
    id         INTEGER PRIMARY KEY CHECK (id = 1),
    document   TEXT NOT NULL,
    updated_at TEXT NOT NULL
);
";

/// Apply the schema. Idempotent — every statement is `IF NOT EXISTS`.
pub fn apply(conn: &Connection) -> Result<()> {
    conn.execute_batch(SCHEMA)?;
    Ok(())
}
