//! High-level `ChatStore` API.
//!
//! Wraps the connection pool and repositories into the operations the
//! runtime needs. Writes for one address are serialized through an
//! in-process per-address lock and retried on transient `SQLITE_BUSY`,
//! so concurrent turns never interleave partial writes for the same
//! contact.

use std::collections::HashMap;
use std::path::Path;
use std::sync::{Arc, Mutex, Weak};
use std::time::Duration;

use chrono::{DateTime, Utc};
use frontdesk_core::config::BusinessProfile;
use frontdesk_core::{Address, MessageRecord, MessageRole, Sentiment};
use rand::Rng;
use tracing::{debug, warn};

use crate::errors::{Result, StoreError};
use crate::sqlite::connection::{ConnectionPool, PooledConnection, open_pool, open_pool_in_memory};
use crate::sqlite::repositories::contact::ContactRepo;
use crate::sqlite::repositories::message::MessageRepo;
use crate::sqlite::repositories::profile::ProfileRepo;
use crate::sqlite::repositories::session::SessionRepo;
use crate::sqlite::row_types::ContactRow;

/// Result of recording one inbound interaction.
#[derive(Clone, Debug)]
pub struct InteractionRecord {
    /// The contact row after the counter increment.
    pub contact: ContactRow,
    /// True iff the counter was zero before this interaction.
    pub first_contact: bool,
}

/// High-level store over pooled SQLite connections.
pub struct ChatStore {
    pool: ConnectionPool,
    address_write_locks: Mutex<HashMap<String, Weak<Mutex<()>>>>,
}

impl ChatStore {
    const BUSY_MAX_RETRIES: u32 = 16;

    /// Open (or create) the database at `path`.
    pub fn open(path: &Path) -> Result<Self> {
        Ok(Self::from_pool(open_pool(path)?))
    }

    /// Open a private in-memory database (tests and tools).
    pub fn open_in_memory() -> Result<Self> {
        Ok(Self::from_pool(open_pool_in_memory()?))
    }

    fn from_pool(pool: ConnectionPool) -> Self {
        Self {
            pool,
            address_write_locks: Mutex::new(HashMap::new()),
        }
    }

    // ── Contacts ────────────────────────────────────────────────────────

    /// Record one inbound interaction: create the contact on first call,
    /// increment the counter, stamp last-interaction.
    pub fn record_interaction(&self, address: &Address) -> Result<InteractionRecord> {
        self.with_address_write_lock(address.as_str(), || {
            let conn = self.conn()?;
            let contact =
                ContactRepo::record_interaction(&conn, address.as_str(), &now_rfc3339())?;
            let first_contact = contact.total_messages == 1;
            if first_contact {
                debug!(address = %address, "first contact recorded");
            }
            Ok(InteractionRecord {
                contact,
                first_contact,
            })
        })
    }

    // ── Sessions ────────────────────────────────────────────────────────

    /// Get the continuation tag for `address`, creating a null session if
    /// absent. Idempotent absent an intervening write.
    pub fn session_state(&self, address: &Address) -> Result<Option<String>> {
        self.with_address_write_lock(address.as_str(), || {
            let conn = self.conn()?;
            Ok(SessionRepo::get_or_create(&conn, address.as_str(), &now_rfc3339())?.state)
        })
    }

    /// Upsert the continuation tag. `None` clears it.
    pub fn set_session_state(&self, address: &Address, state: Option<&str>) -> Result<()> {
        self.with_address_write_lock(address.as_str(), || {
            let conn = self.conn()?;
            SessionRepo::set_state(&conn, address.as_str(), state, &now_rfc3339())
        })
    }

    // ── Message log ─────────────────────────────────────────────────────

    /// Append one record to the message log.
    pub fn append_message(
        &self,
        address: &Address,
        role: MessageRole,
        content: &str,
        sentiment: Sentiment,
    ) -> Result<()> {
        self.with_address_write_lock(address.as_str(), || {
            let conn = self.conn()?;
            let _ = MessageRepo::append(
                &conn,
                address.as_str(),
                role.as_str(),
                content,
                sentiment.as_str(),
                &now_rfc3339(),
            )?;
            Ok(())
        })
    }

    /// The last `limit` messages, most recent first.
    pub fn last_messages(&self, address: &Address, limit: usize) -> Result<Vec<MessageRecord>> {
        let conn = self.conn()?;
        let rows = MessageRepo::last_n(&conn, address.as_str(), limit)?;
        Ok(rows
            .into_iter()
            .filter_map(|row| {
                let role = MessageRole::parse(&row.role);
                if role.is_none() {
                    warn!(id = %row.id, role = %row.role, "dropping message with unknown role");
                }
                Some(MessageRecord {
                    address: Address::new(row.address),
                    role: role?,
                    content: row.content,
                    sentiment: Sentiment::parse(&row.sentiment),
                    timestamp: parse_timestamp(&row.timestamp),
                })
            })
            .collect())
    }

    /// Contents of the most recent `limit` messages (topic extraction).
    pub fn recent_texts(&self, address: &Address, limit: usize) -> Result<Vec<String>> {
        let conn = self.conn()?;
        MessageRepo::recent_texts(&conn, address.as_str(), limit)
    }

    /// Delete the message log for `address` (the reset command).
    pub fn clear_messages(&self, address: &Address) -> Result<u64> {
        self.with_address_write_lock(address.as_str(), || {
            let conn = self.conn()?;
            MessageRepo::clear(&conn, address.as_str())
        })
    }

    // ── Business profile ────────────────────────────────────────────────

    /// Load the tenant business profile, if configured.
    pub fn business_profile(&self) -> Result<Option<BusinessProfile>> {
        let conn = self.conn()?;
        ProfileRepo::get(&conn)
    }

    /// Replace the tenant business profile (admin seeding and tests).
    pub fn set_business_profile(&self, profile: &BusinessProfile) -> Result<()> {
        self.retry_on_busy(|| {
            let conn = self.conn()?;
            ProfileRepo::set(&conn, profile, &now_rfc3339())
        })
    }

    // ── Locking / retry ─────────────────────────────────────────────────

    fn conn(&self) -> Result<PooledConnection> {
        Ok(self.pool.get()?)
    }

    fn acquire_address_write_lock(&self, address: &str) -> Result<Arc<Mutex<()>>> {
        let mut locks = self
            .address_write_locks
            .lock()
            .map_err(|_| StoreError::Internal("address lock map poisoned".into()))?;

        // Opportunistically prune dead weak refs when the map grows.
        if locks.len() > 128 {
            locks.retain(|_, weak| weak.strong_count() > 0);
        }

        if let Some(existing) = locks.get(address).and_then(Weak::upgrade) {
            return Ok(existing);
        }

        let lock = Arc::new(Mutex::new(()));
        let _ = locks.insert(address.to_owned(), Arc::downgrade(&lock));
        Ok(lock)
    }

    fn with_address_write_lock<T>(
        &self,
        address: &str,
        f: impl FnMut() -> Result<T>,
    ) -> Result<T> {
        let lock = self.acquire_address_write_lock(address)?;
        let _guard = lock
            .lock()
            .map_err(|_| StoreError::Internal("address write lock poisoned".into()))?;
        self.retry_on_busy(f)
    }

    /// Retry on `SQLITE_BUSY`/`SQLITE_LOCKED` with linear backoff + jitter.
    fn retry_on_busy<T>(&self, mut f: impl FnMut() -> Result<T>) -> Result<T> {
        let mut attempt = 0u32;
        loop {
            match f() {
                Err(err) if err.is_busy() && attempt < Self::BUSY_MAX_RETRIES => {
                    attempt += 1;
                    let backoff = u64::from(attempt) * 5 + rand::rng().random_range(0..5);
                    warn!(attempt, backoff_ms = backoff, "sqlite busy, retrying");
                    std::thread::sleep(Duration::from_millis(backoff));
                }
                other => return other,
            }
        }
    }
}

fn now_rfc3339() -> String {
    Utc::now().to_rfc3339()
}

fn parse_timestamp(raw: &str) -> DateTime<Utc> {
    DateTime::parse_from_rfc3339(raw)
        .map(|dt| dt.with_timezone(&Utc))
        .unwrap_or_else(|_| {
            warn!(raw, "unparseable message timestamp, substituting epoch");
            DateTime::<Utc>::MIN_UTC
        })
}
