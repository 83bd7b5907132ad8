//! # frontdesk-store
//!
//! SQLite persistence for the Frontdesk engine:
//!
//! - **Repositories**: stateless CRUD over `&Connection` for contacts,
//!   sessions, messages, and the business profile document
//! - **`ChatStore`**: high-level API over a connection pool with
//!   per-address write locks and `SQLITE_BUSY` retry
//!
//! The message log is append-only; "recent" is timestamp descending with
//! row id as tie-break so ordering stays total within one clock tick.
//!
//! ## Crate Position
//!
//! Persistence layer. Depends on: frontdesk-core.
//! Depended on by: frontdesk-runtime.

#![deny(unsafe_code)]

pub mod errors;
pub mod sqlite;
pub mod store;

pub use errors::{Result, StoreError};
pub use sqlite::connection::{ConnectionPool, PooledConnection, open_pool, open_pool_in_memory};
pub use sqlite::row_types::{ContactRow, SessionRow};
pub use store::{ChatStore, InteractionRecord};
