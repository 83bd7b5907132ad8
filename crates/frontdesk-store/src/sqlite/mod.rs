//! SQLite backend: connection pool, schema, row types, repositories.

pub mod connection;
pub mod repositories;
pub mod row_types;
pub mod schema;
