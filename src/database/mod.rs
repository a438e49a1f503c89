/// Database module for the local SQLite store
///
/// This module provides:
/// - A pooled SQLite connection with write-safe pragmas (WAL, synchronous)
/// - Embedded migrations creating the three ingestion tables
/// - Repository pattern implementations over diesel
/// - Database models and schema

pub mod connection;
pub mod enums;
pub mod models;
pub mod repositories;
pub mod schema;

pub use connection::{establish_connection_pool, DatabaseError, DatabasePool};
