//! Storage Layer - SQLite-backed parameter table
//!
//! A single table holds every flattened parameter:
//! - parameters(key TEXT PRIMARY KEY, value TEXT)

pub mod schema;
pub mod sqlite;

pub use sqlite::ParameterStore;
