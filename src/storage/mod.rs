//! Storage Layer - SQLite-backed persistence
//!
//! System of record is SQLite with tables:
//! - authors(id, name, personal_name)
//! - books(id, name, description, author_ids, author_names, cover_ids, published_date)

pub mod schema;
pub mod sqlite;

pub use sqlite::{SqliteStore, DbStats};
