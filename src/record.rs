//! Record types - the two entities persisted by the loader
//!
//! - `Author`: one per author dump line, keyed by author id
//! - `Book`: one per work dump line, keyed by work id, carrying the
//!   denormalized names of its authors

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Name recorded for an author reference that is not in storage
pub const UNKNOWN_AUTHOR: &str = "Unknown Author";

/// An author record.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Author {
    /// Author id (reference path without `/authors/`)
    pub id: String,
    /// Display name, empty when the dump has none
    pub name: String,
    /// Personal name, empty when the dump has none
    pub personal_name: String,
}

impl Author {
    pub fn new(id: impl Into<String>, name: impl Into<String>, personal_name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            personal_name: personal_name.into(),
        }
    }
}

/// A book record, built from one work.
///
/// `author_ids` and `author_names` are either both `None` or both `Some`
/// with equal length.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Book {
    /// Work id (reference path without `/works/`)
    pub id: String,
    /// Title, empty when the dump has none
    pub name: String,
    pub description: Option<String>,
    pub author_ids: Option<Vec<String>>,
    pub author_names: Option<Vec<String>>,
    pub cover_ids: Option<Vec<String>>,
    pub published_date: Option<NaiveDate>,
}

impl Book {
    /// Create a book with only id and title set
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            ..Default::default()
        }
    }

    /// Set author ids together with their resolved names.
    pub fn set_authors(&mut self, ids: Vec<String>, names: Vec<String>) {
        debug_assert_eq!(ids.len(), names.len());
        self.author_ids = Some(ids);
        self.author_names = Some(names);
    }
}
