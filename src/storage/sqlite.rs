//! SQLite storage implementation

use std::path::Path;
use chrono::NaiveDate;
use rusqlite::{Connection, params, OptionalExtension};
use serde::Serialize;
use crate::record::{Author, Book};
use crate::repository::{AuthorRepository, BookRepository};
use crate::Result;
use super::schema;

const DATE_FORMAT: &str = "%Y-%m-%d";

/// SQLite-backed storage for authors and books
pub struct SqliteStore {
    conn: Connection,
}

impl SqliteStore {
    /// Open a database file (creates if doesn't exist)
    pub fn open(path: &Path) -> Result<Self> {
        let conn = Connection::open(path)?;
        let store = Self { conn };
        store.initialize_schema()?;
        Ok(store)
    }

    /// Open an in-memory database (for testing)
    pub fn open_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()?;
        let store = Self { conn };
        store.initialize_schema()?;
        Ok(store)
    }

    /// Initialize the database schema
    fn initialize_schema(&self) -> Result<()> {
        for stmt in schema::all_schema_statements() {
            self.conn.execute(stmt, [])?;
        }
        Ok(())
    }

    // ========== Author Operations ==========

    /// Insert or replace an author
    pub fn save_author(&self, author: &Author) -> Result<()> {
        self.conn.execute(
            "INSERT OR REPLACE INTO authors (id, name, personal_name) VALUES (?1, ?2, ?3)",
            params![author.id, author.name, author.personal_name],
        )?;
        Ok(())
    }

    /// Get an author by id
    pub fn get_author(&self, id: &str) -> Result<Option<Author>> {
        self.conn
            .query_row(
                "SELECT id, name, personal_name FROM authors WHERE id = ?1",
                [id],
                |row| {
                    Ok(Author {
                        id: row.get(0)?,
                        name: row.get(1)?,
                        personal_name: row.get(2)?,
                    })
                },
            )
            .optional()
            .map_err(Into::into)
    }

    /// Count all authors
    pub fn count_authors(&self) -> Result<usize> {
        let count: i64 = self.conn.query_row("SELECT COUNT(*) FROM authors", [], |row| row.get(0))?;
        Ok(count as usize)
    }

    // ========== Book Operations ==========

    /// Insert or replace a book
    pub fn save_book(&self, book: &Book) -> Result<()> {
        self.conn.execute(
            r#"
            INSERT OR REPLACE INTO books (id, name, description, author_ids, author_names, cover_ids, published_date)
            VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)
            "#,
            params![
                book.id,
                book.name,
                book.description,
                to_json_column(&book.author_ids)?,
                to_json_column(&book.author_names)?,
                to_json_column(&book.cover_ids)?,
                book.published_date.map(|d| d.format(DATE_FORMAT).to_string()),
            ],
        )?;
        Ok(())
    }

    /// Get a book by id
    pub fn get_book(&self, id: &str) -> Result<Option<Book>> {
        self.conn
            .query_row(
                "SELECT id, name, description, author_ids, author_names, cover_ids, published_date FROM books WHERE id = ?1",
                [id],
                |row| self.row_to_book(row),
            )
            .optional()
            .map_err(Into::into)
    }

    /// Count all books
    pub fn count_books(&self) -> Result<usize> {
        let count: i64 = self.conn.query_row("SELECT COUNT(*) FROM books", [], |row| row.get(0))?;
        Ok(count as usize)
    }

    /// Helper to convert a row to a Book
    fn row_to_book(&self, row: &rusqlite::Row) -> rusqlite::Result<Book> {
        let published: Option<String> = row.get(6)?;
        let published_date = published
            .map(|s| {
                NaiveDate::parse_from_str(&s, DATE_FORMAT).map_err(|e| {
                    rusqlite::Error::FromSqlConversionFailure(6, rusqlite::types::Type::Text, Box::new(e))
                })
            })
            .transpose()?;

        Ok(Book {
            id: row.get(0)?,
            name: row.get(1)?,
            description: row.get(2)?,
            author_ids: from_json_column(row, 3)?,
            author_names: from_json_column(row, 4)?,
            cover_ids: from_json_column(row, 5)?,
            published_date,
        })
    }

    // ========== Bulk Operations ==========

    /// Delete all data (for a fresh load)
    pub fn clear_all(&self) -> Result<()> {
        self.conn.execute("DELETE FROM books", [])?;
        self.conn.execute("DELETE FROM authors", [])?;
        Ok(())
    }

    /// Get database statistics
    pub fn stats(&self) -> Result<DbStats> {
        Ok(DbStats {
            authors: self.count_authors()?,
            books: self.count_books()?,
        })
    }
}

fn to_json_column(list: &Option<Vec<String>>) -> Result<Option<String>> {
    list.as_ref()
        .map(serde_json::to_string)
        .transpose()
        .map_err(Into::into)
}

fn from_json_column(row: &rusqlite::Row, idx: usize) -> rusqlite::Result<Option<Vec<String>>> {
    let raw: Option<String> = row.get(idx)?;
    raw.map(|s| {
        serde_json::from_str(&s).map_err(|e| {
            rusqlite::Error::FromSqlConversionFailure(idx, rusqlite::types::Type::Text, Box::new(e))
        })
    })
    .transpose()
}

impl AuthorRepository for SqliteStore {
    fn save(&self, author: &Author) -> Result<()> {
        tracing::debug!(id = %author.id, "saving author");
        self.save_author(author)
    }

    fn find_by_id(&self, id: &str) -> Result<Option<Author>> {
        self.get_author(id)
    }
}

impl BookRepository for SqliteStore {
    fn save(&self, book: &Book) -> Result<()> {
        tracing::debug!(id = %book.id, "saving book");
        self.save_book(book)
    }

    fn find_by_id(&self, id: &str) -> Result<Option<Book>> {
        self.get_book(id)
    }
}

/// Database statistics
#[derive(Debug, Clone, Serialize)]
pub struct DbStats {
    pub authors: usize,
    pub books: usize,
}
