//! Database schema definitions

/// SQL to create the authors table
pub const CREATE_AUTHORS_TABLE: &str = r#"
CREATE TABLE IF NOT EXISTS authors (
    id TEXT PRIMARY KEY,
    name TEXT NOT NULL,
    personal_name TEXT NOT NULL
)
"#;

/// SQL to create the books table
///
/// List columns hold JSON arrays; NULL means the field was absent in the dump.
/// `published_date` is an ISO-8601 calendar date.
pub const CREATE_BOOKS_TABLE: &str = r#"
CREATE TABLE IF NOT EXISTS books (
    id TEXT PRIMARY KEY,
    name TEXT NOT NULL,
    description TEXT,
    author_ids TEXT,
    author_names TEXT,
    cover_ids TEXT,
    published_date TEXT
)
"#;

/// SQL to create indexes
pub const CREATE_INDEXES: &[&str] = &[
    "CREATE INDEX IF NOT EXISTS idx_authors_name ON authors(name)",
    "CREATE INDEX IF NOT EXISTS idx_books_name ON books(name)",
];

/// All schema creation statements
pub fn all_schema_statements() -> Vec<&'static str> {
    let mut stmts = vec![CREATE_AUTHORS_TABLE, CREATE_BOOKS_TABLE];
    stmts.extend(CREATE_INDEXES.iter().copied());
    stmts
}
