//! Author name resolution for works
//!
//! Each referenced author id is looked up in the author repository, one
//! lookup per id in dump order. A miss is not an error: the name becomes
//! the `Unknown Author` placeholder.

use crate::parser::WorkRecord;
use crate::record::{Book, UNKNOWN_AUTHOR};
use crate::repository::AuthorRepository;
use crate::Result;

/// Resolves author ids to author names
pub struct AuthorResolver<'a, A: AuthorRepository> {
    authors: &'a A,
}

impl<'a, A: AuthorRepository> AuthorResolver<'a, A> {
    pub fn new(authors: &'a A) -> Self {
        Self { authors }
    }

    /// Name for one author id, or the placeholder when it is not stored
    pub fn resolve_name(&self, id: &str) -> Result<String> {
        Ok(self
            .authors
            .find_by_id(id)?
            .map(|author| author.name)
            .unwrap_or_else(|| {
                tracing::debug!(author_id = id, "author not found, using placeholder");
                UNKNOWN_AUTHOR.to_string()
            }))
    }

    /// Names for a list of ids, same length and order
    pub fn resolve_names(&self, ids: &[String]) -> Result<Vec<String>> {
        ids.iter().map(|id| self.resolve_name(id)).collect()
    }

    /// Turn a parsed work into a book with author ids and names set.
    ///
    /// Works without an `authors` field keep both lists unset.
    pub fn resolve(&self, work: WorkRecord) -> Result<Book> {
        let WorkRecord { mut book, author_ids } = work;
        if let Some(ids) = author_ids {
            let names = self.resolve_names(&ids)?;
            book.set_authors(ids, names);
        }
        Ok(book)
    }
}
