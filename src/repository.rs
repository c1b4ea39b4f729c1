//! Persistence gateway - save and point lookup by id
//!
//! `save` overwrites any record with the same id. Errors from either
//! operation are storage failures and are not recovered by the loader.

use crate::record::{Author, Book};
use crate::Result;

/// Keyed storage for authors
pub trait AuthorRepository {
    fn save(&self, author: &Author) -> Result<()>;
    fn find_by_id(&self, id: &str) -> Result<Option<Author>>;
}

/// Keyed storage for books
pub trait BookRepository {
    fn save(&self, book: &Book) -> Result<()>;
    fn find_by_id(&self, id: &str) -> Result<Option<Book>>;
}

impl<T: AuthorRepository + ?Sized> AuthorRepository for &T {
    fn save(&self, author: &Author) -> Result<()> {
        (**self).save(author)
    }

    fn find_by_id(&self, id: &str) -> Result<Option<Author>> {
        (**self).find_by_id(id)
    }
}

impl<T: BookRepository + ?Sized> BookRepository for &T {
    fn save(&self, book: &Book) -> Result<()> {
        (**self).save(book)
    }

    fn find_by_id(&self, id: &str) -> Result<Option<Book>> {
        (**self).find_by_id(id)
    }
}
