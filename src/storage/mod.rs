//! Storage Module
//!
//! Persistence layer behind the catalog.
//!
//! ## Responsibilities
//! - Load the full record sequence in file order
//! - Replace the full record sequence (whole-file rewrite)
//! - Append a single record without rewriting
//!
//! ## File Format
//! ```text
//! ┌──────────────────────────────────────────────────────────────────────────┐
//! │ {"id":1,"title":"Dune","author":"Herbert","year":1965,"status":"LOANED"} │
//! │ {"id":2,"title":"Emma","author":"Austen","year":1815,"status":"AVAILABLE"}│
//! │ ... (one JSON object per line, UTF-8, newline terminated)                │
//! └──────────────────────────────────────────────────────────────────────────┘
//! ```

mod file;
mod memory;

pub use file::FileStorage;
pub use memory::MemoryStorage;

use crate::book::Book;
use crate::error::Result;

/// Backing store for catalog records
///
/// Implementations hold no catalog logic: id assignment, uniqueness and
/// search all live in [`crate::Catalog`].
pub trait Storage {
    /// Read every record in stored order. A missing backing store is empty.
    fn load(&self) -> Result<Vec<Book>>;

    /// Replace the stored records with `books`
    fn save(&self, books: &[Book]) -> Result<()>;

    /// Add one record after the existing ones
    fn append(&self, book: &Book) -> Result<()>;
}

impl<S: Storage + ?Sized> Storage for &S {
    fn load(&self) -> Result<Vec<Book>> {
        (**self).load()
    }

    fn save(&self, books: &[Book]) -> Result<()> {
        (**self).save(books)
    }

    fn append(&self, book: &Book) -> Result<()> {
        (**self).append(book)
    }
}
