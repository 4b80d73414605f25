//! In-memory storage
//!
//! Vec-backed storage for tests and throwaway catalogs.

use parking_lot::RwLock;

use crate::book::Book;
use crate::error::Result;

use super::Storage;

/// Keeps records in memory; nothing survives the process
#[derive(Debug, Default)]
pub struct MemoryStorage {
    books: RwLock<Vec<Book>>,
}

impl MemoryStorage {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store pre-populated with `books`, kept in the given order
    pub fn with_books(books: Vec<Book>) -> Self {
        Self {
            books: RwLock::new(books),
        }
    }

    /// Number of stored records
    pub fn len(&self) -> usize {
        self.books.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.books.read().is_empty()
    }
}

impl Storage for MemoryStorage {
    fn load(&self) -> Result<Vec<Book>> {
        Ok(self.books.read().clone())
    }

    fn save(&self, books: &[Book]) -> Result<()> {
        *self.books.write() = books.to_vec();
        Ok(())
    }

    fn append(&self, book: &Book) -> Result<()> {
        self.books.write().push(book.clone());
        Ok(())
    }
}
