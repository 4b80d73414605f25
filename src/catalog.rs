//! Catalog Module
//!
//! The catalog store that sits between a presentation layer and storage.
//!
//! ## Responsibilities
//! - Assign ids (smallest positive id not in use)
//! - Enforce id uniqueness on load
//! - Search, delete and status changes via read-modify-write
//! - Append new records without rewriting the file

use std::collections::HashSet;
use std::path::Path;

use tracing::{debug, info, warn};

use crate::book::{Book, BookStatus};
use crate::command::{Command, Outcome, StatusChange};
use crate::config::Config;
use crate::error::{CatalogError, InvalidStatus, Result};
use crate::storage::{FileStorage, Storage};

/// The catalog store
///
/// ## Access Model
///
/// Single process, sequential calls. Every mutation except `add` loads the
/// full record sequence, changes it, and rewrites it; `add` appends one
/// line. There is no locking against other processes writing the same file.
///
/// Record order is the stored order: mutations never reorder records.
pub struct Catalog<S = FileStorage> {
    storage: S,
}

impl Catalog<FileStorage> {
    /// Open a file-backed catalog with the given config
    ///
    /// The backing file is not read until the first operation, and a
    /// missing file is an empty catalog.
    pub fn open(config: &Config) -> Self {
        Self::with_storage(FileStorage::new(config))
    }

    /// Open with a path (convenience method)
    ///
    /// Uses default config with the specified data file
    pub fn open_path(path: &Path) -> Self {
        Self::with_storage(FileStorage::open_path(path))
    }

    /// Get the backing file path
    pub fn data_file(&self) -> &Path {
        self.storage.path()
    }
}

impl<S: Storage> Catalog<S> {
    /// Build a catalog over any storage backend
    pub fn with_storage(storage: S) -> Self {
        Self { storage }
    }

    /// Get the storage backend
    pub fn storage(&self) -> &S {
        &self.storage
    }

    /// Execute a command
    ///
    /// Routes commands to appropriate handlers
    pub fn execute(&self, command: Command) -> Result<Outcome> {
        match command {
            Command::Add {
                title,
                author,
                year,
            } => Ok(Outcome::Added(self.add(&title, &author, year)?)),
            Command::Delete { id } => Ok(match self.delete(id)? {
                Some(book) => Outcome::Deleted(book),
                None => Outcome::NotFound(id),
            }),
            Command::Find { keyword } => Ok(Outcome::Books(self.find(&keyword)?)),
            Command::ChangeStatus { id, status } => {
                Ok(self.change_status(id, &status)?.into_outcome(id))
            }
            Command::List => Ok(Outcome::Books(self.list()?)),
        }
    }

    /// Load every record in stored order
    ///
    /// A missing backing file yields an empty catalog. A malformed line or
    /// a repeated id fails the whole load.
    pub fn load(&self) -> Result<Vec<Book>> {
        let books = self.storage.load()?;

        let mut seen = HashSet::with_capacity(books.len());
        for book in &books {
            if !seen.insert(book.id) {
                return Err(CatalogError::DuplicateId(book.id));
            }
        }

        Ok(books)
    }

    /// Replace the stored records with `books`, in the given order
    pub fn save(&self, books: &[Book]) -> Result<()> {
        self.storage.save(books)
    }

    /// Smallest positive integer not used as an id
    pub fn generate_id(&self) -> Result<u64> {
        let used: HashSet<u64> = self.load()?.iter().map(|book| book.id).collect();

        let mut id = 1;
        while used.contains(&id) {
            id += 1;
        }
        Ok(id)
    }

    /// Add an available book and return it
    ///
    /// The record is appended; existing lines are not rewritten.
    pub fn add(&self, title: &str, author: &str, year: i32) -> Result<Book> {
        let book = Book::new(self.generate_id()?, title, author, year);
        self.storage.append(&book)?;

        info!(id = book.id, title = %book.title, "added book");
        Ok(book)
    }

    /// Delete a book by id
    ///
    /// Returns:
    /// - `Ok(Some(book))` — book removed, catalog rewritten
    /// - `Ok(None)` — no such id, nothing written
    pub fn delete(&self, id: u64) -> Result<Option<Book>> {
        let mut books = self.load()?;

        let Some(position) = books.iter().position(|book| book.id == id) else {
            warn!(id, "delete: book not found");
            return Ok(None);
        };

        let removed = books.remove(position);
        self.save(&books)?;

        info!(id, title = %removed.title, "deleted book");
        Ok(Some(removed))
    }

    /// Find books by title/author substring (case-insensitive) or exact year
    ///
    /// Results keep stored order.
    pub fn find(&self, keyword: &str) -> Result<Vec<Book>> {
        let found: Vec<Book> = self
            .load()?
            .into_iter()
            .filter(|book| book.matches(keyword))
            .collect();

        debug!(keyword, matches = found.len(), "search");
        Ok(found)
    }

    /// Get one book by id
    pub fn get(&self, id: u64) -> Result<Option<Book>> {
        Ok(self.load()?.into_iter().find(|book| book.id == id))
    }

    /// Change a book's status from raw input
    ///
    /// The id is looked up first: an unknown id reports `NotFound` whatever
    /// the value. An invalid value for a known book reports `InvalidStatus`
    /// and nothing is written.
    pub fn change_status(&self, id: u64, status: &str) -> Result<StatusChange> {
        self.apply_status(id, status.parse())
    }

    /// Set a book's status and rewrite the catalog
    pub fn set_status(&self, id: u64, status: BookStatus) -> Result<StatusChange> {
        self.apply_status(id, Ok(status))
    }

    /// Read-modify-write shared by `change_status` and `set_status`
    fn apply_status(
        &self,
        id: u64,
        status: std::result::Result<BookStatus, InvalidStatus>,
    ) -> Result<StatusChange> {
        let mut books = self.load()?;

        let Some(book) = books.iter_mut().find(|book| book.id == id) else {
            warn!(id, "status change: book not found");
            return Ok(StatusChange::NotFound);
        };

        let status = match status {
            Ok(status) => status,
            Err(invalid) => {
                warn!(id, %invalid, "status change rejected");
                return Ok(StatusChange::InvalidStatus(invalid.0));
            }
        };

        let previous = book.status;
        book.status = status;
        let updated = book.clone();
        self.save(&books)?;

        info!(id, %previous, %status, "changed status");
        Ok(StatusChange::Changed {
            book: updated,
            previous,
        })
    }

    /// List every book in stored order
    pub fn list(&self) -> Result<Vec<Book>> {
        self.load()
    }
}
