//! Command definitions
//!
//! Requests a presentation layer sends to the catalog, and the outcomes
//! it gets back.

use crate::book::{Book, BookStatus};

/// A catalog request
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Add a new available book
    Add {
        title: String,
        author: String,
        year: i32,
    },

    /// Delete a book by id
    Delete { id: u64 },

    /// Search titles, authors and years
    Find { keyword: String },

    /// Change lending status. `status` is raw user input, validated by the catalog.
    ChangeStatus { id: u64, status: String },

    /// List every book in stored order
    List,
}

/// Result of executing a [`Command`]
///
/// "Not found" and "invalid status" are outcomes, not errors: the catalog
/// is untouched and the caller decides how to report them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// Book was created
    Added(Book),

    /// Book was removed
    Deleted(Book),

    /// Search or list results
    Books(Vec<Book>),

    /// Status was updated
    StatusChanged { book: Book, previous: BookStatus },

    /// No book has this id
    NotFound(u64),

    /// Status input was not a known status
    InvalidStatus(String),
}

impl Outcome {
    /// Whether the command found its target and was applied
    pub fn is_success(&self) -> bool {
        !matches!(self, Outcome::NotFound(_) | Outcome::InvalidStatus(_))
    }
}

/// Result of a status change request
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StatusChange {
    /// Status was set and persisted
    Changed { book: Book, previous: BookStatus },

    /// No book has this id
    NotFound,

    /// Book exists but the value was not a known status; nothing was written
    InvalidStatus(String),
}

impl StatusChange {
    /// Convert into a command outcome for book `id`
    pub fn into_outcome(self, id: u64) -> Outcome {
        match self {
            StatusChange::Changed { book, previous } => Outcome::StatusChanged { book, previous },
            StatusChange::NotFound => Outcome::NotFound(id),
            StatusChange::InvalidStatus(raw) => Outcome::InvalidStatus(raw),
        }
    }
}
