//! Error types for Shelfmark
//!
//! Provides a unified error type for all catalog operations.
//!
//! "Not found" and "invalid status" are not catalog failures: they are
//! reported through [`crate::Outcome`] and [`crate::StatusChange`].
//! [`InvalidStatus`] is the parse error behind the latter.

use thiserror::Error;

/// Result type alias using CatalogError
pub type Result<T> = std::result::Result<T, CatalogError>;

/// Unified error type for Shelfmark operations
#[derive(Debug, Error)]
pub enum CatalogError {
    // -------------------------------------------------------------------------
    // I/O Errors
    // -------------------------------------------------------------------------
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to replace catalog file: {0}")]
    Persist(#[from] tempfile::PersistError),

    // -------------------------------------------------------------------------
    // Record Errors
    // -------------------------------------------------------------------------
    #[error("Malformed record on line {line}: {source}")]
    MalformedRecord {
        line: usize,
        #[source]
        source: serde_json::Error,
    },

    #[error("Duplicate record id {0} in catalog file")]
    DuplicateId(u64),

    // -------------------------------------------------------------------------
    // Serialization Errors
    // -------------------------------------------------------------------------
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Rejected status value, carrying the raw input
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid status '{0}', expected one of: AVAILABLE, LOANED")]
pub struct InvalidStatus(pub String);
