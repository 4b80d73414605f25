//! # Shelfmark
//!
//! A personal library catalog with:
//! - One JSON record per line in a local file
//! - Smallest-free-id assignment
//! - Case-insensitive title/author search and exact year search
//! - Lending status tracking (AVAILABLE / LOANED)
//!
//! ## Architecture Overview
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                 CLI / Interactive Shell                      │
//! │                   (src/bin/cli.rs)                           │
//! └─────────────────────┬───────────────────────────────────────┘
//!                       │ Command / Outcome
//! ┌─────────────────────▼───────────────────────────────────────┐
//! │                      Catalog                                 │
//! │        (id assignment, search, read-modify-write)            │
//! └─────────────────────┬───────────────────────────────────────┘
//!                       │ Storage trait
//!          ┌────────────┴────────────┐
//!          │                         │
//!          ▼                         ▼
//!   ┌─────────────┐          ┌─────────────┐
//!   │ FileStorage │          │MemoryStorage│
//!   │(JSON lines) │          │  (RwLock)   │
//!   └─────────────┘          └─────────────┘
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod config;

pub mod book;
pub mod storage;
pub mod command;
pub mod catalog;
pub mod shell;

// =============================================================================
// Public API Re-exports
// =============================================================================

pub use error::{CatalogError, InvalidStatus, Result};
pub use config::{Config, SyncStrategy};
pub use book::{Book, BookStatus};
pub use command::{Command, Outcome, StatusChange};
pub use catalog::Catalog;
pub use shell::Shell;
pub use storage::{FileStorage, MemoryStorage, Storage};

// =============================================================================
// Version Info
// =============================================================================

/// Current version of Shelfmark
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
