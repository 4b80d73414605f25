//! File Storage
//!
//! JSON-lines file backend.
//!
//! ## Write paths
//! - `append`: opens in append mode and writes one line
//! - `save`: writes a temp file next to the target, then renames it over
//!   the target so readers never observe a half-written catalog
//!
//! ## Blank lines
//! Whitespace-only lines are skipped on load rather than treated as
//! malformed records. This is a deliberate relaxation: any other line that
//! does not parse still fails the whole load.

use std::fs::{self, File, OpenOptions};
use std::io::{self, BufRead, BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};

use tempfile::NamedTempFile;
use tracing::debug;

use crate::book::Book;
use crate::config::{Config, SyncStrategy};
use crate::error::{CatalogError, Result};

use super::Storage;

/// Stores records in a line-delimited JSON file
#[derive(Debug, Clone)]
pub struct FileStorage {
    /// Backing file path
    path: PathBuf,

    /// Whether writes are fsynced
    sync_strategy: SyncStrategy,
}

impl FileStorage {
    /// Create a file backend from config. The file is not touched until
    /// the first read or write.
    pub fn new(config: &Config) -> Self {
        Self {
            path: config.data_file.clone(),
            sync_strategy: config.sync_strategy,
        }
    }

    /// Create a file backend at `path` with default settings
    pub fn open_path(path: impl Into<PathBuf>) -> Self {
        Self::new(&Config::builder().data_file(path).build())
    }

    /// Get the backing file path
    pub fn path(&self) -> &Path {
        &self.path
    }

    // =========================================================================
    // Private Helpers
    // =========================================================================

    /// Directory the backing file lives in ("." for a bare file name)
    fn parent_dir(&self) -> &Path {
        match self.path.parent() {
            Some(dir) if !dir.as_os_str().is_empty() => dir,
            _ => Path::new("."),
        }
    }

    /// Encode one record as a newline-terminated JSON line
    fn encode_line<W: Write>(writer: &mut W, book: &Book) -> Result<()> {
        serde_json::to_writer(&mut *writer, book)?;
        writer.write_all(b"\n")?;
        Ok(())
    }

    fn sync_file(&self, file: &File) -> io::Result<()> {
        match self.sync_strategy {
            SyncStrategy::EveryWrite => file.sync_all(),
            SyncStrategy::OsManaged => Ok(()),
        }
    }
}

impl Storage for FileStorage {
    fn load(&self) -> Result<Vec<Book>> {
        let file = match File::open(&self.path) {
            Ok(file) => file,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                debug!(path = %self.path.display(), "catalog file absent, starting empty");
                return Ok(Vec::new());
            }
            Err(e) => return Err(e.into()),
        };

        let mut books = Vec::new();
        for (index, line) in BufReader::new(file).lines().enumerate() {
            let line = line?;
            if line.trim().is_empty() {
                continue;
            }

            let book: Book = serde_json::from_str(&line).map_err(|source| {
                CatalogError::MalformedRecord {
                    line: index + 1,
                    source,
                }
            })?;
            books.push(book);
        }

        debug!(path = %self.path.display(), count = books.len(), "loaded catalog");
        Ok(books)
    }

    fn save(&self, books: &[Book]) -> Result<()> {
        let dir = self.parent_dir();
        fs::create_dir_all(dir)?;

        let temp = NamedTempFile::new_in(dir)?;
        {
            let mut writer = BufWriter::new(temp.as_file());
            for book in books {
                Self::encode_line(&mut writer, book)?;
            }
            writer.flush()?;
        }
        self.sync_file(temp.as_file())?;
        temp.persist(&self.path)?;

        debug!(path = %self.path.display(), count = books.len(), "rewrote catalog");
        Ok(())
    }

    fn append(&self, book: &Book) -> Result<()> {
        fs::create_dir_all(self.parent_dir())?;

        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)?;

        // Single write_all so the line lands in one append
        let mut line = Vec::new();
        Self::encode_line(&mut line, book)?;
        (&file).write_all(&line)?;
        self.sync_file(&file)?;

        debug!(path = %self.path.display(), id = book.id, "appended record");
        Ok(())
    }
}
