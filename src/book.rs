//! Book record definitions
//!
//! Defines the structure of a single catalog entry as it appears on disk.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::InvalidStatus;

/// A single entry in the catalog
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Book {
    /// Positive id, unique within the catalog
    pub id: u64,

    pub title: String,

    pub author: String,

    /// Publication year (negative for BCE)
    pub year: i32,

    /// Lending status
    pub status: BookStatus,
}

impl Book {
    /// Create a new book that is available for lending
    pub fn new(id: u64, title: impl Into<String>, author: impl Into<String>, year: i32) -> Self {
        Self {
            id,
            title: title.into(),
            author: author.into(),
            year,
            status: BookStatus::Available,
        }
    }

    /// Check whether this book matches a search keyword
    ///
    /// Matches when the lowercased keyword is a substring of the lowercased
    /// title or author, or when the keyword is all ASCII digits and equals
    /// the publication year.
    pub fn matches(&self, keyword: &str) -> bool {
        let needle = keyword.to_lowercase();

        self.title.to_lowercase().contains(&needle)
            || self.author.to_lowercase().contains(&needle)
            || Self::numeric_keyword(keyword).is_some_and(|year| year == i64::from(self.year))
    }

    /// "1999" → Some(1999), "19a9" / "" / "-5" → None
    fn numeric_keyword(keyword: &str) -> Option<i64> {
        if keyword.is_empty() || !keyword.bytes().all(|b| b.is_ascii_digit()) {
            return None;
        }
        // Overlong digit strings cannot equal any i32 year
        keyword.parse().ok()
    }
}

impl fmt::Display for Book {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "ID: {}, Title: {}, Author: {}, Year: {}, Status: {}",
            self.id, self.title, self.author, self.year, self.status
        )
    }
}

/// Lending status of a book
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum BookStatus {
    /// On the shelf
    Available,

    /// Lent out
    Loaned,
}

impl BookStatus {
    /// All accepted status names, in display order
    pub const NAMES: [&'static str; 2] = ["AVAILABLE", "LOANED"];

    pub fn as_str(&self) -> &'static str {
        match self {
            BookStatus::Available => "AVAILABLE",
            BookStatus::Loaned => "LOANED",
        }
    }
}

impl fmt::Display for BookStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for BookStatus {
    type Err = InvalidStatus;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "AVAILABLE" => Ok(BookStatus::Available),
            "LOANED" => Ok(BookStatus::Loaned),
            _ => Err(InvalidStatus(s.to_string())),
        }
    }
}
