//! Interactive shell
//!
//! Numbered menu loop over a catalog. Reads answers line by line and
//! renders [`Outcome`]s; all catalog behavior lives in [`Catalog`].

use std::io::{BufRead, Write};
use std::str::FromStr;

use crate::book::{Book, BookStatus};
use crate::catalog::Catalog;
use crate::command::{Command, Outcome};
use crate::error::Result;
use crate::storage::Storage;

const MENU: &str = "\nMenu:
1. Add a book
2. Delete a book
3. Find books
4. List all books
5. Change book status
6. Exit";

/// Message for an empty listing
pub const EMPTY_LIBRARY: &str = "The library has no books yet";

/// Message for a search with no hits
pub const NO_MATCHES: &str = "No books found";

/// Menu-driven session reading from `input` and writing to `output`
pub struct Shell<'a, S, R, W> {
    catalog: &'a Catalog<S>,
    input: R,
    output: W,
}

impl<'a, S: Storage, R: BufRead, W: Write> Shell<'a, S, R, W> {
    pub fn new(catalog: &'a Catalog<S>, input: R, output: W) -> Self {
        Self {
            catalog,
            input,
            output,
        }
    }

    /// Run until the user picks "Exit" or input ends
    ///
    /// Catalog failures (unreadable or malformed file) end the session
    /// with an error.
    pub fn run(&mut self) -> Result<()> {
        loop {
            writeln!(self.output, "{MENU}")?;
            let Some(choice) = self.prompt("Choose an action: ")? else {
                break;
            };

            let command = match choice.trim() {
                "1" => self.read_add()?,
                "2" => self.read_number("Enter the ID of the book to delete: ")?
                    .map(|id| Command::Delete { id }),
                "3" => self
                    .prompt("Enter a search keyword: ")?
                    .map(|keyword| Command::Find { keyword }),
                "4" => Some(Command::List),
                "5" => self.read_status_change()?,
                "6" => {
                    writeln!(self.output, "Goodbye!")?;
                    return Ok(());
                }
                _ => {
                    writeln!(self.output, "Unknown choice. Please try again.")?;
                    continue;
                }
            };

            let Some(command) = command else {
                break;
            };
            let empty_message = match command {
                Command::Find { .. } => NO_MATCHES,
                _ => EMPTY_LIBRARY,
            };

            let outcome = self.catalog.execute(command)?;
            write_outcome(&mut self.output, &outcome, empty_message)?;
        }

        Ok(())
    }

    // =========================================================================
    // Private Helpers
    // =========================================================================

    fn read_add(&mut self) -> Result<Option<Command>> {
        let Some(title) = self.prompt("Enter the book title: ")? else {
            return Ok(None);
        };
        let Some(author) = self.prompt("Enter the book author: ")? else {
            return Ok(None);
        };
        let Some(year) = self.read_number("Enter the publication year: ")? else {
            return Ok(None);
        };

        Ok(Some(Command::Add {
            title,
            author,
            year,
        }))
    }

    fn read_status_change(&mut self) -> Result<Option<Command>> {
        let Some(id) = self.read_number("Enter the ID of the book: ")? else {
            return Ok(None);
        };
        let question = format!("Enter the new status ({}): ", BookStatus::NAMES.join(" or "));
        let Some(status) = self.prompt(&question)? else {
            return Ok(None);
        };

        Ok(Some(Command::ChangeStatus { id, status }))
    }

    /// Ask until the answer parses as a number; `None` on end of input
    fn read_number<T: FromStr>(&mut self, question: &str) -> Result<Option<T>> {
        loop {
            let Some(answer) = self.prompt(question)? else {
                return Ok(None);
            };
            match answer.trim().parse() {
                Ok(value) => return Ok(Some(value)),
                Err(_) => writeln!(self.output, "Please enter a whole number.")?,
            }
        }
    }

    /// Print `question` and read one line without its terminator
    fn prompt(&mut self, question: &str) -> Result<Option<String>> {
        write!(self.output, "{question}")?;
        self.output.flush()?;

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        let trimmed_len = line.trim_end_matches(['\r', '\n']).len();
        line.truncate(trimmed_len);
        Ok(Some(line))
    }
}

/// Render an outcome as user-facing lines
///
/// `empty_message` is printed when a listing or search has no books.
pub fn write_outcome<W: Write>(
    out: &mut W,
    outcome: &Outcome,
    empty_message: &str,
) -> std::io::Result<()> {
    match outcome {
        Outcome::Added(book) => {
            writeln!(out, "Book '{}' added with ID {}", book.title, book.id)
        }
        Outcome::Deleted(book) => {
            writeln!(out, "Book with ID {} ('{}') deleted", book.id, book.title)
        }
        Outcome::Books(books) if books.is_empty() => writeln!(out, "{empty_message}"),
        Outcome::Books(books) => write_books(out, books),
        Outcome::StatusChanged { book, previous } => writeln!(
            out,
            "Status of '{}' changed from {} to {}",
            book.title, previous, book.status
        ),
        Outcome::NotFound(id) => writeln!(out, "Book with ID {id} not found"),
        Outcome::InvalidStatus(raw) => writeln!(
            out,
            "Invalid status '{}'. Use {}.",
            raw,
            BookStatus::NAMES.join(" or ")
        ),
    }
}

fn write_books<W: Write>(out: &mut W, books: &[Book]) -> std::io::Result<()> {
    for book in books {
        writeln!(out, "{book}")?;
    }
    Ok(())
}
