//! Shelfmark CLI
//!
//! Command-line interface for a local library catalog.

use std::io;
use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use shelfmark::shell::{self, EMPTY_LIBRARY, NO_MATCHES};
use shelfmark::{Catalog, Command, Config, Shell, SyncStrategy};
use tracing_subscriber::{fmt, EnvFilter};

/// Shelfmark CLI
#[derive(Parser, Debug)]
#[command(name = "shelfmark")]
#[command(about = "Personal library catalog")]
#[command(version)]
struct Args {
    /// Catalog file (one JSON record per line)
    #[arg(short, long, default_value = "library_storage.json")]
    data_file: PathBuf,

    /// Skip fsync after writes
    #[arg(long)]
    no_sync: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Add a book
    Add {
        title: String,

        author: String,

        /// Publication year
        #[arg(allow_negative_numbers = true)]
        year: i32,
    },

    /// Delete a book by ID
    Delete {
        id: u64,
    },

    /// Search by title, author or year
    Find {
        keyword: String,
    },

    /// List all books
    List,

    /// Change a book's status (AVAILABLE or LOANED)
    Status {
        id: u64,

        status: String,
    },

    /// Run the interactive menu
    Shell,
}

fn main() -> ExitCode {
    // Logs go to stderr so stdout only carries catalog output
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));

    fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(io::stderr)
        .init();

    let args = Args::parse();

    let sync_strategy = if args.no_sync {
        SyncStrategy::OsManaged
    } else {
        SyncStrategy::EveryWrite
    };
    let config = Config::builder()
        .data_file(&args.data_file)
        .sync_strategy(sync_strategy)
        .build();

    tracing::debug!("Shelfmark v{}", shelfmark::VERSION);
    tracing::debug!("Data file: {}", config.data_file.display());

    let catalog = Catalog::open(&config);

    let (command, empty_message) = match args.command {
        Commands::Add {
            title,
            author,
            year,
        } => (
            Command::Add {
                title,
                author,
                year,
            },
            EMPTY_LIBRARY,
        ),
        Commands::Delete { id } => (Command::Delete { id }, EMPTY_LIBRARY),
        Commands::Find { keyword } => (Command::Find { keyword }, NO_MATCHES),
        Commands::List => (Command::List, EMPTY_LIBRARY),
        Commands::Status { id, status } => (Command::ChangeStatus { id, status }, EMPTY_LIBRARY),
        Commands::Shell => {
            let stdin = io::stdin();
            let mut session = Shell::new(&catalog, stdin.lock(), io::stdout());
            return match session.run() {
                Ok(()) => ExitCode::SUCCESS,
                Err(e) => {
                    tracing::error!("Shell aborted: {}", e);
                    ExitCode::FAILURE
                }
            };
        }
    };

    let outcome = match catalog.execute(command) {
        Ok(outcome) => outcome,
        Err(e) => {
            tracing::error!("Catalog operation failed: {}", e);
            return ExitCode::FAILURE;
        }
    };

    if let Err(e) = shell::write_outcome(&mut io::stdout(), &outcome, empty_message) {
        tracing::error!("Failed to write output: {}", e);
        return ExitCode::FAILURE;
    }

    if outcome.is_success() {
        ExitCode::SUCCESS
    } else {
        ExitCode::from(2)
    }
}
