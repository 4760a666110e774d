//! Command-line interface for book-catalog.
//!
//! This module implements the CLI using clap. Available commands:
//!
//! - **menu** (default): Interactive numbered menu over the catalog
//! - **list**: Print every book in the catalog
//! - **show**: Print a single book by title
//!
//! ## Usage
//!
//! ```text
//! # Start the interactive menu on ./library.txt
//! book-catalog
//!
//! # Use a different data file
//! book-catalog --file ~/books.json menu
//!
//! # List books in title order as TSV
//! book-catalog list --sorted --format tsv
//!
//! # Show one book as JSON
//! book-catalog show "Dune" --format json
//! ```

use std::io::Write;
use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};
use tracing::warn;

use crate::catalog::store::Catalog;

pub mod catalog;
pub mod menu;

/// Default location of the persisted catalog, relative to the working directory
pub const DEFAULT_LIBRARY_FILE: &str = "library.txt";

#[derive(Parser)]
#[command(name = "book-catalog")]
#[command(version)]
#[command(about = "Manage a personal book catalog")]
#[command(
    long_about = "book-catalog keeps a catalog of books keyed by title.\n\nRun without a subcommand to open the interactive menu. The catalog is loaded from the data file at start and written back when you choose \"Save to file and exit\"."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Path to the catalog data file
    #[arg(long, global = true, default_value = DEFAULT_LIBRARY_FILE)]
    pub file: PathBuf,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Output format (list and show only)
    #[arg(short, long, global = true, default_value = "text")]
    pub format: OutputFormat,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Open the interactive menu (default)
    Menu,

    /// List all books in the catalog
    List(catalog::ListArgs),

    /// Show details of a single book
    Show(catalog::ShowArgs),
}

#[derive(Clone, Copy, Debug, clap::ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
    Tsv,
}

/// Run the interactive menu on stdin/stdout
///
/// # Errors
///
/// Returns an error if stdin or stdout fail; catalog load and save problems
/// are reported to the operator and do not end the process with an error.
pub fn run_menu(path: &Path) -> anyhow::Result<()> {
    let stdin = std::io::stdin();
    let mut stdout = std::io::stdout();

    let mut catalog = load_or_report(path, &mut stdout)?;
    let end = menu::Session::new(&mut catalog, path, stdin.lock(), stdout.lock()).run()?;
    tracing::debug!(?end, "Session finished");

    Ok(())
}

/// Load the catalog, or report the failure on `out` and start empty
///
/// # Errors
///
/// Returns an error only if writing the report to `out` fails.
pub fn load_or_report<W: Write>(path: &Path, out: &mut W) -> std::io::Result<Catalog> {
    match Catalog::load_from_file(path) {
        Ok(catalog) => Ok(catalog),
        Err(e) => {
            warn!(path = %path.display(), error = %e, "Starting with an empty catalog");
            writeln!(out, "Error while loading library: {e}")?;
            Ok(Catalog::new())
        }
    }
}
