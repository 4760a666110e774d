//! # book-catalog
//!
//! A small, single-user catalog of books keyed by title.
//!
//! Books are added, updated, deleted, looked up and listed through a numbered
//! text menu, and the whole catalog is written to a JSON file on exit and
//! read back on the next start.
//!
//! ## Features
//!
//! - **Title-keyed store**: at most one record per title, last write wins
//! - **Ordered index**: a binary search tree mirroring the store, rebuilt
//!   whenever membership may have changed
//! - **Whole-file persistence**: compact JSON object of title -> book
//! - **Forgiving input**: bad menu input is reported and the menu redisplayed
//!
//! ## Example
//!
//! ```rust
//! use book_catalog::{Book, Catalog};
//!
//! let mut catalog = Catalog::new();
//! catalog.add(Book::new("Dune", "Herbert", 1965, "SciFi"));
//!
//! let json = catalog.to_json().unwrap();
//! let restored = Catalog::from_json(&json).unwrap();
//! assert_eq!(restored.get("Dune"), catalog.get("Dune"));
//! ```
//!
//! ## Modules
//!
//! - [`catalog`]: Title map, ordered index and persistence
//! - [`core`]: The book record
//! - [`parsing`]: Menu selection and field parsers
//! - [`cli`]: Command-line interface and interactive menu

pub mod catalog;
pub mod cli;
pub mod core;
pub mod parsing;

// Re-export commonly used types for convenience
pub use catalog::index::OrderedIndex;
pub use catalog::store::{Catalog, CatalogError};
pub use core::book::Book;
