//! Book catalog storage and indexing.
//!
//! The catalog keeps two structures over one set of records:
//!
//! - **Title map** ([`store::Catalog`]): the authoritative title -> book
//!   mapping used for every lookup
//! - **Ordered index** ([`index::OrderedIndex`]): an unbalanced binary search
//!   tree over the same records, ordered by title
//!
//! The ordered index is derived data. Adding a new title inserts one leaf;
//! anything that can change membership (replacing a title, updating,
//! deleting, loading) discards the tree and rebuilds it from the map.
//!
//! ## Example
//!
//! ```rust
//! use book_catalog::{Book, Catalog};
//!
//! let mut catalog = Catalog::new();
//! catalog.add(Book::new("Dune", "Herbert", 1965, "SciFi"));
//! catalog.add(Book::new("Emma", "Austen", 1815, "Romance"));
//!
//! assert_eq!(catalog.get("Dune").map(|b| b.author.as_str()), Some("Herbert"));
//!
//! catalog.delete("Emma");
//! assert_eq!(catalog.list_all().count(), 1);
//! ```
//!
//! ## Persistence
//!
//! The catalog is stored as a single JSON object keyed by title:
//!
//! ```rust,no_run
//! use book_catalog::Catalog;
//! use std::path::Path;
//!
//! let catalog = Catalog::load_from_file(Path::new("library.txt")).unwrap();
//! catalog.save_to_file(Path::new("library.txt")).unwrap();
//! ```

pub mod index;
pub mod store;
