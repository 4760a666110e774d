//! Core data types for the book catalog.
//!
//! - [`Book`]: a single record with title, author, publication year and genre
//!
//! The title is the only identity a book has; two records with the same
//! title are the same book.

pub mod book;

pub use book::Book;
