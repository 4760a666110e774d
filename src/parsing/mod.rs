//! Parsers for operator input read from the interactive menu.
//!
//! - **Menu selections**: numbered options 1 through 6
//! - **Book fields**: trimmed free text, and a publication year that falls
//!   back to zero when it is not an integer

pub mod input;
