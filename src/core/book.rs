use serde::{Deserialize, Serialize};

/// A single book record in the catalog
///
/// The title is the record's identity: the catalog holds at most one record
/// per title. Field names are serialized in `PascalCase` to stay compatible
/// with existing `library.txt` files.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Book {
    /// Title, used as the catalog key
    pub title: String,

    /// Author name
    pub author: String,

    /// Year of publication (zero when unknown or unparseable)
    pub publication_year: i64,

    /// Free-form genre label
    pub genre: String,
}

impl Book {
    pub fn new(
        title: impl Into<String>,
        author: impl Into<String>,
        publication_year: i64,
        genre: impl Into<String>,
    ) -> Self {
        Self {
            title: title.into(),
            author: author.into(),
            publication_year,
            genre: genre.into(),
        }
    }
}

impl std::fmt::Display for Book {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "Title: {}", self.title)?;
        writeln!(f, "Author: {}", self.author)?;
        writeln!(f, "Publication Year: {}", self.publication_year)?;
        write!(f, "Genre: {}", self.genre)
    }
}
