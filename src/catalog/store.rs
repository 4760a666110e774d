use std::collections::{BTreeMap, HashMap};
use std::path::Path;
use thiserror::Error;
use tracing::debug;

use crate::catalog::index::{self, OrderedIndex};
use crate::core::book::Book;

#[derive(Error, Debug)]
pub enum CatalogError {
    #[error("{0}")]
    Io(#[from] std::io::Error),

    #[error("invalid catalog data: {0}")]
    Json(#[from] serde_json::Error),
}

/// The book catalog: a title-keyed map plus an ordered index mirroring it
///
/// The map is authoritative. After every mutation the ordered index holds
/// exactly the same records as the map.
#[derive(Debug, Default)]
pub struct Catalog {
    /// Index: title -> record
    books: HashMap<String, Book>,

    /// Binary search tree over the same records, ordered by title
    ordered: OrderedIndex,
}

impl Catalog {
    /// Create an empty catalog
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Load a catalog from a JSON file
    ///
    /// # Errors
    ///
    /// Returns `CatalogError::Io` if the file cannot be read, or
    /// `CatalogError::Json` if it is not a title -> book object.
    pub fn load_from_file(path: &Path) -> Result<Self, CatalogError> {
        let content = std::fs::read_to_string(path)?;
        let catalog = Self::from_json(&content)?;
        debug!(
            path = %path.display(),
            books = catalog.len(),
            "Loaded catalog"
        );
        Ok(catalog)
    }

    /// Parse a catalog from JSON text
    ///
    /// # Errors
    ///
    /// Returns `CatalogError::Json` if the text is not a title -> book object.
    pub fn from_json(json: &str) -> Result<Self, CatalogError> {
        let books: HashMap<String, Book> = serde_json::from_str(json)?;

        let mut catalog = Self {
            books,
            ordered: OrderedIndex::new(),
        };
        catalog.rebuild_ordered_index();

        Ok(catalog)
    }

    /// Export catalog to compact JSON, keys in ascending title order
    ///
    /// # Errors
    ///
    /// Returns `CatalogError::Json` if serialization fails.
    pub fn to_json(&self) -> Result<String, CatalogError> {
        let sorted: BTreeMap<&str, &Book> = self
            .books
            .iter()
            .map(|(title, book)| (title.as_str(), book))
            .collect();
        Ok(serde_json::to_string(&sorted)?)
    }

    /// Overwrite `path` with the whole catalog
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails or the file cannot be written.
    pub fn save_to_file(&self, path: &Path) -> Result<(), CatalogError> {
        let json = self.to_json()?;
        std::fs::write(path, json)?;
        debug!(path = %path.display(), books = self.len(), "Saved catalog");
        Ok(())
    }

    /// Add a book, replacing any record with the same title
    ///
    /// Returns the replaced record.
    pub fn add(&mut self, book: Book) -> Option<Book> {
        let previous = self.books.insert(book.title.clone(), book.clone());

        if previous.is_some() {
            // The stale node cannot be removed from the tree in place
            self.rebuild_ordered_index();
        } else {
            self.ordered.insert_one(book);
        }

        previous
    }

    /// Replace the record stored under `title` with `book`
    ///
    /// The replacement is stored under its own title, so a renamed book does
    /// not stay reachable under the old one. Behaves like [`Catalog::add`]
    /// when `title` is absent. Returns the record removed from `title`.
    pub fn update(&mut self, title: &str, book: Book) -> Option<Book> {
        let previous = self.books.remove(title);
        self.books.insert(book.title.clone(), book);
        self.rebuild_ordered_index();
        previous
    }

    /// Remove a book by title; absent titles are a no-op
    pub fn delete(&mut self, title: &str) -> Option<Book> {
        let removed = self.books.remove(title);
        self.rebuild_ordered_index();
        removed
    }

    /// Get a book by title
    #[must_use]
    pub fn get(&self, title: &str) -> Option<&Book> {
        self.books.get(title)
    }

    /// All books, in no particular order
    pub fn list_all(&self) -> impl Iterator<Item = &Book> + '_ {
        self.books.values()
    }

    /// All books in ascending title order, read from the ordered index
    pub fn list_sorted(&self) -> index::Iter<'_> {
        self.ordered.iter()
    }

    /// The ordered index mirroring this catalog
    #[must_use]
    pub fn ordered_index(&self) -> &OrderedIndex {
        &self.ordered
    }

    /// Number of books in catalog
    #[must_use]
    pub fn len(&self) -> usize {
        self.books.len()
    }

    /// Check if catalog is empty
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.books.is_empty()
    }

    fn rebuild_ordered_index(&mut self) {
        self.ordered.rebuild_from(self.books.values());
        debug!(
            nodes = self.ordered.len(),
            depth = self.ordered.depth(),
            "Rebuilt ordered index"
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dune() -> Book {
        Book::new("Dune", "Herbert", 1965, "SciFi")
    }

    fn emma() -> Book {
        Book::new("Emma", "Austen", 1815, "Romance")
    }

    fn sorted_by_title<'a>(books: impl Iterator<Item = &'a Book>) -> Vec<Book> {
        let mut books: Vec<Book> = books.cloned().collect();
        books.sort_by(|a, b| a.title.cmp(&b.title));
        books
    }

    fn assert_mirrors(catalog: &Catalog) {
        let from_map = sorted_by_title(catalog.list_all());
        let from_tree: Vec<Book> = catalog.ordered_index().iter().cloned().collect();
        assert_eq!(from_map, from_tree);
        assert_eq!(catalog.ordered_index().len(), catalog.len());
    }

    #[test]
    fn test_add_and_get() {
        let mut catalog = Catalog::new();
        assert!(catalog.is_empty());

        assert!(catalog.add(dune()).is_none());
        assert!(catalog.add(emma()).is_none());

        assert_eq!(catalog.len(), 2);
        assert_eq!(catalog.get("Dune"), Some(&dune()));
        assert_eq!(catalog.get("Dune").unwrap().author, "Herbert");
        assert!(catalog.get("Ulysses").is_none());
        assert_mirrors(&catalog);
    }

    #[test]
    fn test_add_same_title_keeps_latest() {
        let mut catalog = Catalog::new();
        catalog.add(dune());
        catalog.add(emma());

        let revised = Book::new("Dune", "Frank Herbert", 1966, "Science Fiction");
        let previous = catalog.add(revised.clone());

        assert_eq!(previous, Some(dune()));
        assert_eq!(catalog.len(), 2);
        assert_eq!(catalog.get("Dune"), Some(&revised));
        assert_mirrors(&catalog);
    }

    #[test]
    fn test_uniqueness_over_many_adds() {
        let mut catalog = Catalog::new();
        for round in 0..5 {
            for title in ["A", "B", "C"] {
                catalog.add(Book::new(title, "Author", round, "Genre"));
            }
        }

        assert_eq!(catalog.len(), 3);
        assert!(catalog.list_all().all(|b| b.publication_year == 4));
        assert_mirrors(&catalog);
    }

    #[test]
    fn test_update_same_title() {
        let mut catalog = Catalog::new();
        catalog.add(dune());

        let revised = Book::new("Dune", "Herbert", 1965, "Space Opera");
        assert_eq!(catalog.update("Dune", revised.clone()), Some(dune()));

        assert_eq!(catalog.len(), 1);
        assert_eq!(catalog.get("Dune"), Some(&revised));
        assert_mirrors(&catalog);
    }

    #[test]
    fn test_update_with_new_title_rekeys() {
        let mut catalog = Catalog::new();
        catalog.add(dune());
        catalog.add(emma());

        let renamed = Book::new("Dune Messiah", "Herbert", 1969, "SciFi");
        catalog.update("Dune", renamed.clone());

        assert_eq!(catalog.len(), 2);
        assert!(catalog.get("Dune").is_none());
        assert_eq!(catalog.get("Dune Messiah"), Some(&renamed));
        assert_mirrors(&catalog);
    }

    #[test]
    fn test_update_missing_title_inserts() {
        let mut catalog = Catalog::new();
        assert!(catalog.update("Nowhere", emma()).is_none());

        assert_eq!(catalog.len(), 1);
        assert_eq!(catalog.get("Emma"), Some(&emma()));
        assert_mirrors(&catalog);
    }

    #[test]
    fn test_update_onto_existing_title_replaces_it() {
        let mut catalog = Catalog::new();
        catalog.add(dune());
        catalog.add(emma());

        let renamed = Book::new("Emma", "Herbert", 1965, "SciFi");
        catalog.update("Dune", renamed.clone());

        assert_eq!(catalog.len(), 1);
        assert_eq!(catalog.get("Emma"), Some(&renamed));
        assert_mirrors(&catalog);
    }

    #[test]
    fn test_delete_then_get() {
        let mut catalog = Catalog::new();
        catalog.add(dune());
        catalog.add(emma());

        assert_eq!(catalog.delete("Emma"), Some(emma()));
        assert!(catalog.get("Emma").is_none());

        let remaining: Vec<&Book> = catalog.list_all().collect();
        assert_eq!(remaining, vec![&dune()]);
        assert_mirrors(&catalog);
    }

    #[test]
    fn test_delete_missing_is_noop() {
        let mut catalog = Catalog::new();
        catalog.add(dune());

        assert!(catalog.delete("Emma").is_none());
        assert_eq!(catalog.len(), 1);
        assert_mirrors(&catalog);
    }

    #[test]
    fn test_list_all_is_restartable() {
        let mut catalog = Catalog::new();
        catalog.add(dune());
        catalog.add(emma());

        assert_eq!(catalog.list_all().count(), 2);
        assert_eq!(catalog.list_all().count(), 2);
    }

    #[test]
    fn test_list_sorted() {
        let mut catalog = Catalog::new();
        for title in ["Walden", "Beloved", "Middlemarch", "Dune"] {
            catalog.add(Book::new(title, "Author", 1900, "Genre"));
        }
        catalog.delete("Middlemarch");

        let titles: Vec<&str> = catalog.list_sorted().map(|b| b.title.as_str()).collect();
        assert_eq!(titles, vec!["Beloved", "Dune", "Walden"]);
    }

    #[test]
    fn test_mirror_after_mixed_mutations() {
        let mut catalog = Catalog::new();
        for i in 0..20 {
            catalog.add(Book::new(format!("Book {i}"), "Author", i, "Genre"));
            assert_mirrors(&catalog);
        }
        for i in (0..20).step_by(3) {
            catalog.delete(&format!("Book {i}"));
            assert_mirrors(&catalog);
        }
        for i in (1..20).step_by(4) {
            catalog.update(
                &format!("Book {i}"),
                Book::new(format!("Renamed {i}"), "Someone", i, "Other"),
            );
            assert_mirrors(&catalog);
        }
    }

    #[test]
    fn test_to_json_shape() {
        let mut catalog = Catalog::new();
        catalog.add(emma());
        catalog.add(dune());

        let json = catalog.to_json().unwrap();
        assert_eq!(
            json,
            concat!(
                r#"{"Dune":{"Title":"Dune","Author":"Herbert","PublicationYear":1965,"Genre":"SciFi"},"#,
                r#""Emma":{"Title":"Emma","Author":"Austen","PublicationYear":1815,"Genre":"Romance"}}"#
            )
        );
    }

    #[test]
    fn test_from_json_rebuilds_ordered_index() {
        let json = r#"{"Emma":{"Title":"Emma","Author":"Austen","PublicationYear":1815,"Genre":"Romance"},"Dune":{"Title":"Dune","Author":"Herbert","PublicationYear":1965,"Genre":"SciFi"}}"#;
        let catalog = Catalog::from_json(json).unwrap();

        assert_eq!(catalog.len(), 2);
        assert_eq!(catalog.get("Emma"), Some(&emma()));
        assert_mirrors(&catalog);
    }

    #[test]
    fn test_from_json_rejects_other_shapes() {
        assert!(matches!(
            Catalog::from_json("[]"),
            Err(CatalogError::Json(_))
        ));
        assert!(matches!(
            Catalog::from_json(r#"{"Dune":{"Title":"Dune"}}"#),
            Err(CatalogError::Json(_))
        ));
        assert!(matches!(
            Catalog::from_json("not json"),
            Err(CatalogError::Json(_))
        ));
    }

    #[test]
    fn test_save_and_load_roundtrip() {
        let mut catalog = Catalog::new();
        catalog.add(dune());
        catalog.add(emma());
        catalog.add(Book::new("", "", 0, ""));

        let temp = tempfile::NamedTempFile::with_suffix(".txt").unwrap();
        catalog.save_to_file(temp.path()).unwrap();
        let loaded = Catalog::load_from_file(temp.path()).unwrap();

        assert_eq!(
            sorted_by_title(catalog.list_all()),
            sorted_by_title(loaded.list_all())
        );
        assert_mirrors(&loaded);
    }

    #[test]
    fn test_load_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let result = Catalog::load_from_file(&dir.path().join("library.txt"));
        assert!(matches!(result, Err(CatalogError::Io(_))));
    }

    #[test]
    fn test_save_overwrites_whole_file() {
        let temp = tempfile::NamedTempFile::new().unwrap();
        std::fs::write(temp.path(), "x".repeat(4096)).unwrap();

        let mut catalog = Catalog::new();
        catalog.add(dune());
        catalog.save_to_file(temp.path()).unwrap();

        let content = std::fs::read_to_string(temp.path()).unwrap();
        assert_eq!(content, catalog.to_json().unwrap());
    }
}
