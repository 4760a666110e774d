use std::io::{BufRead, Write};
use std::path::Path;

use tracing::{debug, warn};

use crate::catalog::store::Catalog;
use crate::core::book::Book;
use crate::parsing::input::{
    parse_menu_choice, parse_text_field, parse_year, ChoiceError, MenuChoice,
};

const MENU: &str = "\nSelect an option:
1. Add a book
2. Update a book
3. Delete a book
4. Get details of a book
5. List all books
6. Save to file and exit";

/// How an interactive session ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionEnd {
    /// The catalog was written to disk
    Saved,
    /// Save was requested but failed; the error was shown to the operator
    SaveFailed,
    /// Input reached end of file before a save was requested
    InputClosed,
}

/// An interactive menu session over a catalog
///
/// Reads operator input line by line from `input` and writes prompts and
/// results to `output`. Nothing the operator types ends the session except
/// the save-and-exit option (or closing the input).
pub struct Session<'a, R, W> {
    catalog: &'a mut Catalog,
    path: &'a Path,
    input: R,
    output: W,
}

impl<'a, R: BufRead, W: Write> Session<'a, R, W> {
    pub fn new(catalog: &'a mut Catalog, path: &'a Path, input: R, output: W) -> Self {
        Self {
            catalog,
            path,
            input,
            output,
        }
    }

    /// Run the menu loop until save-and-exit or end of input
    ///
    /// # Errors
    ///
    /// Returns an error only if reading input or writing output fails.
    pub fn run(mut self) -> std::io::Result<SessionEnd> {
        loop {
            writeln!(self.output, "{MENU}")?;
            let Some(line) = self.prompt("Enter option number: ")? else {
                writeln!(self.output, "\nInput closed; exiting without saving.")?;
                warn!("Input closed before save, changes discarded");
                return Ok(SessionEnd::InputClosed);
            };

            let choice = match parse_menu_choice(&line) {
                Ok(choice) => choice,
                Err(ChoiceError::NotANumber(_)) => {
                    writeln!(self.output, "Invalid input. Try again.")?;
                    continue;
                }
                Err(ChoiceError::OutOfRange(_)) => {
                    writeln!(self.output, "Invalid option. Try again.")?;
                    continue;
                }
            };
            debug!(?choice, "Menu selection");

            match choice {
                MenuChoice::Add => {
                    let book = self.read_book()?;
                    self.catalog.add(book);
                }
                MenuChoice::Update => {
                    let title = self.prompt_field("Enter the title of the book to update: ")?;
                    let book = self.read_book()?;
                    self.catalog.update(&title, book);
                }
                MenuChoice::Delete => {
                    let title = self.prompt_field("Enter the title of the book to delete: ")?;
                    self.catalog.delete(&title);
                }
                MenuChoice::Get => {
                    let title = self.prompt_field("Enter the title of the book: ")?;
                    match self.catalog.get(&title) {
                        Some(book) => writeln!(self.output, "\n{book}")?,
                        None => writeln!(self.output, "Book not found.")?,
                    }
                }
                MenuChoice::List => self.print_all()?,
                MenuChoice::SaveAndExit => return self.save(),
            }
        }
    }

    fn save(&mut self) -> std::io::Result<SessionEnd> {
        match self.catalog.save_to_file(self.path) {
            Ok(()) => Ok(SessionEnd::Saved),
            Err(e) => {
                warn!(path = %self.path.display(), error = %e, "Save failed");
                writeln!(self.output, "Error while saving library: {e}")?;
                Ok(SessionEnd::SaveFailed)
            }
        }
    }

    fn print_all(&mut self) -> std::io::Result<()> {
        if self.catalog.is_empty() {
            writeln!(self.output, "No books in the library.")?;
            return Ok(());
        }
        for book in self.catalog.list_all() {
            writeln!(self.output, "\n{book}\n")?;
        }
        Ok(())
    }

    fn read_book(&mut self) -> std::io::Result<Book> {
        let title = self.prompt_field("Enter title: ")?;
        let author = self.prompt_field("Enter author: ")?;
        let year = self.prompt("Enter publication year: ")?.unwrap_or_default();
        let genre = self.prompt_field("Enter genre: ")?;

        Ok(Book::new(title, author, parse_year(&year), genre))
    }

    /// Prompt for a free-text field; end of input reads as an empty field
    fn prompt_field(&mut self, text: &str) -> std::io::Result<String> {
        let line = self.prompt(text)?.unwrap_or_default();
        Ok(parse_text_field(&line))
    }

    /// Write a prompt and read one line, `None` at end of input
    fn prompt(&mut self, text: &str) -> std::io::Result<Option<String>> {
        write!(self.output, "{text}")?;
        self.output.flush()?;

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        Ok(Some(line))
    }
}
