use std::io::Write;
use std::path::Path;

use clap::Args;

use crate::catalog::store::Catalog;
use crate::cli::{load_or_report, OutputFormat};
use crate::core::book::Book;

#[derive(Args)]
pub struct ListArgs {
    /// List in ascending title order instead of storage order
    #[arg(long)]
    pub sorted: bool,
}

#[derive(Args)]
pub struct ShowArgs {
    /// Title of the book
    #[arg(required = true)]
    pub title: String,
}

pub fn run_list(
    args: &ListArgs,
    path: &Path,
    format: OutputFormat,
    verbose: bool,
) -> anyhow::Result<()> {
    let catalog = load_or_report(path, &mut std::io::stderr())?;

    if verbose {
        eprintln!(
            "Loaded catalog with {} books (ordered index depth {})",
            catalog.len(),
            catalog.ordered_index().depth()
        );
    }

    let books: Vec<&Book> = if args.sorted {
        catalog.list_sorted().collect()
    } else {
        catalog.list_all().collect()
    };

    let stdout = std::io::stdout();
    write_books(&mut stdout.lock(), &books, format)
}

pub fn run_show(args: &ShowArgs, path: &Path, format: OutputFormat) -> anyhow::Result<()> {
    let catalog = load_or_report(path, &mut std::io::stderr())?;
    let stdout = std::io::stdout();
    show_book(&mut stdout.lock(), &catalog, &args.title, format)
}

fn show_book<W: Write>(
    out: &mut W,
    catalog: &Catalog,
    title: &str,
    format: OutputFormat,
) -> anyhow::Result<()> {
    let book = catalog
        .get(title)
        .ok_or_else(|| anyhow::anyhow!("Book '{}' not found", title))?;

    match format {
        OutputFormat::Text => writeln!(out, "{book}")?,
        OutputFormat::Json => writeln!(out, "{}", serde_json::to_string_pretty(book)?)?,
        OutputFormat::Tsv => {
            print_tsv_header(out)?;
            print_tsv_row(out, book)?;
        }
    }

    Ok(())
}

fn write_books<W: Write>(
    out: &mut W,
    books: &[&Book],
    format: OutputFormat,
) -> anyhow::Result<()> {
    match format {
        OutputFormat::Text => {
            if books.is_empty() {
                writeln!(out, "No books in the library.")?;
                return Ok(());
            }

            let title_width = column_width(books, "Title", |b| &b.title);
            let author_width = column_width(books, "Author", |b| &b.author);

            writeln!(
                out,
                "{:<title_width$}  {:<author_width$}  {:>4}  Genre",
                "Title", "Author", "Year"
            )?;
            writeln!(out, "{}", "-".repeat(title_width + author_width + 15))?;
            for book in books {
                writeln!(
                    out,
                    "{:<title_width$}  {:<author_width$}  {:>4}  {}",
                    book.title, book.author, book.publication_year, book.genre
                )?;
            }
            writeln!(out, "\nTotal: {} books", books.len())?;
        }
        OutputFormat::Json => {
            writeln!(out, "{}", serde_json::to_string_pretty(books)?)?;
        }
        OutputFormat::Tsv => {
            print_tsv_header(out)?;
            for book in books {
                print_tsv_row(out, book)?;
            }
        }
    }

    Ok(())
}

fn column_width(books: &[&Book], header: &str, field: impl Fn(&Book) -> &String) -> usize {
    books
        .iter()
        .map(|b| field(b).chars().count())
        .chain(std::iter::once(header.len()))
        .max()
        .unwrap_or(0)
}

fn print_tsv_header<W: Write>(out: &mut W) -> std::io::Result<()> {
    writeln!(out, "title\tauthor\tpublication_year\tgenre")
}

fn print_tsv_row<W: Write>(out: &mut W, book: &Book) -> std::io::Result<()> {
    writeln!(
        out,
        "{}\t{}\t{}\t{}",
        book.title, book.author, book.publication_year, book.genre
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_catalog() -> Catalog {
        let mut catalog = Catalog::new();
        catalog.add(Book::new("Emma", "Austen", 1815, "Romance"));
        catalog.add(Book::new("Dune", "Herbert", 1965, "SciFi"));
        catalog
    }

    fn render(books: &[&Book], format: OutputFormat) -> String {
        let mut out = Vec::new();
        write_books(&mut out, books, format).unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn test_write_books_tsv_sorted() {
        let catalog = sample_catalog();
        let books: Vec<&Book> = catalog.list_sorted().collect();

        assert_eq!(
            render(&books, OutputFormat::Tsv),
            "title\tauthor\tpublication_year\tgenre\n\
             Dune\tHerbert\t1965\tSciFi\n\
             Emma\tAusten\t1815\tRomance\n"
        );
    }

    #[test]
    fn test_write_books_text() {
        let catalog = sample_catalog();
        let books: Vec<&Book> = catalog.list_sorted().collect();
        let text = render(&books, OutputFormat::Text);

        assert!(text.starts_with("Title  Author   Year  Genre\n"));
        assert!(text.contains("Dune   Herbert  1965  SciFi\n"));
        assert!(text.ends_with("Total: 2 books\n"));
    }

    #[test]
    fn test_write_books_text_empty() {
        assert_eq!(render(&[], OutputFormat::Text), "No books in the library.\n");
    }

    #[test]
    fn test_write_books_json() {
        let catalog = sample_catalog();
        let books: Vec<&Book> = catalog.list_sorted().collect();
        let json = render(&books, OutputFormat::Json);

        let parsed: Vec<Book> = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed.len(), 2);
        assert_eq!(parsed[0].title, "Dune");
    }

    #[test]
    fn test_show_book_found() {
        let catalog = sample_catalog();
        let mut out = Vec::new();
        show_book(&mut out, &catalog, "Emma", OutputFormat::Text).unwrap();

        assert_eq!(
            String::from_utf8(out).unwrap(),
            "Title: Emma\nAuthor: Austen\nPublication Year: 1815\nGenre: Romance\n"
        );
    }

    #[test]
    fn test_show_book_not_found() {
        let catalog = sample_catalog();
        let mut out = Vec::new();
        let err = show_book(&mut out, &catalog, "Walden", OutputFormat::Text).unwrap_err();

        assert!(err.to_string().contains("not found"));
        assert!(out.is_empty());
    }
}
