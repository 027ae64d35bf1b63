//! CSV export of accumulated books.

use std::io::Write;
use std::path::{Path, PathBuf};

use serde::Serialize;
use shelf_catalog::Book;

use crate::error::FeedError;

/// File name used for downloads.
pub const EXPORT_FILE_NAME: &str = "books.csv";

/// One CSV row; nested reviews are kept as their JSON source text.
#[derive(Debug, Serialize)]
struct CsvRow<'a> {
    index: u64,
    isbn: &'a str,
    title: &'a str,
    author: &'a str,
    publisher: &'a str,
    language: &'a str,
    likes: u32,
    reviews: u32,
    cover: &'a str,
    #[serde(rename = "reviewsData")]
    reviews_data: String,
}

impl<'a> CsvRow<'a> {
    fn from_book(book: &'a Book) -> Result<Self, FeedError> {
        Ok(Self {
            index: book.index,
            isbn: &book.isbn,
            title: &book.title,
            author: &book.author,
            publisher: &book.publisher,
            language: &book.language,
            likes: book.likes,
            reviews: book.reviews,
            cover: &book.cover,
            reviews_data: serde_json::to_string(&book.reviews_data)?,
        })
    }
}

/// Write `books` as CSV with a header row, one row per book.
pub fn write_csv<W: Write>(books: &[Book], writer: W) -> Result<(), FeedError> {
    let mut csv_writer = csv::Writer::from_writer(writer);
    for book in books {
        csv_writer.serialize(CsvRow::from_book(book)?)?;
    }
    csv_writer.flush()?;
    Ok(())
}

/// Write `books` to [`EXPORT_FILE_NAME`] inside `dir` and return the file path.
pub fn export_csv(books: &[Book], dir: &Path) -> Result<PathBuf, FeedError> {
    let path = dir.join(EXPORT_FILE_NAME);
    let file = std::fs::File::create(&path)?;
    write_csv(books, std::io::BufWriter::new(file))?;

    tracing::info!(rows = books.len(), path = %path.display(), "exported books");
    Ok(path)
}
