use crate::catalog::Library;
use crate::error::Result;
use crate::model::{Book, Borrower};
use csv::{QuoteStyle, ReaderBuilder, StringRecord, WriterBuilder};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

pub const BOOKS_FILE: &str = "books.csv";
pub const BORROWERS_FILE: &str = "borrowers.csv";

const BOOKS_HEADER: [&str; 5] = ["Title", "Author", "ISBN", "Available", "Category"];
const BORROWERS_HEADER: [&str; 3] = ["ID", "Name", "BorrowedBooks"];

/// Where the catalog lives on disk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LibraryConfig {
    pub data_dir: PathBuf,
}

impl LibraryConfig {
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
        }
    }

    pub fn books_path(&self) -> PathBuf {
        self.data_dir.join(BOOKS_FILE)
    }

    pub fn borrowers_path(&self) -> PathBuf {
        self.data_dir.join(BORROWERS_FILE)
    }
}

impl Default for LibraryConfig {
    fn default() -> Self {
        Self::new(".")
    }
}

/// CSV-backed persistence for books and borrowers.
pub struct CatalogStore {
    config: LibraryConfig,
}

impl CatalogStore {
    pub fn new(config: LibraryConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &LibraryConfig {
        &self.config
    }

    pub fn exists(&self) -> bool {
        self.config.books_path().exists() || self.config.borrowers_path().exists()
    }

    /// Creates the data directory and header-only CSV files.
    pub fn init(&self) -> Result<()> {
        fs::create_dir_all(&self.config.data_dir)?;
        self.save(&Library::new())
    }

    pub fn load(&self) -> Result<Library> {
        let books = load_books(&self.config.books_path())?;
        let borrowers = load_borrowers(&self.config.borrowers_path())?;
        Ok(Library::from_parts(books, borrowers))
    }

    pub fn save(&self, library: &Library) -> Result<()> {
        save_books(&self.config.books_path(), library.books())?;
        save_borrowers(&self.config.borrowers_path(), library.borrowers())?;
        Ok(())
    }
}

/// Fields split on every comma with quotes taken literally, so a quoted
/// title containing a comma still shifts the remaining fields.
fn reader_builder() -> ReaderBuilder {
    let mut builder = ReaderBuilder::new();
    builder.has_headers(false).flexible(true).quoting(false);
    builder
}

/// Rows are written as-is; a comma inside a value is not quoted.
fn writer_builder() -> WriterBuilder {
    let mut builder = WriterBuilder::new();
    builder.flexible(true).quote_style(QuoteStyle::Never);
    builder
}

/// Reads `books.csv`. A missing file yields an empty list.
pub fn load_books(path: &Path) -> Result<Vec<Book>> {
    let records = read_records(path)?;
    let books: Vec<Book> = records.iter().filter_map(book_from_record).collect();

    info!("Loaded {} books from {}", books.len(), path.display());
    Ok(books)
}

/// `title,author,isbn,available,category`; the category is always the
/// fifth field and extra fields are ignored.
pub fn book_from_record(record: &StringRecord) -> Option<Book> {
    if record.len() < 5 {
        warn!("Skipping malformed book row {:?}", record);
        return None;
    }
    Some(
        Book::new(&record[0], &record[1], &record[2], &record[4])
            .with_availability(&record[3] == "1"),
    )
}

pub fn parse_book_line(line: &str) -> Option<Book> {
    book_from_record(&parse_line(line)?)
}

/// Reads `borrowers.csv`. A missing file yields an empty list.
pub fn load_borrowers(path: &Path) -> Result<Vec<Borrower>> {
    let records = read_records(path)?;
    let borrowers: Vec<Borrower> = records.iter().filter_map(borrower_from_record).collect();

    info!("Loaded {} borrowers from {}", borrowers.len(), path.display());
    Ok(borrowers)
}

/// `id,name,isbn;isbn;`
pub fn borrower_from_record(record: &StringRecord) -> Option<Borrower> {
    if record.len() < 2 {
        warn!("Skipping malformed borrower row {:?}", record);
        return None;
    }

    let mut borrower = Borrower::new(&record[0], &record[1]);
    if let Some(isbns) = record.get(2) {
        isbns
            .split(';')
            .filter(|isbn| !isbn.is_empty())
            .for_each(|isbn| borrower.borrow_book(isbn));
    }
    Some(borrower)
}

pub fn parse_borrower_line(line: &str) -> Option<Borrower> {
    borrower_from_record(&parse_line(line)?)
}

pub fn book_record(book: &Book) -> StringRecord {
    StringRecord::from(vec![
        book.title.as_str(),
        book.author.as_str(),
        book.isbn.as_str(),
        if book.available { "1" } else { "0" },
        book.category.as_str(),
    ])
}

pub fn borrower_record(borrower: &Borrower) -> StringRecord {
    let books: String = borrower
        .borrowed_books
        .iter()
        .map(|isbn| format!("{};", isbn))
        .collect();
    StringRecord::from(vec![borrower.id.as_str(), borrower.name.as_str(), books.as_str()])
}

pub fn save_books(path: &Path, books: &[Book]) -> Result<()> {
    write_records(path, &BOOKS_HEADER, books.iter().map(book_record))?;
    info!("Saved {} books to {}", books.len(), path.display());
    Ok(())
}

pub fn save_borrowers(path: &Path, borrowers: &[Borrower]) -> Result<()> {
    write_records(path, &BORROWERS_HEADER, borrowers.iter().map(borrower_record))?;
    info!("Saved {} borrowers to {}", borrowers.len(), path.display());
    Ok(())
}

fn parse_line(line: &str) -> Option<StringRecord> {
    match reader_builder()
        .from_reader(line.as_bytes())
        .records()
        .next()?
    {
        Ok(record) => Some(record),
        Err(e) => {
            warn!("Skipping unreadable row '{}': {}", line, e);
            None
        }
    }
}

/// Every row after the header line. Empty lines produce no record.
fn read_records(path: &Path) -> Result<Vec<StringRecord>> {
    if !path.exists() {
        warn!("Could not open {}, starting with an empty list", path.display());
        return Ok(Vec::new());
    }

    let mut reader = reader_builder().from_path(path)?;
    let mut records = Vec::new();
    for (row, record) in reader.records().enumerate() {
        let record = record?;
        if row == 0 {
            continue;
        }
        records.push(record);
    }
    Ok(records)
}

fn write_records(
    path: &Path,
    header: &[&str],
    rows: impl Iterator<Item = StringRecord>,
) -> Result<()> {
    let mut writer = writer_builder().from_path(path)?;
    writer.write_record(header)?;
    for row in rows {
        writer.write_record(&row)?;
    }
    writer.flush()?;
    Ok(())
}
