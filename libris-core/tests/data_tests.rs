// Tests for CSV persistence

use libris_core::data::{
    book_record, borrower_record, load_books, load_borrowers, parse_book_line,
    parse_borrower_line,
};
use libris_core::{Book, Borrower, CatalogStore, Library, LibraryConfig};
use std::fs;
use tempfile::TempDir;

fn create_test_store() -> (TempDir, CatalogStore) {
    let temp_dir = TempDir::new().unwrap();
    let store = CatalogStore::new(LibraryConfig::new(temp_dir.path()));
    (temp_dir, store)
}

// ============================================================================
// Row Parsing Tests
// ============================================================================

#[test]
fn test_parse_book_line() {
    let book = parse_book_line("Dune,Frank Herbert,100,1,Science Fiction").unwrap();
    assert_eq!(book.title, "Dune");
    assert_eq!(book.author, "Frank Herbert");
    assert_eq!(book.isbn, "100");
    assert!(book.available);
    assert_eq!(book.category, "Science Fiction");
}

#[test]
fn test_parse_book_line_borrowed() {
    let book = parse_book_line("Emma,Jane Austen,101,0,Romance").unwrap();
    assert!(!book.available);
}

#[test]
fn test_parse_book_line_too_short() {
    assert!(parse_book_line("Emma,Jane Austen,101").is_none());
}

#[test]
fn test_parse_book_line_extra_fields_take_fifth_as_category() {
    let book = parse_book_line("A,B,C,1,D,E").unwrap();
    assert_eq!(book.category, "D");
}

#[test]
fn test_parse_borrower_line() {
    let borrower = parse_borrower_line("B1,Ada,100;101;").unwrap();
    assert_eq!(borrower.id, "B1");
    assert_eq!(borrower.name, "Ada");
    assert_eq!(borrower.borrowed_books, vec!["100", "101"]);
}

#[test]
fn test_parse_borrower_line_without_books() {
    let borrower = parse_borrower_line("B2,Grace,").unwrap();
    assert!(borrower.borrowed_books.is_empty());

    let borrower = parse_borrower_line("B3,Linus").unwrap();
    assert!(borrower.borrowed_books.is_empty());
}

#[test]
fn test_parse_borrower_line_too_short() {
    assert!(parse_borrower_line("B1").is_none());
}

#[test]
fn test_parse_book_line_quotes_are_literal() {
    // A quoted comma still splits the row
    let book = parse_book_line("\"A, B\",x,2,0,Fantasy,extra").unwrap();
    assert_eq!(book.title, "\"A");
    assert_eq!(book.author, " B\"");
    assert_eq!(book.isbn, "x");
    assert!(!book.available);
    assert_eq!(book.category, "0");

    let book = parse_book_line("Say \"Hi\",Ann,7,1,Poetry").unwrap();
    assert_eq!(book.title, "Say \"Hi\"");
    assert!(book.available);
}

#[test]
fn test_parse_book_line_keeps_surrounding_spaces() {
    let book = parse_book_line(" Dune , Frank Herbert,100,1,Science Fiction").unwrap();
    assert_eq!(book.title, " Dune ");
    assert_eq!(book.author, " Frank Herbert");
}

#[test]
fn test_csv_records() {
    let book = Book::new("Dune", "Frank Herbert", "100", "Science Fiction").with_availability(false);
    let record = book_record(&book);
    let fields: Vec<&str> = record.iter().collect();
    assert_eq!(fields, vec!["Dune", "Frank Herbert", "100", "0", "Science Fiction"]);

    let mut borrower = Borrower::new("B1", "Ada");
    borrower.borrow_book("100");
    let record = borrower_record(&borrower);
    let fields: Vec<&str> = record.iter().collect();
    assert_eq!(fields, vec!["B1", "Ada", "100;"]);
}

// ============================================================================
// File Tests
// ============================================================================

#[test]
fn test_load_missing_files_gives_empty_library() {
    let (_temp_dir, store) = create_test_store();

    assert!(!store.exists());
    let library = store.load().unwrap();
    assert!(library.books().is_empty());
    assert!(library.borrowers().is_empty());
}

#[test]
fn test_init_writes_headers() {
    let (_temp_dir, store) = create_test_store();
    store.init().unwrap();

    assert!(store.exists());
    let books = fs::read_to_string(store.config().books_path()).unwrap();
    let borrowers = fs::read_to_string(store.config().borrowers_path()).unwrap();
    assert_eq!(books, "Title,Author,ISBN,Available,Category\n");
    assert_eq!(borrowers, "ID,Name,BorrowedBooks\n");
}

#[test]
fn test_init_creates_nested_directory() {
    let temp_dir = TempDir::new().unwrap();
    let store = CatalogStore::new(LibraryConfig::new(temp_dir.path().join("a").join("b")));
    store.init().unwrap();

    assert!(store.config().books_path().exists());
}

#[test]
fn test_save_and_reload() {
    let (_temp_dir, store) = create_test_store();

    let mut library = Library::new();
    library
        .add_book(Book::new("Dune", "Frank Herbert", "100", "Science Fiction"))
        .unwrap();
    library
        .add_book(Book::new("Emma", "Jane Austen", "101", "Romance"))
        .unwrap();
    library.add_borrower(Borrower::new("B1", "Ada")).unwrap();
    library.borrow_book("101", "B1").unwrap();
    store.save(&library).unwrap();

    let reloaded = store.load().unwrap();
    assert_eq!(reloaded.books(), library.books());
    assert_eq!(reloaded.borrowers(), library.borrowers());
    assert!(!reloaded.find_book("101").unwrap().available);
}

#[test]
fn test_load_skips_header_blank_and_malformed_rows() {
    let (_temp_dir, store) = create_test_store();
    fs::write(
        store.config().books_path(),
        "Title,Author,ISBN,Available,Category\nDune,Frank Herbert,100,1,Science Fiction\n\nbroken,row\nEmma,Jane Austen,101,0,Romance\n",
    )
    .unwrap();

    let books = load_books(&store.config().books_path()).unwrap();
    assert_eq!(books.len(), 2);
    assert_eq!(books[1].title, "Emma");
}

#[test]
fn test_load_borrowers_file() {
    let (_temp_dir, store) = create_test_store();
    fs::write(
        store.config().borrowers_path(),
        "ID,Name,BorrowedBooks\nB1,Ada,100;\nB2,Grace,\n",
    )
    .unwrap();

    let borrowers = load_borrowers(&store.config().borrowers_path()).unwrap();
    assert_eq!(borrowers.len(), 2);
    assert_eq!(borrowers[0].borrowed_books, vec!["100"]);
}

#[test]
fn test_save_writes_rows_unquoted() {
    let (_temp_dir, store) = create_test_store();

    let mut library = Library::new();
    library
        .add_book(Book::new("Dune, Messiah", "Frank \"F\" Herbert", "100", "Science Fiction"))
        .unwrap();
    let mut borrower = Borrower::new("B1", "Ada");
    borrower.borrow_book("100");
    borrower.borrow_book("101");
    library.add_borrower(borrower).unwrap();
    library.add_borrower(Borrower::new("B2", "Grace")).unwrap();
    store.save(&library).unwrap();

    let books = fs::read_to_string(store.config().books_path()).unwrap();
    assert_eq!(
        books,
        "Title,Author,ISBN,Available,Category\nDune, Messiah,Frank \"F\" Herbert,100,1,Science Fiction\n"
    );
    let borrowers = fs::read_to_string(store.config().borrowers_path()).unwrap();
    assert_eq!(borrowers, "ID,Name,BorrowedBooks\nB1,Ada,100;101;\nB2,Grace,\n");
}

#[test]
fn test_reload_comma_in_title_shifts_fields() {
    let (_temp_dir, store) = create_test_store();

    let mut library = Library::new();
    library
        .add_book(Book::new("Dune, Messiah", "Frank Herbert", "100", "Science Fiction"))
        .unwrap();
    store.save(&library).unwrap();

    let reloaded = store.load().unwrap();
    let book = &reloaded.books()[0];
    assert_eq!(book.title, "Dune");
    assert_eq!(book.author, " Messiah");
    assert_eq!(book.isbn, "Frank Herbert");
    assert!(!book.available);
    assert_eq!(book.category, "1");
}

#[test]
fn test_config_paths() {
    let config = LibraryConfig::new("/tmp/libris");
    assert!(config.books_path().ends_with("books.csv"));
    assert!(config.borrowers_path().ends_with("borrowers.csv"));
    assert_eq!(LibraryConfig::default().data_dir.to_str(), Some("."));
}
