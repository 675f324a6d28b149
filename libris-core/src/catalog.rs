// In-memory catalog and lending operations

use crate::error::{CatalogError, Result};
use crate::model::{Book, Borrower, Transaction, TransactionKind};
use tracing::{debug, info};

/// Owns the books, the borrowers and the lending history of one session.
#[derive(Debug, Default, Clone)]
pub struct Library {
    books: Vec<Book>,
    borrowers: Vec<Borrower>,
    transactions: Vec<Transaction>,
}

impl Library {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_parts(books: Vec<Book>, borrowers: Vec<Borrower>) -> Self {
        Self {
            books,
            borrowers,
            transactions: Vec::new(),
        }
    }

    pub fn books(&self) -> &[Book] {
        &self.books
    }

    pub fn borrowers(&self) -> &[Borrower] {
        &self.borrowers
    }

    pub fn find_book(&self, isbn: &str) -> Option<&Book> {
        self.books.iter().find(|b| b.isbn == isbn)
    }

    pub fn find_borrower(&self, id: &str) -> Option<&Borrower> {
        self.borrowers.iter().find(|b| b.id == id)
    }

    pub fn add_book(&mut self, book: Book) -> Result<()> {
        if self.find_book(&book.isbn).is_some() {
            return Err(CatalogError::DuplicateIsbn(book.isbn));
        }
        debug!("Adding book {} ({})", book.title, book.isbn);
        self.books.push(book);
        Ok(())
    }

    pub fn remove_book(&mut self, isbn: &str) -> Result<()> {
        let before = self.books.len();
        self.books.retain(|b| b.isbn != isbn);
        if self.books.len() == before {
            return Err(CatalogError::BookNotFound(isbn.to_string()));
        }
        debug!("Removed book {}", isbn);
        Ok(())
    }

    pub fn add_borrower(&mut self, borrower: Borrower) -> Result<()> {
        if self.find_borrower(&borrower.id).is_some() {
            return Err(CatalogError::DuplicateBorrower(borrower.id));
        }
        debug!("Adding borrower {} ({})", borrower.name, borrower.id);
        self.borrowers.push(borrower);
        Ok(())
    }

    pub fn borrow_book(&mut self, isbn: &str, borrower_id: &str) -> Result<()> {
        let book = self
            .books
            .iter_mut()
            .find(|b| b.isbn == isbn)
            .ok_or_else(|| CatalogError::BookNotFound(isbn.to_string()))?;
        if !book.available {
            return Err(CatalogError::BookUnavailable(isbn.to_string()));
        }
        let borrower = self
            .borrowers
            .iter_mut()
            .find(|b| b.id == borrower_id)
            .ok_or_else(|| CatalogError::BorrowerNotFound(borrower_id.to_string()))?;

        book.available = false;
        borrower.borrow_book(isbn);
        self.record(TransactionKind::Borrow, isbn, borrower_id);
        Ok(())
    }

    /// Does not check that the borrower actually holds the book; the ISBN is
    /// dropped from their list if present.
    pub fn return_book(&mut self, isbn: &str, borrower_id: &str) -> Result<()> {
        let book = self
            .books
            .iter_mut()
            .find(|b| b.isbn == isbn)
            .ok_or_else(|| CatalogError::BookNotFound(isbn.to_string()))?;
        let borrower = self
            .borrowers
            .iter_mut()
            .find(|b| b.id == borrower_id)
            .ok_or_else(|| CatalogError::BorrowerNotFound(borrower_id.to_string()))?;

        book.available = true;
        borrower.return_book(isbn);
        self.record(TransactionKind::Return, isbn, borrower_id);
        Ok(())
    }

    pub fn sort_books_by_title(&mut self) {
        self.books.sort_by(|a, b| a.title.cmp(&b.title));
    }

    pub fn sort_books_by_author(&mut self) {
        self.books.sort_by(|a, b| a.author.cmp(&b.author));
    }

    pub fn books_in_category(&self, category: &str) -> Vec<&Book> {
        self.books.iter().filter(|b| b.category == category).collect()
    }

    /// Most recent first.
    pub fn recent_transactions(&self) -> impl Iterator<Item = &Transaction> {
        self.transactions.iter().rev()
    }

    fn record(&mut self, kind: TransactionKind, isbn: &str, borrower_id: &str) {
        let transaction = Transaction {
            kind,
            isbn: isbn.to_string(),
            borrower_id: borrower_id.to_string(),
        };
        info!("{}", transaction);
        self.transactions.push(transaction);
    }
}
