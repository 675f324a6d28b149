use serde::{Deserialize, Serialize};

/// A single catalog entry. The ISBN is the unique key within a catalog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Book {
    pub title: String,
    pub author: String,
    pub isbn: String,
    pub available: bool,
    pub category: String,
}

impl Book {
    /// New books always start out on the shelf.
    pub fn new(
        title: impl Into<String>,
        author: impl Into<String>,
        isbn: impl Into<String>,
        category: impl Into<String>,
    ) -> Self {
        Self {
            title: title.into(),
            author: author.into(),
            isbn: isbn.into(),
            available: true,
            category: category.into(),
        }
    }

    pub fn with_availability(mut self, available: bool) -> Self {
        self.available = available;
        self
    }

    pub fn status(&self) -> &'static str {
        if self.available { "Available" } else { "Borrowed" }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Borrower {
    pub id: String,
    pub name: String,
    /// ISBNs currently on loan, oldest first
    pub borrowed_books: Vec<String>,
}

impl Borrower {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            borrowed_books: Vec::new(),
        }
    }

    pub fn borrow_book(&mut self, isbn: impl Into<String>) {
        self.borrowed_books.push(isbn.into());
    }

    /// Removes the first matching ISBN. Unknown ISBNs are ignored.
    pub fn return_book(&mut self, isbn: &str) {
        if let Some(pos) = self.borrowed_books.iter().position(|b| b == isbn) {
            self.borrowed_books.remove(pos);
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum TransactionKind {
    Borrow,
    Return,
}

impl TransactionKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            TransactionKind::Borrow => "Borrow",
            TransactionKind::Return => "Return",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transaction {
    pub kind: TransactionKind,
    pub isbn: String,
    pub borrower_id: String,
}

impl std::fmt::Display for Transaction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {} by {}", self.kind.as_str(), self.isbn, self.borrower_id)
    }
}
