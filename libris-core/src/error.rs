use thiserror::Error;

#[derive(Error, Debug)]
pub enum CatalogError {
    #[error("Category not found: {0}")]
    CategoryNotFound(String),

    #[error("Book not found: {0}")]
    BookNotFound(String),

    #[error("Book is not available: {0}")]
    BookUnavailable(String),

    #[error("Borrower not found: {0}")]
    BorrowerNotFound(String),

    #[error("A book with ISBN {0} already exists")]
    DuplicateIsbn(String),

    #[error("A borrower with ID {0} already exists")]
    DuplicateBorrower(String),

    #[error("Invalid format: {0}")]
    InvalidFormat(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, CatalogError>;
