//! # Command Layer
//!
//! One module per user-facing command. Each exposes
//! `run<S: BookStore>(store, ...) -> Result<CmdResult>` and never touches
//! stdout, stderr or process exit codes.
//!
//! Domain failures (invalid values, duplicates, missing books, unknown search
//! fields) come back as `Ok(CmdResult { success: false, .. })`. Storage
//! failures are returned as `Err` so the shell can report them separately.

use crate::error::{LibraryError, Result};
use crate::model::{Book, BookRecord};

pub mod add;
pub mod delete;
pub mod list;
pub mod search;
pub mod status;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CmdData {
    Book(BookRecord),
    Books(Vec<BookRecord>),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CmdResult {
    pub success: bool,
    pub message: String,
    pub data: Option<CmdData>,
}

impl CmdResult {
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            success: true,
            message: message.into(),
            data: None,
        }
    }

    pub fn failure(message: impl Into<String>) -> Self {
        Self {
            success: false,
            message: message.into(),
            data: None,
        }
    }

    pub fn with_book(mut self, book: &Book) -> Self {
        self.data = Some(CmdData::Book(book.to_record()));
        self
    }

    pub fn with_books(mut self, books: &[Book]) -> Self {
        self.data = Some(CmdData::Books(books.iter().map(Book::to_record).collect()));
        self
    }
}

/// Folds domain errors into a failed result prefixed with `context`; storage
/// failures pass through untouched.
pub(crate) fn settle(outcome: Result<CmdResult>, context: &str) -> Result<CmdResult> {
    match outcome {
        Err(e) if !e.is_storage_failure() => {
            tracing::debug!("{}: {}", context, e);
            Ok(CmdResult::failure(format!("{}: {}", context, e)))
        }
        other => other,
    }
}

pub(crate) fn not_found(id: &str) -> CmdResult {
    CmdResult::failure(LibraryError::NotFound(id.to_string()).to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn settle_folds_domain_errors() {
        let result = settle(
            Err(LibraryError::DuplicateId("x".into())),
            "Failed to add book",
        )
        .unwrap();
        assert!(!result.success);
        assert_eq!(
            result.message,
            "Failed to add book: Book with ID x already exists"
        );
        assert!(result.data.is_none());
    }

    #[test]
    fn settle_passes_storage_failures_through() {
        let err = LibraryError::io(
            "/nowhere/books.json",
            std::io::Error::new(std::io::ErrorKind::Other, "disk on fire"),
        );
        let outcome = settle(Err(err), "Failed to add book");
        assert!(outcome.unwrap_err().is_storage_failure());
    }

    #[test]
    fn with_books_carries_records() {
        let book = Book::create("Dune", "Frank Herbert", 1965, Some("dune")).unwrap();
        let result = CmdResult::success("ok").with_books(std::slice::from_ref(&book));
        assert_eq!(result.data, Some(CmdData::Books(vec![book.to_record()])));
    }
}
