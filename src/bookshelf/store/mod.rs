//! # Storage Layer
//!
//! This module defines the storage abstraction for bookshelf. The [`BookStore`]
//! trait lets commands work against any backing store.
//!
//! ## Implementations
//!
//! - [`fs::JsonFileStore`]: Production store, one JSON file per library.
//!   Every operation loads the whole file, works on the decoded map, and (for
//!   mutations) rewrites the whole file. A mutex owned by the store spans the
//!   full load-modify-save cycle, so threads sharing one store instance see a
//!   linearizable sequence of snapshots.
//!
//! - [`memory::InMemoryStore`]: Same contract, backed by a live map. Used by
//!   tests and ephemeral sessions. Not `Sync`.
//!
//! ## Cross-process access
//!
//! Nothing coordinates two processes writing the same file: the last one to
//! save wins and any concurrent change is lost. There is no OS-level file
//! locking and no versioning.
//!
//! ## Storage Format
//!
//! ```text
//! {
//!   "<id>": {
//!     "id": "<id>",
//!     "title": "...",
//!     "author": "...",
//!     "year": 1925,
//!     "status": "available" | "borrowed",
//!     "created_at": "2024-01-01T12:00:00.123456+00:00",
//!     "updated_at": "2024-01-01T12:00:00.123456+00:00"
//!   }
//! }
//! ```
//!
//! An empty library is `{}`.

use crate::error::{LibraryError, Result};
use crate::model::Book;
use std::fmt;
use std::str::FromStr;

pub mod fs;
pub mod memory;

/// Abstract interface for book storage.
///
/// Every implementation must honor the same success and failure contract;
/// callers should not be able to tell them apart except for durability.
pub trait BookStore {
    /// Store a new book. Fails with `DuplicateId` if the id is taken.
    fn add(&self, book: &Book) -> Result<()>;

    /// Fetch a book by id. Absence is `Ok(None)`, never an error.
    fn get(&self, id: &str) -> Result<Option<Book>>;

    /// Overwrite an existing book. Fails with `NotFound` if the id is absent.
    fn update(&self, book: &Book) -> Result<()>;

    /// Remove a book. Fails with `NotFound` if the id is absent.
    fn delete(&self, id: &str) -> Result<()>;

    /// All books, oldest first.
    fn list_all(&self) -> Result<Vec<Book>>;

    /// Books whose `field` matches `query`. Fails with `InvalidField` for any
    /// field other than `title`, `author` or `year`.
    fn search(&self, query: &str, field: &str) -> Result<Vec<Book>>;
}

/// Fields a search can run against.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchField {
    Title,
    Author,
    Year,
}

impl SearchField {
    pub const ALL: [SearchField; 3] = [SearchField::Title, SearchField::Author, SearchField::Year];

    pub fn as_str(&self) -> &'static str {
        match self {
            SearchField::Title => "title",
            SearchField::Author => "author",
            SearchField::Year => "year",
        }
    }

    /// Case-insensitive substring match for text fields. For `year` the query
    /// must parse as an integer and match exactly; anything else never
    /// matches.
    pub fn matches(&self, book: &Book, query: &str) -> bool {
        match self {
            SearchField::Title => contains_ignore_case(book.title().as_str(), query),
            SearchField::Author => contains_ignore_case(book.author().as_str(), query),
            SearchField::Year => query
                .trim()
                .parse::<i32>()
                .map(|year| year == book.year().value())
                .unwrap_or(false),
        }
    }
}

impl FromStr for SearchField {
    type Err = LibraryError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "title" => Ok(SearchField::Title),
            "author" => Ok(SearchField::Author),
            "year" => Ok(SearchField::Year),
            other => Err(LibraryError::InvalidField(other.to_string())),
        }
    }
}

impl fmt::Display for SearchField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

fn contains_ignore_case(haystack: &str, needle: &str) -> bool {
    haystack.to_lowercase().contains(&needle.to_lowercase())
}

/// Orders books oldest first, ties broken by id.
pub(crate) fn sort_books(books: &mut [Book]) {
    books.sort_by(|a, b| {
        a.created_at()
            .cmp(&b.created_at())
            .then_with(|| a.id().as_str().cmp(b.id().as_str()))
    });
}
