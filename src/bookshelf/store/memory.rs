use super::{sort_books, BookStore, SearchField};
use crate::error::{LibraryError, Result};
use crate::model::Book;
use std::cell::RefCell;
use std::collections::HashMap;

/// In-memory store for tests and throwaway sessions.
///
/// Uses `RefCell` for interior mutability so the `BookStore` methods can
/// take `&self`. Single-threaded only.
#[derive(Default)]
pub struct InMemoryStore {
    books: RefCell<HashMap<String, Book>>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.books.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.books.borrow().is_empty()
    }
}

impl BookStore for InMemoryStore {
    fn add(&self, book: &Book) -> Result<()> {
        let mut books = self.books.borrow_mut();
        let id = book.id().as_str();
        if books.contains_key(id) {
            return Err(LibraryError::DuplicateId(id.to_string()));
        }
        books.insert(id.to_string(), book.clone());
        Ok(())
    }

    fn get(&self, id: &str) -> Result<Option<Book>> {
        Ok(self.books.borrow().get(id).cloned())
    }

    fn update(&self, book: &Book) -> Result<()> {
        let mut books = self.books.borrow_mut();
        let id = book.id().as_str();
        match books.get_mut(id) {
            Some(entry) => {
                *entry = book.clone();
                Ok(())
            }
            None => Err(LibraryError::NotFound(id.to_string())),
        }
    }

    fn delete(&self, id: &str) -> Result<()> {
        match self.books.borrow_mut().remove(id) {
            Some(_) => Ok(()),
            None => Err(LibraryError::NotFound(id.to_string())),
        }
    }

    fn list_all(&self) -> Result<Vec<Book>> {
        let mut books: Vec<Book> = self.books.borrow().values().cloned().collect();
        sort_books(&mut books);
        Ok(books)
    }

    fn search(&self, query: &str, field: &str) -> Result<Vec<Book>> {
        let field: SearchField = field.parse()?;
        let books = self.list_all()?;
        Ok(books
            .into_iter()
            .filter(|book| field.matches(book, query))
            .collect())
    }
}

// --- Test Fixtures ---

#[cfg(any(test, feature = "test_utils"))]
pub mod fixtures {
    use super::*;

    pub struct StoreFixture {
        pub store: InMemoryStore,
    }

    impl Default for StoreFixture {
        fn default() -> Self {
            Self::new()
        }
    }

    impl StoreFixture {
        pub fn new() -> Self {
            Self {
                store: InMemoryStore::new(),
            }
        }

        pub fn with_book(self, id: &str, title: &str, author: &str, year: i32) -> Self {
            let book = Book::create(title, author, year, Some(id)).unwrap();
            self.store.add(&book).unwrap();
            self
        }

        pub fn with_borrowed_book(self, id: &str, title: &str, author: &str, year: i32) -> Self {
            let mut book = Book::create(title, author, year, Some(id)).unwrap();
            book.update_status("borrowed").unwrap();
            self.store.add(&book).unwrap();
            self
        }

        /// Gatsby (1925), 1984 (1949) and Pride and Prejudice (1813).
        pub fn with_classics(self) -> Self {
            self.with_book("gatsby", "The Great Gatsby", "F. Scott Fitzgerald", 1925)
                .with_book("1984", "1984", "George Orwell", 1949)
                .with_book("pride", "Pride and Prejudice", "Jane Austen", 1813)
        }
    }
}
