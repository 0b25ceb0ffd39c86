use crate::commands::{settle, CmdResult};
use crate::error::Result;
use crate::model::Book;
use crate::store::BookStore;

pub fn run<S: BookStore>(
    store: &S,
    title: &str,
    author: &str,
    year: i32,
    id: Option<&str>,
) -> Result<CmdResult> {
    let outcome = Book::create(title, author, year, id).and_then(|book| {
        store.add(&book)?;
        Ok(
            CmdResult::success(format!("Book '{}' added successfully", book.title()))
                .with_book(&book),
        )
    });
    settle(outcome, "Failed to add book")
}
