use crate::commands::{settle, CmdResult};
use crate::error::Result;
use crate::store::BookStore;

pub fn run<S: BookStore>(store: &S) -> Result<CmdResult> {
    let outcome = store.list_all().map(|books| {
        if books.is_empty() {
            CmdResult::success("No books found in the library").with_books(&[])
        } else {
            CmdResult::success(format!("Found {} books", books.len())).with_books(&books)
        }
    });
    settle(outcome, "Failed to list books")
}
