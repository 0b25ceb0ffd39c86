use crate::commands::{settle, CmdResult};
use crate::error::Result;
use crate::store::BookStore;

pub fn run<S: BookStore>(store: &S, query: &str, field: &str) -> Result<CmdResult> {
    let outcome = store.search(query, field).map(|books| {
        if books.is_empty() {
            CmdResult::success("No books found matching the search criteria").with_books(&[])
        } else {
            CmdResult::success(format!("Found {} matching books", books.len())).with_books(&books)
        }
    });
    settle(outcome, "Search failed")
}
