use crate::commands::{not_found, settle, CmdResult};
use crate::error::Result;
use crate::store::BookStore;

pub fn run<S: BookStore>(store: &S, id: &str) -> Result<CmdResult> {
    let outcome = store.get(id).and_then(|found| match found {
        None => Ok(not_found(id)),
        Some(book) => {
            store.delete(id)?;
            Ok(
                CmdResult::success(format!("Book '{}' deleted successfully", book.title()))
                    .with_book(&book),
            )
        }
    });
    settle(outcome, "Failed to delete book")
}
