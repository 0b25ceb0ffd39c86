use crate::commands::{not_found, settle, CmdResult};
use crate::error::Result;
use crate::store::BookStore;

pub fn run<S: BookStore>(store: &S, id: &str, new_status: &str) -> Result<CmdResult> {
    let outcome = store.get(id).and_then(|found| match found {
        None => Ok(not_found(id)),
        Some(mut book) => {
            book.update_status(new_status)?;
            store.update(&book)?;
            Ok(
                CmdResult::success(format!("Book status updated to {}", book.status()))
                    .with_book(&book),
            )
        }
    });
    settle(outcome, "Failed to update status")
}
