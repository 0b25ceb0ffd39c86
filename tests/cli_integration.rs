use assert_cmd::Command;
use predicates::prelude::*;
use std::path::Path;
use tempfile::TempDir;

fn bookshelf(home: &Path) -> Command {
    let mut cmd = Command::cargo_bin("bookshelf").unwrap();
    cmd.env("BOOKSHELF_HOME", home)
        .env("NO_COLOR", "1")
        .env_remove("BOOKSHELF_FILE")
        .env_remove("BOOKSHELF_LOG");
    cmd
}

#[test]
fn add_list_and_search() {
    let temp_dir = TempDir::new().unwrap();

    bookshelf(temp_dir.path())
        .args(["add", "The Great Gatsby", "F. Scott Fitzgerald", "1925", "--id", "gatsby"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Book 'The Great Gatsby' added successfully"));

    bookshelf(temp_dir.path())
        .args(["add", "1984", "George Orwell", "1949", "--id", "orwell"])
        .assert()
        .success();

    assert!(temp_dir.path().join("books.json").exists());

    bookshelf(temp_dir.path())
        .arg("list")
        .assert()
        .success()
        .stdout(predicate::str::contains("Found 2 books"))
        .stdout(predicate::str::contains("gatsby"))
        .stdout(predicate::str::contains("George Orwell"));

    bookshelf(temp_dir.path())
        .args(["search", "ORWELL", "--field", "author"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Found 1 matching books"))
        .stdout(predicate::str::contains("1984"));

    bookshelf(temp_dir.path())
        .args(["search", "abc", "--field", "year"])
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "No books found matching the search criteria",
        ));
}

#[test]
fn status_change_shows_book_fields() {
    let temp_dir = TempDir::new().unwrap();

    bookshelf(temp_dir.path())
        .args(["add", "Dune", "Frank Herbert", "1965", "--id", "dune"])
        .assert()
        .success();

    bookshelf(temp_dir.path())
        .args(["status", "dune", "borrowed"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Book status updated to borrowed"))
        .stdout(predicate::str::contains("Updated At"));
}

#[test]
fn domain_failures_exit_with_one() {
    let temp_dir = TempDir::new().unwrap();

    bookshelf(temp_dir.path())
        .args(["add", "Dune", "Frank Herbert", "1965", "--id", "dune"])
        .assert()
        .success();

    bookshelf(temp_dir.path())
        .args(["add", "Dune", "Frank Herbert", "1965", "--id", "dune"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Book with ID dune already exists"));

    bookshelf(temp_dir.path())
        .args(["delete", "ghost"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Book with ID ghost not found"));

    bookshelf(temp_dir.path())
        .args(["add", "Dune", "Frank Herbert", "999"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("year: must be between 1000"));

    bookshelf(temp_dir.path())
        .args(["search", "x", "--field", "publisher"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Invalid search field: publisher"));
}

#[test]
fn corrupt_library_exits_with_two() {
    let temp_dir = TempDir::new().unwrap();
    let file = temp_dir.path().join("broken.json");
    std::fs::write(&file, "{ definitely not json").unwrap();

    bookshelf(temp_dir.path())
        .arg("--file")
        .arg(&file)
        .arg("list")
        .assert()
        .code(2)
        .stderr(predicate::str::contains("corrupt"));
}

#[test]
fn file_flag_overrides_default_location() {
    let temp_dir = TempDir::new().unwrap();
    let file = temp_dir.path().join("elsewhere").join("shelf.json");

    bookshelf(temp_dir.path())
        .arg("--file")
        .arg(&file)
        .args(["add", "Emma", "Jane Austen", "1815"])
        .assert()
        .success();

    assert!(file.exists());
    assert!(!temp_dir.path().join("books.json").exists());
}

#[test]
fn delete_removes_book() {
    let temp_dir = TempDir::new().unwrap();

    bookshelf(temp_dir.path())
        .args(["add", "Emma", "Jane Austen", "1815", "--id", "emma"])
        .assert()
        .success();

    bookshelf(temp_dir.path())
        .args(["delete", "emma"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Book 'Emma' deleted successfully"));

    bookshelf(temp_dir.path())
        .arg("list")
        .assert()
        .success()
        .stdout(predicate::str::contains("No books found in the library"));
}

#[test]
fn config_sets_default_search_field() {
    let temp_dir = TempDir::new().unwrap();

    bookshelf(temp_dir.path())
        .args(["config", "search-field", "author"])
        .assert()
        .success();

    bookshelf(temp_dir.path())
        .args(["config", "search-field"])
        .assert()
        .success()
        .stdout(predicate::str::contains("search-field = author"));

    bookshelf(temp_dir.path())
        .args(["add", "Emma", "Jane Austen", "1815"])
        .assert()
        .success();

    bookshelf(temp_dir.path())
        .args(["search", "austen"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Found 1 matching books"));

    bookshelf(temp_dir.path())
        .args(["config", "search-field", "isbn"])
        .assert()
        .code(1);
}
