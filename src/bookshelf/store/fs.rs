use super::{sort_books, BookStore, SearchField};
use crate::error::{LibraryError, Result};
use crate::model::{Book, BookRecord};
use parking_lot::Mutex;
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use uuid::Uuid;

type Snapshot = BTreeMap<String, BookRecord>;

/// JSON file store. See the [module docs](super) for the consistency model.
pub struct JsonFileStore {
    path: PathBuf,
    lock: Mutex<()>,
}

impl JsonFileStore {
    /// Opens the library at `path`.
    ///
    /// A missing file is created (along with its parent directories) holding
    /// an empty library. An existing file is parsed immediately so a corrupt
    /// library is reported here rather than on first use.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self> {
        let store = Self {
            path: path.into(),
            lock: Mutex::new(()),
        };

        {
            let _guard = store.lock.lock();
            if store.path.exists() {
                store.load()?;
            } else {
                if let Some(parent) = store.path.parent() {
                    if !parent.as_os_str().is_empty() && !parent.exists() {
                        fs::create_dir_all(parent).map_err(|e| LibraryError::io(parent, e))?;
                    }
                }
                store.save(&Snapshot::new())?;
                tracing::info!("Created empty library at {}", store.path.display());
            }
        }

        Ok(store)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn load(&self) -> Result<Snapshot> {
        let content =
            fs::read_to_string(&self.path).map_err(|e| LibraryError::io(&self.path, e))?;
        let snapshot: Snapshot =
            serde_json::from_str(&content).map_err(|e| LibraryError::corrupt(&self.path, e))?;
        tracing::debug!(
            "Loaded {} books from {}",
            snapshot.len(),
            self.path.display()
        );
        Ok(snapshot)
    }

    fn save(&self, snapshot: &Snapshot) -> Result<()> {
        let content =
            serde_json::to_string_pretty(snapshot).map_err(|e| LibraryError::corrupt(&self.path, e))?;

        // Write beside the target and rename over it, so readers never see a
        // half-written file.
        let file_name = self
            .path
            .file_name()
            .and_then(|name| name.to_str())
            .unwrap_or("books.json");
        let tmp_path = self
            .path
            .with_file_name(format!(".{}-{}.tmp", file_name, Uuid::new_v4()));

        fs::write(&tmp_path, content).map_err(|e| LibraryError::io(&tmp_path, e))?;
        if let Err(e) = fs::rename(&tmp_path, &self.path) {
            let _ = fs::remove_file(&tmp_path);
            return Err(LibraryError::io(&self.path, e));
        }

        tracing::debug!("Saved {} books to {}", snapshot.len(), self.path.display());
        Ok(())
    }

    /// Runs `f` against a freshly loaded snapshot while holding the lock.
    fn read<T>(&self, f: impl FnOnce(&Snapshot) -> Result<T>) -> Result<T> {
        let _guard = self.lock.lock();
        let snapshot = self.load()?;
        f(&snapshot)
    }

    /// Load, mutate, save; all under one lock acquisition. Nothing is written
    /// if `f` fails.
    fn modify<T>(&self, f: impl FnOnce(&mut Snapshot) -> Result<T>) -> Result<T> {
        let _guard = self.lock.lock();
        let mut snapshot = self.load()?;
        let out = f(&mut snapshot)?;
        self.save(&snapshot)?;
        Ok(out)
    }

    fn decode(&self, key: &str, record: &BookRecord) -> Result<Book> {
        if record.id != key {
            return Err(LibraryError::corrupt(
                &self.path,
                format!("entry '{}' holds a book with id '{}'", key, record.id),
            ));
        }
        Book::from_record(record.clone())
    }

    fn decode_all(&self, snapshot: &Snapshot) -> Result<Vec<Book>> {
        let mut books = snapshot
            .iter()
            .map(|(key, record)| self.decode(key, record))
            .collect::<Result<Vec<_>>>()?;
        sort_books(&mut books);
        Ok(books)
    }
}

impl BookStore for JsonFileStore {
    fn add(&self, book: &Book) -> Result<()> {
        let id = book.id().as_str();
        self.modify(|snapshot| {
            if snapshot.contains_key(id) {
                return Err(LibraryError::DuplicateId(id.to_string()));
            }
            snapshot.insert(id.to_string(), book.to_record());
            Ok(())
        })
    }

    fn get(&self, id: &str) -> Result<Option<Book>> {
        self.read(|snapshot| {
            snapshot
                .get(id)
                .map(|record| self.decode(id, record))
                .transpose()
        })
    }

    fn update(&self, book: &Book) -> Result<()> {
        let id = book.id().as_str();
        self.modify(|snapshot| match snapshot.get_mut(id) {
            Some(entry) => {
                *entry = book.to_record();
                Ok(())
            }
            None => Err(LibraryError::NotFound(id.to_string())),
        })
    }

    fn delete(&self, id: &str) -> Result<()> {
        self.modify(|snapshot| match snapshot.remove(id) {
            Some(_) => Ok(()),
            None => Err(LibraryError::NotFound(id.to_string())),
        })
    }

    fn list_all(&self) -> Result<Vec<Book>> {
        self.read(|snapshot| self.decode_all(snapshot))
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

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;
    use tempfile::TempDir;

    fn setup() -> (TempDir, JsonFileStore) {
        let dir = TempDir::new().unwrap();
        let store = JsonFileStore::open(dir.path().join("books.json")).unwrap();
        (dir, store)
    }

    #[test]
    fn open_creates_missing_file_and_parents() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nested").join("deeper").join("books.json");

        JsonFileStore::open(&path).unwrap();

        assert_eq!(fs::read_to_string(&path).unwrap(), "{}");
    }

    #[test]
    fn open_rejects_invalid_json() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("books.json");
        fs::write(&path, "{ not json").unwrap();

        let err = JsonFileStore::open(&path).err().unwrap();
        assert_eq!(err.kind(), ErrorKind::StorageFailure);
        assert!(matches!(err, LibraryError::Corrupt { .. }));
    }

    #[test]
    fn open_keeps_existing_books() {
        let (dir, store) = setup();
        let book = Book::create("1984", "George Orwell", 1949, Some("orwell")).unwrap();
        store.add(&book).unwrap();
        drop(store);

        let reopened = JsonFileStore::open(dir.path().join("books.json")).unwrap();
        assert_eq!(reopened.get("orwell").unwrap(), Some(book));
    }

    #[test]
    fn file_is_an_object_keyed_by_id() {
        let (dir, store) = setup();
        let book = Book::create("1984", "George Orwell", 1949, Some("orwell")).unwrap();
        store.add(&book).unwrap();

        let raw = fs::read_to_string(dir.path().join("books.json")).unwrap();
        let value: serde_json::Value = serde_json::from_str(&raw).unwrap();
        assert_eq!(value["orwell"]["title"], "1984");
        assert_eq!(value["orwell"]["year"], 1949);
        assert_eq!(value["orwell"]["status"], "available");
    }

    #[test]
    fn saves_leave_no_temporary_files() {
        let (dir, store) = setup();
        for i in 0..3 {
            let book = Book::create("Title", "Author", 2000, Some(&format!("b{}", i))).unwrap();
            store.add(&book).unwrap();
        }
        store.delete("b1").unwrap();

        for entry in fs::read_dir(dir.path()).unwrap() {
            let name = entry.unwrap().file_name().into_string().unwrap();
            assert!(!name.ends_with(".tmp"), "Found leftover tmp file: {}", name);
        }
    }

    #[test]
    fn failed_mutation_does_not_rewrite_file() {
        let (dir, store) = setup();
        let path = dir.path().join("books.json");
        let before = fs::read_to_string(&path).unwrap();

        let err = store.delete("missing").unwrap_err();
        assert!(matches!(err, LibraryError::NotFound(_)));
        assert_eq!(fs::read_to_string(&path).unwrap(), before);
    }

    #[test]
    fn mismatched_key_is_reported_as_corrupt() {
        let (dir, store) = setup();
        let book = Book::create("1984", "George Orwell", 1949, Some("orwell")).unwrap();
        let mut snapshot = Snapshot::new();
        snapshot.insert("huxley".to_string(), book.to_record());
        fs::write(
            dir.path().join("books.json"),
            serde_json::to_string(&snapshot).unwrap(),
        )
        .unwrap();

        let err = store.list_all().unwrap_err();
        assert!(err.is_storage_failure());
    }

    #[test]
    fn invalid_values_on_disk_surface_as_invalid_value() {
        let (dir, store) = setup();
        let mut record = Book::create("1984", "George Orwell", 1949, Some("orwell"))
            .unwrap()
            .to_record();
        record.year = 10;
        let mut snapshot = Snapshot::new();
        snapshot.insert("orwell".to_string(), record);
        fs::write(
            dir.path().join("books.json"),
            serde_json::to_string(&snapshot).unwrap(),
        )
        .unwrap();

        let err = store.get("orwell").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidValue);
    }

    #[test]
    fn missing_file_after_open_is_an_io_failure() {
        let (dir, store) = setup();
        fs::remove_file(dir.path().join("books.json")).unwrap();

        let err = store.list_all().unwrap_err();
        assert!(matches!(err, LibraryError::Io { .. }));
    }
}
