use crate::error::{LibraryError, Result};
use crate::store::SearchField;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

const CONFIG_FILENAME: &str = "config.json";
const DEFAULT_SEARCH_FIELD: &str = "title";
pub const DEFAULT_LIBRARY_FILENAME: &str = "books.json";

/// Configuration for bookshelf, stored as `config.json` in the user's config
/// directory.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ShelfConfig {
    /// Library file to use when neither `--file` nor `BOOKSHELF_FILE` is given
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub storage_file: Option<PathBuf>,

    /// Field `search` uses when none is given on the command line
    #[serde(default = "default_search_field")]
    pub default_search_field: String,
}

fn default_search_field() -> String {
    DEFAULT_SEARCH_FIELD.to_string()
}

impl Default for ShelfConfig {
    fn default() -> Self {
        Self {
            storage_file: None,
            default_search_field: default_search_field(),
        }
    }
}

impl ShelfConfig {
    /// Load config from the given directory, or return defaults if not found
    pub fn load<P: AsRef<Path>>(config_dir: P) -> Result<Self> {
        let config_path = config_dir.as_ref().join(CONFIG_FILENAME);

        if !config_path.exists() {
            return Ok(Self::default());
        }

        let content =
            fs::read_to_string(&config_path).map_err(|e| LibraryError::io(&config_path, e))?;
        let config: ShelfConfig =
            serde_json::from_str(&content).map_err(|e| LibraryError::corrupt(&config_path, e))?;
        Ok(config)
    }

    /// Save config to the given directory
    pub fn save<P: AsRef<Path>>(&self, config_dir: P) -> Result<()> {
        let config_dir = config_dir.as_ref();

        if !config_dir.exists() {
            fs::create_dir_all(config_dir).map_err(|e| LibraryError::io(config_dir, e))?;
        }

        let config_path = config_dir.join(CONFIG_FILENAME);
        let content = serde_json::to_string_pretty(self)
            .map_err(|e| LibraryError::corrupt(&config_path, e))?;
        fs::write(&config_path, content).map_err(|e| LibraryError::io(&config_path, e))?;
        Ok(())
    }

    /// Set the default search field, rejecting anything `search` would reject
    pub fn set_default_search_field(&mut self, field: &str) -> Result<()> {
        let field: SearchField = field.parse()?;
        self.default_search_field = field.as_str().to_string();
        Ok(())
    }

    pub fn set_storage_file(&mut self, path: impl Into<PathBuf>) {
        self.storage_file = Some(path.into());
    }

    /// Picks the library file: explicit override first, then the configured
    /// file, then `books.json` in `data_dir`.
    pub fn resolve_storage_file(&self, explicit: Option<PathBuf>, data_dir: &Path) -> PathBuf {
        explicit
            .or_else(|| self.storage_file.clone())
            .unwrap_or_else(|| data_dir.join(DEFAULT_LIBRARY_FILENAME))
    }
}
