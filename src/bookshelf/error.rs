use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum LibraryError {
    #[error("{field}: {reason}")]
    InvalidValue { field: &'static str, reason: String },

    #[error("Book with ID {0} already exists")]
    DuplicateId(String),

    #[error("Book with ID {0} not found")]
    NotFound(String),

    #[error("Invalid search field: {0}")]
    InvalidField(String),

    #[error("Malformed book record: {0}")]
    Malformed(#[from] serde_json::Error),

    #[error("Storage error at {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Storage file {} is corrupt: {source}", .path.display())]
    Corrupt {
        path: PathBuf,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },
}

impl LibraryError {
    pub fn invalid(field: &'static str, reason: impl Into<String>) -> Self {
        LibraryError::InvalidValue {
            field,
            reason: reason.into(),
        }
    }

    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        LibraryError::Io {
            path: path.into(),
            source,
        }
    }

    pub fn corrupt(
        path: impl Into<PathBuf>,
        source: impl Into<Box<dyn std::error::Error + Send + Sync>>,
    ) -> Self {
        LibraryError::Corrupt {
            path: path.into(),
            source: source.into(),
        }
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            LibraryError::InvalidValue { .. } => ErrorKind::InvalidValue,
            LibraryError::DuplicateId(_) => ErrorKind::DuplicateId,
            LibraryError::NotFound(_) => ErrorKind::NotFound,
            LibraryError::InvalidField(_) => ErrorKind::InvalidField,
            LibraryError::Malformed(_) => ErrorKind::Malformed,
            LibraryError::Io { .. } | LibraryError::Corrupt { .. } => ErrorKind::StorageFailure,
        }
    }

    pub fn is_storage_failure(&self) -> bool {
        self.kind() == ErrorKind::StorageFailure
    }
}

/// Coarse classification of a [`LibraryError`], used by the shell to pick
/// an exit code.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    InvalidValue,
    DuplicateId,
    NotFound,
    InvalidField,
    Malformed,
    StorageFailure,
}

impl ErrorKind {
    pub fn exit_code(self) -> i32 {
        match self {
            ErrorKind::StorageFailure => 2,
            _ => 1,
        }
    }
}

pub type Result<T> = std::result::Result<T, LibraryError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invalid_value_names_field_and_bound() {
        let err = LibraryError::invalid("title", "must not exceed 200 characters");
        assert_eq!(err.to_string(), "title: must not exceed 200 characters");
        assert_eq!(err.kind(), ErrorKind::InvalidValue);
    }

    #[test]
    fn storage_failures_map_to_exit_code_two() {
        let err = LibraryError::io(
            "/tmp/books.json",
            std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied"),
        );
        assert!(err.is_storage_failure());
        assert_eq!(err.kind().exit_code(), 2);
    }

    #[test]
    fn domain_failures_map_to_exit_code_one() {
        for err in [
            LibraryError::DuplicateId("a".into()),
            LibraryError::NotFound("a".into()),
            LibraryError::InvalidField("publisher".into()),
        ] {
            assert!(!err.is_storage_failure());
            assert_eq!(err.kind().exit_code(), 1);
        }
    }
}
