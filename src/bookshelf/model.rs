//! # Domain Model
//!
//! A [`Book`] is built from four value objects ([`BookId`], [`BookTitle`],
//! [`Author`], [`PublicationYear`]) plus a [`BookStatus`] and two timestamps.
//!
//! Value objects are plain wrappers: constructing one never fails, and each
//! exposes `validate()` for its own bounds. `Book` is the only place that
//! builds them, and every path that produces a `Book` (`create`,
//! `from_record`, `from_value`) validates before returning it. There is no
//! way to obtain an unvalidated `Book`.
//!
//! Fields are checked in a fixed order (id, title, author, year, status,
//! timestamps) so the first reported error is deterministic.
//!
//! ## Representation
//!
//! [`BookRecord`] is the flat, primitive-typed form used on disk and in
//! command payloads. Timestamps are RFC 3339 strings with an explicit
//! `+00:00` offset and as many fractional digits as needed to round-trip.

use crate::error::{LibraryError, Result};
use chrono::{DateTime, Datelike, Duration, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

pub const MAX_BOOK_ID_LENGTH: usize = 50;
pub const MAX_BOOK_TITLE_LENGTH: usize = 200;
pub const MAX_AUTHOR_LENGTH: usize = 100;
pub const MIN_PUBLICATION_YEAR: i32 = 1000;

fn validate_text(field: &'static str, value: &str, max_chars: usize) -> Result<()> {
    if value.is_empty() {
        return Err(LibraryError::invalid(field, "must be a non-empty string"));
    }
    if value.chars().count() > max_chars {
        return Err(LibraryError::invalid(
            field,
            format!("must not exceed {} characters", max_chars),
        ));
    }
    Ok(())
}

macro_rules! text_value {
    ($(#[$meta:meta])* $name:ident, $field:literal, $max:expr) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash)]
        pub struct $name(String);

        impl $name {
            pub fn new(value: impl Into<String>) -> Self {
                Self(value.into())
            }

            pub fn as_str(&self) -> &str {
                &self.0
            }

            pub fn validate(&self) -> Result<()> {
                validate_text($field, &self.0, $max)
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }
    };
}

text_value!(
    /// Identifier of a book within a store. At most 50 characters.
    BookId,
    "id",
    MAX_BOOK_ID_LENGTH
);
text_value!(
    /// At most 200 characters.
    BookTitle,
    "title",
    MAX_BOOK_TITLE_LENGTH
);
text_value!(
    /// At most 100 characters.
    Author,
    "author",
    MAX_AUTHOR_LENGTH
);

/// Year of publication, between 1000 and the current calendar year.
///
/// The upper bound is read from the wall clock each time `validate` runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PublicationYear(i32);

impl PublicationYear {
    pub fn new(value: i32) -> Self {
        Self(value)
    }

    pub fn value(&self) -> i32 {
        self.0
    }

    pub fn validate(&self) -> Result<()> {
        let current_year = Utc::now().year();
        if self.0 < MIN_PUBLICATION_YEAR || self.0 > current_year {
            return Err(LibraryError::invalid(
                "year",
                format!(
                    "must be between {} and {}",
                    MIN_PUBLICATION_YEAR, current_year
                ),
            ));
        }
        Ok(())
    }
}

impl fmt::Display for PublicationYear {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BookStatus {
    Available,
    Borrowed,
}

impl BookStatus {
    pub const ALL: [BookStatus; 2] = [BookStatus::Available, BookStatus::Borrowed];

    pub fn as_str(&self) -> &'static str {
        match self {
            BookStatus::Available => "available",
            BookStatus::Borrowed => "borrowed",
        }
    }
}

impl FromStr for BookStatus {
    type Err = LibraryError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "available" => Ok(BookStatus::Available),
            "borrowed" => Ok(BookStatus::Borrowed),
            other => Err(LibraryError::invalid(
                "status",
                format!("invalid status '{}'", other),
            )),
        }
    }
}

impl fmt::Display for BookStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Flat serialized form of a [`Book`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct BookRecord {
    pub id: String,
    pub title: String,
    pub author: String,
    pub year: i32,
    pub status: String,
    pub created_at: String,
    pub updated_at: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Book {
    id: BookId,
    title: BookTitle,
    author: Author,
    year: PublicationYear,
    status: BookStatus,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl Book {
    /// Builds a new, available book stamped with the current instant.
    ///
    /// Without an explicit `id`, one is derived from the creation time
    /// (`book_<seconds>.<micros>`).
    pub fn create(title: &str, author: &str, year: i32, id: Option<&str>) -> Result<Self> {
        let now = Utc::now();
        let id = match id {
            Some(id) => BookId::new(id),
            None => BookId::new(format!(
                "book_{}.{:06}",
                now.timestamp(),
                now.timestamp_subsec_micros()
            )),
        };
        let book = Self {
            id,
            title: BookTitle::new(title),
            author: Author::new(author),
            year: PublicationYear::new(year),
            status: BookStatus::Available,
            created_at: now,
            updated_at: now,
        };
        book.validate()?;
        Ok(book)
    }

    fn validate(&self) -> Result<()> {
        self.id.validate()?;
        self.title.validate()?;
        self.author.validate()?;
        self.year.validate()?;
        if self.updated_at < self.created_at {
            return Err(LibraryError::invalid(
                "updated_at",
                "must not be earlier than created_at",
            ));
        }
        Ok(())
    }

    /// Parses `new_status` and applies it, refreshing `updated_at`.
    ///
    /// On an unrecognized status the book is left untouched.
    pub fn update_status(&mut self, new_status: &str) -> Result<()> {
        let status: BookStatus = new_status.parse()?;
        self.set_status(status);
        Ok(())
    }

    pub fn set_status(&mut self, status: BookStatus) {
        self.status = status;
        let now = Utc::now();
        // The clock may not have ticked since the last change.
        self.updated_at = if now > self.updated_at {
            now
        } else {
            self.updated_at + Duration::nanoseconds(1)
        };
    }

    pub fn id(&self) -> &BookId {
        &self.id
    }

    pub fn title(&self) -> &BookTitle {
        &self.title
    }

    pub fn author(&self) -> &Author {
        &self.author
    }

    pub fn year(&self) -> PublicationYear {
        self.year
    }

    pub fn status(&self) -> BookStatus {
        self.status
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    pub fn to_record(&self) -> BookRecord {
        BookRecord {
            id: self.id.as_str().to_string(),
            title: self.title.as_str().to_string(),
            author: self.author.as_str().to_string(),
            year: self.year.value(),
            status: self.status.as_str().to_string(),
            created_at: format_timestamp(self.created_at),
            updated_at: format_timestamp(self.updated_at),
        }
    }

    /// Rebuilds a book from its record, validating every field as if it
    /// were freshly created.
    pub fn from_record(record: BookRecord) -> Result<Self> {
        let id = BookId::new(record.id);
        let title = BookTitle::new(record.title);
        let author = Author::new(record.author);
        let year = PublicationYear::new(record.year);
        id.validate()?;
        title.validate()?;
        author.validate()?;
        year.validate()?;
        let status: BookStatus = record.status.parse()?;

        let book = Self {
            id,
            title,
            author,
            year,
            status,
            created_at: parse_timestamp("created_at", &record.created_at)?,
            updated_at: parse_timestamp("updated_at", &record.updated_at)?,
        };
        book.validate()?;
        Ok(book)
    }

    /// Like [`Book::from_record`], but starting from untyped JSON. Missing
    /// keys or wrongly typed values yield [`LibraryError::Malformed`].
    pub fn from_value(value: serde_json::Value) -> Result<Self> {
        let record: BookRecord = serde_json::from_value(value)?;
        Self::from_record(record)
    }
}

fn format_timestamp(ts: DateTime<Utc>) -> String {
    ts.to_rfc3339_opts(SecondsFormat::AutoSi, false)
}

fn parse_timestamp(field: &'static str, raw: &str) -> Result<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(raw)
        .map(|ts| ts.with_timezone(&Utc))
        .map_err(|e| LibraryError::invalid(field, format!("invalid timestamp '{}': {}", raw, e)))
}
