use bookshelf::model::BookStatus;
use clap::builder::PossibleValuesParser;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "bookshelf", version)]
#[command(about = "Personal library catalog", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Library file to use
    #[arg(short, long, global = true, env = "BOOKSHELF_FILE")]
    pub file: Option<PathBuf>,

    /// Verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Add a book to the library
    #[command(alias = "a")]
    Add {
        /// Title of the book
        title: String,

        /// Author of the book
        author: String,

        /// Publication year
        #[arg(allow_negative_numbers = true)]
        year: i32,

        /// Explicit book ID (generated from the current time if omitted)
        #[arg(long)]
        id: Option<String>,
    },

    /// Delete a book by ID
    #[command(alias = "rm")]
    Delete {
        /// ID of the book
        id: String,
    },

    /// List every book in the library
    #[command(alias = "ls")]
    List,

    /// Search books by title, author or year
    Search {
        /// Text to look for (a year must match exactly)
        query: String,

        /// Field to search in (title, author, year)
        #[arg(long)]
        field: Option<String>,
    },

    /// Mark a book as available or borrowed
    Status {
        /// ID of the book
        id: String,

        /// New status
        #[arg(value_parser = PossibleValuesParser::new(BookStatus::ALL.map(|s| s.as_str())))]
        status: String,
    },

    /// Get or set configuration
    Config {
        /// Configuration key (storage-file, search-field)
        key: Option<String>,

        /// Value to set (if omitted, prints current value)
        value: Option<String>,
    },
}
