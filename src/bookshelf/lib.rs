//! # Bookshelf Architecture
//!
//! Bookshelf is a personal library catalog: add, delete, list and search
//! books, and mark them borrowed or available. The catalog lives in a single
//! JSON file.
//!
//! ## Layers
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │  CLI Layer (main.rs, args.rs, render.rs)                    │
//! │  - Parses arguments, renders results, picks exit codes      │
//! │  - The ONLY place that knows about stdout/stderr            │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Command Layer (commands/*.rs)                              │
//! │  - One function per command, generic over BookStore         │
//! │  - Returns CmdResult { success, message, data }             │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Domain (model.rs)                                          │
//! │  - Book aggregate and its self-validating value objects     │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Storage Layer (store/)                                     │
//! │  - BookStore trait                                          │
//! │  - JsonFileStore (production), InMemoryStore (testing)      │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Key Principle: No I/O Assumptions in Core
//!
//! Everything below the CLI layer takes plain Rust arguments, returns
//! `Result` values, and never prints or exits. The library file path is
//! always passed in explicitly; there is no built-in default location at
//! this level.
//!
//! ## Errors
//!
//! [`error::LibraryError`] carries every failure. Its
//! [`kind`](error::LibraryError::kind) separates domain failures (exit code
//! 1 in the shell) from storage failures (exit code 2).
//!
//! ## Module Overview
//!
//! - [`commands`]: One module per user-facing command
//! - [`model`]: `Book`, its value objects, and the `BookRecord` wire form
//! - [`store`]: Storage abstraction and implementations
//! - [`config`]: User configuration
//! - [`error`]: Error types

pub mod commands;
pub mod config;
pub mod error;
pub mod model;
pub mod store;
