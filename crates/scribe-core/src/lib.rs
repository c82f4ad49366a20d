//! Scribe Core Library
//!
//! This crate provides the core functionality for Scribe, a small
//! note list kept in a plain text file, one note per line.
//!
//! # Architecture
//!
//! - **NoteStore**: owns the ordered note collection and the current selection
//! - **NoteFile**: newline-delimited persistence with atomic writes
//!
//! Front ends (the `scribe` CLI and TUI) call into `NoteStore` and render its
//! current contents; they never touch the file directly.
//!
//! # Quick Start
//!
//! ```text
//! let mut store = NoteStore::open(&Config::load()?)?;
//!
//! // Create a note
//! store.begin_new();
//! store.save("buy milk")?;
//!
//! // Filter the list
//! let visible = store.filter("milk");
//! ```
//!
//! # Modules
//!
//! - `store`: Stateful note store (main entry point)
//! - `collection`: Pure save/delete/filter operations on a note collection
//! - `models`: `Note` and `NoteCollection`
//! - `storage`: Flat-file persistence and storage errors
//! - `config`: Application configuration

pub mod collection;
pub mod config;
pub mod models;
pub mod storage;
pub mod store;

pub use collection::{DeleteOutcome, SaveOutcome, Visibility};
pub use config::{Config, DEFAULT_NOTES_FILE};
pub use models::{Note, NoteCollection, Selection};
pub use storage::{NoteFile, StorageError, StorageResult};
pub use store::NoteStore;
