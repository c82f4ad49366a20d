//! Storage layer
//!
//! Handles reading and writing the flat notes file.
//!
//! ## Format
//!
//! - One note per line, `\n` separated, no trailing newline
//! - No escaping; a note containing a newline reads back as several notes

pub mod error;
pub mod persistence;

pub use error::{StorageError, StorageResult};
pub use persistence::{parse_notes, serialize_notes, NoteFile};
