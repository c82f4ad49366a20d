//! Data models for Scribe
//!
//! A note is nothing but its text. There is no identifier besides the
//! content, so lookups compare text and resolve to the first match.

use std::fmt;

use serde::{Deserialize, Serialize};

/// A single note: non-empty, trimmed text
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Note(String);

impl Note {
    /// Build a note from raw input
    ///
    /// The input is trimmed. Returns `None` if nothing is left.
    pub fn parse(text: &str) -> Option<Self> {
        let trimmed = text.trim();
        if trimmed.is_empty() {
            None
        } else {
            Some(Self(trimmed.to_string()))
        }
    }

    /// The note text
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Case-insensitive substring match against an already lowercased needle
    pub(crate) fn contains_lowercase(&self, needle: &str) -> bool {
        self.0.to_lowercase().contains(needle)
    }
}

impl fmt::Display for Note {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for Note {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl PartialEq<str> for Note {
    fn eq(&self, other: &str) -> bool {
        self.0 == other
    }
}

impl PartialEq<&str> for Note {
    fn eq(&self, other: &&str) -> bool {
        self.0 == *other
    }
}

impl TryFrom<String> for Note {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Note::parse(&value).ok_or_else(|| "note text cannot be empty".to_string())
    }
}

impl From<Note> for String {
    fn from(note: Note) -> Self {
        note.0
    }
}

/// The note currently being edited, or `None` for a new note in progress
pub type Selection = Option<Note>;

/// Ordered list of notes
///
/// Order is both display order and file order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NoteCollection {
    notes: Vec<Note>,
}

impl NoteCollection {
    /// Create an empty collection
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.notes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.notes.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Note> {
        self.notes.iter()
    }

    /// Get the note at a position
    pub fn get(&self, index: usize) -> Option<&Note> {
        self.notes.get(index)
    }

    /// Position of the first note whose text equals `text`
    pub fn position(&self, text: &str) -> Option<usize> {
        self.notes.iter().position(|n| n.as_str() == text)
    }

    pub(crate) fn push(&mut self, note: Note) {
        self.notes.push(note);
    }

    pub(crate) fn replace(&mut self, index: usize, note: Note) -> Note {
        std::mem::replace(&mut self.notes[index], note)
    }

    pub(crate) fn remove(&mut self, index: usize) -> Note {
        self.notes.remove(index)
    }
}

impl From<Vec<Note>> for NoteCollection {
    fn from(notes: Vec<Note>) -> Self {
        Self { notes }
    }
}

impl FromIterator<Note> for NoteCollection {
    fn from_iter<I: IntoIterator<Item = Note>>(iter: I) -> Self {
        Self {
            notes: iter.into_iter().collect(),
        }
    }
}

impl<'a> IntoIterator for &'a NoteCollection {
    type Item = &'a Note;
    type IntoIter = std::slice::Iter<'a, Note>;

    fn into_iter(self) -> Self::IntoIter {
        self.notes.iter()
    }
}
