//! Pure operations on a note collection
//!
//! These functions update a `NoteCollection` and its `Selection` in place and
//! report what happened. They never touch the disk; `NoteStore` layers
//! persistence on top and only writes when an outcome says something changed.

use serde::Serialize;

use crate::models::{Note, NoteCollection, Selection};

/// Per-note visibility, in collection order
pub type Visibility = Vec<bool>;

/// Result of a save request
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum SaveOutcome {
    /// A new note was appended
    Created { note: Note },
    /// The selected note was replaced in place
    Updated { previous: Note, current: Note },
    /// The text was blank; nothing happened
    SkippedEmpty,
}

impl SaveOutcome {
    /// Whether the collection was modified
    pub fn changed(&self) -> bool {
        !matches!(self, SaveOutcome::SkippedEmpty)
    }

    /// The note now holding the saved text, if any
    pub fn note(&self) -> Option<&Note> {
        match self {
            SaveOutcome::Created { note } => Some(note),
            SaveOutcome::Updated { current, .. } => Some(current),
            SaveOutcome::SkippedEmpty => None,
        }
    }
}

/// Result of a delete request
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum DeleteOutcome {
    /// The selected note was removed
    Deleted { note: Note },
    /// Nothing was selected; nothing happened
    NoSelection,
    /// The selection no longer matches any note; it was cleared
    NotFound { note: Note },
}

impl DeleteOutcome {
    /// Whether the collection was modified
    pub fn changed(&self) -> bool {
        matches!(self, DeleteOutcome::Deleted { .. })
    }
}

/// Create or update a note
///
/// Blank `text` is a no-op. With a selection present in `notes`, the first
/// matching entry is replaced in place; otherwise the text is appended. On
/// change the selection moves to the saved note.
pub fn save(notes: &mut NoteCollection, selection: &mut Selection, text: &str) -> SaveOutcome {
    let Some(note) = Note::parse(text) else {
        return SaveOutcome::SkippedEmpty;
    };

    let index = selection
        .as_ref()
        .and_then(|selected| notes.position(selected.as_str()));

    let outcome = match index {
        Some(index) => {
            let previous = notes.replace(index, note.clone());
            SaveOutcome::Updated {
                previous,
                current: note.clone(),
            }
        }
        None => {
            notes.push(note.clone());
            SaveOutcome::Created { note: note.clone() }
        }
    };

    *selection = Some(note);
    outcome
}

/// Remove the selected note
///
/// Without a selection this is a no-op. The selection is always cleared.
pub fn delete(notes: &mut NoteCollection, selection: &mut Selection) -> DeleteOutcome {
    let Some(selected) = selection.take() else {
        return DeleteOutcome::NoSelection;
    };

    match notes.position(selected.as_str()) {
        Some(index) => DeleteOutcome::Deleted {
            note: notes.remove(index),
        },
        None => DeleteOutcome::NotFound { note: selected },
    }
}

/// Select a note by its exact text
///
/// Blank text clears the selection.
pub fn select(text: &str) -> Selection {
    Note::parse(text)
}

/// Whether a single note matches a search query
///
/// Case-insensitive substring match on the trimmed query. An empty query
/// matches everything.
pub fn matches(note: &Note, query: &str) -> bool {
    let needle = query.trim().to_lowercase();
    note.contains_lowercase(&needle)
}

/// Visibility of every note for a search query
pub fn filter(notes: &NoteCollection, query: &str) -> Visibility {
    let needle = query.trim().to_lowercase();
    notes
        .iter()
        .map(|note| note.contains_lowercase(&needle))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn collection(texts: &[&str]) -> NoteCollection {
        texts.iter().filter_map(|t| Note::parse(t)).collect()
    }

    fn texts(notes: &NoteCollection) -> Vec<&str> {
        notes.iter().map(Note::as_str).collect()
    }

    #[test]
    fn test_save_creates_when_nothing_selected() {
        let mut notes = NoteCollection::new();
        let mut selection = None;

        let outcome = save(&mut notes, &mut selection, "hello");

        assert!(matches!(outcome, SaveOutcome::Created { .. }));
        assert_eq!(texts(&notes), vec!["hello"]);
        assert_eq!(selection.unwrap(), "hello");
    }

    #[test]
    fn test_save_updates_in_place() {
        let mut notes = collection(&["a", "b"]);
        let mut selection = select("a");

        let outcome = save(&mut notes, &mut selection, "a-edited");

        assert_eq!(
            outcome,
            SaveOutcome::Updated {
                previous: Note::parse("a").unwrap(),
                current: Note::parse("a-edited").unwrap(),
            }
        );
        assert_eq!(texts(&notes), vec!["a-edited", "b"]);
        assert_eq!(selection.unwrap(), "a-edited");
    }

    #[test]
    fn test_save_trims_text() {
        let mut notes = NoteCollection::new();
        let mut selection = None;

        save(&mut notes, &mut selection, "  padded  \n");

        assert_eq!(texts(&notes), vec!["padded"]);
    }

    #[test]
    fn test_blank_save_is_noop() {
        let mut notes = collection(&["a"]);
        let mut selection = None;

        let outcome = save(&mut notes, &mut selection, "   ");

        assert_eq!(outcome, SaveOutcome::SkippedEmpty);
        assert!(!outcome.changed());
        assert_eq!(texts(&notes), vec!["a"]);
        assert!(selection.is_none());
    }

    #[test]
    fn test_blank_save_keeps_existing_selection() {
        let mut notes = collection(&["a"]);
        let mut selection = select("a");

        save(&mut notes, &mut selection, "");

        assert_eq!(selection.unwrap(), "a");
        assert_eq!(texts(&notes), vec!["a"]);
    }

    #[test]
    fn test_save_with_stale_selection_appends() {
        let mut notes = collection(&["a"]);
        let mut selection = select("gone");

        let outcome = save(&mut notes, &mut selection, "fresh");

        assert!(matches!(outcome, SaveOutcome::Created { .. }));
        assert_eq!(texts(&notes), vec!["a", "fresh"]);
    }

    #[test]
    fn test_save_updates_first_duplicate() {
        let mut notes = collection(&["dup", "x", "dup"]);
        let mut selection = select("dup");

        save(&mut notes, &mut selection, "changed");

        assert_eq!(texts(&notes), vec!["changed", "x", "dup"]);
    }

    #[test]
    fn test_delete_requires_selection() {
        let mut notes = collection(&["a", "b"]);
        let mut selection = None;

        let outcome = delete(&mut notes, &mut selection);

        assert_eq!(outcome, DeleteOutcome::NoSelection);
        assert_eq!(texts(&notes), vec!["a", "b"]);
    }

    #[test]
    fn test_delete_removes_selected() {
        let mut notes = collection(&["a", "b"]);
        let mut selection = select("a");

        let outcome = delete(&mut notes, &mut selection);

        assert!(outcome.changed());
        assert_eq!(texts(&notes), vec!["b"]);
        assert!(selection.is_none());
    }

    #[test]
    fn test_delete_stale_selection_clears_it() {
        let mut notes = collection(&["a"]);
        let mut selection = select("missing");

        let outcome = delete(&mut notes, &mut selection);

        assert!(matches!(outcome, DeleteOutcome::NotFound { .. }));
        assert!(!outcome.changed());
        assert!(selection.is_none());
        assert_eq!(texts(&notes), vec!["a"]);
    }

    #[test]
    fn test_filter_case_insensitive() {
        let notes = collection(&["Apple", "banana", "Grape"]);
        assert_eq!(filter(&notes, "ap"), vec![true, false, true]);
        assert_eq!(filter(&notes, "  BAN "), vec![false, true, false]);
    }

    #[test]
    fn test_filter_empty_query_matches_all() {
        let notes = collection(&["Apple", "banana", "Grape"]);
        assert_eq!(filter(&notes, ""), vec![true, true, true]);
        assert_eq!(filter(&notes, "   "), vec![true, true, true]);
    }

    #[test]
    fn test_filter_does_not_reorder() {
        let notes = collection(&["b", "a"]);
        let _ = filter(&notes, "a");
        assert_eq!(texts(&notes), vec!["b", "a"]);
    }

    #[test]
    fn test_matches_single_note() {
        let note = Note::parse("Meeting with Sam").unwrap();
        assert!(matches(&note, "sam"));
        assert!(matches(&note, ""));
        assert!(!matches(&note, "bob"));
    }
}
