//! Stateful note store
//!
//! The `NoteStore` owns the note collection, the current selection, and the
//! file they are mirrored to. Every change is persisted before the call
//! returns; blank saves and deletes without a selection are no-ops and leave
//! the file alone.
//!
//! ## Usage
//!
//! ```ignore
//! let mut store = NoteStore::open(&config)?;
//!
//! store.begin_new();
//! store.save("call the plumber")?;   // appended, now selected
//! store.save("call the plumber at 9")?; // updates the same note
//!
//! store.delete()?;                   // removes it, clears selection
//! store.close()?;                    // final flush
//! ```

use tracing::{debug, info, warn};

use crate::collection::{self, DeleteOutcome, SaveOutcome, Visibility};
use crate::config::Config;
use crate::models::{Note, NoteCollection, Selection};
use crate::storage::{NoteFile, StorageResult};

/// Note store backed by a flat file
///
/// Single-threaded by construction: all mutations take `&mut self`.
#[derive(Debug)]
pub struct NoteStore {
    /// Notes in display order
    notes: NoteCollection,
    /// Note being edited, `None` for a new note in progress
    selection: Selection,
    /// Backing file
    file: NoteFile,
}

impl NoteStore {
    /// Open the store for the notes file named by the configuration
    pub fn open(config: &Config) -> StorageResult<Self> {
        Self::with_file(NoteFile::from_config(config))
    }

    /// Open the store on a specific file, loading its notes
    ///
    /// A missing file yields an empty store.
    pub fn with_file(file: NoteFile) -> StorageResult<Self> {
        let notes = file.load()?;
        info!("Opened {:?} with {} note(s)", file.path(), notes.len());
        Ok(Self {
            notes,
            selection: None,
            file,
        })
    }

    /// Current notes
    pub fn notes(&self) -> &NoteCollection {
        &self.notes
    }

    /// Current selection
    pub fn selection(&self) -> Option<&Note> {
        self.selection.as_ref()
    }

    /// Index of the selected note in the collection, if it is present
    pub fn selected_index(&self) -> Option<usize> {
        self.selection
            .as_ref()
            .and_then(|note| self.notes.position(note.as_str()))
    }

    /// Backing file
    pub fn file(&self) -> &NoteFile {
        &self.file
    }

    /// Start a new note: the next save appends instead of updating
    pub fn begin_new(&mut self) {
        self.selection = None;
    }

    /// Select a note by its exact stored text
    pub fn select(&mut self, text: &str) -> Option<&Note> {
        self.selection = collection::select(text);
        self.selection.as_ref()
    }

    /// Select the note at a position, using its stored text
    ///
    /// Leaves the selection unchanged and returns `None` if out of range.
    pub fn select_index(&mut self, index: usize) -> Option<&Note> {
        let note = self.notes.get(index)?.clone();
        self.selection = Some(note);
        self.selection.as_ref()
    }

    /// Create or update a note and persist the result
    ///
    /// Blank text is a no-op that does not touch the file.
    pub fn save(&mut self, text: &str) -> StorageResult<SaveOutcome> {
        let outcome = collection::save(&mut self.notes, &mut self.selection, text);

        match &outcome {
            SaveOutcome::Created { .. } => info!("Created note at position {}", self.notes.len()),
            SaveOutcome::Updated { .. } => info!("Updated note"),
            SaveOutcome::SkippedEmpty => {
                debug!("Skipped saving blank note");
                return Ok(outcome);
            }
        }

        self.persist()?;
        Ok(outcome)
    }

    /// Delete the selected note and persist the result
    ///
    /// Without a selection this is a no-op.
    pub fn delete(&mut self) -> StorageResult<DeleteOutcome> {
        let outcome = collection::delete(&mut self.notes, &mut self.selection);

        match &outcome {
            DeleteOutcome::Deleted { .. } => {
                info!("Deleted note, {} remaining", self.notes.len());
                self.persist()?;
            }
            DeleteOutcome::NoSelection => debug!("Delete requested with no selection"),
            DeleteOutcome::NotFound { .. } => {
                warn!("Selected note no longer exists; selection cleared")
            }
        }

        Ok(outcome)
    }

    /// Visibility of every note for a search query
    pub fn filter(&self, query: &str) -> Visibility {
        collection::filter(&self.notes, query)
    }

    /// Notes matching a search query, with their positions
    pub fn search(&self, query: &str) -> Vec<(usize, &Note)> {
        self.notes
            .iter()
            .enumerate()
            .filter(|(_, note)| collection::matches(note, query))
            .collect()
    }

    /// Re-read the backing file, discarding the in-memory collection
    ///
    /// The selection is kept; it resolves against the reloaded notes.
    pub fn reload(&mut self) -> StorageResult<()> {
        self.notes = self.file.load()?;
        Ok(())
    }

    /// Write the current collection to the backing file
    pub fn persist(&self) -> StorageResult<()> {
        self.file.persist(&self.notes)
    }

    /// Final flush before shutdown
    pub fn close(self) -> StorageResult<()> {
        self.persist()?;
        info!("Closed {:?}", self.file.path());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use crate::storage::StorageError;
    use tempfile::TempDir;

    fn open_store(temp_dir: &TempDir) -> NoteStore {
        NoteStore::with_file(NoteFile::new(temp_dir.path().join("notes.txt"))).unwrap()
    }

    fn store_with(temp_dir: &TempDir, content: &str) -> NoteStore {
        let path = temp_dir.path().join("notes.txt");
        fs::write(&path, content).unwrap();
        NoteStore::with_file(NoteFile::new(path)).unwrap()
    }

    fn texts(store: &NoteStore) -> Vec<&str> {
        store.notes().iter().map(Note::as_str).collect()
    }

    fn file_content(store: &NoteStore) -> String {
        fs::read_to_string(store.file().path()).unwrap()
    }

    /// Replace the notes file with a non-empty directory so the next persist fails
    fn block_persist(store: &NoteStore) {
        let path = store.file().path();
        fs::remove_file(path).unwrap();
        fs::create_dir(path).unwrap();
        fs::write(path.join("keep"), "").unwrap();
    }

    #[test]
    fn test_open_without_file_is_empty() {
        let temp_dir = TempDir::new().unwrap();
        let store = open_store(&temp_dir);

        assert!(store.notes().is_empty());
        assert!(store.selection().is_none());
        assert!(!store.file().exists());
    }

    #[test]
    fn test_open_with_config() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("configured.txt");
        fs::write(&path, "from config").unwrap();

        let config = Config {
            notes_file: path,
            log_file: None,
        };
        let store = NoteStore::open(&config).unwrap();
        assert_eq!(texts(&store), vec!["from config"]);
    }

    #[test]
    fn test_save_creates_and_persists() {
        let temp_dir = TempDir::new().unwrap();
        let mut store = open_store(&temp_dir);

        store.begin_new();
        let outcome = store.save("hello").unwrap();

        assert!(matches!(outcome, SaveOutcome::Created { .. }));
        assert_eq!(texts(&store), vec!["hello"]);
        assert_eq!(store.selection().unwrap(), "hello");
        assert_eq!(file_content(&store), "hello");
    }

    #[test]
    fn test_save_updates_selected() {
        let temp_dir = TempDir::new().unwrap();
        let mut store = store_with(&temp_dir, "a\nb");

        store.select("a");
        let outcome = store.save("a-edited").unwrap();

        assert!(matches!(outcome, SaveOutcome::Updated { .. }));
        assert_eq!(texts(&store), vec!["a-edited", "b"]);
        assert_eq!(store.selection().unwrap(), "a-edited");
        assert_eq!(file_content(&store), "a-edited\nb");
    }

    #[test]
    fn test_consecutive_saves_edit_same_note() {
        let temp_dir = TempDir::new().unwrap();
        let mut store = open_store(&temp_dir);

        store.begin_new();
        store.save("draft").unwrap();
        store.save("draft, revised").unwrap();

        assert_eq!(texts(&store), vec!["draft, revised"]);
    }

    #[test]
    fn test_blank_save_does_not_persist() {
        let temp_dir = TempDir::new().unwrap();
        let mut store = open_store(&temp_dir);

        store.begin_new();
        let outcome = store.save("   ").unwrap();

        assert_eq!(outcome, SaveOutcome::SkippedEmpty);
        assert!(store.notes().is_empty());
        assert!(!store.file().exists());
    }

    #[test]
    fn test_blank_save_leaves_existing_file_untouched() {
        let temp_dir = TempDir::new().unwrap();
        // Not in canonical form; a persist would rewrite it
        let mut store = store_with(&temp_dir, "a\n\n");

        store.begin_new();
        store.save("\t").unwrap();

        assert_eq!(texts(&store), vec!["a"]);
        assert_eq!(file_content(&store), "a\n\n");
    }

    #[test]
    fn test_delete_without_selection_is_noop() {
        let temp_dir = TempDir::new().unwrap();
        let mut store = store_with(&temp_dir, "a\nb");

        let outcome = store.delete().unwrap();

        assert_eq!(outcome, DeleteOutcome::NoSelection);
        assert_eq!(texts(&store), vec!["a", "b"]);
    }

    #[test]
    fn test_delete_removes_selected() {
        let temp_dir = TempDir::new().unwrap();
        let mut store = store_with(&temp_dir, "a\nb");

        store.select("a");
        let outcome = store.delete().unwrap();

        assert!(outcome.changed());
        assert_eq!(texts(&store), vec!["b"]);
        assert!(store.selection().is_none());
        assert_eq!(file_content(&store), "b");
    }

    #[test]
    fn test_delete_last_note_leaves_empty_file() {
        let temp_dir = TempDir::new().unwrap();
        let mut store = store_with(&temp_dir, "only");

        store.select_index(0);
        store.delete().unwrap();

        assert!(store.file().exists());
        assert_eq!(file_content(&store), "");
    }

    #[test]
    fn test_select_index_uses_stored_text() {
        let temp_dir = TempDir::new().unwrap();
        let mut store = store_with(&temp_dir, "first\nsecond");

        assert_eq!(store.select_index(1).unwrap(), "second");
        assert_eq!(store.selected_index(), Some(1));

        // Out of range keeps the current selection
        assert!(store.select_index(5).is_none());
        assert_eq!(store.selection().unwrap(), "second");
    }

    #[test]
    fn test_select_blank_clears_selection() {
        let temp_dir = TempDir::new().unwrap();
        let mut store = store_with(&temp_dir, "a");

        store.select("a");
        assert!(store.select("  ").is_none());
        assert!(store.selection().is_none());
    }

    #[test]
    fn test_filter_and_search() {
        let temp_dir = TempDir::new().unwrap();
        let store = store_with(&temp_dir, "Apple\nbanana\nGrape");

        assert_eq!(store.filter("ap"), vec![true, false, true]);
        assert_eq!(store.filter(""), vec![true, true, true]);

        let hits: Vec<_> = store
            .search("AP")
            .into_iter()
            .map(|(i, n)| (i, n.as_str()))
            .collect();
        assert_eq!(hits, vec![(0, "Apple"), (2, "Grape")]);
    }

    #[test]
    fn test_reload_picks_up_external_changes() {
        let temp_dir = TempDir::new().unwrap();
        let mut store = store_with(&temp_dir, "a");

        fs::write(store.file().path(), "a\nb").unwrap();
        store.reload().unwrap();

        assert_eq!(texts(&store), vec!["a", "b"]);
    }

    #[test]
    fn test_close_flushes_to_disk() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("notes.txt");
        fs::write(&path, " x \n\ny").unwrap();

        let store = NoteStore::with_file(NoteFile::new(&path)).unwrap();
        store.close().unwrap();

        assert_eq!(fs::read_to_string(&path).unwrap(), "x\ny");
    }

    #[test]
    fn test_reopen_round_trip() {
        let temp_dir = TempDir::new().unwrap();
        let mut store = open_store(&temp_dir);

        for text in ["one", "two", "three"] {
            store.begin_new();
            store.save(text).unwrap();
        }
        store.close().unwrap();

        let reopened = open_store(&temp_dir);
        assert_eq!(texts(&reopened), vec!["one", "two", "three"]);
    }

    #[test]
    fn test_save_surfaces_persist_failure() {
        let temp_dir = TempDir::new().unwrap();
        let mut store = store_with(&temp_dir, "a");
        block_persist(&store);

        store.begin_new();
        let err = store.save("b").unwrap_err();

        assert!(matches!(err, StorageError::AtomicWriteFailed { .. }));
        // Memory keeps the change for the next persist
        assert_eq!(texts(&store), vec!["a", "b"]);
        assert_eq!(store.selection().unwrap(), "b");
        assert!(!temp_dir.path().join("notes.txt.tmp").exists());
    }

    #[test]
    fn test_delete_surfaces_persist_failure() {
        let temp_dir = TempDir::new().unwrap();
        let mut store = store_with(&temp_dir, "a\nb");
        block_persist(&store);

        store.select("a");
        let err = store.delete().unwrap_err();

        assert!(matches!(err, StorageError::AtomicWriteFailed { .. }));
        assert_eq!(texts(&store), vec!["b"]);
        assert!(store.selection().is_none());
    }

    #[test]
    fn test_persist_after_failure_writes_pending_change() {
        let temp_dir = TempDir::new().unwrap();
        let mut store = store_with(&temp_dir, "a");
        block_persist(&store);
        store.begin_new();
        assert!(store.save("b").is_err());

        fs::remove_dir_all(store.file().path()).unwrap();
        store.close().unwrap();

        let reopened = open_store(&temp_dir);
        assert_eq!(texts(&reopened), vec!["a", "b"]);
    }
}
