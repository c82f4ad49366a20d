//! Application state and logic

use std::time::{Duration, Instant};

use scribe_core::{DeleteOutcome, NoteStore, SaveOutcome, Visibility};

use crate::output::storage_error_message;

/// How long status messages stay on screen
const STATUS_TIMEOUT: Duration = Duration::from_secs(3);

/// Input mode for the application
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputMode {
    /// List navigation
    Normal,
    /// Typing into the note editor
    Editing,
    /// Typing into the search field (after pressing /)
    Search,
    /// Waiting for y/n on a delete
    ConfirmDelete,
}

/// Single-line text field with a cursor counted in chars
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TextInput {
    text: String,
    cursor: usize,
}

impl TextInput {
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Cursor position in chars
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Replace the content, cursor at the end
    pub fn set(&mut self, text: &str) {
        self.text = text.to_string();
        self.cursor = self.text.chars().count();
    }

    pub fn clear(&mut self) {
        self.text.clear();
        self.cursor = 0;
    }

    /// Insert a character at the cursor
    pub fn insert_char(&mut self, c: char) {
        let at = self.byte_index(self.cursor);
        self.text.insert(at, c);
        self.cursor += 1;
    }

    /// Delete character before cursor
    pub fn delete_char(&mut self) {
        if self.cursor > 0 {
            self.cursor -= 1;
            let at = self.byte_index(self.cursor);
            self.text.remove(at);
        }
    }

    /// Delete character under cursor
    pub fn delete_forward(&mut self) {
        if self.cursor < self.text.chars().count() {
            let at = self.byte_index(self.cursor);
            self.text.remove(at);
        }
    }

    pub fn cursor_left(&mut self) {
        self.cursor = self.cursor.saturating_sub(1);
    }

    pub fn cursor_right(&mut self) {
        if self.cursor < self.text.chars().count() {
            self.cursor += 1;
        }
    }

    pub fn cursor_home(&mut self) {
        self.cursor = 0;
    }

    pub fn cursor_end(&mut self) {
        self.cursor = self.text.chars().count();
    }

    fn byte_index(&self, char_pos: usize) -> usize {
        self.text
            .char_indices()
            .nth(char_pos)
            .map(|(i, _)| i)
            .unwrap_or(self.text.len())
    }
}

/// Application state
pub struct App {
    /// Whether the app should exit
    pub should_quit: bool,
    /// Current input mode
    pub input_mode: InputMode,
    /// Note editor content
    pub editor: TextInput,
    /// Search field content
    pub search: TextInput,
    /// Visibility of every note for the current search
    pub visibility: Visibility,
    /// Highlighted row among the visible notes
    pub list_index: usize,
    /// Status message to display temporarily
    pub status_message: Option<String>,
    /// When the status message was set (for auto-dismiss)
    pub status_message_time: Option<Instant>,
    /// Error shown in a modal until a key is pressed
    pub error_message: Option<String>,
    /// Whether help overlay is visible
    pub show_help: bool,
}

impl App {
    /// Create a new app showing every note in the store
    pub fn new(store: &NoteStore) -> Self {
        Self {
            should_quit: false,
            input_mode: InputMode::Normal,
            editor: TextInput::default(),
            search: TextInput::default(),
            visibility: store.filter(""),
            list_index: 0,
            status_message: None,
            status_message_time: None,
            error_message: None,
            show_help: false,
        }
    }

    /// Set a status message (will auto-dismiss after 3 seconds)
    pub fn set_status(&mut self, message: impl Into<String>) {
        self.status_message = Some(message.into());
        self.status_message_time = Some(Instant::now());
    }

    /// Check and clear expired status message
    pub fn check_status_timeout(&mut self) {
        if let Some(time) = self.status_message_time {
            if time.elapsed() > STATUS_TIMEOUT {
                self.status_message = None;
                self.status_message_time = None;
            }
        }
    }

    pub fn set_error(&mut self, message: impl Into<String>) {
        self.error_message = Some(message.into());
    }

    pub fn has_error(&self) -> bool {
        self.error_message.is_some()
    }

    pub fn clear_error(&mut self) {
        self.error_message = None;
    }

    /// Toggle help overlay
    pub fn toggle_help(&mut self) {
        self.show_help = !self.show_help;
    }

    /// Collection indices of the notes currently shown
    pub fn visible_indices(&self) -> Vec<usize> {
        self.visibility
            .iter()
            .enumerate()
            .filter_map(|(i, visible)| visible.then_some(i))
            .collect()
    }

    /// Collection index of the highlighted row
    pub fn current_index(&self) -> Option<usize> {
        self.visible_indices().get(self.list_index).copied()
    }

    pub fn move_up(&mut self) {
        self.list_index = self.list_index.saturating_sub(1);
    }

    pub fn move_down(&mut self) {
        let count = self.visible_indices().len();
        if self.list_index + 1 < count {
            self.list_index += 1;
        }
    }

    pub fn move_to_first(&mut self) {
        self.list_index = 0;
    }

    pub fn move_to_last(&mut self) {
        self.list_index = self.visible_indices().len().saturating_sub(1);
    }

    /// Start a new note: clear selection and editor
    pub fn new_note(&mut self, store: &mut NoteStore) {
        store.begin_new();
        self.editor.clear();
        self.input_mode = InputMode::Editing;
    }

    /// Select the highlighted note and open it in the editor
    pub fn edit_current(&mut self, store: &mut NoteStore) {
        let Some(index) = self.current_index() else {
            self.set_status("No note selected. Press n for a new note");
            return;
        };

        if let Some(note) = store.select_index(index) {
            let text = note.as_str().to_string();
            self.editor.set(&text);
            self.input_mode = InputMode::Editing;
        }
    }

    /// Save the editor content as a new or updated note
    pub fn save(&mut self, store: &mut NoteStore) {
        match store.save(self.editor.text()) {
            Ok(SaveOutcome::SkippedEmpty) => {
                self.set_status("Nothing to save: the note is empty");
            }
            Ok(outcome) => {
                if let Some(note) = outcome.note() {
                    let text = note.as_str().to_string();
                    self.editor.set(&text);
                }
                self.refresh(store);
                self.highlight_selection(store);
                self.set_status("Note saved");
            }
            Err(e) => {
                // The change is kept in memory, so the list must show it
                self.refresh(store);
                self.highlight_selection(store);
                self.set_error(format!("Failed to save note: {}", storage_error_message(&e)));
            }
        }
    }

    /// Stop editing without saving
    pub fn leave_editor(&mut self) {
        self.input_mode = InputMode::Normal;
    }

    /// Ask for confirmation before deleting the highlighted note
    pub fn request_delete(&mut self, store: &mut NoteStore) {
        let Some(index) = self.current_index() else {
            self.set_status("No note selected");
            return;
        };

        if store.select_index(index).is_some() {
            self.input_mode = InputMode::ConfirmDelete;
        }
    }

    /// Delete the selected note after confirmation
    pub fn confirm_delete(&mut self, store: &mut NoteStore) {
        self.input_mode = InputMode::Normal;

        match store.delete() {
            Ok(DeleteOutcome::Deleted { .. }) => {
                self.editor.clear();
                self.refresh(store);
                self.set_status("Note deleted");
            }
            Ok(DeleteOutcome::NoSelection) | Ok(DeleteOutcome::NotFound { .. }) => {
                self.set_status("Nothing to delete");
            }
            Err(e) => {
                self.editor.clear();
                self.refresh(store);
                self.set_error(format!("Failed to delete note: {}", storage_error_message(&e)));
            }
        }
    }

    /// Keep the note, forget the pending delete
    pub fn cancel_delete(&mut self, store: &mut NoteStore) {
        store.begin_new();
        self.input_mode = InputMode::Normal;
    }

    /// Enter search mode, keeping the current query
    pub fn enter_search_mode(&mut self) {
        self.input_mode = InputMode::Search;
    }

    /// Clear the query and show every note again
    pub fn clear_search(&mut self, store: &NoteStore) {
        self.search.clear();
        self.input_mode = InputMode::Normal;
        self.refresh(store);
    }

    /// Re-evaluate visibility against the current query
    pub fn refresh(&mut self, store: &NoteStore) {
        self.visibility = store.filter(self.search.text());

        // Clamp selection to new list bounds (preserve position when possible)
        let count = self.visible_indices().len();
        if count == 0 {
            self.list_index = 0;
        } else {
            self.list_index = self.list_index.min(count - 1);
        }
    }

    /// Move the highlight onto the selected note if it is visible
    fn highlight_selection(&mut self, store: &NoteStore) {
        if let Some(selected) = store.selected_index() {
            if let Some(row) = self.visible_indices().iter().position(|&i| i == selected) {
                self.list_index = row;
            }
        }
    }

    /// Number of visible notes
    pub fn visible_count(&self) -> usize {
        self.visibility.iter().filter(|v| **v).count()
    }
}
