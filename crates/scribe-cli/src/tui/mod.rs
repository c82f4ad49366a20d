//! Scribe TUI
//!
//! Terminal user interface for Scribe.
//!
//! ## Layout
//!
//! - Left: Note list (filtered by the search field)
//! - Right: Editor for the selected or new note
//! - Bottom: Search field and status bar
//!
//! ## Keys
//!
//! - j/k or ↑/↓: Move highlight up/down
//! - g/G: First/last note
//! - Enter or e: Edit highlighted note
//! - n: New note
//! - Ctrl-s: Save (stays in editor); Enter in editor saves and closes
//! - Esc: Leave editor / clear search
//! - d: Delete highlighted note (asks y/n)
//! - /: Search
//! - ?: Help
//! - q: Quit (notes are flushed to disk on exit)

mod app;
mod ui;

use std::fs::File;
use std::io::stdout;
use std::time::Duration;

use anyhow::{Context, Result};
use crossterm::{
    event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers},
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
    ExecutableCommand,
};
use ratatui::prelude::*;
use scribe_core::{Config, NoteStore};
use tracing::info;
use tracing_subscriber::EnvFilter;

use app::{App, InputMode};

/// How long to wait for a key before redrawing
const POLL_INTERVAL: Duration = Duration::from_millis(250);

/// Run the TUI application
pub fn run(config: &Config) -> Result<()> {
    // Initialize TUI logging (file-based, only if SCRIBE_LOG is set)
    init_tui_logging(config);

    // Open the store before touching the terminal so load errors print normally
    let mut store = NoteStore::open(config)
        .with_context(|| format!("Failed to open notes file {:?}", config.notes_path()))?;

    // Setup terminal
    enable_raw_mode()?;
    stdout().execute(EnterAlternateScreen)?;
    let mut terminal = Terminal::new(CrosstermBackend::new(stdout()))?;

    let mut app = App::new(&store);

    // Run app
    let result = run_app(&mut terminal, &mut app, &mut store);

    shutdown(store, result, restore_terminal)
}

fn restore_terminal() -> Result<()> {
    disable_raw_mode()?;
    stdout().execute(LeaveAlternateScreen)?;
    Ok(())
}

/// Flush the notes, then restore the terminal
///
/// The flush happens whatever the loop or the restore returned; the first
/// error wins.
fn shutdown(
    store: NoteStore,
    result: Result<()>,
    restore: impl FnOnce() -> Result<()>,
) -> Result<()> {
    let closed = store.close().context("Failed to save notes on exit");
    let restored = restore().context("Failed to restore terminal");
    info!("TUI exited");

    result.and(closed).and(restored)
}

fn run_app<B: Backend>(terminal: &mut Terminal<B>, app: &mut App, store: &mut NoteStore) -> Result<()> {
    loop {
        app.check_status_timeout();

        terminal.draw(|frame| ui::draw(frame, app, store))?;

        if !event::poll(POLL_INTERVAL)? {
            continue;
        }

        if let Event::Key(key) = event::read()? {
            // Only handle key press events (not release)
            if key.kind != KeyEventKind::Press {
                continue;
            }
            handle_key(app, store, key);
        }

        if app.should_quit {
            break;
        }
    }

    Ok(())
}

/// Dispatch a key press according to the current mode
fn handle_key(app: &mut App, store: &mut NoteStore, key: KeyEvent) {
    // If error modal is showing, any key dismisses it
    if app.has_error() {
        app.clear_error();
        return;
    }

    // If help is showing, any key dismisses it
    if app.show_help {
        app.show_help = false;
        return;
    }

    match app.input_mode {
        InputMode::Normal => handle_normal_mode(app, store, key.code, key.modifiers),
        InputMode::Editing => handle_editing_mode(app, store, key.code, key.modifiers),
        InputMode::Search => handle_search_mode(app, store, key.code),
        InputMode::ConfirmDelete => handle_confirm_mode(app, store, key.code),
    }
}

/// Handle key events in normal mode
fn handle_normal_mode(app: &mut App, store: &mut NoteStore, code: KeyCode, modifiers: KeyModifiers) {
    match code {
        // Quit
        KeyCode::Char('q') => {
            app.should_quit = true;
        }
        KeyCode::Char('c') if modifiers.contains(KeyModifiers::CONTROL) => {
            app.should_quit = true;
        }

        // Navigation
        KeyCode::Char('k') | KeyCode::Up => app.move_up(),
        KeyCode::Char('j') | KeyCode::Down => app.move_down(),
        KeyCode::Char('g') | KeyCode::Home => app.move_to_first(),
        KeyCode::Char('G') | KeyCode::End => app.move_to_last(),

        // Notes
        KeyCode::Enter | KeyCode::Char('e') => app.edit_current(store),
        KeyCode::Char('n') => app.new_note(store),
        KeyCode::Char('d') | KeyCode::Delete => app.request_delete(store),

        // Search
        KeyCode::Char('/') => app.enter_search_mode(),
        KeyCode::Esc => app.clear_search(store),

        // Help
        KeyCode::Char('?') => app.toggle_help(),

        _ => {}
    }
}

/// Handle key events while editing a note
fn handle_editing_mode(app: &mut App, store: &mut NoteStore, code: KeyCode, modifiers: KeyModifiers) {
    match code {
        KeyCode::Char('s') if modifiers.contains(KeyModifiers::CONTROL) => {
            app.save(store);
        }
        KeyCode::Enter => {
            app.save(store);
            app.leave_editor();
        }
        KeyCode::Esc => app.leave_editor(),

        // Text input
        KeyCode::Char(c) if !modifiers.contains(KeyModifiers::CONTROL) => {
            app.editor.insert_char(c)
        }
        KeyCode::Backspace => app.editor.delete_char(),
        KeyCode::Delete => app.editor.delete_forward(),
        KeyCode::Left => app.editor.cursor_left(),
        KeyCode::Right => app.editor.cursor_right(),
        KeyCode::Home => app.editor.cursor_home(),
        KeyCode::End => app.editor.cursor_end(),

        _ => {}
    }
}

/// Handle key events in the search field
///
/// The list is re-filtered on every keystroke.
fn handle_search_mode(app: &mut App, store: &NoteStore, code: KeyCode) {
    match code {
        // Cancel search
        KeyCode::Esc => app.clear_search(store),

        // Confirm search (stay in filtered view)
        KeyCode::Enter => app.input_mode = InputMode::Normal,

        // Text input
        KeyCode::Char(c) => {
            app.search.insert_char(c);
            app.refresh(store);
        }
        KeyCode::Backspace => {
            app.search.delete_char();
            app.refresh(store);
        }
        KeyCode::Left => app.search.cursor_left(),
        KeyCode::Right => app.search.cursor_right(),

        _ => {}
    }
}

/// Handle the y/n answer to a delete confirmation
fn handle_confirm_mode(app: &mut App, store: &mut NoteStore, code: KeyCode) {
    match code {
        KeyCode::Char('y') | KeyCode::Char('Y') => app.confirm_delete(store),
        KeyCode::Char('n') | KeyCode::Char('N') | KeyCode::Esc => app.cancel_delete(store),
        _ => {}
    }
}

/// Initialize file-based logging for the TUI
///
/// Only active when SCRIBE_LOG is set; stderr belongs to the terminal UI.
fn init_tui_logging(config: &Config) {
    let Ok(log_level) = std::env::var("SCRIBE_LOG") else {
        return;
    };

    let log_path = config
        .log_file
        .clone()
        .unwrap_or_else(|| std::env::temp_dir().join("scribe-debug.log"));

    let log_file = match File::create(&log_path) {
        Ok(f) => f,
        Err(e) => {
            eprintln!("Warning: Could not create log file {:?}: {}", log_path, e);
            return;
        }
    };

    let env_filter = EnvFilter::new(format!(
        "scribe_core={},scribe_cli={}",
        log_level, log_level
    ));

    // Ignore error if already initialized
    let _ = tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .with_ansi(false)
        .with_writer(log_file)
        .try_init();

    info!("TUI logging initialized to {:?}", log_path);
}
