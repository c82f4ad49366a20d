//! UI rendering

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, List, ListItem, ListState, Paragraph, Wrap},
    Frame,
};

use scribe_core::NoteStore;

use super::app::{App, InputMode};
use crate::output::truncate;

/// Main UI rendering function
pub fn draw(frame: &mut Frame, app: &App, store: &NoteStore) {
    // Main area, search field, status bar
    let outer_chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(3),
            Constraint::Length(3),
            Constraint::Length(1),
        ])
        .split(frame.area());

    // Note list on the left, editor on the right
    let pane_chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(40), Constraint::Percentage(60)])
        .split(outer_chunks[0]);

    draw_list_pane(frame, app, store, pane_chunks[0]);
    draw_editor_pane(frame, app, store, pane_chunks[1]);
    draw_search_field(frame, app, outer_chunks[1]);
    draw_status_bar(frame, app, outer_chunks[2]);

    if app.input_mode == InputMode::ConfirmDelete {
        draw_confirm_delete(frame, store);
    }

    if app.show_help {
        draw_help_overlay(frame);
    }

    if let Some(message) = &app.error_message {
        draw_error_modal(frame, message);
    }
}

fn pane_border(active: bool) -> Style {
    if active {
        Style::default().add_modifier(Modifier::BOLD)
    } else {
        Style::default()
    }
}

/// Draw the note list (left)
fn draw_list_pane(frame: &mut Frame, app: &App, store: &NoteStore, area: Rect) {
    let is_active = app.input_mode == InputMode::Normal;
    let max_len = area.width.saturating_sub(4) as usize;
    let selected = store.selected_index();

    let items: Vec<ListItem> = app
        .visible_indices()
        .into_iter()
        .filter_map(|i| store.notes().get(i).map(|note| (i, note)))
        .map(|(i, note)| {
            let style = if Some(i) == selected {
                Style::default().fg(Color::Cyan)
            } else {
                Style::default()
            };
            ListItem::new(Line::from(Span::styled(
                truncate(note.as_str(), max_len),
                style,
            )))
        })
        .collect();

    let title = if app.search.text().trim().is_empty() {
        format!(" Notes ({}) ", store.notes().len())
    } else {
        format!(
            " Notes ({} of {}) ",
            app.visible_count(),
            store.notes().len()
        )
    };

    let block = Block::default()
        .title(title)
        .borders(Borders::ALL)
        .border_style(pane_border(is_active));

    let highlight_style = if is_active {
        Style::default()
            .add_modifier(Modifier::BOLD)
            .add_modifier(Modifier::REVERSED)
    } else {
        Style::default().add_modifier(Modifier::REVERSED)
    };

    let list = List::new(items)
        .block(block)
        .highlight_style(highlight_style);

    let mut state = ListState::default();
    if app.visible_count() > 0 {
        state.select(Some(app.list_index));
    }

    frame.render_stateful_widget(list, area, &mut state);
}

/// Draw the editor (right)
fn draw_editor_pane(frame: &mut Frame, app: &App, store: &NoteStore, area: Rect) {
    let is_active = app.input_mode == InputMode::Editing;

    let title = match store.selection() {
        Some(_) => " Edit Note ",
        None => " New Note ",
    };

    let block = Block::default()
        .title(title)
        .borders(Borders::ALL)
        .border_style(pane_border(is_active));

    let inner_width = area.width.saturating_sub(2).max(1) as usize;
    let lines = wrap_chars(app.editor.text(), inner_width);

    let content: Vec<Line> = if app.editor.text().is_empty() && !is_active {
        vec![Line::from(Span::styled(
            "Press n for a new note, Enter to edit the highlighted one",
            Style::default().add_modifier(Modifier::DIM),
        ))]
    } else {
        lines.into_iter().map(Line::from).collect()
    };

    frame.render_widget(Paragraph::new(content).block(block), area);

    if is_active {
        let cursor = app.editor.cursor();
        let x = area.x + 1 + (cursor % inner_width) as u16;
        let y = area.y + 1 + (cursor / inner_width) as u16;
        if y < area.y + area.height.saturating_sub(1) {
            frame.set_cursor_position((x, y));
        }
    }
}

/// Split text into rows of at most `width` chars
fn wrap_chars(text: &str, width: usize) -> Vec<String> {
    let chars: Vec<char> = text.chars().collect();
    if chars.is_empty() {
        return vec![String::new()];
    }
    chars
        .chunks(width)
        .map(|chunk| chunk.iter().collect())
        .collect()
}

/// Draw the search field
fn draw_search_field(frame: &mut Frame, app: &App, area: Rect) {
    let is_active = app.input_mode == InputMode::Search;

    let block = Block::default()
        .title(" Search ")
        .borders(Borders::ALL)
        .border_style(pane_border(is_active));

    let line = Line::from(vec![
        Span::styled("/", Style::default().fg(Color::Cyan)),
        Span::raw(app.search.text()),
    ]);

    frame.render_widget(Paragraph::new(line).block(block), area);

    if is_active {
        let cursor_x = area.x + 2 + app.search.cursor() as u16;
        frame.set_cursor_position((cursor_x, area.y + 1));
    }
}

/// Draw status bar at the bottom
fn draw_status_bar(frame: &mut Frame, app: &App, area: Rect) {
    let content = if let Some(msg) = &app.status_message {
        msg.clone()
    } else {
        match app.input_mode {
            InputMode::Normal => {
                "n:new  Enter/e:edit  d:delete  /:search  ?:help  q:quit".to_string()
            }
            InputMode::Editing => "Enter:save & close  Ctrl-s:save  Esc:cancel".to_string(),
            InputMode::Search => "Type to filter  Enter:keep  Esc:clear".to_string(),
            InputMode::ConfirmDelete => "y:delete  n:keep".to_string(),
        }
    };

    let paragraph = Paragraph::new(content).style(Style::default().add_modifier(Modifier::DIM));

    frame.render_widget(paragraph, area);
}

/// Centered popup area of at most the given size
fn popup_area(frame: &Frame, width: u16, height: u16) -> Rect {
    let area = frame.area();
    let popup_width = width.min(area.width.saturating_sub(4));
    let popup_height = height.min(area.height.saturating_sub(4));
    let popup_x = (area.width.saturating_sub(popup_width)) / 2;
    let popup_y = (area.height.saturating_sub(popup_height)) / 2;
    Rect::new(popup_x, popup_y, popup_width, popup_height)
}

/// Draw the delete confirmation
fn draw_confirm_delete(frame: &mut Frame, store: &NoteStore) {
    let area = popup_area(frame, 50, 7);
    frame.render_widget(Clear, area);

    let preview = store
        .selection()
        .map(|note| truncate(note.as_str(), 44))
        .unwrap_or_default();

    let text = vec![
        Line::from("Are you sure you want to delete the note?"),
        Line::from(""),
        Line::from(Span::styled(
            preview,
            Style::default().add_modifier(Modifier::DIM),
        )),
        Line::from(""),
        Line::from("[y] Yes   [n] No"),
    ];

    let block = Block::default()
        .title(" Confirm Delete ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Yellow));

    frame.render_widget(Paragraph::new(text).block(block), area);
}

/// Draw an error modal
fn draw_error_modal(frame: &mut Frame, message: &str) {
    let area = popup_area(frame, 60, 12);
    frame.render_widget(Clear, area);

    let mut text: Vec<Line> = message.lines().map(|l| Line::from(l.to_string())).collect();
    text.push(Line::from(""));
    text.push(Line::from(Span::styled(
        "Press any key to continue",
        Style::default().add_modifier(Modifier::DIM),
    )));

    let block = Block::default()
        .title(" Error ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Red));

    let paragraph = Paragraph::new(text)
        .block(block)
        .wrap(Wrap { trim: true });
    frame.render_widget(paragraph, area);
}

/// Draw help overlay
fn draw_help_overlay(frame: &mut Frame) {
    let area = popup_area(frame, 50, 20);
    frame.render_widget(Clear, area);

    let help_text = vec![
        Line::from(vec![Span::styled(
            "Keyboard Shortcuts",
            Style::default().add_modifier(Modifier::BOLD),
        )]),
        Line::from(""),
        Line::from("Navigation:"),
        Line::from("  j/k, ↑/↓    Move up/down"),
        Line::from("  g/G         Jump to first/last note"),
        Line::from(""),
        Line::from("Notes:"),
        Line::from("  n           New note"),
        Line::from("  Enter, e    Edit highlighted note"),
        Line::from("  Ctrl-s      Save while editing"),
        Line::from("  Esc         Leave editor"),
        Line::from("  d           Delete highlighted note"),
        Line::from(""),
        Line::from("  /           Search"),
        Line::from("  q           Quit"),
        Line::from(""),
        Line::from(vec![Span::styled(
            "Press any key to close",
            Style::default().add_modifier(Modifier::DIM),
        )]),
    ];

    let block = Block::default()
        .title(" Help ")
        .borders(Borders::ALL)
        .border_style(Style::default().add_modifier(Modifier::BOLD));

    let paragraph = Paragraph::new(help_text).block(block);
    frame.render_widget(paragraph, area);
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::{backend::TestBackend, Terminal};
    use scribe_core::NoteFile;
    use tempfile::TempDir;

    fn buffer_text(terminal: &Terminal<TestBackend>) -> String {
        terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|cell| cell.symbol())
            .collect()
    }

    #[test]
    fn test_wrap_chars() {
        assert_eq!(wrap_chars("", 4), vec![""]);
        assert_eq!(wrap_chars("abcdefghij", 4), vec!["abcd", "efgh", "ij"]);
        assert_eq!(wrap_chars("äöü", 2), vec!["äö", "ü"]);
    }

    #[test]
    fn test_draw_shows_notes_and_search() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("notes.txt");
        std::fs::write(&path, "Apple\nbanana").unwrap();
        let store = NoteStore::with_file(NoteFile::new(path)).unwrap();
        let app = App::new(&store);

        let mut terminal = Terminal::new(TestBackend::new(80, 20)).unwrap();
        terminal.draw(|frame| draw(frame, &app, &store)).unwrap();

        let text = buffer_text(&terminal);
        assert!(text.contains("Notes (2)"));
        assert!(text.contains("Apple"));
        assert!(text.contains("banana"));
        assert!(text.contains("Search"));
    }

    #[test]
    fn test_draw_confirm_delete_popup() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("notes.txt");
        std::fs::write(&path, "doomed").unwrap();
        let mut store = NoteStore::with_file(NoteFile::new(path)).unwrap();
        let mut app = App::new(&store);
        app.request_delete(&mut store);

        let mut terminal = Terminal::new(TestBackend::new(80, 20)).unwrap();
        terminal.draw(|frame| draw(frame, &app, &store)).unwrap();

        assert!(buffer_text(&terminal).contains("Confirm Delete"));
    }

    #[test]
    fn test_draw_error_modal_shows_each_line() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("notes.txt");
        std::fs::write(&path, "a").unwrap();
        let store = NoteStore::with_file(NoteFile::new(path)).unwrap();
        let mut app = App::new(&store);
        app.set_error("Failed to save note: disk full\n\nFree up disk space.");

        let mut terminal = Terminal::new(TestBackend::new(80, 24)).unwrap();
        terminal.draw(|frame| draw(frame, &app, &store)).unwrap();

        let text = buffer_text(&terminal);
        assert!(text.contains("Failed to save note: disk full"));
        assert!(text.contains("Free up disk space."));
        assert!(text.contains("Press any key to continue"));
    }
}
