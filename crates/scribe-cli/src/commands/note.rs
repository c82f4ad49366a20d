//! Note command handlers
//!
//! Notes are addressed by their 1-based number in `scribe list`. The number
//! is resolved to the stored text before selecting, so edits and deletes
//! always target what is actually on disk.

use anyhow::{bail, Context, Result};

use scribe_core::{DeleteOutcome, NoteStore, SaveOutcome};

use crate::editor::{confirm, edit_text, flatten_note_text, note_template, single_line};
use crate::output::{truncate, Output};

/// List all notes
pub fn list(store: &NoteStore, output: &Output) -> Result<()> {
    output.print_notes(store.notes());
    Ok(())
}

/// Create a new note
pub fn add(store: &mut NoteStore, text: Option<String>, output: &Output) -> Result<()> {
    let text = match text {
        Some(t) => single_line(&t),
        None => read_from_editor(None)?,
    };

    store.begin_new();
    let outcome = store.save(&text).context("Failed to save note")?;
    report_save(store, &outcome, output);
    Ok(())
}

/// Replace the text of an existing note
pub fn edit(
    store: &mut NoteStore,
    number: usize,
    text: Option<String>,
    output: &Output,
) -> Result<()> {
    let index = resolve_number(store, number)?;
    let current = store
        .select_index(index)
        .map(|note| note.as_str().to_string())
        .with_context(|| format!("Note #{} disappeared", number))?;

    let text = match text {
        Some(t) => single_line(&t),
        None => read_from_editor(Some(&current))?,
    };

    let outcome = store.save(&text).context("Failed to save note")?;
    report_save(store, &outcome, output);
    Ok(())
}

/// Delete a note, asking for confirmation first
pub fn delete(store: &mut NoteStore, number: usize, yes: bool, output: &Output) -> Result<()> {
    let index = resolve_number(store, number)?;
    let preview = store
        .select_index(index)
        .map(|note| truncate(note.as_str(), 60))
        .with_context(|| format!("Note #{} disappeared", number))?;

    if !yes {
        if !output.should_prompt() {
            bail!("Refusing to delete without confirmation. Pass --yes to skip the prompt.");
        }
        println!("Delete note #{}: {}", number, preview);
        if !confirm("Are you sure?")? {
            store.begin_new();
            println!("Cancelled.");
            return Ok(());
        }
    }

    match store.delete().context("Failed to delete note")? {
        DeleteOutcome::Deleted { .. } => {
            output.success(&format!("Deleted note #{}", number));
        }
        DeleteOutcome::NoSelection | DeleteOutcome::NotFound { .. } => {
            output.message("Nothing to delete.");
        }
    }

    Ok(())
}

/// Print notes matching a query
pub fn search(store: &NoteStore, query: &str, output: &Output) -> Result<()> {
    let hits = store.search(query);
    output.print_matches(&hits, store.notes().len());
    Ok(())
}

/// Convert a 1-based note number into an index
fn resolve_number(store: &NoteStore, number: usize) -> Result<usize> {
    let count = store.notes().len();
    if count == 0 {
        bail!("There are no notes yet.");
    }
    if number == 0 || number > count {
        bail!("No note #{}. Valid numbers are 1 to {}.", number, count);
    }
    Ok(number - 1)
}

fn read_from_editor(existing: Option<&str>) -> Result<String> {
    let content = edit_text(&note_template(existing)).context("Failed to edit note")?;
    Ok(flatten_note_text(&content))
}

fn report_save(store: &NoteStore, outcome: &SaveOutcome, output: &Output) {
    let number = store.selected_index().map(|i| i + 1).unwrap_or_default();
    match outcome {
        SaveOutcome::Created { .. } => output.success(&format!("Saved new note #{}", number)),
        SaveOutcome::Updated { .. } => output.success(&format!("Updated note #{}", number)),
        SaveOutcome::SkippedEmpty => output.message("Nothing to save: the note is empty."),
    }
}
