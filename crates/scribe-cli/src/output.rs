//! Output formatting for CLI
//!
//! Provides consistent output formatting across all commands:
//! - Human-readable default output
//! - JSON output (--json flag)
//! - Quiet mode for scripting (--quiet flag)

use serde::Serialize;

use scribe_core::{Note, NoteCollection, StorageError};

/// Output format options
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    /// Human-readable output (default)
    Human,
    /// JSON output
    Json,
    /// Quiet mode - minimal output
    Quiet,
}

impl OutputFormat {
    /// Create format from CLI flags
    pub fn from_flags(json: bool, quiet: bool) -> Self {
        if quiet {
            OutputFormat::Quiet
        } else if json {
            OutputFormat::Json
        } else {
            OutputFormat::Human
        }
    }
}

/// A note as shown to the user: 1-based number plus text
#[derive(Debug, Serialize, PartialEq, Eq)]
pub struct NoteRow<'a> {
    pub number: usize,
    pub text: &'a str,
}

impl<'a> NoteRow<'a> {
    pub fn new(index: usize, note: &'a Note) -> Self {
        Self {
            number: index + 1,
            text: note.as_str(),
        }
    }
}

/// Output helper for consistent formatting
pub struct Output {
    /// The output format
    pub format: OutputFormat,
}

impl Output {
    pub fn new(format: OutputFormat) -> Self {
        Self { format }
    }

    /// Print every note with its number
    pub fn print_notes(&self, notes: &NoteCollection) {
        let rows: Vec<_> = notes
            .iter()
            .enumerate()
            .map(|(i, note)| NoteRow::new(i, note))
            .collect();

        if rows.is_empty() && self.format == OutputFormat::Human {
            println!("No notes yet. Add one with: scribe add \"text\"");
            return;
        }

        self.print_rows(&rows);
        if self.format == OutputFormat::Human {
            println!("\n{} note(s)", rows.len());
        }
    }

    /// Print search hits out of a total
    pub fn print_matches(&self, hits: &[(usize, &Note)], total: usize) {
        let rows: Vec<_> = hits.iter().map(|(i, note)| NoteRow::new(*i, note)).collect();

        if rows.is_empty() && self.format == OutputFormat::Human {
            println!("No matching notes.");
            return;
        }

        self.print_rows(&rows);
        if self.format == OutputFormat::Human {
            println!("\n{} of {} note(s) match", rows.len(), total);
        }
    }

    fn print_rows(&self, rows: &[NoteRow<'_>]) {
        match self.format {
            OutputFormat::Human => {
                let width = rows.last().map(|r| r.number.to_string().len()).unwrap_or(1);
                for row in rows {
                    println!("{:>width$}  {}", row.number, row.text, width = width);
                }
            }
            OutputFormat::Json => match serde_json::to_string_pretty(rows) {
                Ok(json) => println!("{}", json),
                Err(e) => eprintln!("Failed to serialize notes: {}", e),
            },
            OutputFormat::Quiet => {
                for row in rows {
                    println!("{}", row.text);
                }
            }
        }
    }

    /// Print a success message
    pub fn success(&self, message: &str) {
        match self.format {
            OutputFormat::Human => println!("✓ {}", message),
            OutputFormat::Json => {
                println!(
                    "{}",
                    serde_json::json!({"status": "success", "message": message})
                );
            }
            OutputFormat::Quiet => {}
        }
    }

    /// Check if we should prompt for confirmation
    pub fn should_prompt(&self) -> bool {
        self.format == OutputFormat::Human
    }

    /// Print an informational message
    pub fn message(&self, msg: &str) {
        match self.format {
            OutputFormat::Human => println!("{}", msg),
            OutputFormat::Json => {
                println!("{}", serde_json::json!({"message": msg}));
            }
            OutputFormat::Quiet => {}
        }
    }
}

/// Storage error text followed by its recovery suggestion, if any
pub fn storage_error_message(error: &StorageError) -> String {
    match error.recovery_suggestion() {
        Some(hint) => format!("{}\n\n{}", error, hint),
        None => error.to_string(),
    }
}

/// Recovery suggestion for the first storage error in an error chain
pub fn recovery_hint(error: &anyhow::Error) -> Option<&'static str> {
    error
        .chain()
        .find_map(|cause| cause.downcast_ref::<StorageError>())
        .and_then(StorageError::recovery_suggestion)
}

/// Truncate a string to max chars, adding "..." if truncated
pub fn truncate(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else {
        let kept: String = s.chars().take(max_len.saturating_sub(3)).collect();
        format!("{}...", kept)
    }
}
