//! Scribe CLI
//!
//! Command-line and terminal interface for Scribe - a flat-file note list.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use scribe_core::{Config, NoteStore};

mod commands;
mod editor;
mod output;
mod tui;

use output::{Output, OutputFormat};

#[derive(Parser)]
#[command(name = "scribe")]
#[command(about = "Scribe - keep a list of short notes in a plain text file")]
#[command(version)]
#[command(propagate_version = true)]
struct Cli {
    /// Output as JSON
    #[arg(long, global = true)]
    json: bool,

    /// Quiet mode - minimal output
    #[arg(short, long, global = true)]
    quiet: bool,

    /// Notes file to use instead of the configured one
    #[arg(short, long, global = true, value_name = "PATH")]
    file: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the TUI interface
    Tui,
    /// List all notes
    #[command(alias = "ls")]
    List,
    /// Create a new note
    #[command(alias = "new")]
    Add {
        /// Note text (opens editor if not provided)
        text: Option<String>,
    },
    /// Edit a note
    Edit {
        /// Note number, as shown by `scribe list`
        number: usize,
        /// Replacement text (opens editor if not provided)
        text: Option<String>,
    },
    /// Delete a note
    #[command(alias = "rm")]
    Delete {
        /// Note number, as shown by `scribe list`
        number: usize,
        /// Skip the confirmation prompt
        #[arg(short, long)]
        yes: bool,
    },
    /// Search notes (case-insensitive)
    Search {
        /// Search query
        query: String,
    },
    /// Show or set configuration
    Config {
        #[command(subcommand)]
        command: Option<ConfigCommands>,
    },
    /// Show status (notes file, note count)
    Status,
}

#[derive(Subcommand, Clone)]
enum ConfigCommands {
    /// Show current configuration
    Show,
    /// Set a configuration value
    Set {
        /// Configuration key (notes_file, log_file)
        key: String,
        /// Configuration value
        value: String,
    },
}

fn main() {
    if let Err(e) = run(Cli::parse()) {
        eprintln!("Error: {:?}", e);
        if let Some(hint) = output::recovery_hint(&e) {
            eprintln!("\n{}", hint);
        }
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<()> {
    let output = Output::new(OutputFormat::from_flags(cli.json, cli.quiet));

    // Config commands work on the config file, not the notes
    if let Some(Commands::Config { command }) = &cli.command {
        return handle_config_command(command.clone(), &output);
    }

    let mut config = Config::load().context("Failed to load configuration")?;
    if let Some(file) = cli.file {
        config.notes_file = file;
    }

    // TUI is the default when no command given; it logs to a file instead of stderr
    let command = match cli.command {
        None | Some(Commands::Tui) => return tui::run(&config),
        Some(command) => command,
    };

    init_cli_logging();

    let mut store = NoteStore::open(&config)
        .with_context(|| format!("Failed to open notes file {:?}", config.notes_path()))?;

    match command {
        Commands::List => commands::note::list(&store, &output),
        Commands::Add { text } => commands::note::add(&mut store, text, &output),
        Commands::Edit { number, text } => commands::note::edit(&mut store, number, text, &output),
        Commands::Delete { number, yes } => {
            commands::note::delete(&mut store, number, yes, &output)
        }
        Commands::Search { query } => commands::note::search(&store, &query, &output),
        Commands::Status => commands::status::show(&store, &config, &output),
        Commands::Tui | Commands::Config { .. } => unreachable!(), // Handled above
    }
}

fn handle_config_command(command: Option<ConfigCommands>, output: &Output) -> Result<()> {
    match command {
        Some(ConfigCommands::Show) | None => commands::config::show(output),
        Some(ConfigCommands::Set { key, value }) => commands::config::set(key, value, output),
    }
}

/// Log to stderr, only if SCRIBE_LOG is set
fn init_cli_logging() {
    let Ok(log_level) = std::env::var("SCRIBE_LOG") else {
        return;
    };

    let env_filter = EnvFilter::new(format!(
        "scribe_core={},scribe_cli={}",
        log_level, log_level
    ));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .try_init();
}
