//! Config command handlers

use std::path::Path;

use anyhow::{Context, Result};

use scribe_core::Config;

use crate::output::{Output, OutputFormat};

/// Show current configuration
pub fn show(output: &Output) -> Result<()> {
    let config = Config::load().context("Failed to load configuration")?;

    match output.format {
        OutputFormat::Json => {
            println!(
                "{}",
                serde_json::json!({
                    "notes_file": config.notes_file,
                    "log_file": config.log_file,
                    "config_file": Config::config_file_path(),
                })
            );
        }
        OutputFormat::Quiet => {
            println!("{}", config.notes_file.display());
        }
        OutputFormat::Human => {
            println!("Configuration:");
            println!("  notes_file: {}", config.notes_file.display());
            println!(
                "  log_file:   {}",
                config
                    .log_file
                    .as_ref()
                    .map(|p| p.display().to_string())
                    .unwrap_or_else(|| "(not set)".to_string())
            );
            println!();
            println!("Config file: {}", Config::config_file_path().display());
        }
    }

    Ok(())
}

/// Set a configuration value
pub fn set(key: String, value: String, output: &Output) -> Result<()> {
    set_in(&Config::config_file_path(), &key, value, output)
}

/// Update one key of the config file at `path`
///
/// Environment overrides are not applied, so only the file's own values and
/// the new one are written back.
fn set_in(path: &Path, key: &str, value: String, output: &Output) -> Result<()> {
    let mut config = Config::read_file(path).context("Failed to load configuration")?;

    let value = if value == "none" { String::new() } else { value };
    config.set(key, &value)?;

    config
        .save_to_path(path)
        .context("Failed to save configuration")?;

    output.success(&format!("Set {} = {}", key, value));

    Ok(())
}
