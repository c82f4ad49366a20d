//! Status command handler

use anyhow::Result;

use scribe_core::{Config, NoteStore};

use crate::output::{Output, OutputFormat};

/// Show status information
pub fn show(store: &NoteStore, config: &Config, output: &Output) -> Result<()> {
    let file = store.file();
    let size = std::fs::metadata(file.path()).map(|m| m.len()).ok();

    match output.format {
        OutputFormat::Json => {
            println!(
                "{}",
                serde_json::json!({
                    "notes_file": file.path(),
                    "exists": file.exists(),
                    "size": size,
                    "notes": store.notes().len(),
                    "log_file": config.log_file,
                })
            );
        }
        OutputFormat::Quiet => {
            println!("{}", store.notes().len());
        }
        OutputFormat::Human => {
            println!("Scribe Status");
            println!("=============");
            println!();
            println!("Storage:");
            println!("  File:   {}", file.path().display());
            match size {
                Some(bytes) => println!("  Size:   {} bytes", bytes),
                None => println!("  Size:   (not created yet)"),
            }
            println!();
            println!("Contents:");
            println!("  Notes:  {}", store.notes().len());
        }
    }

    Ok(())
}
