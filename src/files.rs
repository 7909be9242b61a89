//! File I/O glue
//!
//! Line-oriented text reading and JSON artifact reading/writing. Every
//! successful JSON write prints a confirmation line.

use colored::Colorize;
use eyre::{Context, Result};
use serde::Serialize;
use serde::de::DeserializeOwned;
use std::fs;
use std::path::Path;
use tracing::debug;

/// Read a line-oriented text file, one trimmed segment per line
pub fn read_lines(path: &Path) -> Result<Vec<String>> {
    debug!(path = %path.display(), "read_lines: called");
    let content = fs::read_to_string(path).context(format!("Failed to read {}", path.display()))?;
    Ok(content.lines().map(|line| line.trim().to_string()).collect())
}

/// Read a JSON file into a deserializable value
pub fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T> {
    debug!(path = %path.display(), "read_json: called");
    let content = fs::read_to_string(path).context(format!("Failed to read {}", path.display()))?;
    serde_json::from_str(&content).context(format!("Failed to parse JSON from {}", path.display()))
}

/// Write a value as pretty-printed JSON and confirm on the console
pub fn save_json<T: Serialize>(value: &T, path: &Path) -> Result<()> {
    debug!(path = %path.display(), "save_json: called");
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        fs::create_dir_all(parent).context(format!("Failed to create {}", parent.display()))?;
    }
    let content = serde_json::to_string_pretty(value).context("Failed to serialize JSON")?;
    fs::write(path, content).context(format!("Failed to write {}", path.display()))?;
    println!("{} {}.", "Saved to".green(), path.display());
    Ok(())
}
