//! Location of the persisted session file.

use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};
use directories::ProjectDirs;

const STORAGE_FILE: &str = "storage.json";

/// Get the storage file path, creating the data directory if needed.
pub fn storage_path() -> Result<PathBuf> {
    let dirs =
        ProjectDirs::from("", "", "campus").context("Could not determine data directory")?;

    let data_dir = dirs.data_dir();
    fs::create_dir_all(data_dir).context("Failed to create data directory")?;

    Ok(data_dir.join(STORAGE_FILE))
}
