//
//  atlassian-api
//  config/file.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! Configuration file I/O helpers.
//!
//! Higher level loading and parsing lives in [`Config`](super::Config).

use std::path::Path;

use anyhow::{Context, Result};

/// Reads the configuration file at `path`.
///
/// # Parameters
///
/// * `path` - The file to read
///
/// # Returns
///
/// The raw file contents.
///
/// # Errors
///
/// Returns an error naming `path` if the file cannot be read.
pub fn read_config_file(path: &Path) -> Result<String> {
    std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read configuration file {}", path.display()))
}

/// Writes `content` to `path`, creating parent directories as needed.
///
/// # Parameters
///
/// * `path` - Destination file, overwritten if present
/// * `content` - The serialized configuration
///
/// # Errors
///
/// Returns an error naming the directory or file that could not be
/// created or written.
pub fn write_config_file(path: &Path, content: &str) -> Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create directory {}", parent.display()))?;
    }
    std::fs::write(path, content)
        .with_context(|| format!("Failed to write configuration file {}", path.display()))?;
    Ok(())
}

/// Returns `true` if a configuration file exists at `path`.
///
/// # Notes
///
/// A missing file is not an error: [`Config::load_from`](super::Config::load_from)
/// falls back to defaults.
pub fn config_exists(path: &Path) -> bool {
    path.exists()
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_write_creates_parents() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("a").join("b").join("config.toml");
        assert!(!config_exists(&path));

        write_config_file(&path, "[core]\n").unwrap();
        assert!(config_exists(&path));
        assert_eq!(read_config_file(&path).unwrap(), "[core]\n");
    }

    #[test]
    fn test_read_missing_file_names_path() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("missing.toml");
        let err = read_config_file(&path).unwrap_err();
        assert!(format!("{err}").contains("missing.toml"));
    }
}
