use std::path::Path;
use tokio::fs;

use crate::errors::{I18nError, Result};

// @module: File and directory utilities

// @struct: File operations utility
pub struct FileManager;

impl FileManager {
    // @checks: File existence
    pub fn file_exists<P: AsRef<Path>>(path: P) -> bool {
        path.as_ref().exists() && path.as_ref().is_file()
    }

    // @creates: Directory and parents if needed
    pub async fn ensure_dir<P: AsRef<Path>>(path: P) -> Result<()> {
        let path = path.as_ref();
        if !path.exists() {
            fs::create_dir_all(path).await?;
        }
        Ok(())
    }

    /// Read a file to a string, reporting a missing file as `FileNotFound`
    pub async fn read_to_string<P: AsRef<Path>>(path: P) -> Result<String> {
        let path = path.as_ref();
        fs::read_to_string(path)
            .await
            .map_err(|e| I18nError::from_read(e, path))
    }

    /// Write a string to a file, replacing any previous content
    pub async fn write_to_file<P: AsRef<Path>>(path: P, content: &str) -> Result<()> {
        let path = path.as_ref();
        // Ensure the parent directory exists
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                Self::ensure_dir(parent).await?;
            }
        }

        fs::write(path, content).await?;
        Ok(())
    }
}
