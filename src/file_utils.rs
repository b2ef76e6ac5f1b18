use anyhow::{Context, Result};
use std::fs;
use std::io::Read;
use std::path::Path;

// @module: Input and output file utilities

// @struct: File operations utility
pub struct FileManager;

impl FileManager {
    // @checks: File existence
    pub fn file_exists<P: AsRef<Path>>(path: P) -> bool {
        path.as_ref().exists() && path.as_ref().is_file()
    }

    // @creates: Directory and parents if needed
    pub fn ensure_dir<P: AsRef<Path>>(path: P) -> Result<()> {
        let path = path.as_ref();
        if !path.as_os_str().is_empty() && !path.exists() {
            fs::create_dir_all(path)?;
        }
        Ok(())
    }

    /// Read a text file
    pub fn read_to_string<P: AsRef<Path>>(path: P) -> Result<String> {
        let path = path.as_ref();
        fs::read_to_string(path).with_context(|| format!("Failed to read file: {:?}", path))
    }

    /// Read input text from `path`, or from stdin when `path` is absent or `-`
    pub fn read_input(path: Option<&Path>) -> Result<String> {
        match path {
            Some(p) if p != Path::new("-") => Self::read_to_string(p),
            _ => Self::read_from(std::io::stdin().lock()),
        }
    }

    /// Read everything from `reader` as UTF-8
    pub fn read_from<R: Read>(mut reader: R) -> Result<String> {
        let mut content = String::new();
        reader
            .read_to_string(&mut content)
            .context("Failed to read input")?;
        Ok(content)
    }

    // @writes: Content to file, creating parent directories
    pub fn write_to_file<P: AsRef<Path>>(path: P, content: &str) -> Result<()> {
        let path = path.as_ref();
        if let Some(parent) = path.parent() {
            Self::ensure_dir(parent)?;
        }
        fs::write(path, content).with_context(|| format!("Failed to write file: {:?}", path))
    }
}
