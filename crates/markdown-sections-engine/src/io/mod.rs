//! File access for markdown documents.
//!
//! Reads are scoped: the whole file is loaded into memory and the handle
//! released before any parsing. Writes open, write and close in one call.

pub mod markdown_file;

use relative_path::RelativePath;
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::InvalidPathError;

pub use markdown_file::MarkdownFile;

/// The only extension accepted for documents.
pub const DOCUMENT_EXTENSION: &str = "md";

#[derive(Debug, thiserror::Error)]
pub enum IoError {
    #[error("File not found: {0}")]
    NotFound(PathBuf),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Fails fast unless `path` ends in `.md`.
pub fn validate_document_path(path: &Path) -> Result<(), InvalidPathError> {
    match path.extension() {
        Some(ext) if ext == DOCUMENT_EXTENSION => Ok(()),
        _ => Err(InvalidPathError {
            path: path.to_path_buf(),
            expected: DOCUMENT_EXTENSION,
        }),
    }
}

/// Resolves a user-supplied path, relative ones against `root` when given.
pub fn resolve_document_path(path: &str, root: Option<&Path>) -> PathBuf {
    match root {
        Some(root) if !Path::new(path).is_absolute() => RelativePath::new(path).to_path(root),
        _ => PathBuf::from(path),
    }
}

/// Read a markdown file and return its content
pub fn read_document(path: &Path) -> Result<String, IoError> {
    if !path.exists() {
        return Err(IoError::NotFound(path.to_path_buf()));
    }
    fs::read_to_string(path).map_err(IoError::Io)
}

/// Write content to a markdown file
pub fn write_document(path: &Path, content: &str) -> Result<(), IoError> {
    // Create parent directories if they don't exist
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        fs::create_dir_all(parent).map_err(IoError::Io)?;
    }

    fs::write(path, content).map_err(IoError::Io)
}
