//! Reading and writing documents
//!
//! A document is read whole. Before reading, the path is checked so that
//! directories, oversized files and binary files are refused with a message
//! the status bar can show.

use std::fs::{self, File};
use std::io::{ErrorKind, Read};
use std::path::Path;

use anyhow::{Context, Result};

/// Largest file the editor will load (50 MB)
pub const MAX_FILE_SIZE: u64 = 50 * 1024 * 1024;

/// Bytes sniffed for NUL when deciding whether a file is binary
const BINARY_SNIFF_LEN: usize = 8192;

/// Why a path cannot be opened as a document
#[derive(Debug, Clone, PartialEq)]
pub enum FileOpenError {
    PermissionDenied,
    IsDirectory,
    /// Contains NUL bytes near the start
    BinaryFile,
    TooLarge { size_mb: f64 },
    IoError(String),
}

impl std::fmt::Display for FileOpenError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::PermissionDenied => write!(f, "permission denied"),
            Self::IsDirectory => write!(f, "is a directory"),
            Self::BinaryFile => write!(f, "binary file"),
            Self::TooLarge { size_mb } => write!(
                f,
                "file too large ({:.1} MB, max {} MB)",
                size_mb,
                MAX_FILE_SIZE / (1024 * 1024)
            ),
            Self::IoError(msg) => write!(f, "{}", msg),
        }
    }
}

impl std::error::Error for FileOpenError {}

/// Check that `path` can be opened as a document.
///
/// `Ok(false)` means the file does not exist yet (a new file);
/// `Ok(true)` means it exists and passes the checks.
pub fn validate_file_for_opening(path: &Path) -> Result<bool, FileOpenError> {
    let metadata = match fs::metadata(path) {
        Ok(metadata) => metadata,
        Err(e) if e.kind() == ErrorKind::NotFound => return Ok(false),
        Err(e) if e.kind() == ErrorKind::PermissionDenied => {
            return Err(FileOpenError::PermissionDenied)
        }
        Err(e) => return Err(FileOpenError::IoError(e.to_string())),
    };

    if metadata.is_dir() {
        return Err(FileOpenError::IsDirectory);
    }
    if metadata.len() > MAX_FILE_SIZE {
        return Err(FileOpenError::TooLarge {
            size_mb: metadata.len() as f64 / (1024.0 * 1024.0),
        });
    }
    Ok(true)
}

/// Whether the start of `content` contains a NUL byte
pub fn is_likely_binary(content: &[u8]) -> bool {
    content[..content.len().min(BINARY_SNIFF_LEN)].contains(&0)
}

/// Read a document. `None` means the file does not exist yet.
pub fn read_document(path: &Path) -> Result<Option<Vec<u8>>> {
    if !validate_file_for_opening(path)? {
        tracing::debug!(path = %path.display(), "File does not exist, starting empty");
        return Ok(None);
    }

    let mut content = Vec::new();
    File::open(path)
        .and_then(|mut file| file.read_to_end(&mut content))
        .with_context(|| format!("Failed to read {}", path.display()))?;

    if is_likely_binary(&content) {
        return Err(FileOpenError::BinaryFile.into());
    }
    Ok(Some(content))
}

/// Write a document, replacing the file. Returns the bytes written.
pub fn write_document(path: &Path, content: &[u8]) -> Result<usize> {
    fs::write(path, content).with_context(|| format!("Failed to write {}", path.display()))?;
    Ok(content.len())
}

/// Base name of a path for messages
pub fn filename_for_display(path: &Path) -> String {
    path.file_name()
        .unwrap_or(path.as_os_str())
        .to_string_lossy()
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::{NamedTempFile, TempDir};

    #[test]
    fn test_missing_file_is_new() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("new.c");
        assert_eq!(validate_file_for_opening(&path), Ok(false));
        assert!(read_document(&path).unwrap().is_none());
    }

    #[test]
    fn test_directory_is_refused() {
        let dir = TempDir::new().unwrap();
        assert_eq!(
            validate_file_for_opening(dir.path()),
            Err(FileOpenError::IsDirectory)
        );
        assert!(read_document(dir.path()).is_err());
    }

    #[test]
    fn test_read_text_file() {
        let mut temp = NamedTempFile::new().unwrap();
        temp.write_all(b"int x;\n").unwrap();
        temp.flush().unwrap();
        assert_eq!(read_document(temp.path()).unwrap(), Some(b"int x;\n".to_vec()));
    }

    #[test]
    fn test_binary_file_is_refused() {
        let mut temp = NamedTempFile::new().unwrap();
        temp.write_all(b"Hello\x00World").unwrap();
        temp.flush().unwrap();
        let err = read_document(temp.path()).unwrap_err();
        assert_eq!(err.to_string(), "binary file");
    }

    #[test]
    fn test_write_document() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("out.txt");
        assert_eq!(write_document(&path, b"a\nb\n").unwrap(), 4);
        assert_eq!(fs::read(&path).unwrap(), b"a\nb\n");
    }

    #[test]
    fn test_filename_for_display() {
        assert_eq!(filename_for_display(Path::new("/tmp/dir/main.c")), "main.c");
    }
}
