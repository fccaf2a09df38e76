//! File sources for import
//!
//! A [`FileHandle`] is either a path on disk or an in-memory buffer. A
//! [`FileSelector`] stands in for the host's file-selection control and
//! yields the currently selected file, if any.

use crate::error::{TabularError, TabularResult};
use std::path::{Path, PathBuf};
use tracing::debug;

#[derive(Debug, Clone, PartialEq, Eq)]
enum FileContent {
    Path(PathBuf),
    Bytes(Vec<u8>),
}

/// A file to import: a name plus byte-readable content
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileHandle {
    name: String,
    content: FileContent,
}

impl FileHandle {
    /// Handle backed by a file on disk. The name is the path's file name.
    pub fn from_path<P: AsRef<Path>>(path: P) -> Self {
        let path = path.as_ref().to_path_buf();
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());
        Self {
            name,
            content: FileContent::Path(path),
        }
    }

    /// Handle backed by an in-memory buffer (e.g. an uploaded file)
    pub fn from_bytes(name: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            name: name.into(),
            content: FileContent::Bytes(bytes),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn path(&self) -> Option<&Path> {
        match &self.content {
            FileContent::Path(p) => Some(p),
            FileContent::Bytes(_) => None,
        }
    }

    /// Read the raw bytes. This is the only suspension point of an import.
    pub async fn read_bytes(&self) -> TabularResult<Vec<u8>> {
        match &self.content {
            FileContent::Path(path) => {
                debug!(path = %path.display(), "reading file");
                tokio::fs::read(path)
                    .await
                    .map_err(|e| TabularError::FileRead(e.to_string()))
            }
            FileContent::Bytes(bytes) => Ok(bytes.clone()),
        }
    }
}

/// Host file-selection control: yields the first attached file, if any
pub trait FileSelector {
    fn selected_file(&self) -> Option<FileHandle>;
}

/// Resolver closures act as selectors
impl<F> FileSelector for F
where
    F: Fn() -> Option<FileHandle>,
{
    fn selected_file(&self) -> Option<FileHandle> {
        self()
    }
}

/// A file input holding the files attached to it, in attachment order
#[derive(Debug, Clone, Default)]
pub struct FileInput {
    files: Vec<FileHandle>,
}

impl FileInput {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn attach(&mut self, file: FileHandle) {
        self.files.push(file);
    }

    pub fn clear(&mut self) {
        self.files.clear();
    }

    pub fn files(&self) -> &[FileHandle] {
        &self.files
    }
}

impl FileSelector for FileInput {
    fn selected_file(&self) -> Option<FileHandle> {
        self.files.first().cloned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_path_uses_file_name() {
        let handle = FileHandle::from_path("/tmp/reports/users.xlsx");
        assert_eq!(handle.name(), "users.xlsx");
        assert_eq!(handle.path(), Some(Path::new("/tmp/reports/users.xlsx")));
    }

    #[test]
    fn test_file_input_selects_first_attached() {
        let mut input = FileInput::new();
        assert!(input.selected_file().is_none());

        input.attach(FileHandle::from_bytes("first.xlsx", vec![1]));
        input.attach(FileHandle::from_bytes("second.xlsx", vec![2]));

        let selected = input.selected_file().unwrap();
        assert_eq!(selected.name(), "first.xlsx");

        input.clear();
        assert!(input.selected_file().is_none());
    }

    #[test]
    fn test_closure_selector() {
        let selector = || Some(FileHandle::from_bytes("upload.xlsx", Vec::new()));
        assert_eq!(selector.selected_file().unwrap().name(), "upload.xlsx");
    }

    #[tokio::test]
    async fn test_read_bytes_in_memory() {
        let handle = FileHandle::from_bytes("data.xlsx", vec![1, 2, 3]);
        assert_eq!(handle.read_bytes().await.unwrap(), vec![1, 2, 3]);
    }

    #[tokio::test]
    async fn test_read_bytes_missing_file() {
        let handle = FileHandle::from_path("/nonexistent/path/file.xlsx");
        let result = handle.read_bytes().await;
        assert!(matches!(result, Err(TabularError::FileRead(_))));
    }
}
