//! Where the snapshot blob lives

use std::fs;
use std::path::{Path, PathBuf};

use super::error::StoreError;

/// Storage for the single serialized snapshot
pub trait SnapshotBackend {
    /// Read the blob, `None` if nothing has been saved yet
    fn read(&self) -> Result<Option<String>, StoreError>;

    /// Replace the blob
    fn write(&mut self, blob: &str) -> Result<(), StoreError>;
}

/// JSON file on disk
#[derive(Debug, Clone)]
pub struct FileBackend {
    path: PathBuf,
}

impl FileBackend {
    /// Default file name inside the data directory
    pub const FILE_NAME: &'static str = "categories.json";

    /// Use the given file path
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Path of the backing file
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl SnapshotBackend for FileBackend {
    fn read(&self) -> Result<Option<String>, StoreError> {
        if !self.path.exists() {
            return Ok(None);
        }
        fs::read_to_string(&self.path).map(Some).map_err(|e| StoreError::io(&self.path, e))
    }

    fn write(&mut self, blob: &str) -> Result<(), StoreError> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent).map_err(|e| StoreError::io(parent, e))?;
            }
        }
        fs::write(&self.path, blob).map_err(|e| StoreError::io(&self.path, e))
    }
}

/// In-process blob, used for tests and embedding
#[derive(Debug, Clone, Default)]
pub struct MemoryBackend {
    blob: Option<String>,
}

impl MemoryBackend {
    /// Start with an existing blob
    pub fn with_blob(blob: impl Into<String>) -> Self {
        Self { blob: Some(blob.into()) }
    }

    /// Current blob contents
    pub fn blob(&self) -> Option<&str> {
        self.blob.as_deref()
    }
}

impl SnapshotBackend for MemoryBackend {
    fn read(&self) -> Result<Option<String>, StoreError> {
        Ok(self.blob.clone())
    }

    fn write(&mut self, blob: &str) -> Result<(), StoreError> {
        self.blob = Some(blob.to_string());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn file_backend_missing_file_reads_none() {
        let temp_dir = TempDir::new().unwrap();
        let backend = FileBackend::new(temp_dir.path().join("missing.json"));
        assert!(backend.read().unwrap().is_none());
    }

    #[test]
    fn file_backend_creates_parent_directories() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("nested").join("dir").join("categories.json");
        let mut backend = FileBackend::new(&path);

        backend.write("[]").unwrap();

        assert!(path.exists());
        assert_eq!(backend.read().unwrap().as_deref(), Some("[]"));
    }

    #[test]
    fn file_backend_write_overwrites() {
        let temp_dir = TempDir::new().unwrap();
        let mut backend = FileBackend::new(temp_dir.path().join("categories.json"));

        backend.write("first").unwrap();
        backend.write("second").unwrap();

        assert_eq!(backend.read().unwrap().as_deref(), Some("second"));
    }

    #[test]
    fn file_backend_reports_io_errors() {
        let temp_dir = TempDir::new().unwrap();
        // A directory where the file should be
        let mut backend = FileBackend::new(temp_dir.path());
        let err = backend.write("[]").unwrap_err();
        assert!(matches!(err, StoreError::Io { .. }));
        assert!(!err.is_corrupt_data());
    }

    #[test]
    fn memory_backend_round_trip() {
        let mut backend = MemoryBackend::default();
        assert!(backend.read().unwrap().is_none());
        backend.write("blob").unwrap();
        assert_eq!(backend.blob(), Some("blob"));
    }
}
