//! # Local Filesystem Backend

use std::fs;
use std::io::ErrorKind;
use std::path::PathBuf;

use super::backend::BlobBackend;
use super::errors::{BlobError, BlobResult};

/// Blobs stored as plain files below a root directory
#[derive(Debug)]
pub struct LocalBackend {
    root: PathBuf,
}

impl LocalBackend {
    pub fn new(root: PathBuf) -> Self {
        Self { root }
    }

    fn full_path(&self, path: &str) -> PathBuf {
        self.root.join(path)
    }
}

fn io_error(path: &str, e: std::io::Error) -> BlobError {
    if e.kind() == ErrorKind::NotFound {
        BlobError::ObjectNotFound(path.to_string())
    } else {
        BlobError::IoError(e.to_string())
    }
}

impl BlobBackend for LocalBackend {
    fn write(&self, path: &str, data: &[u8]) -> BlobResult<()> {
        let full_path = self.full_path(path);

        if let Some(parent) = full_path.parent() {
            fs::create_dir_all(parent).map_err(|e| BlobError::IoError(e.to_string()))?;
        }

        fs::write(&full_path, data).map_err(|e| BlobError::IoError(e.to_string()))
    }

    fn read(&self, path: &str) -> BlobResult<Vec<u8>> {
        fs::read(self.full_path(path)).map_err(|e| io_error(path, e))
    }

    fn delete(&self, path: &str) -> BlobResult<()> {
        fs::remove_file(self.full_path(path)).map_err(|e| io_error(path, e))
    }

    fn list(&self, prefix: &str) -> BlobResult<Vec<String>> {
        let dir = self.full_path(prefix);
        let entries = match fs::read_dir(&dir) {
            Ok(entries) => entries,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(BlobError::IoError(e.to_string())),
        };

        let mut names = Vec::new();
        for entry in entries {
            let entry = entry.map_err(|e| BlobError::IoError(e.to_string()))?;
            if entry.path().is_file() {
                if let Some(name) = entry.file_name().to_str() {
                    names.push(name.to_string());
                }
            }
        }
        names.sort();
        Ok(names)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_write_read() {
        let temp = TempDir::new().unwrap();
        let backend = LocalBackend::new(temp.path().to_path_buf());

        backend.write("a/blob", b"hello").unwrap();
        assert_eq!(backend.read("a/blob").unwrap(), b"hello");
    }

    #[test]
    fn test_list_and_delete() {
        let temp = TempDir::new().unwrap();
        let backend = LocalBackend::new(temp.path().to_path_buf());

        backend.write("dir/b", b"2").unwrap();
        backend.write("dir/a", b"1").unwrap();
        assert_eq!(backend.list("dir").unwrap(), vec!["a", "b"]);

        backend.delete("dir/a").unwrap();
        assert_eq!(backend.list("dir").unwrap(), vec!["b"]);
        assert!(backend.list("missing").unwrap().is_empty());
    }

    #[test]
    fn test_not_found() {
        let temp = TempDir::new().unwrap();
        let backend = LocalBackend::new(temp.path().to_path_buf());

        assert!(matches!(backend.read("nope"), Err(BlobError::ObjectNotFound(_))));
        assert!(matches!(backend.delete("nope"), Err(BlobError::ObjectNotFound(_))));
    }
}
