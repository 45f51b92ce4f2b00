//! # In-Memory Backend

use std::collections::BTreeMap;
use std::sync::RwLock;

use super::backend::BlobBackend;
use super::errors::{BlobError, BlobResult};

/// Blobs kept in a map, for tests and throwaway instances
#[derive(Debug, Default)]
pub struct MemoryBackend {
    blobs: RwLock<BTreeMap<String, Vec<u8>>>,
}

impl MemoryBackend {
    pub fn new() -> Self {
        Self::default()
    }
}

fn poisoned() -> BlobError {
    BlobError::IoError("blob map lock poisoned".to_string())
}

impl BlobBackend for MemoryBackend {
    fn write(&self, path: &str, data: &[u8]) -> BlobResult<()> {
        self.blobs
            .write()
            .map_err(|_| poisoned())?
            .insert(path.to_string(), data.to_vec());
        Ok(())
    }

    fn read(&self, path: &str) -> BlobResult<Vec<u8>> {
        self.blobs
            .read()
            .map_err(|_| poisoned())?
            .get(path)
            .cloned()
            .ok_or_else(|| BlobError::ObjectNotFound(path.to_string()))
    }

    fn delete(&self, path: &str) -> BlobResult<()> {
        self.blobs
            .write()
            .map_err(|_| poisoned())?
            .remove(path)
            .map(|_| ())
            .ok_or_else(|| BlobError::ObjectNotFound(path.to_string()))
    }

    fn list(&self, prefix: &str) -> BlobResult<Vec<String>> {
        let dir = format!("{}/", prefix.trim_end_matches('/'));
        Ok(self
            .blobs
            .read()
            .map_err(|_| poisoned())?
            .keys()
            .filter_map(|k| k.strip_prefix(&dir))
            .filter(|rest| !rest.contains('/'))
            .map(str::to_string)
            .collect())
    }
}
