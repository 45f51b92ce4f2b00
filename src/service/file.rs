//! Attachments: at most one binary blob per bicycle
//!
//! Blobs live under `<id>/<uuid>` (canonical lowercase id) with metadata in `<id>/<uuid>.json`.
//! An upload removes every existing blob of the record first.

use std::sync::Arc;

use tracing::{debug, instrument, warn};
use uuid::Uuid;

use super::errors::{FileFindError, FileSaveError};
use super::read::FahrradReadService;
use crate::files::{sniff_content_type, BlobBackend, BlobError, BlobMetadata, METADATA_SUFFIX};

/// A stored attachment
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Attachment {
    pub content_type: String,
    pub data: Vec<u8>,
}

/// Upload and download of attachments
#[derive(Clone)]
pub struct AttachmentService {
    reader: FahrradReadService,
    blobs: Arc<dyn BlobBackend>,
    max_size_bytes: u64,
}

impl AttachmentService {
    pub fn new(reader: FahrradReadService, blobs: Arc<dyn BlobBackend>, max_size_bytes: u64) -> Self {
        Self {
            reader,
            blobs,
            max_size_bytes,
        }
    }

    /// Largest accepted attachment in bytes
    pub fn max_size_bytes(&self) -> u64 {
        self.max_size_bytes
    }

    /// Store `data` as the attachment of bicycle `id`
    ///
    /// `false` when the content type is not recognized or the bicycle does
    /// not exist; nothing is changed in that case.
    #[instrument(skip(self, data), fields(size = data.len()))]
    pub async fn save(&self, id: &str, data: &[u8]) -> Result<bool, FileSaveError> {
        let size = data.len() as u64;
        if size > self.max_size_bytes {
            return Err(BlobError::FileTooLarge(size, self.max_size_bytes).into());
        }

        let Some(content_type) = sniff_content_type(data) else {
            debug!("unrecognized content type");
            return Ok(false);
        };

        let Some(doc) = self.reader.find_by_id(id).await? else {
            debug!("no such bicycle");
            return Ok(false);
        };
        let key = doc.id.to_string();

        for name in self.blob_names(&key)? {
            self.delete_blob(&key, &name)?;
        }

        let name = Uuid::new_v4().to_string();
        let metadata = BlobMetadata::describe(content_type, data);
        let sidecar = serde_json::to_vec(&metadata)
            .map_err(|e| BlobError::InvalidMetadata(e.to_string()))?;

        self.blobs.write(&format!("{}/{}", key, name), data)?;
        self.blobs
            .write(&format!("{}/{}{}", key, name, METADATA_SUFFIX), &sidecar)?;

        debug!(content_type, blob = %name, "attachment stored");
        Ok(true)
    }

    /// Load the attachment of bicycle `id`
    #[instrument(skip(self))]
    pub async fn find(&self, id: &str) -> Result<Attachment, FileFindError> {
        let Some(doc) = self.reader.find_by_id(id).await? else {
            return Err(FileFindError::FahrradNotExists { id: id.to_string() });
        };
        let key = doc.id.to_string();

        let names = self.blob_names(&key)?;
        let name = match names.as_slice() {
            [] => return Err(FileFindError::FileNotFound { id: id.to_string() }),
            [name] => name,
            _ => {
                warn!(count = names.len(), "more than one attachment stored");
                return Err(FileFindError::MultipleFiles { id: id.to_string() });
            }
        };

        let invalid = || FileFindError::InvalidContentType { id: id.to_string() };
        let sidecar = match self.blobs.read(&format!("{}/{}{}", key, name, METADATA_SUFFIX)) {
            Ok(bytes) => bytes,
            Err(BlobError::ObjectNotFound(_)) => return Err(invalid()),
            Err(e) => return Err(e.into()),
        };
        let metadata: BlobMetadata = serde_json::from_slice(&sidecar).map_err(|_| invalid())?;
        if metadata.content_type.is_empty() {
            return Err(invalid());
        }

        let data = self.blobs.read(&format!("{}/{}", key, name))?;
        if !metadata.verifies(&data) {
            warn!(blob = %name, "attachment checksum mismatch");
        }

        Ok(Attachment {
            content_type: metadata.content_type,
            data,
        })
    }

    /// Data blob names of a record, sidecars excluded
    fn blob_names(&self, id: &str) -> Result<Vec<String>, BlobError> {
        Ok(self
            .blobs
            .list(id)?
            .into_iter()
            .filter(|n| !n.ends_with(METADATA_SUFFIX))
            .collect())
    }

    fn delete_blob(&self, id: &str, name: &str) -> Result<(), BlobError> {
        for path in [format!("{}/{}", id, name), format!("{}/{}{}", id, name, METADATA_SUFFIX)] {
            match self.blobs.delete(&path) {
                Ok(()) | Err(BlobError::ObjectNotFound(_)) => {}
                Err(e) => return Err(e),
            }
        }
        debug!(blob = %name, "previous attachment deleted");
        Ok(())
    }
}
