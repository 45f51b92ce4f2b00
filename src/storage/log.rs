//! Append-only record store
//!
//! All changes go to `<dir>/fahrraeder.dat` as checksummed frames and are
//! fsynced before the in-memory image is touched. On open the file is
//! replayed front to back; the latest frame per id wins and a tombstone
//! removes the record. Any framing or checksum failure aborts the open.

use std::fs::{self, File, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::{Arc, RwLock, RwLockReadGuard};

use async_trait::async_trait;
use tracing::{debug, error, info, warn};

use super::collection::Collection;
use super::errors::{StoreError, StoreResult};
use super::filter::Filter;
use super::record::LogRecord;
use super::store::{FahrradStore, UpdateOutcome, VersionPrecondition};
use crate::entity::{Fahrrad, FahrradDocument, FahrradId};

/// File name of the record log inside the data directory
pub const LOG_FILE_NAME: &str = "fahrraeder.dat";

struct LogState {
    collection: Collection,
    file: File,
    /// Set when a failed append could not be rolled back
    halted: bool,
}

/// Record store persisted to an append-only log
///
/// Writes run on the blocking pool; reads only touch the in-memory image.
pub struct LogStore {
    path: PathBuf,
    state: Arc<RwLock<LogState>>,
}

impl LogStore {
    /// Open or create the log in `data_dir` and rebuild the image
    pub fn open(data_dir: &Path) -> StoreResult<Self> {
        fs::create_dir_all(data_dir).map_err(|e| {
            StoreError::io(
                format!("failed to create data directory {}", data_dir.display()),
                e,
            )
        })?;
        let path = data_dir.join(LOG_FILE_NAME);

        let collection = Self::replay(&path)?;
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&path)
            .map_err(|e| StoreError::io(format!("failed to open {}", path.display()), e))?;

        info!(path = %path.display(), records = collection.len(), "record log opened");
        Ok(Self {
            path,
            state: Arc::new(RwLock::new(LogState {
                collection,
                file,
                halted: false,
            })),
        })
    }

    /// Path of the log file
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn replay(path: &Path) -> StoreResult<Collection> {
        let mut collection = Collection::default();
        let data = match fs::read(path) {
            Ok(data) => data,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(collection),
            Err(e) => {
                return Err(StoreError::io(
                    format!("failed to read {}", path.display()),
                    e,
                ))
            }
        };

        let mut offset = 0usize;
        while offset < data.len() {
            let (record, used) = LogRecord::deserialize(&data[offset..])
                .map_err(|e| StoreError::corruption_at_offset(offset as u64, e.0))?;

            if record.is_tombstone {
                collection.remove(&record.id);
            } else {
                let doc: FahrradDocument = serde_json::from_slice(&record.body).map_err(|e| {
                    StoreError::corruption_at_offset(offset as u64, format!("undecodable document: {}", e))
                })?;
                if doc.id != record.id {
                    return Err(StoreError::corruption_at_offset(
                        offset as u64,
                        format!("frame id {} does not match document id {}", record.id, doc.id),
                    ));
                }
                collection.put(doc);
            }
            offset += used;
        }

        debug!(bytes = offset, "record log replayed");
        Ok(collection)
    }

    fn read(&self) -> StoreResult<RwLockReadGuard<'_, LogState>> {
        self.state.read().map_err(|_| StoreError::Poisoned)
    }

    /// Run `op` under the write lock on the blocking pool
    async fn write_blocking<T, F>(&self, op: F) -> StoreResult<T>
    where
        T: Send + 'static,
        F: FnOnce(&mut LogState) -> StoreResult<T> + Send + 'static,
    {
        let state = Arc::clone(&self.state);
        tokio::task::spawn_blocking(move || {
            let mut guard = state.write().map_err(|_| StoreError::Poisoned)?;
            op(&mut guard)
        })
        .await
        .map_err(|e| StoreError::Task(e.to_string()))?
    }
}

impl LogState {
    /// Append a frame and fsync; the image is updated by the caller afterwards
    ///
    /// A failed append is truncated away. If that fails too the log halts
    /// and refuses every later write.
    fn append(&mut self, record: &LogRecord) -> StoreResult<()> {
        if self.halted {
            return Err(StoreError::Halted);
        }

        let len_before = self
            .file
            .metadata()
            .map_err(|e| StoreError::io("failed to stat record log", e))?
            .len();

        let bytes = record.serialize();
        let written = self
            .file
            .write_all(&bytes)
            .map_err(|e| StoreError::io(format!("failed to append record {}", record.id), e))
            .and_then(|()| {
                self.file
                    .sync_all()
                    .map_err(|e| StoreError::io(format!("fsync failed after record {}", record.id), e))
            });

        if let Err(err) = written {
            self.rollback(len_before);
            return Err(err);
        }
        Ok(())
    }

    /// Cut the log back to `len`; halts the log when that is not possible
    fn rollback(&mut self, len: u64) {
        match self.file.set_len(len).and_then(|()| self.file.sync_all()) {
            Ok(()) => warn!(len, "failed append rolled back"),
            Err(e) => {
                error!(len, error = %e, "rollback failed, record log halted");
                self.halted = true;
            }
        }
    }

    fn append_document(&mut self, doc: &FahrradDocument) -> StoreResult<()> {
        let body = serde_json::to_vec(doc)?;
        self.append(&LogRecord::live(doc.id, body))
    }
}

#[async_trait]
impl FahrradStore for LogStore {
    async fn find_by_id(&self, id: &FahrradId) -> StoreResult<Option<FahrradDocument>> {
        Ok(self.read()?.collection.get(id).cloned())
    }

    async fn find(&self, filter: &Filter) -> StoreResult<Vec<FahrradDocument>> {
        Ok(self.read()?.collection.find(filter))
    }

    async fn insert(&self, doc: FahrradDocument) -> StoreResult<FahrradDocument> {
        self.write_blocking(move |state| {
            state.collection.check_insert(&doc)?;
            state.append_document(&doc)?;
            state.collection.put(doc.clone());
            Ok(doc)
        })
        .await
    }

    async fn find_one_and_update(
        &self,
        id: &FahrradId,
        precondition: VersionPrecondition,
        fahrrad: Fahrrad,
    ) -> StoreResult<UpdateOutcome> {
        let id = *id;
        self.write_blocking(move |state| {
            match state.collection.prepare_update(&id, precondition, fahrrad)? {
                Ok(next) => {
                    state.append_document(&next)?;
                    state.collection.put(next.clone());
                    Ok(UpdateOutcome::Updated(next))
                }
                Err(outcome) => Ok(outcome),
            }
        })
        .await
    }

    async fn find_by_id_and_delete(&self, id: &FahrradId) -> StoreResult<Option<FahrradDocument>> {
        let id = *id;
        self.write_blocking(move |state| {
            if state.collection.get(&id).is_none() {
                return Ok(None);
            }
            state.append(&LogRecord::tombstone(id))?;
            Ok(state.collection.remove(&id))
        })
        .await
    }

    async fn count(&self) -> StoreResult<usize> {
        Ok(self.read()?.collection.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entity::FahrradKind;
    use tempfile::TempDir;

    fn fahrrad(model: &str) -> Fahrrad {
        Fahrrad {
            model: model.into(),
            weight: Some(8.5),
            kind: Some(FahrradKind::RoadBike),
            brand: "Canyon".into(),
            price: Some(1300.0),
        }
    }

    #[tokio::test]
    async fn test_records_survive_reopen() {
        let dir = TempDir::new().unwrap();
        let id;
        {
            let store = LogStore::open(dir.path()).unwrap();
            let doc = store
                .insert(FahrradDocument::new(FahrradId::generate(), fahrrad("Endurace")))
                .await
                .unwrap();
            id = doc.id;
            store
                .find_one_and_update(&id, VersionPrecondition::NotNewerThan(0), fahrrad("Endurace CF"))
                .await
                .unwrap();
        }

        let store = LogStore::open(dir.path()).unwrap();
        let doc = store.find_by_id(&id).await.unwrap().unwrap();
        assert_eq!(doc.version, 1);
        assert_eq!(doc.fahrrad.model, "Endurace CF");
    }

    #[tokio::test]
    async fn test_tombstone_survives_reopen() {
        let dir = TempDir::new().unwrap();
        let id;
        {
            let store = LogStore::open(dir.path()).unwrap();
            id = store
                .insert(FahrradDocument::new(FahrradId::generate(), fahrrad("Endurace")))
                .await
                .unwrap()
                .id;
            assert!(store.find_by_id_and_delete(&id).await.unwrap().is_some());
        }

        let store = LogStore::open(dir.path()).unwrap();
        assert!(store.find_by_id(&id).await.unwrap().is_none());
        assert_eq!(store.count().await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_rejected_write_appends_nothing() {
        let dir = TempDir::new().unwrap();
        let store = LogStore::open(dir.path()).unwrap();
        store
            .insert(FahrradDocument::new(FahrradId::generate(), fahrrad("Endurace")))
            .await
            .unwrap();
        let before = fs::metadata(store.path()).unwrap().len();

        let err = store
            .insert(FahrradDocument::new(FahrradId::generate(), fahrrad("Endurace")))
            .await
            .unwrap_err();
        assert!(matches!(err, StoreError::DuplicateModel { .. }));
        assert_eq!(fs::metadata(store.path()).unwrap().len(), before);
    }

    #[tokio::test]
    async fn test_corrupted_log_fails_open() {
        let dir = TempDir::new().unwrap();
        {
            let store = LogStore::open(dir.path()).unwrap();
            store
                .insert(FahrradDocument::new(FahrradId::generate(), fahrrad("Endurace")))
                .await
                .unwrap();
        }

        let path = dir.path().join(LOG_FILE_NAME);
        let mut bytes = fs::read(&path).unwrap();
        let last = bytes.len() - 6;
        bytes[last] ^= 0x55;
        fs::write(&path, bytes).unwrap();

        match LogStore::open(dir.path()) {
            Err(err) => assert!(err.is_fatal()),
            Ok(_) => panic!("corrupted log opened"),
        }
    }

    #[tokio::test]
    async fn test_torn_append_is_cut_away() {
        let dir = TempDir::new().unwrap();
        {
            let store = LogStore::open(dir.path()).unwrap();
            store
                .insert(FahrradDocument::new(FahrradId::generate(), fahrrad("Endurace")))
                .await
                .unwrap();

            let mut state = store.state.write().unwrap();
            let len = state.file.metadata().unwrap().len();
            state.file.write_all(b"\x40\x00\x00\x00torn").unwrap();
            state.rollback(len);
            assert!(!state.halted);
            drop(state);

            store
                .insert(FahrradDocument::new(FahrradId::generate(), fahrrad("Aeroad")))
                .await
                .unwrap();
        }

        let store = LogStore::open(dir.path()).unwrap();
        assert_eq!(store.count().await.unwrap(), 2);
    }

    #[tokio::test]
    async fn test_unrecoverable_append_halts_log() {
        let dir = TempDir::new().unwrap();
        let store = LogStore::open(dir.path()).unwrap();
        store
            .insert(FahrradDocument::new(FahrradId::generate(), fahrrad("Endurace")))
            .await
            .unwrap();

        // neither append nor truncate work on a read-only handle
        store.state.write().unwrap().file = File::open(store.path()).unwrap();

        let err = store
            .insert(FahrradDocument::new(FahrradId::generate(), fahrrad("Aeroad")))
            .await
            .unwrap_err();
        assert!(matches!(err, StoreError::Io { .. }));

        let err = store
            .insert(FahrradDocument::new(FahrradId::generate(), fahrrad("Ultimate")))
            .await
            .unwrap_err();
        assert!(matches!(err, StoreError::Halted));
        assert!(err.is_fatal());
        assert_eq!(store.count().await.unwrap(), 1);

        drop(store);
        let store = LogStore::open(dir.path()).unwrap();
        assert_eq!(store.count().await.unwrap(), 1);
    }
}
