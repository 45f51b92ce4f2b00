//! Volatile record store

use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use async_trait::async_trait;

use super::collection::Collection;
use super::errors::{StoreError, StoreResult};
use super::filter::Filter;
use super::store::{FahrradStore, UpdateOutcome, VersionPrecondition};
use crate::entity::{Fahrrad, FahrradDocument, FahrradId};

/// Record store kept entirely in memory
#[derive(Debug, Default)]
pub struct MemoryStore {
    collection: RwLock<Collection>,
}

impl MemoryStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }

    fn read(&self) -> StoreResult<RwLockReadGuard<'_, Collection>> {
        self.collection.read().map_err(|_| StoreError::Poisoned)
    }

    fn write(&self) -> StoreResult<RwLockWriteGuard<'_, Collection>> {
        self.collection.write().map_err(|_| StoreError::Poisoned)
    }
}

#[async_trait]
impl FahrradStore for MemoryStore {
    async fn find_by_id(&self, id: &FahrradId) -> StoreResult<Option<FahrradDocument>> {
        Ok(self.read()?.get(id).cloned())
    }

    async fn find(&self, filter: &Filter) -> StoreResult<Vec<FahrradDocument>> {
        Ok(self.read()?.find(filter))
    }

    async fn insert(&self, doc: FahrradDocument) -> StoreResult<FahrradDocument> {
        let mut collection = self.write()?;
        collection.check_insert(&doc)?;
        collection.put(doc.clone());
        Ok(doc)
    }

    async fn find_one_and_update(
        &self,
        id: &FahrradId,
        precondition: VersionPrecondition,
        fahrrad: Fahrrad,
    ) -> StoreResult<UpdateOutcome> {
        let mut collection = self.write()?;
        match collection.prepare_update(id, precondition, fahrrad)? {
            Ok(next) => {
                collection.put(next.clone());
                Ok(UpdateOutcome::Updated(next))
            }
            Err(outcome) => Ok(outcome),
        }
    }

    async fn find_by_id_and_delete(&self, id: &FahrradId) -> StoreResult<Option<FahrradDocument>> {
        Ok(self.write()?.remove(id))
    }

    async fn count(&self) -> StoreResult<usize> {
        Ok(self.read()?.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entity::FahrradKind;
    use crate::storage::FilterExpr;

    fn fahrrad(model: &str) -> Fahrrad {
        Fahrrad {
            model: model.into(),
            weight: Some(10.0),
            kind: Some(FahrradKind::TrekkingBike),
            brand: "Ortler".into(),
            price: Some(1000.0),
        }
    }

    #[tokio::test]
    async fn test_insert_and_find() {
        let store = MemoryStore::new();
        let doc = store
            .insert(FahrradDocument::new(FahrradId::generate(), fahrrad("Trekking")))
            .await
            .unwrap();

        assert_eq!(store.find_by_id(&doc.id).await.unwrap(), Some(doc.clone()));
        assert!(store
            .exists(&FilterExpr::eq("model", "Trekking").into())
            .await
            .unwrap());
        assert_eq!(store.count().await.unwrap(), 1);
    }

    #[tokio::test]
    async fn test_insert_duplicate_model_rejected() {
        let store = MemoryStore::new();
        store
            .insert(FahrradDocument::new(FahrradId::generate(), fahrrad("Trekking")))
            .await
            .unwrap();

        let err = store
            .insert(FahrradDocument::new(FahrradId::generate(), fahrrad("Trekking")))
            .await
            .unwrap_err();
        assert!(matches!(err, StoreError::DuplicateModel { .. }));
        assert_eq!(store.count().await.unwrap(), 1);
    }

    #[tokio::test]
    async fn test_conditional_update_bumps_version_once() {
        let store = MemoryStore::new();
        let doc = store
            .insert(FahrradDocument::new(FahrradId::generate(), fahrrad("Trekking")))
            .await
            .unwrap();

        let outcome = store
            .find_one_and_update(&doc.id, VersionPrecondition::NotNewerThan(7), fahrrad("Trekking 2"))
            .await
            .unwrap();
        match outcome {
            UpdateOutcome::Updated(next) => {
                assert_eq!(next.version, 1);
                assert_eq!(next.fahrrad.model, "Trekking 2");
            }
            other => panic!("unexpected outcome: {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_delete_is_idempotent() {
        let store = MemoryStore::new();
        let doc = store
            .insert(FahrradDocument::new(FahrradId::generate(), fahrrad("Trekking")))
            .await
            .unwrap();

        assert!(store.find_by_id_and_delete(&doc.id).await.unwrap().is_some());
        assert!(store.find_by_id_and_delete(&doc.id).await.unwrap().is_none());
    }
}
