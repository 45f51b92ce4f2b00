//! Record store abstraction
//!
//! Every operation is atomic per record. The unique index on `model` and
//! the version precondition of `find_one_and_update` are checked under the
//! same lock as the write they guard.

use async_trait::async_trait;

use super::errors::StoreResult;
use super::filter::Filter;
use crate::entity::{Fahrrad, FahrradDocument, FahrradId};

/// Precondition on the stored version for a conditional update
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VersionPrecondition {
    /// Accept when the stored version is at most this value
    NotNewerThan(u64),
}

impl VersionPrecondition {
    /// Whether a record at `stored` satisfies the precondition
    pub fn admits(&self, stored: u64) -> bool {
        match self {
            VersionPrecondition::NotNewerThan(v) => stored <= *v,
        }
    }
}

/// Result of a conditional update
#[derive(Debug, Clone, PartialEq)]
pub enum UpdateOutcome {
    /// The record was replaced; carries the new stored form
    Updated(FahrradDocument),
    /// No record with this id
    NotFound,
    /// The stored version is newer than the precondition allows
    VersionConflict { stored: u64 },
}

/// Persistent collection of bicycle records
#[async_trait]
pub trait FahrradStore: Send + Sync {
    /// Look up a record by id
    async fn find_by_id(&self, id: &FahrradId) -> StoreResult<Option<FahrradDocument>>;

    /// All records matching `filter`, sorted ascending by model
    async fn find(&self, filter: &Filter) -> StoreResult<Vec<FahrradDocument>>;

    /// First record matching `filter` in model order
    async fn find_one(&self, filter: &Filter) -> StoreResult<Option<FahrradDocument>> {
        Ok(self.find(filter).await?.into_iter().next())
    }

    /// Whether any record matches `filter`
    async fn exists(&self, filter: &Filter) -> StoreResult<bool> {
        Ok(self.find_one(filter).await?.is_some())
    }

    /// Insert a new record
    ///
    /// Fails with `DuplicateModel` or `DuplicateId` without writing.
    async fn insert(&self, doc: FahrradDocument) -> StoreResult<FahrradDocument>;

    /// Replace the payload of a record and bump its version by one
    async fn find_one_and_update(
        &self,
        id: &FahrradId,
        precondition: VersionPrecondition,
        fahrrad: Fahrrad,
    ) -> StoreResult<UpdateOutcome>;

    /// Remove a record, returning it if it existed
    async fn find_by_id_and_delete(&self, id: &FahrradId) -> StoreResult<Option<FahrradDocument>>;

    /// Number of live records
    async fn count(&self) -> StoreResult<usize>;
}
