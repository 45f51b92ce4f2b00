//! In-memory image of the record collection
//!
//! Both backends keep their live records here; the log store additionally
//! appends every change to disk before applying it.

use std::collections::HashMap;

use super::errors::{StoreError, StoreResult};
use super::filter::Filter;
use super::store::{UpdateOutcome, VersionPrecondition};
use crate::entity::{Fahrrad, FahrradDocument, FahrradId};

#[derive(Debug, Default)]
pub(crate) struct Collection {
    records: HashMap<FahrradId, FahrradDocument>,
}

impl Collection {
    pub fn get(&self, id: &FahrradId) -> Option<&FahrradDocument> {
        self.records.get(id)
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Matching records sorted by model, then id
    pub fn find(&self, filter: &Filter) -> Vec<FahrradDocument> {
        let mut found: Vec<FahrradDocument> = self
            .records
            .values()
            .filter(|doc| filter.is_empty() || filter.matches(&doc.to_value()))
            .cloned()
            .collect();
        found.sort_by(|a, b| {
            a.fahrrad
                .model
                .cmp(&b.fahrrad.model)
                .then_with(|| a.id.cmp(&b.id))
        });
        found
    }

    /// Unique index on `model`; a record never conflicts with itself
    pub fn check_model_free(&self, model: &str, owner: &FahrradId) -> StoreResult<()> {
        match self
            .records
            .values()
            .find(|doc| doc.fahrrad.model == model && doc.id != *owner)
        {
            Some(other) => Err(StoreError::DuplicateModel {
                model: model.to_string(),
                id: other.id,
            }),
            None => Ok(()),
        }
    }

    /// Validate an insert without applying it
    pub fn check_insert(&self, doc: &FahrradDocument) -> StoreResult<()> {
        if self.records.contains_key(&doc.id) {
            return Err(StoreError::DuplicateId(doc.id));
        }
        self.check_model_free(&doc.fahrrad.model, &doc.id)
    }

    /// Compute the replacement for a conditional update without applying it
    pub fn prepare_update(
        &self,
        id: &FahrradId,
        precondition: VersionPrecondition,
        fahrrad: Fahrrad,
    ) -> StoreResult<Result<FahrradDocument, UpdateOutcome>> {
        let Some(current) = self.records.get(id) else {
            return Ok(Err(UpdateOutcome::NotFound));
        };
        if !precondition.admits(current.version) {
            return Ok(Err(UpdateOutcome::VersionConflict {
                stored: current.version,
            }));
        }
        self.check_model_free(&fahrrad.model, id)?;

        let mut next = current.clone();
        next.apply_update(fahrrad);
        Ok(Ok(next))
    }

    /// Insert or replace
    pub fn put(&mut self, doc: FahrradDocument) {
        self.records.insert(doc.id, doc);
    }

    pub fn remove(&mut self, id: &FahrradId) -> Option<FahrradDocument> {
        self.records.remove(id)
    }
}
