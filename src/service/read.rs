//! Read side: id lookup and filtered search

use std::collections::BTreeMap;
use std::sync::Arc;

use tracing::{debug, instrument};

use super::filter::normalize;
use crate::entity::{FahrradDocument, FahrradId};
use crate::storage::{FahrradStore, Filter, StoreResult};

/// Read access to the bicycle collection
#[derive(Clone)]
pub struct FahrradReadService {
    store: Arc<dyn FahrradStore>,
}

impl FahrradReadService {
    pub fn new(store: Arc<dyn FahrradStore>) -> Self {
        Self { store }
    }

    /// Look up a record by id
    ///
    /// A malformed id is "not found" and never reaches the store.
    #[instrument(skip(self))]
    pub async fn find_by_id(&self, id: &str) -> StoreResult<Option<FahrradDocument>> {
        let Ok(id) = id.parse::<FahrradId>() else {
            debug!("malformed id");
            return Ok(None);
        };

        let found = self.store.find_by_id(&id).await?;
        debug!(found = found.is_some(), "find_by_id");
        Ok(found)
    }

    /// Records matching the query parameters, sorted by model
    #[instrument(skip(self))]
    pub async fn find(&self, params: Option<&BTreeMap<String, String>>) -> StoreResult<Vec<FahrradDocument>> {
        let filter = match params {
            None => Filter::all(),
            Some(params) => match normalize(params) {
                Some(filter) => filter,
                None => return Ok(Vec::new()),
            },
        };

        let found = self.store.find(&filter).await?;
        debug!(count = found.len(), "find");
        Ok(found)
    }
}
