//! Query resolvers: `fahrrad(id)` and `fahrraeder(model)`

use std::collections::BTreeMap;

use serde::Serialize;
use tracing::{debug, instrument};

use super::errors::{ResolverResult, UserInputError};
use crate::entity::{Fahrrad, FahrradDocument};
use crate::service::FahrradReadService;

/// A bicycle as seen by GraphQL clients
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FahrradOutput {
    pub id: String,
    pub version: u64,
    #[serde(flatten)]
    pub fahrrad: Fahrrad,
}

impl From<FahrradDocument> for FahrradOutput {
    fn from(doc: FahrradDocument) -> Self {
        Self {
            id: doc.id.to_string(),
            version: doc.version,
            fahrrad: doc.fahrrad,
        }
    }
}

/// Read-only resolvers; no authentication required
#[derive(Clone)]
pub struct QueryResolver {
    reader: FahrradReadService,
}

impl QueryResolver {
    pub fn new(reader: FahrradReadService) -> Self {
        Self { reader }
    }

    #[instrument(skip(self))]
    pub async fn fahrrad(&self, id: &str) -> ResolverResult<FahrradOutput> {
        let doc = self.reader.find_by_id(id).await?.ok_or_else(|| {
            UserInputError::new(format!("No bicycle with ID {} was found", id))
        })?;
        Ok(doc.into())
    }

    /// All bicycles, or those matching `model` (a pattern when short)
    #[instrument(skip(self))]
    pub async fn fahrraeder(&self, model: Option<&str>) -> ResolverResult<Vec<FahrradOutput>> {
        let params: Option<BTreeMap<String, String>> =
            model.map(|m| BTreeMap::from([("model".to_string(), m.to_string())]));

        let found = self.reader.find(params.as_ref()).await?;
        if found.is_empty() {
            return Err(UserInputError::new("No bicycles were found").into());
        }
        debug!(count = found.len(), "fahrraeder");
        Ok(found.into_iter().map(FahrradOutput::from).collect())
    }
}
