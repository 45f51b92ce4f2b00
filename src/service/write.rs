//! Write side: create, update and delete
//!
//! Each operation is a short linear pipeline that stops at the first
//! failure. Nothing is written unless every check passed, and the final
//! write re-checks the unique model index and the version precondition
//! atomically inside the store.

use std::sync::Arc;

use serde_json::Value;
use tracing::{debug, info, instrument, warn};

use super::errors::{CreateError, UpdateError};
use crate::entity::{Fahrrad, FahrradDocument, FahrradId};
use crate::mail::{creation_notice, Notifier};
use crate::schema::SchemaValidator;
use crate::storage::{FahrradStore, FilterExpr, StoreError, StoreResult, UpdateOutcome, VersionPrecondition};
use crate::version::VersionToken;

/// Validating write access to the bicycle collection
#[derive(Clone)]
pub struct FahrradWriteService {
    store: Arc<dyn FahrradStore>,
    validator: SchemaValidator,
    notifier: Arc<dyn Notifier>,
}

impl FahrradWriteService {
    pub fn new(store: Arc<dyn FahrradStore>, notifier: Arc<dyn Notifier>) -> Self {
        Self {
            store,
            validator: SchemaValidator::new(),
            notifier,
        }
    }

    /// Create a record at version 0 and return its id
    #[instrument(skip(self, candidate))]
    pub async fn create(&self, candidate: &Value) -> Result<FahrradId, CreateError> {
        let fahrrad = self
            .validated(candidate)
            .map_err(|messages| CreateError::ConstraintViolations { messages })?;

        let model = fahrrad.model.clone();
        if self.store.exists(&FilterExpr::eq("model", model.as_str()).into()).await? {
            debug!(model = %model, "model exists");
            return Err(CreateError::ModelExists { model });
        }

        let doc = FahrradDocument::new(FahrradId::generate(), fahrrad);
        let saved = self.store.insert(doc).await.map_err(|e| match e {
            StoreError::DuplicateModel { model, .. } => CreateError::ModelExists { model },
            other => CreateError::Storage(other),
        })?;

        self.notify_created(&saved);
        info!(id = %saved.id, "bicycle created");
        Ok(saved.id)
    }

    /// Update a record and return its new version
    ///
    /// The caller's version is a precondition (accepted when it is not older
    /// than the stored one); the new version is always stored + 1.
    #[instrument(skip(self, candidate))]
    pub async fn update(&self, id: &str, candidate: &Value, version: Option<&str>) -> Result<u64, UpdateError> {
        let not_exists = || UpdateError::FahrradNotExists { id: id.to_string() };

        let Ok(fahrrad_id) = id.parse::<FahrradId>() else {
            debug!("malformed id");
            return Err(not_exists());
        };

        let caller_version = VersionToken::parse(version)
            .map_err(|e| UpdateError::VersionInvalid { token: e.token })?;

        let fahrrad = self
            .validated(candidate)
            .map_err(|messages| UpdateError::ConstraintViolations { messages })?;

        let model = fahrrad.model.clone();
        if let Some(owner) = self
            .store
            .find_one(&FilterExpr::eq("model", model.as_str()).into())
            .await?
        {
            if owner.id != fahrrad_id {
                debug!(model = %model, owner = %owner.id, "model taken by another record");
                return Err(UpdateError::ModelExists {
                    model,
                    id: Some(owner.id),
                });
            }
        }

        let current = self.store.find_by_id(&fahrrad_id).await?.ok_or_else(not_exists)?;
        if caller_version < current.version {
            debug!(caller_version, stored = current.version, "version outdated");
            return Err(UpdateError::VersionOutdated {
                id: id.to_string(),
                version: caller_version,
            });
        }

        let outcome = self
            .store
            .find_one_and_update(&fahrrad_id, VersionPrecondition::NotNewerThan(caller_version), fahrrad)
            .await
            .map_err(|e| match e {
                StoreError::DuplicateModel { model, id } => UpdateError::ModelExists { model, id: Some(id) },
                other => UpdateError::Storage(other),
            })?;

        match outcome {
            UpdateOutcome::Updated(doc) => {
                info!(version = doc.version, "bicycle updated");
                Ok(doc.version)
            }
            UpdateOutcome::NotFound => Err(not_exists()),
            UpdateOutcome::VersionConflict { stored } => {
                debug!(caller_version, stored, "lost update race");
                Err(UpdateError::VersionOutdated {
                    id: id.to_string(),
                    version: caller_version,
                })
            }
        }
    }

    /// Delete a record; `false` when there was nothing to delete
    #[instrument(skip(self))]
    pub async fn delete(&self, id: &str) -> StoreResult<bool> {
        let Ok(fahrrad_id) = id.parse::<FahrradId>() else {
            debug!("malformed id");
            return Ok(false);
        };

        let deleted = self.store.find_by_id_and_delete(&fahrrad_id).await?.is_some();
        if deleted {
            info!("bicycle deleted");
        }
        Ok(deleted)
    }

    /// Schema-validate and decode a candidate
    fn validated(&self, candidate: &Value) -> Result<Fahrrad, Vec<String>> {
        let messages = self.validator.validate(candidate);
        if !messages.is_empty() {
            debug!(?messages, "constraint violations");
            return Err(messages);
        }
        serde_json::from_value(candidate.clone()).map_err(|e| vec![e.to_string()])
    }

    fn notify_created(&self, doc: &FahrradDocument) {
        let notifier = Arc::clone(&self.notifier);
        let (subject, body) = creation_notice(doc);
        tokio::spawn(async move {
            if let Err(e) = notifier.send_notification(&subject, &body).await {
                warn!(error = %e, "notification mail failed");
            }
        });
    }
}
