//! Mutation resolvers: `create`, `update` and `delete`
//!
//! The caller is passed in explicitly; create and update need `admin` or
//! `staff`, delete needs `admin`.

use serde::Deserialize;
use serde_json::Value;
use tracing::{debug, instrument};

use super::errors::ResolverResult;
use crate::auth::{Principal, DELETE_ROLES, WRITE_ROLES};
use crate::service::FahrradWriteService;
use crate::version::VersionToken;

/// Arguments of the `update` mutation
#[derive(Debug, Clone, Deserialize)]
pub struct FahrradUpdateInput {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub version: Option<u64>,
    pub fahrrad: Value,
}

#[derive(Clone)]
pub struct MutationResolver {
    writer: FahrradWriteService,
}

impl MutationResolver {
    pub fn new(writer: FahrradWriteService) -> Self {
        Self { writer }
    }

    /// Create a bicycle and return its id
    #[instrument(skip(self, principal, input), fields(username = %principal.username))]
    pub async fn create(&self, principal: &Principal, input: &Value) -> ResolverResult<String> {
        principal.require_any(WRITE_ROLES)?;
        let id = self.writer.create(input).await?;
        Ok(id.to_string())
    }

    /// Update a bicycle and return its new version; a missing version means 0
    #[instrument(skip(self, principal, input), fields(username = %principal.username))]
    pub async fn update(&self, principal: &Principal, input: FahrradUpdateInput) -> ResolverResult<u64> {
        principal.require_any(WRITE_ROLES)?;
        let token = VersionToken::format(input.version.unwrap_or(0));
        let id = input.id.unwrap_or_default();

        let version = self.writer.update(&id, &input.fahrrad, Some(&token)).await?;
        debug!(version, "update");
        Ok(version)
    }

    /// Delete a bicycle; `false` when there was nothing to delete
    #[instrument(skip(self, principal), fields(username = %principal.username))]
    pub async fn delete(&self, principal: &Principal, id: &str) -> ResolverResult<bool> {
        principal.require_any(DELETE_ROLES)?;
        Ok(self.writer.delete(id).await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use serde_json::json;

    use crate::auth::{AuthError, Role};
    use crate::dev::seed;
    use crate::graphql::ResolverError;
    use crate::mail::NoopNotifier;
    use crate::storage::MemoryStore;

    const ID: &str = "000000000000000000000005";

    async fn resolver() -> MutationResolver {
        let store = Arc::new(MemoryStore::new());
        seed(store.as_ref()).await.unwrap();
        MutationResolver::new(FahrradWriteService::new(store, Arc::new(NoopNotifier)))
    }

    fn caller(role: Role) -> Principal {
        Principal {
            username: "tester".into(),
            roles: vec![role],
        }
    }

    fn endurace(price: u64) -> Value {
        json!({
            "model": "Endurace",
            "weight": 8.5,
            "kind": "ROAD_BIKE",
            "brand": "Canyon",
            "price": price
        })
    }

    #[tokio::test]
    async fn test_create_returns_id() {
        let resolver = resolver().await;
        let mut input = endurace(1500);
        input["model"] = json!("Grail");

        let id = resolver.create(&caller(Role::Staff), &input).await.unwrap();
        assert_eq!(id.len(), 24);

        let err = resolver.create(&caller(Role::Staff), &input).await.unwrap_err();
        assert_eq!(err.to_string(), "The model \"Grail\" already exists");
    }

    #[tokio::test]
    async fn test_update_defaults_version_to_zero() {
        let resolver = resolver().await;
        let input = FahrradUpdateInput {
            id: Some(ID.into()),
            version: None,
            fahrrad: endurace(1400),
        };
        assert_eq!(resolver.update(&caller(Role::Admin), input.clone()).await.unwrap(), 1);

        let err = resolver.update(&caller(Role::Admin), input).await.unwrap_err();
        assert_eq!(err.to_string(), "The version number \"0\" is outdated");
    }

    #[tokio::test]
    async fn test_update_unknown_id() {
        let resolver = resolver().await;
        let input = FahrradUpdateInput {
            id: None,
            version: Some(0),
            fahrrad: endurace(1400),
        };
        let err = resolver.update(&caller(Role::Staff), input).await.unwrap_err();
        assert_eq!(err.to_string(), "There is no bicycle with ID ");
    }

    #[tokio::test]
    async fn test_delete_needs_admin() {
        let resolver = resolver().await;
        let err = resolver.delete(&caller(Role::Staff), ID).await.unwrap_err();
        assert!(matches!(err, ResolverError::Auth(AuthError::Forbidden)));

        assert!(resolver.delete(&caller(Role::Admin), ID).await.unwrap());
        assert!(!resolver.delete(&caller(Role::Admin), ID).await.unwrap());
    }

    #[test]
    fn test_update_input_from_json() {
        let input: FahrradUpdateInput = serde_json::from_value(json!({
            "id": ID,
            "fahrrad": {"model": "Endurace"}
        }))
        .unwrap();
        assert_eq!(input.version, None);
        assert_eq!(input.id.as_deref(), Some(ID));
    }
}
