//! Wiring of the configured subsystems into one application

use std::sync::Arc;

use thiserror::Error;
use tracing::info;

use crate::auth::{JwtManager, UserDirectory};
use crate::config::{AppConfig, StoreBackendKind};
use crate::dev::seed;
use crate::files::create_backend;
use crate::graphql::{MutationResolver, QueryResolver};
use crate::http_server::HttpServer;
use crate::mail::{create_notifier, MailError};
use crate::rest_api::AppState;
use crate::service::{FahrradReadService, FahrradWriteService};
use crate::storage::{FahrradStore, LogStore, MemoryStore, StoreError};

/// Errors while assembling the application
#[derive(Debug, Error)]
pub enum BootError {
    #[error("storage: {0}")]
    Storage(#[from] StoreError),

    #[error("mail: {0}")]
    Mail(#[from] MailError),
}

/// A fully wired application
pub struct Application {
    config: AppConfig,
    store: Arc<dyn FahrradStore>,
    state: AppState,
}

impl Application {
    /// Open the store, seed it if configured and build the services
    pub async fn build(config: AppConfig) -> Result<Self, BootError> {
        let store: Arc<dyn FahrradStore> = match config.database.backend {
            StoreBackendKind::Memory => Arc::new(MemoryStore::new()),
            StoreBackendKind::Log => Arc::new(LogStore::open(&config.database.data_dir)?),
        };

        if config.database.seed_test_data {
            seed(store.as_ref()).await?;
        }

        let jwt = JwtManager::new(config.auth.jwt_config());
        let users = UserDirectory::new(config.auth.users.clone(), jwt.clone());
        let state = AppState::new(
            store.clone(),
            create_backend(&config.files),
            config.files.max_size_bytes,
            create_notifier(&config.mail)?,
            Arc::new(jwt),
            Arc::new(users),
        );

        info!(
            backend = ?config.database.backend,
            records = store.count().await?,
            users = state.users.len(),
            "application ready"
        );
        Ok(Self { config, store, state })
    }

    pub fn state(&self) -> &AppState {
        &self.state
    }

    pub fn store(&self) -> Arc<dyn FahrradStore> {
        self.store.clone()
    }

    /// GraphQL query resolvers over the same services
    pub fn query_resolver(&self) -> QueryResolver {
        QueryResolver::new(self.state.reader.clone())
    }

    /// GraphQL mutation resolvers over the same services
    pub fn mutation_resolver(&self) -> MutationResolver {
        MutationResolver::new(self.state.writer.clone())
    }

    /// Read service, for callers outside the HTTP layer
    pub fn reader(&self) -> FahrradReadService {
        self.state.reader.clone()
    }

    /// Write service, for callers outside the HTTP layer
    pub fn writer(&self) -> FahrradWriteService {
        self.state.writer.clone()
    }

    /// HTTP server over this application
    pub fn into_server(self) -> HttpServer {
        HttpServer::new(self.config.server, self.store, self.state)
    }
}
