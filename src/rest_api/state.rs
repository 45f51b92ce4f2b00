//! Shared state of the REST handlers

use std::sync::Arc;

use axum::extract::FromRef;

use crate::auth::{JwtManager, UserDirectory};
use crate::files::BlobBackend;
use crate::mail::Notifier;
use crate::service::{AttachmentService, FahrradReadService, FahrradWriteService};
use crate::storage::FahrradStore;

/// Services shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub reader: FahrradReadService,
    pub writer: FahrradWriteService,
    pub attachments: AttachmentService,
    pub jwt: Arc<JwtManager>,
    pub users: Arc<UserDirectory>,
}

impl AppState {
    /// Wire the services around one store, blob backend and notifier
    pub fn new(
        store: Arc<dyn FahrradStore>,
        blobs: Arc<dyn BlobBackend>,
        max_file_size: u64,
        notifier: Arc<dyn Notifier>,
        jwt: Arc<JwtManager>,
        users: Arc<UserDirectory>,
    ) -> Self {
        let reader = FahrradReadService::new(store.clone());
        Self {
            writer: FahrradWriteService::new(store, notifier),
            attachments: AttachmentService::new(reader.clone(), blobs, max_file_size),
            reader,
            jwt,
            users,
        }
    }
}

impl FromRef<AppState> for Arc<JwtManager> {
    fn from_ref(state: &AppState) -> Self {
        state.jwt.clone()
    }
}
