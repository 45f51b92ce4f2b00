//! Health HTTP Routes

use std::sync::Arc;

use axum::{extract::State, http::StatusCode, response::IntoResponse, routing::get, Json, Router};
use serde::Serialize;
use tracing::warn;

use crate::storage::FahrradStore;

/// Health check response
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub records: Option<usize>,
}

/// Create health routes
pub fn health_routes(store: Arc<dyn FahrradStore>) -> Router {
    Router::new()
        .route("/health", get(health_handler))
        .with_state(store)
}

/// Liveness plus a storage probe; 503 when the store cannot be read
async fn health_handler(State(store): State<Arc<dyn FahrradStore>>) -> impl IntoResponse {
    let (status, records) = match store.count().await {
        Ok(count) => (StatusCode::OK, Some(count)),
        Err(e) => {
            warn!(error = %e, "health probe failed");
            (StatusCode::SERVICE_UNAVAILABLE, None)
        }
    };

    let response = HealthResponse {
        status: if status.is_success() { "ok" } else { "unavailable" }.to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        records,
    };

    (status, Json(response))
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::{to_bytes, Body};
    use axum::http::Request;
    use tower::ServiceExt;

    use crate::storage::MemoryStore;

    #[tokio::test]
    async fn test_health_reports_records() {
        let router = health_routes(Arc::new(MemoryStore::new()));
        let response = router
            .oneshot(Request::get("/health").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let json: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(json["status"], "ok");
        assert_eq!(json["records"], 0);
    }
}
