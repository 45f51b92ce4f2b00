//! # HTTP Server
//!
//! Combines the health, bicycle, attachment and login routers behind CORS
//! and request tracing.

use std::io;
use std::net::SocketAddr;
use std::sync::Arc;

use axum::Router;
use tokio::net::TcpListener;
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::info;

use super::config::HttpServerConfig;
use super::health_routes::health_routes;
use crate::rest_api::{fahrrad_routes, AppState};
use crate::storage::FahrradStore;

/// HTTP server of the bicycle catalog
pub struct HttpServer {
    config: HttpServerConfig,
    router: Router,
}

impl HttpServer {
    /// Create a server over the given store and services
    pub fn new(config: HttpServerConfig, store: Arc<dyn FahrradStore>, state: AppState) -> Self {
        let router = Self::build_router(&config, store, state);
        Self { config, router }
    }

    /// Build the combined router with all endpoints
    fn build_router(config: &HttpServerConfig, store: Arc<dyn FahrradStore>, state: AppState) -> Router {
        let cors = if config.cors_origins.is_empty() {
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any)
                .expose_headers(Any)
        } else {
            let origins: Vec<_> = config
                .cors_origins
                .iter()
                .filter_map(|s| s.parse().ok())
                .collect();

            CorsLayer::new()
                .allow_origin(AllowOrigin::list(origins))
                .allow_methods(Any)
                .allow_headers(Any)
                .expose_headers(Any)
        };

        Router::new()
            .merge(health_routes(store))
            .merge(fahrrad_routes(state))
            .layer(TraceLayer::new_for_http())
            .layer(cors)
    }

    /// Get the socket address
    pub fn socket_addr(&self) -> String {
        self.config.socket_addr()
    }

    /// Get the router (for testing)
    pub fn router(self) -> Router {
        self.router
    }

    /// Serve until Ctrl-C
    pub async fn start(self) -> io::Result<()> {
        let addr: SocketAddr = self
            .config
            .socket_addr()
            .parse()
            .map_err(|e| io::Error::new(io::ErrorKind::InvalidInput, e))?;

        let listener = TcpListener::bind(addr).await?;
        info!(%addr, "fahrrad server listening");
        axum::serve(listener, self.router)
            .with_graceful_shutdown(shutdown_signal())
            .await?;

        info!("fahrrad server stopped");
        Ok(())
    }
}

async fn shutdown_signal() {
    if tokio::signal::ctrl_c().await.is_err() {
        std::future::pending::<()>().await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::{header, Request, StatusCode};
    use tower::ServiceExt;

    use crate::auth::{AuthConfig, JwtManager, UserDirectory};
    use crate::files::MemoryBackend;
    use crate::mail::NoopNotifier;
    use crate::storage::MemoryStore;

    fn server(config: HttpServerConfig) -> HttpServer {
        let store: Arc<dyn FahrradStore> = Arc::new(MemoryStore::new());
        let auth = AuthConfig {
            jwt_secret: "0123456789abcdef0123456789abcdef".into(),
            ..Default::default()
        };
        let state = AppState::new(
            store.clone(),
            Arc::new(MemoryBackend::new()),
            1024,
            Arc::new(NoopNotifier),
            Arc::new(JwtManager::new(auth.jwt_config())),
            Arc::new(UserDirectory::new(Vec::new(), JwtManager::new(auth.jwt_config()))),
        );
        HttpServer::new(config, store, state)
    }

    #[test]
    fn test_server_with_custom_port() {
        let server = server(HttpServerConfig::with_port(8080));
        assert_eq!(server.socket_addr(), "0.0.0.0:8080");
    }

    #[tokio::test]
    async fn test_router_serves_health_and_api() {
        let router = server(HttpServerConfig::default()).router();

        let response = router
            .clone()
            .oneshot(Request::get("/health").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let response = router
            .oneshot(Request::get("/api").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_cors_preflight() {
        let router = server(HttpServerConfig::default()).router();
        let response = router
            .oneshot(
                Request::builder()
                    .method("OPTIONS")
                    .uri("/api")
                    .header(header::ORIGIN, "http://localhost:4200")
                    .header(header::ACCESS_CONTROL_REQUEST_METHOD, "GET")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(
            response.headers()[header::ACCESS_CONTROL_ALLOW_ORIGIN],
            "http://localhost:4200"
        );
    }
}
