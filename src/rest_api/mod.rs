//! # REST API Module
//!
//! HTTP adapter over the bicycle services.
//!
//! # Endpoints
//!
//! - `GET /api/:id` - one bicycle with `ETag`, honours `If-None-Match`
//! - `GET /api` - search by query parameters
//! - `POST /api` - create (`admin`, `staff`)
//! - `PUT /api/:id` - update with `If-Match` (`admin`, `staff`)
//! - `DELETE /api/:id` - delete (`admin`)
//! - `PUT /file/:id`, `GET /file/:id` - attachment upload and download
//! - `POST /auth/login` - issue an access token

mod auth;
mod dto;
mod errors;
mod file;
mod read;
mod state;
mod write;

pub use dto::{base_uri, FahrradDto, FahrraederDto, Link, Links, API_PATH};
pub use errors::{ErrorResponse, RestError, RestResult};
pub use file::FILE_FIELD;
pub use read::accepts_json_or_html;
pub use state::AppState;

use axum::extract::DefaultBodyLimit;
use axum::routing::{get, post};
use axum::Router;

/// Headroom for multipart framing on top of the attachment limit
const MULTIPART_OVERHEAD: u64 = 64 * 1024;

/// Create the bicycle, attachment and login routes
pub fn fahrrad_routes(state: AppState) -> Router {
    let body_limit = state
        .attachments
        .max_size_bytes()
        .saturating_add(MULTIPART_OVERHEAD);
    let body_limit = usize::try_from(body_limit).unwrap_or(usize::MAX);

    let api = Router::new()
        .route("/", get(read::find).post(write::create))
        .route(
            "/:id",
            get(read::get_by_id).put(write::update).delete(write::delete),
        );

    let files = Router::new()
        .route("/:id", get(file::download).put(file::upload))
        .layer(DefaultBodyLimit::max(body_limit));

    Router::new()
        .nest(API_PATH, api)
        .nest("/file", files)
        .route("/auth/login", post(auth::login))
        .with_state(state)
}
