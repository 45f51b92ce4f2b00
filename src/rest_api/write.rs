//! Write routes: create, update and delete
//!
//! Create and update need `admin` or `staff`, delete needs `admin`.

use axum::{
    extract::{Path, State},
    http::{header, HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use serde_json::Value;
use tracing::debug;

use super::dto::base_uri;
use super::errors::{RestError, RestResult};
use super::state::AppState;
use crate::auth::{Principal, DELETE_ROLES, WRITE_ROLES};
use crate::version::VersionToken;

/// `POST /api`
pub async fn create(
    State(state): State<AppState>,
    principal: Principal,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> RestResult<Response> {
    principal.require_any(WRITE_ROLES)?;

    let id = state.writer.create(&body).await?;
    let location = format!("{}/{}", base_uri(&headers), id);
    debug!(location = %location, "created");
    Ok((StatusCode::CREATED, [(header::LOCATION, location)]).into_response())
}

/// `PUT /api/:id`
pub async fn update(
    State(state): State<AppState>,
    principal: Principal,
    Path(id): Path<String>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> RestResult<Response> {
    principal.require_any(WRITE_ROLES)?;

    let Some(if_match) = headers.get(header::IF_MATCH) else {
        return Err(RestError::PreconditionRequired);
    };
    let token = String::from_utf8_lossy(if_match.as_bytes()).into_owned();

    let version = state.writer.update(&id, &body, Some(&token)).await?;
    debug!(version, "updated");
    Ok((
        StatusCode::NO_CONTENT,
        [(header::ETAG, VersionToken::format(version))],
    )
        .into_response())
}

/// `DELETE /api/:id`; succeeds whether or not the record existed
pub async fn delete(
    State(state): State<AppState>,
    principal: Principal,
    Path(id): Path<String>,
) -> RestResult<StatusCode> {
    principal.require_any(DELETE_ROLES)?;

    let deleted = state.writer.delete(&id).await?;
    debug!(deleted, "delete");
    Ok(StatusCode::NO_CONTENT)
}
