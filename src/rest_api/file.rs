//! Attachment routes

use axum::{
    extract::{multipart::MultipartError, Multipart, Path, State},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
};
use tracing::debug;

use super::errors::{RestError, RestResult};
use super::state::AppState;
use crate::auth::{Principal, WRITE_ROLES};

/// Name of the multipart field carrying the upload
pub const FILE_FIELD: &str = "file";

/// `PUT /file/:id`
pub async fn upload(
    State(state): State<AppState>,
    principal: Principal,
    Path(id): Path<String>,
    mut multipart: Multipart,
) -> RestResult<StatusCode> {
    principal.require_any(WRITE_ROLES)?;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(multipart_error)?
    {
        if field.name() != Some(FILE_FIELD) {
            continue;
        }

        let data = field
            .bytes()
            .await
            .map_err(multipart_error)?;
        debug!(size = data.len(), "upload");

        if !state.attachments.save(&id, &data).await? {
            return Err(RestError::PreconditionFailed(format!(
                "The file for bicycle \"{}\" was not stored: unknown bicycle or unsupported file type.",
                id
            )));
        }
        return Ok(StatusCode::NO_CONTENT);
    }

    Err(RestError::BadRequest(format!(
        "multipart field \"{}\" is missing",
        FILE_FIELD
    )))
}

fn multipart_error(err: MultipartError) -> RestError {
    if err.status() == StatusCode::PAYLOAD_TOO_LARGE {
        RestError::BodyTooLarge(err.body_text())
    } else {
        RestError::BadRequest(err.body_text())
    }
}

/// `GET /file/:id`
pub async fn download(State(state): State<AppState>, Path(id): Path<String>) -> RestResult<Response> {
    let attachment = state.attachments.find(&id).await?;
    debug!(content_type = %attachment.content_type, size = attachment.data.len(), "download");
    Ok((
        [(header::CONTENT_TYPE, attachment.content_type)],
        attachment.data,
    )
        .into_response())
}
