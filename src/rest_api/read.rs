//! Read routes: lookup by id and search

use std::collections::BTreeMap;

use axum::{
    extract::{Path, Query, State},
    http::{header, HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use tracing::debug;

use super::dto::{base_uri, FahrradDto, FahrraederDto};
use super::errors::{RestError, RestResult};
use super::state::AppState;
use crate::version::VersionToken;

/// Whether `Accept` admits JSON or HTML; a missing header admits anything
pub fn accepts_json_or_html(headers: &HeaderMap) -> bool {
    let Some(accept) = headers.get(header::ACCEPT).and_then(|h| h.to_str().ok()) else {
        return true;
    };
    if accept.trim().is_empty() {
        return true;
    }

    accept.split(',').any(|range| {
        let mut parts = range.split(';');
        let media = parts.next().unwrap_or("").trim().to_ascii_lowercase();
        let refused = parts.any(|p| {
            let p = p.trim();
            p.strip_prefix("q=")
                .and_then(|q| q.trim().parse::<f32>().ok())
                .is_some_and(|q| q <= 0.0)
        });
        if refused {
            return false;
        }
        matches!(
            media.as_str(),
            "*/*" | "application/*" | "application/json" | "text/*" | "text/html"
        ) || media.ends_with("+json")
    })
}

/// `GET /api/:id`
pub async fn get_by_id(
    State(state): State<AppState>,
    Path(id): Path<String>,
    headers: HeaderMap,
) -> RestResult<Response> {
    if !accepts_json_or_html(&headers) {
        return Err(RestError::NotAcceptable);
    }

    let doc = state.reader.find_by_id(&id).await?.ok_or(RestError::NotFound)?;

    let if_none_match = headers.get(header::IF_NONE_MATCH).and_then(|h| h.to_str().ok());
    if VersionToken::matches(if_none_match, doc.version) {
        debug!(version = doc.version, "not modified");
        return Ok(StatusCode::NOT_MODIFIED.into_response());
    }

    let etag = VersionToken::format(doc.version);
    let body = FahrradDto::full(doc, &base_uri(&headers));
    Ok(([(header::ETAG, etag)], Json(body)).into_response())
}

/// `GET /api?<filter>`
pub async fn find(
    State(state): State<AppState>,
    Query(params): Query<BTreeMap<String, String>>,
    headers: HeaderMap,
) -> RestResult<Json<FahrraederDto>> {
    if !accepts_json_or_html(&headers) {
        return Err(RestError::NotAcceptable);
    }

    let query = (!params.is_empty()).then_some(&params);
    let found = state.reader.find(query).await?;
    if found.is_empty() {
        return Err(RestError::NotFound);
    }

    Ok(Json(FahrraederDto::new(found, &base_uri(&headers))))
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    fn accept(value: &'static str) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(header::ACCEPT, HeaderValue::from_static(value));
        headers
    }

    #[test]
    fn test_accept_negotiation() {
        assert!(accepts_json_or_html(&HeaderMap::new()));
        assert!(accepts_json_or_html(&accept("application/json")));
        assert!(accepts_json_or_html(&accept("text/html,application/xhtml+xml")));
        assert!(accepts_json_or_html(&accept("*/*")));
        assert!(accepts_json_or_html(&accept("application/hal+json")));
        assert!(!accepts_json_or_html(&accept("text/plain")));
        assert!(!accepts_json_or_html(&accept("image/png, application/xml")));
        assert!(!accepts_json_or_html(&accept("application/json;q=0")));
    }
}
