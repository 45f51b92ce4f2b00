//! Login route

use axum::{extract::State, Json};
use serde::Deserialize;

use super::errors::RestResult;
use super::state::AppState;
use crate::auth::TokenResponse;

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

/// `POST /auth/login`
pub async fn login(
    State(state): State<AppState>,
    Json(request): Json<LoginRequest>,
) -> RestResult<Json<TokenResponse>> {
    let token = state.users.login(&request.username, &request.password)?;
    Ok(Json(token))
}
