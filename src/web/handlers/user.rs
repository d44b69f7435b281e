//! User handlers.

use axum::{
    extract::{rejection::JsonRejection, State},
    http::{HeaderMap, StatusCode},
    Json,
};
use std::sync::Arc;

use super::AppState;
use crate::auth::register;
use crate::web::dto::{RegisterRequest, UserResponse};
use crate::web::error::ApiError;
use crate::web::middleware::token_from_headers;

/// POST /users - Register a new user.
///
/// An unreadable body is treated as empty, so it reports the first
/// missing field.
pub async fn create_user(
    State(state): State<Arc<AppState>>,
    body: Result<Json<RegisterRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<UserResponse>), ApiError> {
    let request = body.map(|Json(req)| req).unwrap_or_default();

    let user = register(
        state.users.as_ref(),
        request.email.as_deref(),
        request.password.as_deref(),
    )
    .await?;

    Ok((StatusCode::CREATED, Json(user.into())))
}

/// GET /users/me - The user behind `X-Token`.
pub async fn me(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
) -> Result<Json<UserResponse>, ApiError> {
    let user = state.auth.current_user(token_from_headers(&headers)).await?;
    Ok(Json(user.into()))
}
