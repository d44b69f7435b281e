//! Authentication handlers.

use axum::{
    extract::State,
    http::{header::AUTHORIZATION, HeaderMap, StatusCode},
    Json,
};
use std::sync::Arc;

use super::AppState;
use crate::web::dto::TokenResponse;
use crate::web::error::ApiError;
use crate::web::middleware::token_from_headers;

/// GET /connect - Sign in with `Authorization: Basic`.
pub async fn connect(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
) -> Result<Json<TokenResponse>, ApiError> {
    let authorization = headers
        .get(AUTHORIZATION)
        .and_then(|value| value.to_str().ok());

    let session = state.auth.sign_in(authorization).await?;

    Ok(Json(TokenResponse {
        token: session.token,
    }))
}

/// GET /disconnect - Revoke the `X-Token` session.
pub async fn disconnect(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
) -> Result<StatusCode, ApiError> {
    state.auth.sign_out(token_from_headers(&headers)).await?;
    Ok(StatusCode::NO_CONTENT)
}
