//! Session token authentication.

use std::sync::Arc;

use axum::{
    async_trait,
    extract::FromRequestParts,
    http::{request::Parts, HeaderMap},
};

use crate::db::UserId;
use crate::web::error::ApiError;
use crate::web::handlers::AppState;

/// Header carrying the session token.
pub const TOKEN_HEADER: &str = "x-token";

/// Session token sent with the request, if any.
pub fn token_from_headers(headers: &HeaderMap) -> Option<&str> {
    headers
        .get(TOKEN_HEADER)
        .and_then(|value| value.to_str().ok())
        .filter(|token| !token.is_empty())
}

/// Extractor for authenticated users.
///
/// Resolves the `X-Token` header against the session store and rejects
/// with 401 when the token is missing, unknown or expired.
#[derive(Debug, Clone, Copy)]
pub struct AuthUser(pub UserId);

#[async_trait]
impl FromRequestParts<Arc<AppState>> for AuthUser {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &Arc<AppState>,
    ) -> Result<Self, Self::Rejection> {
        let token = token_from_headers(&parts.headers).ok_or_else(ApiError::unauthorized)?;

        let resolved = state.auth.resolve(token).await?.ok_or_else(|| {
            tracing::debug!("Unknown or expired session token");
            ApiError::unauthorized()
        })?;

        Ok(AuthUser(resolved.user_id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    #[test]
    fn test_token_from_headers() {
        let mut headers = HeaderMap::new();
        assert_eq!(token_from_headers(&headers), None);

        headers.insert(TOKEN_HEADER, HeaderValue::from_static(""));
        assert_eq!(token_from_headers(&headers), None);

        headers.insert(TOKEN_HEADER, HeaderValue::from_static("abc"));
        assert_eq!(token_from_headers(&headers), Some("abc"));
    }
}
