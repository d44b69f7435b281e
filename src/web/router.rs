//! Router configuration for Web API.

use axum::{
    routing::{get, post, put},
    Router,
};
use std::sync::Arc;
use tower::ServiceBuilder;
use tower_http::trace::TraceLayer;

use super::handlers::{
    connect, create_user, disconnect, index, me, publish, show, status, unpublish, upload,
    AppState,
};

/// Create the main API router.
pub fn create_router(app_state: Arc<AppState>) -> Router {
    // Session routes
    let auth_routes = Router::new()
        .route("/connect", get(connect))
        .route("/disconnect", get(disconnect));

    let user_routes = Router::new()
        .route("/users", post(create_user))
        .route("/users/me", get(me));

    // File routes (X-Token required)
    let file_routes = Router::new()
        .route("/files", post(upload).get(index))
        .route("/files/:id", get(show))
        .route("/files/:id/publish", put(publish))
        .route("/files/:id/unpublish", put(unpublish));

    Router::new()
        .route("/status", get(status))
        .merge(auth_routes)
        .merge(user_routes)
        .merge(file_routes)
        .layer(ServiceBuilder::new().layer(TraceLayer::new_for_http()))
        .with_state(app_state)
}
