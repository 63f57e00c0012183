use axum::{
    extract::DefaultBodyLimit,
    middleware as axum_middleware,
    routing::{get, post},
    Router,
};
use tower::ServiceBuilder;
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use crate::handlers::{health, ui, upload};
use crate::middleware::logging_middleware;
use crate::AppState;

/// Build application router
pub fn create_router(state: AppState) -> Router {
    let body_limit = state.config.server.max_request_body_kb * 1024;

    Router::new()
        // Browser UI
        .route("/", get(ui::index))
        // Health and monitoring
        .route("/health", get(health::liveness_check))
        .route("/health/ready", get(health::readiness_check))
        // Multipart upload
        .route("/initiate", post(upload::initiate_upload))
        .route("/presign", post(upload::presign_part))
        .route("/complete", post(upload::complete_upload))
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(axum_middleware::from_fn(logging_middleware))
                .layer(DefaultBodyLimit::max(body_limit))
                .layer(
                    CorsLayer::new()
                        .allow_origin(Any)
                        .allow_methods(Any)
                        .allow_headers(Any),
                ),
        )
        .with_state(state)
}
