pub mod bank;
pub mod config;
pub mod dto;
pub mod error;
pub mod hints;
pub mod import;
pub mod metrics;
pub mod models;
pub mod routes;
pub mod session;
pub mod store;

use axum::{
    routing::{get, post},
    Router,
};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

/// Build the metrics server router. Shared by `main` and the integration
/// tests.
pub fn build_router() -> Router {
    Router::new()
        .route("/", get(routes::health::root))
        .route("/health", get(routes::health::health))
        .route("/metrics", get(routes::metrics_api::exposition))
        .route("/api/metrics/quiz-start", post(routes::metrics_api::quiz_start))
        .route(
            "/api/metrics/quiz-complete",
            post(routes::metrics_api::quiz_complete),
        )
        .route("/api/metrics/answer", post(routes::metrics_api::answer))
        .route("/api/metrics/lifeline", post(routes::metrics_api::lifeline))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
}
