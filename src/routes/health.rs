use axum::{http::StatusCode, response::IntoResponse, Json};
use serde_json::json;

#[axum::debug_handler]
pub async fn health() -> impl IntoResponse {
    let body = json!({
        "status": "healthy",
        "timestamp": chrono::Utc::now().to_rfc3339(),
    });
    (StatusCode::OK, Json(body))
}

/// Service descriptor for debugging and discovery.
#[axum::debug_handler]
pub async fn root() -> impl IntoResponse {
    let body = json!({
        "service": "Mathpati Metrics Server",
        "version": env!("CARGO_PKG_VERSION"),
        "endpoints": {
            "metrics": "/metrics",
            "health": "/health",
            "api": {
                "quizStart": "POST /api/metrics/quiz-start",
                "quizComplete": "POST /api/metrics/quiz-complete",
                "answer": "POST /api/metrics/answer",
                "lifeline": "POST /api/metrics/lifeline"
            }
        }
    });
    (StatusCode::OK, Json(body))
}
