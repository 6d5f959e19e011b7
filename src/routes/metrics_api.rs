//! Ingestion endpoints for game client events plus the Prometheus scrape
//! endpoint. Ingestion is deliberately forgiving: malformed or absent bodies
//! fall back to defaults and every accepted event answers `{"success":true}`.

use axum::{
    http::{header, StatusCode},
    response::IntoResponse,
    Json,
};
use serde_json::json;

use crate::dto::metrics_dto::{AnswerMetric, LifelineMetric, QuizCompleteMetric};
use crate::error::Result;
use crate::metrics::registry;

fn ok() -> (StatusCode, Json<serde_json::Value>) {
    (StatusCode::OK, Json(json!({ "success": true })))
}

#[axum::debug_handler]
pub async fn quiz_start() -> impl IntoResponse {
    registry::QUIZ_STARTED.inc();
    registry::user_joined();
    ok()
}

#[axum::debug_handler]
pub async fn quiz_complete(body: Option<Json<QuizCompleteMetric>>) -> impl IntoResponse {
    let metric = body.map(|Json(m)| m).unwrap_or_default();
    registry::QUIZ_COMPLETED.inc();
    if let Some(score) = metric.score {
        registry::QUIZ_SCORE.observe(score);
    }
    registry::user_left();
    ok()
}

#[axum::debug_handler]
pub async fn answer(body: Option<Json<AnswerMetric>>) -> impl IntoResponse {
    let metric = body.map(|Json(m)| m).unwrap_or_default();
    let difficulty = metric.difficulty.as_deref().unwrap_or("unknown");

    if metric.correct {
        registry::CORRECT_ANSWERS
            .with_label_values(&[difficulty])
            .inc();
    } else {
        registry::WRONG_ANSWERS
            .with_label_values(&[difficulty])
            .inc();
    }

    // Zero values carry no timing signal and would only reset the gauge.
    if let (Some(question_id), Some(time_spent)) = (metric.question_id, metric.time_spent) {
        if question_id != 0 && time_spent > 0.0 {
            registry::QUESTION_TIME
                .with_label_values(&[&question_id.to_string(), difficulty])
                .set(time_spent);
        }
    }

    ok()
}

#[axum::debug_handler]
pub async fn lifeline(body: Option<Json<LifelineMetric>>) -> impl IntoResponse {
    let metric = body.map(|Json(m)| m).unwrap_or_default();
    let kind = metric.kind.as_deref().unwrap_or("unknown");
    registry::LIFELINE_USED.with_label_values(&[kind]).inc();
    ok()
}

#[axum::debug_handler]
pub async fn exposition() -> Result<impl IntoResponse> {
    let text = registry::encode_metrics()?;
    Ok((
        StatusCode::OK,
        [(header::CONTENT_TYPE, "text/plain; version=0.0.4")],
        text,
    ))
}
