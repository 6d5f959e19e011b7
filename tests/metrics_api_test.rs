use std::env;
use std::time::Duration;

use axum::{
    body::{to_bytes, Body},
    http::{Request, StatusCode},
};
use serde_json::{json, Value as JsonValue};
use tower::ServiceExt;

use mathpati_backend::bank::QuestionBank;
use mathpati_backend::metrics::registry::register_metrics;
use mathpati_backend::metrics::RelaySink;
use mathpati_backend::session::{Lifeline, Phase, QuestionSource, SessionEngine};

fn counter_value(exposition: &str, name: &str) -> f64 {
    exposition
        .lines()
        .filter(|line| !line.starts_with('#'))
        .find(|line| line.starts_with(name))
        .and_then(|line| line.split_whitespace().last())
        .and_then(|value| value.parse().ok())
        .unwrap_or_default()
}

async fn json_body(response: axum::response::Response) -> JsonValue {
    let bytes = to_bytes(response.into_body(), usize::MAX).await.expect("body");
    serde_json::from_slice(&bytes).expect("json body")
}

fn post_json(uri: &str, body: JsonValue) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .expect("request")
}

#[tokio::test]
async fn metrics_api_end_to_end() {
    dotenvy::dotenv().ok();
    env::set_var("SERVER_ADDRESS", "127.0.0.1:0");

    // Both tests share the process; init once wins and that is fine.
    let _ = mathpati_backend::config::init_config();
    let _ = register_metrics();

    let app = mathpati_backend::build_router();

    // Root descriptor and health check.
    let response = app
        .clone()
        .oneshot(Request::get("/").body(Body::empty()).expect("request"))
        .await
        .expect("response");
    assert_eq!(response.status(), StatusCode::OK);
    let root = json_body(response).await;
    assert_eq!(root["service"], "Mathpati Metrics Server");

    let response = app
        .clone()
        .oneshot(Request::get("/health").body(Body::empty()).expect("request"))
        .await
        .expect("response");
    assert_eq!(response.status(), StatusCode::OK);
    let health = json_body(response).await;
    assert_eq!(health["status"], "healthy");
    assert!(health["timestamp"].is_string());

    // Quiz start with an empty body.
    let response = app
        .clone()
        .oneshot(
            Request::post("/api/metrics/quiz-start")
                .body(Body::empty())
                .expect("request"),
        )
        .await
        .expect("response");
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(json_body(response).await, json!({ "success": true }));

    // Answers, one correct and one wrong, then a lifeline.
    let response = app
        .clone()
        .oneshot(post_json(
            "/api/metrics/answer",
            json!({ "correct": true, "difficulty": "easy", "questionId": 3, "timeSpent": 7 }),
        ))
        .await
        .expect("response");
    assert_eq!(json_body(response).await, json!({ "success": true }));

    let response = app
        .clone()
        .oneshot(post_json(
            "/api/metrics/answer",
            json!({ "correct": false, "difficulty": "hard" }),
        ))
        .await
        .expect("response");
    assert_eq!(json_body(response).await, json!({ "success": true }));

    let response = app
        .clone()
        .oneshot(post_json("/api/metrics/lifeline", json!({ "type": "50-50" })))
        .await
        .expect("response");
    assert_eq!(json_body(response).await, json!({ "success": true }));

    // Completion with a score observes the histogram and releases the user.
    let response = app
        .clone()
        .oneshot(post_json("/api/metrics/quiz-complete", json!({ "score": 7 })))
        .await
        .expect("response");
    assert_eq!(json_body(response).await, json!({ "success": true }));

    // A malformed body still counts the completion.
    let response = app
        .clone()
        .oneshot(post_json("/api/metrics/quiz-complete", json!("garbage")))
        .await
        .expect("response");
    assert_eq!(response.status(), StatusCode::OK);

    // Scrape and verify everything landed.
    let response = app
        .clone()
        .oneshot(Request::get("/metrics").body(Body::empty()).expect("request"))
        .await
        .expect("response");
    assert_eq!(response.status(), StatusCode::OK);
    let content_type = response
        .headers()
        .get("content-type")
        .and_then(|v| v.to_str().ok())
        .map(str::to_owned)
        .unwrap_or_default();
    assert!(content_type.starts_with("text/plain"));

    let bytes = to_bytes(response.into_body(), usize::MAX).await.expect("body");
    let exposition = String::from_utf8(bytes.to_vec()).expect("utf8");

    assert!(counter_value(&exposition, "mathpati_quiz_started_total") >= 1.0);
    assert!(counter_value(&exposition, "mathpati_quiz_completed_total") >= 2.0);
    assert!(exposition.contains(r#"mathpati_correct_answers_total{difficulty="easy"}"#));
    assert!(exposition.contains(r#"mathpati_wrong_answers_total{difficulty="hard"}"#));
    assert!(exposition.contains(r#"mathpati_lifeline_used_total{type="50-50"}"#));
    assert!(exposition.contains("mathpati_quiz_score_bucket"));
    assert!(exposition
        .contains(r#"mathpati_question_time_seconds{difficulty="easy",question_id="3"}"#));
    assert!(exposition.contains("mathpati_active_users"));
}

#[tokio::test]
async fn relay_sink_reaches_a_live_server() {
    dotenvy::dotenv().ok();
    env::set_var("SERVER_ADDRESS", "127.0.0.1:0");
    let _ = mathpati_backend::config::init_config();
    let _ = register_metrics();

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind");
    let addr = listener.local_addr().expect("addr");
    tokio::spawn(async move {
        axum::serve(listener, mathpati_backend::build_router())
            .await
            .expect("serve");
    });

    let sink = RelaySink::new(format!("http://{}", addr));
    let mut engine = SessionEngine::new(QuestionBank::builtin(), sink);

    engine.start(QuestionSource::Bank);
    engine.use_lifeline(Lifeline::Hint);
    engine.reveal_hint_now();
    let wrong = engine
        .current_question()
        .expect("question")
        .wrong_option_indices()[0];
    engine.select_answer(wrong);
    engine.tick();
    engine.tick();
    assert_eq!(engine.phase(), Phase::GameOver);

    // Relay posts are fire-and-forget; give them a moment to land.
    tokio::time::sleep(Duration::from_millis(300)).await;

    let exposition = reqwest::get(format!("http://{}/metrics", addr))
        .await
        .expect("scrape")
        .text()
        .await
        .expect("text");

    assert!(counter_value(&exposition, "mathpati_quiz_started_total") >= 1.0);
    assert!(counter_value(&exposition, "mathpati_quiz_completed_total") >= 1.0);
    assert!(exposition.contains(r#"mathpati_lifeline_used_total{type="hint"}"#));
    assert!(exposition.contains("mathpati_wrong_answers_total"));
}
