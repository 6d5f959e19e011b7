//! Game event sinks.
//!
//! The session engine reports gameplay events through [`MetricsSink`] without
//! knowing where they land. The production sink relays them over HTTP to the
//! metrics server; tests use a recording sink.

use serde_json::json;

use crate::models::question::Difficulty;
use crate::session::engine::Lifeline;

/// Receiver for gameplay events. Implementations must never block or fail the
/// game loop; delivery is strictly best-effort.
#[cfg_attr(test, mockall::automock)]
pub trait MetricsSink {
    fn quiz_started(&self);
    fn quiz_completed(&self, score: u32);
    fn answer_recorded(&self, correct: bool, difficulty: Difficulty, question_id: i64, time_spent: u32);
    fn lifeline_used(&self, lifeline: Lifeline);
}

/// Sink that drops every event. Used when no metrics endpoint is configured.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullSink;

impl MetricsSink for NullSink {
    fn quiz_started(&self) {}
    fn quiz_completed(&self, _score: u32) {}
    fn answer_recorded(&self, _correct: bool, _difficulty: Difficulty, _question_id: i64, _time_spent: u32) {}
    fn lifeline_used(&self, _lifeline: Lifeline) {}
}

/// Fire-and-forget HTTP relay to the metrics server. Each event spawns a
/// detached task; failures are logged at debug level and otherwise swallowed
/// so a dead metrics server can never stall a session.
#[derive(Debug, Clone)]
pub struct RelaySink {
    client: reqwest::Client,
    base_url: String,
}

impl RelaySink {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: base_url.into(),
        }
    }

    fn post(&self, endpoint: &'static str, body: serde_json::Value) {
        let url = format!("{}/api/metrics/{}", self.base_url, endpoint);
        let client = self.client.clone();
        tokio::spawn(async move {
            if let Err(err) = client.post(&url).json(&body).send().await {
                tracing::debug!(%url, error = %err, "metrics relay failed");
            }
        });
    }
}

impl MetricsSink for RelaySink {
    fn quiz_started(&self) {
        self.post("quiz-start", json!({}));
    }

    fn quiz_completed(&self, score: u32) {
        self.post("quiz-complete", json!({ "score": score }));
    }

    fn answer_recorded(&self, correct: bool, difficulty: Difficulty, question_id: i64, time_spent: u32) {
        self.post(
            "answer",
            json!({
                "correct": correct,
                "difficulty": difficulty.as_str(),
                "questionId": question_id,
                "timeSpent": time_spent,
            }),
        );
    }

    fn lifeline_used(&self, lifeline: Lifeline) {
        self.post("lifeline", json!({ "type": lifeline.as_str() }));
    }
}

#[cfg(test)]
pub use recording::RecordingSink;

#[cfg(test)]
mod recording {
    use std::sync::Mutex;

    use super::*;

    #[derive(Debug, Clone, PartialEq, Eq)]
    pub struct RecordedAnswer {
        pub correct: bool,
        pub difficulty: Difficulty,
        pub question_id: i64,
        pub time_spent: u32,
    }

    /// In-memory sink for unit tests.
    #[derive(Debug, Default)]
    pub struct RecordingSink {
        quiz_starts: Mutex<u32>,
        completions: Mutex<Vec<u32>>,
        answers: Mutex<Vec<RecordedAnswer>>,
        lifelines: Mutex<Vec<&'static str>>,
    }

    impl RecordingSink {
        pub fn quiz_starts(&self) -> u32 {
            *self.quiz_starts.lock().unwrap()
        }

        pub fn completions(&self) -> Vec<u32> {
            self.completions.lock().unwrap().clone()
        }

        pub fn answers(&self) -> Vec<RecordedAnswer> {
            self.answers.lock().unwrap().clone()
        }

        pub fn lifelines(&self) -> Vec<&'static str> {
            self.lifelines.lock().unwrap().clone()
        }
    }

    impl MetricsSink for RecordingSink {
        fn quiz_started(&self) {
            *self.quiz_starts.lock().unwrap() += 1;
        }

        fn quiz_completed(&self, score: u32) {
            self.completions.lock().unwrap().push(score);
        }

        fn answer_recorded(&self, correct: bool, difficulty: Difficulty, question_id: i64, time_spent: u32) {
            self.answers.lock().unwrap().push(RecordedAnswer {
                correct,
                difficulty,
                question_id,
                time_spent,
            });
        }

        fn lifeline_used(&self, lifeline: Lifeline) {
            self.lifelines.lock().unwrap().push(lifeline.as_str());
        }
    }
}
