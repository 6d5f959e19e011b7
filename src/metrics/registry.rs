//! Prometheus metrics for the quiz platform.
//!
//! All metrics use the `mathpati_` prefix. Counters track gameplay volume,
//! the score histogram captures the 0..=10 outcome distribution, and gauges
//! track per-question answer time and the live user count.

use lazy_static::lazy_static;
use prometheus::{
    linear_buckets, Counter, CounterVec, Encoder, Gauge, GaugeVec, Histogram, HistogramOpts, Opts,
    Registry, TextEncoder,
};

use crate::error::Result;

lazy_static! {
    /// Global metrics registry
    pub static ref REGISTRY: Registry = Registry::new();

    /// Quiz sessions started
    pub static ref QUIZ_STARTED: Counter = Counter::new(
        "mathpati_quiz_started_total",
        "Total number of quiz sessions started"
    ).expect("metric creation failed");

    /// Quiz sessions completed (win, loss or timeout)
    pub static ref QUIZ_COMPLETED: Counter = Counter::new(
        "mathpati_quiz_completed_total",
        "Total number of quiz sessions completed"
    ).expect("metric creation failed");

    /// Correct answers by difficulty
    pub static ref CORRECT_ANSWERS: CounterVec = CounterVec::new(
        Opts::new("mathpati_correct_answers_total", "Total correct answers"),
        &["difficulty"]
    ).expect("metric creation failed");

    /// Wrong answers by difficulty
    pub static ref WRONG_ANSWERS: CounterVec = CounterVec::new(
        Opts::new("mathpati_wrong_answers_total", "Total wrong answers"),
        &["difficulty"]
    ).expect("metric creation failed");

    /// Lifeline activations by kind
    pub static ref LIFELINE_USED: CounterVec = CounterVec::new(
        Opts::new("mathpati_lifeline_used_total", "Total lifelines used"),
        &["type"]
    ).expect("metric creation failed");

    /// Final score distribution, one bucket per possible score
    pub static ref QUIZ_SCORE: Histogram = Histogram::with_opts(
        HistogramOpts::new(
            "mathpati_quiz_score",
            "Distribution of final quiz scores"
        ).buckets(linear_buckets(0.0, 1.0, 11).expect("bucket creation failed"))
    ).expect("metric creation failed");

    /// Seconds spent on the most recent answer to each question
    pub static ref QUESTION_TIME: GaugeVec = GaugeVec::new(
        Opts::new(
            "mathpati_question_time_seconds",
            "Time spent answering a question"
        ),
        &["question_id", "difficulty"]
    ).expect("metric creation failed");

    /// Currently active users
    pub static ref ACTIVE_USERS: Gauge = Gauge::new(
        "mathpati_active_users",
        "Number of currently active users"
    ).expect("metric creation failed");
}

/// Register all metrics with the global registry. Call once at startup.
pub fn register_metrics() -> Result<()> {
    let metrics: Vec<Box<dyn prometheus::core::Collector>> = vec![
        Box::new(QUIZ_STARTED.clone()),
        Box::new(QUIZ_COMPLETED.clone()),
        Box::new(CORRECT_ANSWERS.clone()),
        Box::new(WRONG_ANSWERS.clone()),
        Box::new(LIFELINE_USED.clone()),
        Box::new(QUIZ_SCORE.clone()),
        Box::new(QUESTION_TIME.clone()),
        Box::new(ACTIVE_USERS.clone()),
    ];

    for metric in metrics {
        REGISTRY.register(metric)?;
    }
    Ok(())
}

/// Encode all registered metrics in the Prometheus text format.
pub fn encode_metrics() -> Result<String> {
    let encoder = TextEncoder::new();
    let metric_families = REGISTRY.gather();
    let mut buffer = Vec::new();
    encoder.encode(&metric_families, &mut buffer)?;
    Ok(String::from_utf8_lossy(&buffer).into_owned())
}

/// Increment the active user gauge.
pub fn user_joined() {
    ACTIVE_USERS.inc();
}

/// Decrement the active user gauge, never dropping below zero.
pub fn user_left() {
    ACTIVE_USERS.dec();
    if ACTIVE_USERS.get() < 0.0 {
        ACTIVE_USERS.set(0.0);
    }
}
