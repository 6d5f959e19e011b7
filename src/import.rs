//! JSON import for user-supplied question and quiz data.
//!
//! The exchange format is lenient by contract: records missing required
//! fields are filtered rather than failing the whole import, and optional
//! fields are normalized to their defaults. Malformed JSON surfaces as a
//! structured [`ImportError`], never a panic.

use chrono::Utc;
use serde_json::Value;
use uuid::Uuid;

use crate::models::question::{default_time_limit, Difficulty, Question};
use crate::models::quiz::Quiz;

#[derive(Debug, thiserror::Error)]
pub enum ImportError {
    #[error("Invalid JSON: {0}")]
    InvalidJson(String),

    #[error("No valid questions found in the imported data")]
    NoValidQuestions,

    #[error("No valid quizzes found in the imported data")]
    NoValidQuizzes,
}

/// Parse a question import: either a bare array of question records or an
/// object wrapping such an array under `questions`. Returns the normalized
/// questions with ids reassigned 1..n.
pub fn import_questions(raw: &str) -> Result<Vec<Question>, ImportError> {
    let value: Value =
        serde_json::from_str(raw).map_err(|e| ImportError::InvalidJson(e.to_string()))?;

    let records = match &value {
        Value::Array(items) => items.as_slice(),
        Value::Object(map) => match map.get("questions") {
            Some(Value::Array(items)) => items.as_slice(),
            _ => &[],
        },
        _ => &[],
    };

    let questions: Vec<Question> = records
        .iter()
        .filter(|r| is_question_like(r))
        .enumerate()
        .map(|(idx, r)| normalize_question(r, idx as i64 + 1))
        .collect();

    if questions.is_empty() {
        return Err(ImportError::NoValidQuestions);
    }
    Ok(questions)
}

/// Parse a quiz-collection import: a JSON array of Quiz records. Entries
/// without a title and questions array are filtered; survivors get fresh ids
/// and timestamps so an import never collides with existing entries.
pub fn import_quizzes(raw: &str) -> Result<Vec<Quiz>, ImportError> {
    let value: Value =
        serde_json::from_str(raw).map_err(|e| ImportError::InvalidJson(e.to_string()))?;

    let Value::Array(items) = value else {
        return Err(ImportError::NoValidQuizzes);
    };

    let now = Utc::now();
    let quizzes: Vec<Quiz> = items
        .iter()
        .filter(|item| {
            item.get("title").and_then(Value::as_str).is_some()
                && item.get("questions").map(Value::is_array).unwrap_or(false)
        })
        .filter_map(|item| serde_json::from_value::<Quiz>(sanitize_quiz(item, now)).ok())
        .collect();

    if quizzes.is_empty() {
        return Err(ImportError::NoValidQuizzes);
    }
    Ok(quizzes)
}

fn is_question_like(record: &Value) -> bool {
    record.get("question").and_then(Value::as_str).is_some()
        && record.get("options").map(Value::is_array).unwrap_or(false)
        && record.get("correctAnswer").and_then(Value::as_i64).is_some()
}

fn normalize_question(record: &Value, id: i64) -> Question {
    let options: Vec<String> = record
        .get("options")
        .and_then(Value::as_array)
        .map(|items| {
            items
                .iter()
                .filter_map(Value::as_str)
                .take(4)
                .map(str::to_string)
                .collect()
        })
        .unwrap_or_default();

    let raw_answer = record
        .get("correctAnswer")
        .and_then(Value::as_i64)
        .unwrap_or(0)
        .max(0) as usize;
    // Lenient contract: an out-of-range index is clamped rather than the
    // record being rejected.
    let correct_answer = raw_answer.min(options.len().saturating_sub(1));

    Question {
        id,
        question: record
            .get("question")
            .and_then(Value::as_str)
            .unwrap_or_default()
            .to_string(),
        options,
        correct_answer,
        difficulty: record
            .get("difficulty")
            .and_then(Value::as_str)
            .map(Difficulty::parse_or_default)
            .unwrap_or_default(),
        friend_hint: record
            .get("friendHint")
            .and_then(Value::as_str)
            .unwrap_or_default()
            .to_string(),
        time_limit: record
            .get("timeLimit")
            .and_then(Value::as_u64)
            .filter(|&t| t > 0)
            .map(|t| t as u32)
            .unwrap_or_else(default_time_limit),
    }
}

fn sanitize_quiz(item: &Value, now: chrono::DateTime<Utc>) -> Value {
    let mut quiz = item.clone();
    if let Value::Object(map) = &mut quiz {
        map.insert("id".into(), Value::String(Uuid::new_v4().to_string()));
        map.insert("createdAt".into(), serde_json::json!(now));
        map.insert("updatedAt".into(), serde_json::json!(now));
    }
    quiz
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalizes_missing_optional_fields() {
        let questions = import_questions(
            r#"[{"question":"2+2?","options":["3","4","5","6"],"correctAnswer":1}]"#,
        )
        .unwrap();
        assert_eq!(questions.len(), 1);
        let q = &questions[0];
        assert_eq!(q.id, 1);
        assert_eq!(q.difficulty, Difficulty::Medium);
        assert_eq!(q.time_limit, 30);
        assert_eq!(q.friend_hint, "");
        assert_eq!(q.correct_answer, 1);
    }

    #[test]
    fn accepts_object_wrapper() {
        let questions = import_questions(
            r#"{"questions":[{"question":"5*3?","options":["12","15","18","20"],"correctAnswer":1,"difficulty":"hard","timeLimit":45}]}"#,
        )
        .unwrap();
        assert_eq!(questions[0].difficulty, Difficulty::Hard);
        assert_eq!(questions[0].time_limit, 45);
    }

    #[test]
    fn filters_records_missing_required_fields() {
        let questions = import_questions(
            r#"[
                {"question":"ok","options":["a","b","c","d"],"correctAnswer":0},
                {"question":"no options","correctAnswer":0},
                {"options":["a","b"],"correctAnswer":0},
                {"question":"bad answer","options":["a","b"],"correctAnswer":"one"}
            ]"#,
        )
        .unwrap();
        assert_eq!(questions.len(), 1);
        assert_eq!(questions[0].question, "ok");
    }

    #[test]
    fn malformed_json_is_a_structured_failure() {
        let err = import_questions(r#"[{"question":"trailing",},]"#).unwrap_err();
        assert!(matches!(err, ImportError::InvalidJson(_)));
    }

    #[test]
    fn zero_valid_records_is_reported() {
        let err = import_questions(r#"[{"title":"not a question"}]"#).unwrap_err();
        assert!(matches!(err, ImportError::NoValidQuestions));

        let err = import_questions(r#"{"notQuestions":[]}"#).unwrap_err();
        assert!(matches!(err, ImportError::NoValidQuestions));
    }

    #[test]
    fn options_truncated_and_answer_clamped() {
        let questions = import_questions(
            r#"[{"question":"q","options":["a","b","c","d","e","f"],"correctAnswer":5}]"#,
        )
        .unwrap();
        assert_eq!(questions[0].options.len(), 4);
        assert_eq!(questions[0].correct_answer, 3);
    }

    #[test]
    fn quiz_import_assigns_fresh_ids_and_timestamps() {
        let raw = r#"[
            {"title":"Algebra","questions":[],"id":"old","createdAt":"2020-01-01T00:00:00Z","updatedAt":"2020-01-01T00:00:00Z"},
            {"noTitle":true}
        ]"#;
        let quizzes = import_quizzes(raw).unwrap();
        assert_eq!(quizzes.len(), 1);
        assert_ne!(quizzes[0].id, "old");
        assert!(quizzes[0].created_at > chrono::Utc::now() - chrono::Duration::minutes(1));
    }
}
