use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::question::Question;

/// Minimum number of questions a quiz must hold before it may be persisted.
pub const MIN_QUIZ_QUESTIONS: usize = 5;

/// A user-authored quiz collection. Timestamps serialize as ISO strings in
/// the persisted blob and are reconstructed into `DateTime<Utc>` on load.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Quiz {
    #[serde(default)]
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub difficulty: QuizDifficulty,
    pub questions: Vec<Question>,
    #[serde(default)]
    pub tags: Vec<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum QuizDifficulty {
    Easy,
    Medium,
    Hard,
    #[default]
    Mixed,
}
