use serde::{Deserialize, Serialize};

/// A single multiple-choice question. The wire format is the camelCase JSON
/// exchange format used for import/export (`correctAnswer`, `friendHint`,
/// `timeLimit`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Question {
    #[serde(default)]
    pub id: i64,
    pub question: String,
    pub options: Vec<String>,
    pub correct_answer: usize,
    #[serde(default)]
    pub difficulty: Difficulty,
    #[serde(default)]
    pub friend_hint: String,
    #[serde(default = "default_time_limit")]
    pub time_limit: u32,
}

pub fn default_time_limit() -> u32 {
    30
}

impl Question {
    /// Indices of the options that are not the correct answer.
    pub fn wrong_option_indices(&self) -> Vec<usize> {
        (0..self.options.len())
            .filter(|&i| i != self.correct_answer)
            .collect()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    Easy,
    #[default]
    Medium,
    Hard,
}

impl Difficulty {
    pub fn as_str(&self) -> &'static str {
        match self {
            Difficulty::Easy => "easy",
            Difficulty::Medium => "medium",
            Difficulty::Hard => "hard",
        }
    }

    /// Lenient parse used by the import path: unknown strings fall back to
    /// medium instead of failing the record.
    pub fn parse_or_default(raw: &str) -> Self {
        match raw {
            "easy" => Difficulty::Easy,
            "hard" => Difficulty::Hard,
            _ => Difficulty::Medium,
        }
    }
}

impl std::fmt::Display for Difficulty {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
