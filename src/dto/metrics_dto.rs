use serde::Deserialize;

/// Bodies posted by game clients. Every field is optional so a sloppy or
/// older client can never turn a metrics call into an error.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct QuizCompleteMetric {
    #[serde(default)]
    pub score: Option<f64>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnswerMetric {
    #[serde(default)]
    pub correct: bool,
    #[serde(default)]
    pub difficulty: Option<String>,
    #[serde(default)]
    pub question_id: Option<i64>,
    #[serde(default)]
    pub time_spent: Option<f64>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct LifelineMetric {
    #[serde(rename = "type", default)]
    pub kind: Option<String>,
}
