//! Quiz persistence.
//!
//! The store is an upsert-only capability: quizzes are created and updated,
//! never removed. The trait deliberately has no delete method so permanence
//! is enforced by the contract itself rather than by callers agreeing not to
//! call something.

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use chrono::Utc;
use uuid::Uuid;

use crate::error::{Error, Result};
use crate::models::quiz::{Quiz, MIN_QUIZ_QUESTIONS};

pub trait QuizRepository: Send + Sync {
    /// All persisted quizzes, timestamps deserialized.
    fn list(&self) -> Result<Vec<Quiz>>;

    /// Replace the quiz with the same id (refreshing `updated_at`), or assign
    /// a fresh id and append. Returns the stored record.
    fn upsert(&self, quiz: Quiz) -> Result<Quiz>;
}

fn apply_upsert(quizzes: &mut Vec<Quiz>, mut quiz: Quiz) -> Result<Quiz> {
    if quiz.questions.len() < MIN_QUIZ_QUESTIONS {
        return Err(Error::BadRequest(format!(
            "A quiz must contain at least {} questions to be saved",
            MIN_QUIZ_QUESTIONS
        )));
    }

    let now = Utc::now();
    if let Some(existing) = quizzes.iter_mut().find(|q| !quiz.id.is_empty() && q.id == quiz.id) {
        quiz.created_at = existing.created_at;
        quiz.updated_at = now;
        *existing = quiz.clone();
    } else {
        if quiz.id.is_empty() {
            quiz.id = Uuid::new_v4().to_string();
        }
        quiz.created_at = now;
        quiz.updated_at = now;
        quizzes.push(quiz.clone());
    }
    Ok(quiz)
}

/// In-memory store backing tests and ephemeral sessions.
#[derive(Default)]
pub struct MemoryQuizStore {
    quizzes: Mutex<Vec<Quiz>>,
}

impl MemoryQuizStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl QuizRepository for MemoryQuizStore {
    fn list(&self) -> Result<Vec<Quiz>> {
        Ok(self.quizzes.lock().expect("store lock poisoned").clone())
    }

    fn upsert(&self, quiz: Quiz) -> Result<Quiz> {
        let mut quizzes = self.quizzes.lock().expect("store lock poisoned");
        apply_upsert(&mut quizzes, quiz)
    }
}

/// File-backed store: one JSON array blob, read-modify-write on every upsert.
/// Concurrent writers in separate processes are last-write-wins; that is an
/// accepted limitation of the format.
pub struct FileQuizStore {
    path: PathBuf,
}

impl FileQuizStore {
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    fn load(&self) -> Result<Vec<Quiz>> {
        if !self.path.exists() {
            return Ok(Vec::new());
        }
        let raw = fs::read_to_string(&self.path)?;
        if raw.trim().is_empty() {
            return Ok(Vec::new());
        }
        let quizzes = serde_json::from_str(&raw)?;
        Ok(quizzes)
    }

    fn save(&self, quizzes: &[Quiz]) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        fs::write(&self.path, serde_json::to_string_pretty(quizzes)?)?;
        Ok(())
    }
}

impl QuizRepository for FileQuizStore {
    fn list(&self) -> Result<Vec<Quiz>> {
        self.load()
    }

    fn upsert(&self, quiz: Quiz) -> Result<Quiz> {
        let mut quizzes = self.load()?;
        let stored = apply_upsert(&mut quizzes, quiz)?;
        self.save(&quizzes)?;
        Ok(stored)
    }
}
