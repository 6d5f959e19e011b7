pub mod engine;
pub mod poll;
pub mod timer;

pub use engine::{Lifeline, Phase, QuestionSource, SessionEngine};
