use rand::seq::SliceRandom;

use crate::models::question::{Difficulty, Question};

/// Immutable collection of built-in questions, consulted at session start and
/// by the flip lifeline.
#[derive(Debug, Clone)]
pub struct QuestionBank {
    questions: Vec<Question>,
}

impl Default for QuestionBank {
    fn default() -> Self {
        Self::builtin()
    }
}

impl QuestionBank {
    /// The stock math question set.
    pub fn builtin() -> Self {
        Self {
            questions: builtin_questions(),
        }
    }

    /// A bank backed by an arbitrary question set (used by tests).
    pub fn new(questions: Vec<Question>) -> Self {
        Self { questions }
    }

    pub fn len(&self) -> usize {
        self.questions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.questions.is_empty()
    }

    /// `n` distinct questions without replacement, order randomized. `n` is
    /// clamped to the bank size.
    pub fn sample_random(&self, n: usize) -> Vec<Question> {
        let mut shuffled = self.questions.clone();
        shuffled.shuffle(&mut rand::thread_rng());
        shuffled.truncate(n.min(self.questions.len()));
        shuffled
    }

    /// One question whose id is not in `excluding`, uniformly at random.
    /// `None` when the bank minus exclusions is empty; the flip lifeline
    /// treats that as a no-op.
    pub fn pick_replacement(&self, excluding: &[Question]) -> Option<Question> {
        let candidates: Vec<&Question> = self
            .questions
            .iter()
            .filter(|q| !excluding.iter().any(|e| e.id == q.id))
            .collect();
        candidates.choose(&mut rand::thread_rng()).map(|q| (*q).clone())
    }
}

fn q(
    id: i64,
    question: &str,
    options: [&str; 4],
    correct_answer: usize,
    difficulty: Difficulty,
    friend_hint: &str,
) -> Question {
    Question {
        id,
        question: question.to_string(),
        options: options.iter().map(|s| s.to_string()).collect(),
        correct_answer,
        difficulty,
        friend_hint: friend_hint.to_string(),
        time_limit: 30,
    }
}

fn builtin_questions() -> Vec<Question> {
    use Difficulty::{Easy, Hard, Medium};
    vec![
        q(
            1,
            "What is 15 + 27?",
            ["40", "42", "44", "41"],
            1,
            Easy,
            "I think it's 42. Just add them step by step: 15 + 27 = 42.",
        ),
        q(
            2,
            "What is 8 \u{d7} 7?",
            ["54", "56", "58", "52"],
            1,
            Easy,
            "Remember the multiplication table: 8 \u{d7} 7 = 56.",
        ),
        q(
            3,
            "What is 144 \u{f7} 12?",
            ["11", "12", "13", "14"],
            1,
            Easy,
            "Think of it as: how many 12s go into 144? It's 12.",
        ),
        q(
            4,
            "What is 25% of 80?",
            ["15", "20", "25", "30"],
            1,
            Easy,
            "25% is 1/4, so 80 \u{f7} 4 = 20.",
        ),
        q(
            5,
            "What is the square root of 169?",
            ["11", "12", "13", "14"],
            2,
            Medium,
            "I remember 13 \u{d7} 13 = 169, so the square root is 13.",
        ),
        q(
            6,
            "If a = 5 and b = 3, what is a\u{b2} + b\u{b2}?",
            ["28", "30", "32", "34"],
            3,
            Medium,
            "a\u{b2} = 25, b\u{b2} = 9, so 25 + 9 = 34.",
        ),
        q(
            7,
            "What is 15% of 240?",
            ["32", "34", "36", "38"],
            2,
            Medium,
            "15% = 0.15, so 240 \u{d7} 0.15 = 36.",
        ),
        q(
            8,
            "What is the value of 2\u{b3} + 3\u{b2} - 4?",
            ["11", "12", "13", "14"],
            2,
            Hard,
            "2\u{b3} = 8, 3\u{b2} = 9, so 8 + 9 - 4 = 13.",
        ),
        q(
            9,
            "If 3x + 7 = 22, what is x?",
            ["4", "5", "6", "7"],
            1,
            Hard,
            "Subtract 7 from both sides: 3x = 15, then divide by 3: x = 5.",
        ),
        q(
            10,
            "What is the area of a circle with radius 7? (Use \u{3c0} \u{2248} 3.14)",
            ["153.86", "148.24", "150.36", "151.78"],
            0,
            Hard,
            "Area = \u{3c0} \u{d7} r\u{b2}. So 3.14 \u{d7} 7\u{b2} = 3.14 \u{d7} 49 = 153.86.",
        ),
        q(
            11,
            "What is 9 \u{d7} 8?",
            ["70", "72", "74", "76"],
            1,
            Easy,
            "9 \u{d7} 8 = 72. Think of it as (10 \u{d7} 8) - 8 = 80 - 8 = 72.",
        ),
        q(
            12,
            "What is 100 - 37?",
            ["61", "62", "63", "64"],
            2,
            Easy,
            "100 - 37 = 63. Just subtract step by step.",
        ),
        q(
            13,
            "What is 6\u{b2}?",
            ["34", "35", "36", "37"],
            2,
            Easy,
            "6\u{b2} means 6 \u{d7} 6 = 36.",
        ),
        q(
            14,
            "What is 50% of 180?",
            ["80", "85", "90", "95"],
            2,
            Medium,
            "50% is half, so 180 \u{f7} 2 = 90.",
        ),
        q(
            15,
            "What is 7 \u{d7} 9?",
            ["61", "63", "65", "67"],
            1,
            Medium,
            "7 \u{d7} 9 = 63. Remember your multiplication tables!",
        ),
        q(
            16,
            "If y = 4x and x = 3, what is y?",
            ["10", "11", "12", "13"],
            2,
            Medium,
            "Substitute x = 3 into y = 4x: y = 4 \u{d7} 3 = 12.",
        ),
        q(
            17,
            "What is the cube of 4?",
            ["62", "63", "64", "65"],
            2,
            Hard,
            "4\u{b3} = 4 \u{d7} 4 \u{d7} 4 = 16 \u{d7} 4 = 64.",
        ),
        q(
            18,
            "What is 20% of 250?",
            ["45", "50", "55", "60"],
            1,
            Hard,
            "20% = 0.20, so 250 \u{d7} 0.20 = 50.",
        ),
        q(
            19,
            "If the perimeter of a square is 28, what is its area?",
            ["47", "48", "49", "50"],
            2,
            Hard,
            "Perimeter = 4 \u{d7} side, so side = 28 \u{f7} 4 = 7. Area = 7\u{b2} = 49.",
        ),
        q(
            20,
            "What is log\u{2082}(8)?",
            ["2", "3", "4", "5"],
            1,
            Hard,
            "Think: 2 to what power equals 8? 2\u{b3} = 8, so log\u{2082}(8) = 3.",
        ),
    ]
}
