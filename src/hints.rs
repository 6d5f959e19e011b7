use crate::models::question::Question;

/// The hint shown by the hint lifeline: the question's authored friend hint,
/// or a keyword-derived fallback when none was written.
pub fn hint_for(question: &Question) -> String {
    if !question.friend_hint.is_empty() {
        return question.friend_hint.clone();
    }

    let text = question.question.to_lowercase();
    let fallback = if text.contains("prime") {
        "Think about numbers that are only divisible by 1 and themselves."
    } else if text.contains("area") || text.contains("perimeter") {
        "Remember the basic formulas for geometric shapes."
    } else if text.contains("probability") {
        "Consider the ratio of favorable outcomes to total possible outcomes."
    } else if text.contains("equation") {
        "Try to isolate the variable by performing the same operation on both sides."
    } else {
        "Break down the problem into smaller, manageable steps."
    };
    fallback.to_string()
}
