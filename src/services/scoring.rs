use crate::models::domain::{Answer, Question};

/// Counts answers that match the question's correct index.
///
/// Positions are matched by index. Unanswered, out-of-range, and missing
/// entries (when `answers` is shorter than `questions`) score zero. Extra
/// answers beyond the question list are ignored.
pub fn score(answers: &[Answer], questions: &[Question]) -> u32 {
    questions
        .iter()
        .zip(answers.iter().copied())
        .filter(|(question, answer)| question.is_correct(*answer))
        .count() as u32
}
