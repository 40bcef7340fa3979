use serde::{Deserialize, Serialize};

/// Every question is multiple choice with exactly this many options.
pub const OPTION_COUNT: usize = 4;

/// Index into a question's options, `0..OPTION_COUNT`.
pub type AnswerIndex = u8;

/// Answer slot for one question; `None` means unanswered.
pub type Answer = Option<AnswerIndex>;

#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
pub struct Question {
    pub id: u32, // 1-based, unique within the quiz
    pub prompt: String,
    pub options: Vec<String>,
    pub correct_answer_index: AnswerIndex,
}

impl Question {
    pub fn new(id: u32, prompt: &str, options: [&str; OPTION_COUNT], correct: AnswerIndex) -> Self {
        Question {
            id,
            prompt: prompt.to_string(),
            options: options.iter().map(|o| o.to_string()).collect(),
            correct_answer_index: correct,
        }
    }

    pub fn is_correct(&self, answer: Answer) -> bool {
        answer == Some(self.correct_answer_index)
    }
}

pub fn is_valid_answer_index(index: AnswerIndex) -> bool {
    (index as usize) < OPTION_COUNT
}
