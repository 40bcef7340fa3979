use async_graphql::InputObject;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::errors::{AppError, AppResult};
use crate::models::domain::{Answer, AnswerIndex, Question, Quiz, QuizResult};

/// One generated question as handed over by the quiz generator.
#[derive(Debug, Clone, Deserialize, Serialize, Validate, InputObject)]
#[serde(rename_all = "camelCase")]
pub struct QuestionInput {
    pub id: Option<u32>,

    #[serde(alias = "question")]
    #[validate(length(min = 1, max = 1000))]
    pub prompt: String,

    #[validate(length(equal = 4))]
    pub options: Vec<String>,

    #[serde(alias = "correctAnswer")]
    #[validate(range(max = 3))]
    pub correct_answer_index: AnswerIndex,
}

#[derive(Debug, Clone, Deserialize, Serialize, Validate, InputObject)]
#[serde(rename_all = "camelCase")]
pub struct CreateQuizRequest {
    #[validate(length(min = 1, max = 200))]
    pub topic: String,

    #[validate(length(min = 1), nested)]
    pub questions: Vec<QuestionInput>,

    pub created_by: Option<String>,
}

impl CreateQuizRequest {
    /// Builds the quiz, numbering questions by position when no id was given.
    pub fn into_quiz(self) -> AppResult<Quiz> {
        self.validate()?;

        let questions = self
            .questions
            .into_iter()
            .enumerate()
            .map(|(i, q)| Question {
                id: q.id.unwrap_or(i as u32 + 1),
                prompt: q.prompt,
                options: q.options,
                correct_answer_index: q.correct_answer_index,
            })
            .collect();

        let quiz = Quiz::new(self.topic.trim(), questions, self.created_by);
        quiz.validate_structure()?;
        Ok(quiz)
    }
}

/// Body of `POST /api/quiz/{id}/submit`.
#[derive(Debug, Clone, Deserialize, Serialize, Validate, InputObject)]
#[serde(rename_all = "camelCase")]
pub struct SubmitResultRequest {
    /// Fixed when the attempt completed; resending it makes a retry idempotent.
    pub attempt_id: Option<String>,
    pub quiz_id: Option<String>,
    pub user_id: Option<String>,

    #[validate(length(min = 1, max = 100))]
    pub player_name: String,

    pub topic: Option<String>,
    pub score: u32,
    pub total_questions: u32,
    pub answers: Vec<Answer>,
    pub completed_at: Option<DateTime<Utc>>,
}

/// The viewer's own result, as held locally by the client.
#[derive(Debug, Clone, Deserialize, Serialize, Validate, InputObject)]
#[serde(rename_all = "camelCase")]
pub struct ViewerResultInput {
    pub id: Option<String>,
    pub user_id: Option<String>,

    #[validate(length(min = 1, max = 100))]
    pub player_name: String,

    pub topic: Option<String>,
    pub score: u32,

    #[validate(range(min = 1))]
    pub total_questions: u32,

    #[serde(default)]
    #[graphql(default)]
    pub answers: Vec<Answer>,

    pub completed_at: DateTime<Utc>,
}

impl ViewerResultInput {
    pub fn into_result(self, quiz_id: &str) -> AppResult<QuizResult> {
        self.validate()?;

        if self.score > self.total_questions {
            return Err(AppError::ValidationError(
                "score cannot exceed total questions".to_string(),
            ));
        }

        Ok(QuizResult {
            id: self.id.unwrap_or_default(),
            quiz_id: quiz_id.to_string(),
            user_id: self.user_id,
            topic: self.topic.unwrap_or_default(),
            player_name: self.player_name.trim().to_string(),
            score: self.score,
            total_questions: self.total_questions,
            answers: self.answers,
            completed_at: self.completed_at,
        })
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreatorQuery {
    pub created_by: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserResultsQuery {
    pub user_id: Option<String>,
}

/// Extracts a required, non-blank query parameter.
pub fn required_param(value: Option<String>, name: &str) -> AppResult<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
        .ok_or_else(|| AppError::ValidationError(format!("{} is required", name)))
}
