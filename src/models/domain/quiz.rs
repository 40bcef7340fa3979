use std::collections::HashSet;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::errors::{AppError, AppResult};
use crate::models::domain::question::{is_valid_answer_index, Question, OPTION_COUNT};

/// A quiz definition. Only `participants` changes after creation.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
pub struct Quiz {
    pub id: String,
    pub topic: String,
    pub questions: Vec<Question>,
    #[serde(default)]
    pub participants: Vec<String>, // set semantics, maintained with $addToSet
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_by: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
}

impl Quiz {
    pub fn new(topic: &str, questions: Vec<Question>, created_by: Option<String>) -> Self {
        Quiz {
            id: Uuid::new_v4().to_string(),
            topic: topic.to_string(),
            questions,
            participants: Vec::new(),
            created_by,
            created_at: Some(Utc::now()),
        }
    }

    pub fn question_count(&self) -> usize {
        self.questions.len()
    }

    pub fn last_index(&self) -> usize {
        self.questions.len().saturating_sub(1)
    }

    pub fn has_participant(&self, player_name: &str) -> bool {
        self.participants.iter().any(|p| p == player_name)
    }

    /// Checks the shape every session and scorer relies on.
    pub fn validate_structure(&self) -> AppResult<()> {
        if self.topic.trim().is_empty() {
            return Err(AppError::ValidationError("quiz topic is empty".to_string()));
        }

        if self.questions.is_empty() {
            return Err(AppError::ValidationError(
                "quiz has no questions".to_string(),
            ));
        }

        let mut seen = HashSet::with_capacity(self.questions.len());
        for question in &self.questions {
            if question.id == 0 || !seen.insert(question.id) {
                return Err(AppError::ValidationError(format!(
                    "question id {} must be 1-based and unique",
                    question.id
                )));
            }

            if question.options.len() != OPTION_COUNT {
                return Err(AppError::ValidationError(format!(
                    "question {} must have exactly {} options",
                    question.id, OPTION_COUNT
                )));
            }

            if !is_valid_answer_index(question.correct_answer_index) {
                return Err(AppError::ValidationError(format!(
                    "question {} has correct answer index {} outside 0..{}",
                    question.id, question.correct_answer_index, OPTION_COUNT
                )));
            }
        }

        Ok(())
    }
}
