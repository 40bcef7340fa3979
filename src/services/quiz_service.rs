use std::{sync::Arc, time::Duration};

use crate::{
    errors::{AppError, AppResult},
    models::{
        domain::Quiz,
        dto::{request::CreateQuizRequest, response::QuizDto},
    },
    repositories::QuizRepository,
    services::bounded,
};

pub struct QuizService {
    repository: Arc<dyn QuizRepository>,
    timeout: Duration,
}

impl QuizService {
    pub fn new(repository: Arc<dyn QuizRepository>, timeout: Duration) -> Self {
        Self {
            repository,
            timeout,
        }
    }

    pub async fn get_quiz(&self, id: &str) -> AppResult<Quiz> {
        bounded(self.timeout, "quiz fetch", self.repository.find_by_id(id))
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Quiz with id '{}' not found", id)))
    }

    pub async fn create_quiz(&self, request: CreateQuizRequest) -> AppResult<QuizDto> {
        let quiz = request.into_quiz()?;
        let created = bounded(self.timeout, "quiz create", self.repository.create(quiz)).await?;

        log::info!(
            "Created quiz {} on '{}' with {} questions",
            created.id,
            created.topic,
            created.question_count()
        );
        Ok(created.into())
    }

    pub async fn quizzes_by_creator(&self, created_by: &str) -> AppResult<Vec<QuizDto>> {
        let quizzes = bounded(
            self.timeout,
            "quiz list",
            self.repository.find_by_creator(created_by),
        )
        .await?;
        Ok(quizzes.into_iter().map(QuizDto::from).collect())
    }
}
