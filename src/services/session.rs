//! Single-participant quiz session.
//!
//! A session moves `NotStarted -> InProgress(position) -> Completed`. Answers
//! live in a fixed-length slot array addressed by question position, so moving
//! back and forth never loses an answer. Reaching `Completed` scores the attempt
//! and freezes it as a [`CompletedAttempt`]; persisting it is the job of
//! [`SubmissionService`](crate::services::submission_service::SubmissionService).

use std::sync::Arc;

use chrono::Utc;
use uuid::Uuid;

use crate::{
    errors::{AppError, AppResult},
    models::domain::{
        question::is_valid_answer_index, Answer, AnswerIndex, CompletedAttempt, Question, Quiz,
    },
    services::scoring,
};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SessionState {
    NotStarted,
    InProgress { position: usize },
    Completed,
}

/// Outcome of [`QuizSession::advance`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Advance {
    Moved(usize),
    Completed(CompletedAttempt),
}

pub struct QuizSession {
    quiz: Arc<Quiz>,
    user_id: Option<String>,
    player_name: String,
    answers: Vec<Answer>,
    state: SessionState,
    completed: Option<CompletedAttempt>,
}

impl QuizSession {
    pub fn new(quiz: Arc<Quiz>, user_id: Option<String>) -> AppResult<Self> {
        quiz.validate_structure()?;

        Ok(Self {
            answers: vec![None; quiz.question_count()],
            quiz,
            user_id,
            player_name: String::new(),
            state: SessionState::NotStarted,
            completed: None,
        })
    }

    pub fn start(&mut self, player_name: &str) -> AppResult<()> {
        if self.state != SessionState::NotStarted {
            return Err(AppError::ValidationError(
                "quiz has already been started".to_string(),
            ));
        }

        let player_name = player_name.trim();
        if player_name.is_empty() {
            return Err(AppError::ValidationError(
                "player name is required".to_string(),
            ));
        }

        self.player_name = player_name.to_string();
        self.state = SessionState::InProgress { position: 0 };
        log::debug!(
            "Player '{}' started quiz {} ({} questions)",
            self.player_name,
            self.quiz.id,
            self.quiz.question_count()
        );
        Ok(())
    }

    /// Records or overwrites the answer for the current question.
    pub fn select_answer(&mut self, index: AnswerIndex) -> AppResult<()> {
        let position = self.in_progress_position()?;

        if !is_valid_answer_index(index) {
            return Err(AppError::ValidationError(format!(
                "answer index {} is out of range",
                index
            )));
        }

        self.answers[position] = Some(index);
        Ok(())
    }

    pub fn advance(&mut self) -> AppResult<Advance> {
        let position = self.in_progress_position()?;

        if self.answers[position].is_none() {
            return Err(AppError::ValidationError("no answer selected".to_string()));
        }

        if position < self.quiz.last_index() {
            let next = position + 1;
            self.state = SessionState::InProgress { position: next };
            return Ok(Advance::Moved(next));
        }

        let attempt = self.finalize();
        self.state = SessionState::Completed;
        self.completed = Some(attempt.clone());
        Ok(Advance::Completed(attempt))
    }

    /// Steps back one question. At the first question this is a no-op.
    pub fn retreat(&mut self) -> AppResult<usize> {
        let position = self.in_progress_position()?;
        let previous = position.saturating_sub(1);
        self.state = SessionState::InProgress { position: previous };
        Ok(previous)
    }

    fn finalize(&self) -> CompletedAttempt {
        let score = scoring::score(&self.answers, &self.quiz.questions);
        log::info!(
            "Player '{}' completed quiz {} with score {}/{}",
            self.player_name,
            self.quiz.id,
            score,
            self.quiz.question_count()
        );

        CompletedAttempt {
            attempt_id: Uuid::new_v4().to_string(),
            quiz_id: self.quiz.id.clone(),
            topic: self.quiz.topic.clone(),
            user_id: self.user_id.clone(),
            player_name: self.player_name.clone(),
            answers: self.answers.clone(),
            score,
            total_questions: self.quiz.question_count() as u32,
            completed_at: Utc::now(),
        }
    }

    fn in_progress_position(&self) -> AppResult<usize> {
        match self.state {
            SessionState::InProgress { position } => Ok(position),
            SessionState::NotStarted => Err(AppError::ValidationError(
                "quiz has not been started".to_string(),
            )),
            SessionState::Completed => Err(AppError::ValidationError(
                "quiz attempt is already completed".to_string(),
            )),
        }
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn quiz(&self) -> &Quiz {
        &self.quiz
    }

    pub fn player_name(&self) -> &str {
        &self.player_name
    }

    pub fn answers(&self) -> &[Answer] {
        &self.answers
    }

    pub fn current_question(&self) -> Option<&Question> {
        match self.state {
            SessionState::InProgress { position } => self.quiz.questions.get(position),
            _ => None,
        }
    }

    pub fn selected_answer(&self) -> Answer {
        match self.state {
            SessionState::InProgress { position } => self.answers[position],
            _ => None,
        }
    }

    /// `(1-based question number, total)` while in progress.
    pub fn progress(&self) -> Option<(usize, usize)> {
        match self.state {
            SessionState::InProgress { position } => {
                Some((position + 1, self.quiz.question_count()))
            }
            _ => None,
        }
    }

    pub fn completed_attempt(&self) -> Option<&CompletedAttempt> {
        self.completed.as_ref()
    }
}
