//! Finalization of completed attempts.
//!
//! Submission is two independent store steps with no shared transaction:
//! 1. add the player to the quiz's participant set (best-effort, atomic
//!    add-if-absent at the store);
//! 2. create the result (authoritative; its failure is reported).
//!
//! A window where the participant is recorded but the result is not (or the
//! reverse) is accepted. Retries are explicit: the caller keeps the
//! [`CompletedAttempt`] and calls [`SubmissionService::submit`] again. The
//! result id is fixed at completion, so a retry after an ambiguous failure
//! does not create a second row.

use std::{sync::Arc, time::Duration};

use chrono::Utc;
use uuid::Uuid;

use crate::{
    errors::{AppError, AppResult},
    models::{
        domain::{question::is_valid_answer_index, CompletedAttempt, Quiz, QuizResult},
        dto::request::SubmitResultRequest,
    },
    repositories::{QuizRepository, ResultRepository},
    services::{bounded, scoring},
};

pub struct SubmissionService {
    quizzes: Arc<dyn QuizRepository>,
    results: Arc<dyn ResultRepository>,
    timeout: Duration,
}

impl SubmissionService {
    pub fn new(
        quizzes: Arc<dyn QuizRepository>,
        results: Arc<dyn ResultRepository>,
        timeout: Duration,
    ) -> Self {
        Self {
            quizzes,
            results,
            timeout,
        }
    }

    pub async fn submit(&self, attempt: &CompletedAttempt) -> AppResult<QuizResult> {
        self.record_participant(attempt).await;

        let result = attempt.to_result();
        match bounded(self.timeout, "result create", self.results.create(result.clone())).await {
            Ok(saved) => {
                log::info!(
                    "Saved result {} for '{}' on quiz {} ({}/{})",
                    saved.id,
                    saved.player_name,
                    saved.quiz_id,
                    saved.score,
                    saved.total_questions
                );
                Ok(saved)
            }
            Err(AppError::AlreadyExists(reason)) => self.resolve_duplicate(result, reason).await,
            Err(err) => {
                log::error!(
                    "Failed to save result {} for quiz {}: {}",
                    result.id,
                    result.quiz_id,
                    err
                );
                Err(err)
            }
        }
    }

    /// Validates a client submission against the quiz and persists it.
    pub async fn submit_request(
        &self,
        quiz: &Quiz,
        request: SubmitResultRequest,
    ) -> AppResult<QuizResult> {
        let attempt = attempt_from_request(quiz, request)?;
        self.submit(&attempt).await
    }

    /// A duplicate id counts as saved only when the stored row is this attempt.
    async fn resolve_duplicate(
        &self,
        candidate: QuizResult,
        reason: String,
    ) -> AppResult<QuizResult> {
        let stored = bounded(
            self.timeout,
            "result lookup",
            self.results.find_by_id(&candidate.id),
        )
        .await?;

        match stored {
            Some(stored) if is_same_attempt(&stored, &candidate) => {
                log::info!("Result {} was already saved; returning stored copy", stored.id);
                Ok(stored)
            }
            Some(stored) => {
                log::warn!(
                    "Result id {} is taken by '{}' on quiz {}; rejecting '{}' on quiz {}",
                    stored.id,
                    stored.player_name,
                    stored.quiz_id,
                    candidate.player_name,
                    candidate.quiz_id
                );
                Err(AppError::AlreadyExists(format!(
                    "Result with id '{}' belongs to another attempt",
                    candidate.id
                )))
            }
            None => Err(AppError::AlreadyExists(reason)),
        }
    }

    async fn record_participant(&self, attempt: &CompletedAttempt) {
        let appended = bounded(
            self.timeout,
            "participant append",
            self.quizzes
                .append_participant(&attempt.quiz_id, &attempt.player_name),
        )
        .await;

        match appended {
            Ok(true) => log::info!(
                "Added participant '{}' to quiz {}",
                attempt.player_name,
                attempt.quiz_id
            ),
            Ok(false) => log::debug!(
                "Participant '{}' already listed on quiz {}",
                attempt.player_name,
                attempt.quiz_id
            ),
            Err(err) => log::warn!(
                "Could not add participant '{}' to quiz {}; saving result anyway: {}",
                attempt.player_name,
                attempt.quiz_id,
                err
            ),
        }
    }
}

fn is_same_attempt(stored: &QuizResult, candidate: &QuizResult) -> bool {
    stored.quiz_id == candidate.quiz_id
        && stored.player_name == candidate.player_name
        && stored.score == candidate.score
        && stored.answers == candidate.answers
}

/// Rebuilds a completed attempt from a client submission.
///
/// The score is recomputed from the answers and must agree with what the
/// client reported.
pub fn attempt_from_request(
    quiz: &Quiz,
    request: SubmitResultRequest,
) -> AppResult<CompletedAttempt> {
    use validator::Validate;
    request.validate()?;

    if let Some(quiz_id) = request.quiz_id.as_deref() {
        if quiz_id != quiz.id {
            return Err(AppError::ValidationError(format!(
                "quizId '{}' does not match quiz '{}'",
                quiz_id, quiz.id
            )));
        }
    }

    let player_name = request.player_name.trim();
    if player_name.is_empty() {
        return Err(AppError::ValidationError(
            "player name is required".to_string(),
        ));
    }

    let question_count = quiz.question_count();
    if request.total_questions as usize != question_count {
        return Err(AppError::ValidationError(format!(
            "totalQuestions is {} but quiz has {} questions",
            request.total_questions, question_count
        )));
    }

    if request.answers.len() != question_count {
        return Err(AppError::ValidationError(format!(
            "expected {} answers, got {}",
            question_count,
            request.answers.len()
        )));
    }

    if let Some(bad) = request
        .answers
        .iter()
        .flatten()
        .find(|&&index| !is_valid_answer_index(index))
    {
        return Err(AppError::ValidationError(format!(
            "answer index {} is out of range",
            bad
        )));
    }

    let score = scoring::score(&request.answers, &quiz.questions);
    if score != request.score {
        return Err(AppError::ValidationError(format!(
            "reported score {} does not match computed score {}",
            request.score, score
        )));
    }

    Ok(CompletedAttempt {
        attempt_id: request
            .attempt_id
            .filter(|id| !id.trim().is_empty())
            .unwrap_or_else(|| Uuid::new_v4().to_string()),
        quiz_id: quiz.id.clone(),
        topic: quiz.topic.clone(),
        user_id: request.user_id,
        player_name: player_name.to_string(),
        answers: request.answers,
        score,
        total_questions: question_count as u32,
        completed_at: request.completed_at.unwrap_or_else(Utc::now),
    })
}
