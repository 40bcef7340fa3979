#![allow(dead_code)]

use std::{collections::HashMap, sync::Arc, time::Duration};

use async_trait::async_trait;
use chrono::{DateTime, TimeZone, Utc};
use tokio::sync::RwLock;

use quizboard_server::{
    errors::{AppError, AppResult},
    models::domain::{Question, Quiz, QuizResult},
    repositories::{QuizRepository, ResultRepository},
    services::leaderboard::sort_results,
};

pub struct InMemoryQuizRepository {
    quizzes: Arc<RwLock<HashMap<String, Quiz>>>,
}

impl InMemoryQuizRepository {
    pub fn new() -> Self {
        Self {
            quizzes: Arc::new(RwLock::new(HashMap::new())),
        }
    }
}

#[async_trait]
impl QuizRepository for InMemoryQuizRepository {
    async fn create(&self, quiz: Quiz) -> AppResult<Quiz> {
        let mut quizzes = self.quizzes.write().await;
        if quizzes.contains_key(&quiz.id) {
            return Err(AppError::AlreadyExists(format!(
                "Quiz with id '{}' already exists",
                quiz.id
            )));
        }

        quizzes.insert(quiz.id.clone(), quiz.clone());
        Ok(quiz)
    }

    async fn find_by_id(&self, id: &str) -> AppResult<Option<Quiz>> {
        let quizzes = self.quizzes.read().await;
        Ok(quizzes.get(id).cloned())
    }

    async fn find_by_ids(&self, ids: &[String]) -> AppResult<Vec<Quiz>> {
        let quizzes = self.quizzes.read().await;
        Ok(ids.iter().filter_map(|id| quizzes.get(id).cloned()).collect())
    }

    async fn find_by_creator(&self, created_by: &str) -> AppResult<Vec<Quiz>> {
        let quizzes = self.quizzes.read().await;
        let mut items: Vec<_> = quizzes
            .values()
            .filter(|q| q.created_by.as_deref() == Some(created_by))
            .cloned()
            .collect();
        items.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(items)
    }

    async fn append_participant(&self, quiz_id: &str, player_name: &str) -> AppResult<bool> {
        // Check and insert under one write lock, like $addToSet.
        let mut quizzes = self.quizzes.write().await;
        let quiz = quizzes
            .get_mut(quiz_id)
            .ok_or_else(|| AppError::NotFound(format!("Quiz with id '{}' not found", quiz_id)))?;

        if quiz.has_participant(player_name) {
            return Ok(false);
        }
        quiz.participants.push(player_name.to_string());
        Ok(true)
    }

    async fn ensure_indexes(&self) -> AppResult<()> {
        Ok(())
    }
}

pub struct InMemoryResultRepository {
    results: Arc<RwLock<HashMap<String, QuizResult>>>,
}

impl InMemoryResultRepository {
    pub fn new() -> Self {
        Self {
            results: Arc::new(RwLock::new(HashMap::new())),
        }
    }

    pub async fn count(&self) -> usize {
        self.results.read().await.len()
    }
}

#[async_trait]
impl ResultRepository for InMemoryResultRepository {
    async fn create(&self, result: QuizResult) -> AppResult<QuizResult> {
        let mut results = self.results.write().await;
        if results.contains_key(&result.id) {
            return Err(AppError::AlreadyExists(format!(
                "Result with id '{}' already exists",
                result.id
            )));
        }
        results.insert(result.id.clone(), result.clone());
        Ok(result)
    }

    async fn find_by_id(&self, id: &str) -> AppResult<Option<QuizResult>> {
        let results = self.results.read().await;
        Ok(results.get(id).cloned())
    }

    async fn find_ranked_by_quiz(&self, quiz_id: &str, limit: i64) -> AppResult<Vec<QuizResult>> {
        let results = self.results.read().await;
        let mut items: Vec<_> = results
            .values()
            .filter(|r| r.quiz_id == quiz_id)
            .cloned()
            .collect();
        sort_results(&mut items);
        items.truncate(limit.max(0) as usize);
        Ok(items)
    }

    async fn find_by_quiz(&self, quiz_id: &str) -> AppResult<Vec<QuizResult>> {
        let results = self.results.read().await;
        let mut items: Vec<_> = results
            .values()
            .filter(|r| r.quiz_id == quiz_id)
            .cloned()
            .collect();
        sort_results(&mut items);
        Ok(items)
    }

    async fn find_by_user(&self, user_id: &str) -> AppResult<Vec<QuizResult>> {
        let results = self.results.read().await;
        let mut items: Vec<_> = results
            .values()
            .filter(|r| r.user_id.as_deref() == Some(user_id))
            .cloned()
            .collect();
        items.sort_by(|a, b| b.completed_at.cmp(&a.completed_at));
        Ok(items)
    }

    async fn ensure_indexes(&self) -> AppResult<()> {
        Ok(())
    }
}

/// Result store whose reads always fail.
pub struct UnreachableResultRepository;

#[async_trait]
impl ResultRepository for UnreachableResultRepository {
    async fn create(&self, _result: QuizResult) -> AppResult<QuizResult> {
        Err(AppError::PersistenceError("result store unreachable".to_string()))
    }

    async fn find_by_id(&self, _id: &str) -> AppResult<Option<QuizResult>> {
        Err(AppError::PersistenceError("result store unreachable".to_string()))
    }

    async fn find_ranked_by_quiz(
        &self,
        _quiz_id: &str,
        _limit: i64,
    ) -> AppResult<Vec<QuizResult>> {
        Err(AppError::PersistenceError("result store unreachable".to_string()))
    }

    async fn find_by_quiz(&self, _quiz_id: &str) -> AppResult<Vec<QuizResult>> {
        Err(AppError::PersistenceError("result store unreachable".to_string()))
    }

    async fn find_by_user(&self, _user_id: &str) -> AppResult<Vec<QuizResult>> {
        Err(AppError::PersistenceError("result store unreachable".to_string()))
    }

    async fn ensure_indexes(&self) -> AppResult<()> {
        Ok(())
    }
}

/// Result store whose writes hang longer than any test timeout.
pub struct StalledResultRepository {
    pub delay: Duration,
}

#[async_trait]
impl ResultRepository for StalledResultRepository {
    async fn create(&self, result: QuizResult) -> AppResult<QuizResult> {
        tokio::time::sleep(self.delay).await;
        Ok(result)
    }

    async fn find_by_id(&self, _id: &str) -> AppResult<Option<QuizResult>> {
        Ok(None)
    }

    async fn find_ranked_by_quiz(
        &self,
        _quiz_id: &str,
        _limit: i64,
    ) -> AppResult<Vec<QuizResult>> {
        Ok(vec![])
    }

    async fn find_by_quiz(&self, _quiz_id: &str) -> AppResult<Vec<QuizResult>> {
        Ok(vec![])
    }

    async fn find_by_user(&self, _user_id: &str) -> AppResult<Vec<QuizResult>> {
        Ok(vec![])
    }

    async fn ensure_indexes(&self) -> AppResult<()> {
        Ok(())
    }
}

/// Result store where every id is already taken and lookups hang.
pub struct ConflictingResultRepository {
    pub delay: Duration,
}

#[async_trait]
impl ResultRepository for ConflictingResultRepository {
    async fn create(&self, result: QuizResult) -> AppResult<QuizResult> {
        Err(AppError::AlreadyExists(format!(
            "Result with id '{}' already exists",
            result.id
        )))
    }

    async fn find_by_id(&self, _id: &str) -> AppResult<Option<QuizResult>> {
        tokio::time::sleep(self.delay).await;
        Ok(None)
    }

    async fn find_ranked_by_quiz(
        &self,
        _quiz_id: &str,
        _limit: i64,
    ) -> AppResult<Vec<QuizResult>> {
        Ok(vec![])
    }

    async fn find_by_quiz(&self, _quiz_id: &str) -> AppResult<Vec<QuizResult>> {
        Ok(vec![])
    }

    async fn find_by_user(&self, _user_id: &str) -> AppResult<Vec<QuizResult>> {
        Ok(vec![])
    }

    async fn ensure_indexes(&self) -> AppResult<()> {
        Ok(())
    }
}

/// Three questions with answer key `[0, 2, 1]`.
pub fn make_quiz(id: &str) -> Quiz {
    let mut quiz = Quiz::new(
        "Solar system",
        vec![
            Question::new(
                1,
                "Closest planet to the sun?",
                ["Mercury", "Venus", "Earth", "Mars"],
                0,
            ),
            Question::new(2, "Largest planet?", ["Saturn", "Neptune", "Jupiter", "Uranus"], 2),
            Question::new(3, "Red planet?", ["Venus", "Mars", "Mercury", "Pluto"], 1),
        ],
        Some("creator-1".to_string()),
    );
    quiz.id = id.to_string();
    quiz
}

pub fn at_minute(minute: i64) -> DateTime<Utc> {
    Utc.timestamp_opt(1_700_000_000 + minute * 60, 0)
        .single()
        .expect("valid timestamp")
}

pub fn make_result(
    id: &str,
    quiz_id: &str,
    player_name: &str,
    score: u32,
    minute: i64,
) -> QuizResult {
    QuizResult {
        id: id.to_string(),
        quiz_id: quiz_id.to_string(),
        user_id: None,
        topic: "Solar system".to_string(),
        player_name: player_name.to_string(),
        score,
        total_questions: 3,
        answers: vec![Some(0), Some(2), Some(1)],
        completed_at: at_minute(minute),
    }
}
