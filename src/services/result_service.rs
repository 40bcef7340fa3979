use std::{collections::HashMap, sync::Arc, time::Duration};

use crate::{
    errors::AppResult,
    models::dto::response::ResultDto,
    repositories::{QuizRepository, ResultRepository},
    services::bounded,
};

pub struct ResultService {
    results: Arc<dyn ResultRepository>,
    quizzes: Arc<dyn QuizRepository>,
    timeout: Duration,
}

impl ResultService {
    pub fn new(
        results: Arc<dyn ResultRepository>,
        quizzes: Arc<dyn QuizRepository>,
        timeout: Duration,
    ) -> Self {
        Self {
            results,
            quizzes,
            timeout,
        }
    }

    /// A user's results, newest first, each carrying its quiz's current topic
    /// when the quiz still exists.
    pub async fn results_for_user(&self, user_id: &str) -> AppResult<Vec<ResultDto>> {
        let results = bounded(
            self.timeout,
            "user results fetch",
            self.results.find_by_user(user_id),
        )
        .await?;

        let mut quiz_ids: Vec<String> = results.iter().map(|r| r.quiz_id.clone()).collect();
        quiz_ids.sort();
        quiz_ids.dedup();

        let topics: HashMap<String, String> =
            match bounded(self.timeout, "quiz topics fetch", self.quizzes.find_by_ids(&quiz_ids))
                .await
            {
                Ok(quizzes) => quizzes.into_iter().map(|q| (q.id, q.topic)).collect(),
                Err(err) => {
                    log::warn!("Falling back to stored topics for user {}: {}", user_id, err);
                    HashMap::new()
                }
            };

        Ok(results
            .into_iter()
            .map(|mut result| {
                if let Some(topic) = topics.get(&result.quiz_id) {
                    result.topic = topic.clone();
                }
                ResultDto::from(result)
            })
            .collect())
    }
}
