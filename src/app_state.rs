use std::sync::Arc;

use crate::{
    config::Config,
    db::Database,
    errors::AppResult,
    repositories::{MongoQuizRepository, MongoResultRepository, QuizRepository, ResultRepository},
    services::{
        leaderboard::LeaderboardService, quiz_service::QuizService,
        result_service::ResultService, submission_service::SubmissionService,
    },
};

/// Explicit per-process context handed to handlers and the GraphQL schema.
#[derive(Clone)]
pub struct AppState {
    pub quiz_service: Arc<QuizService>,
    pub result_service: Arc<ResultService>,
    pub submission_service: Arc<SubmissionService>,
    pub leaderboard_service: Arc<LeaderboardService>,
    pub config: Arc<Config>,
    pub db: Option<Database>,
}

impl AppState {
    pub async fn new(config: Config) -> AppResult<Self> {
        let db = Database::connect(&config).await?;

        let quiz_repository = Arc::new(MongoQuizRepository::new(&db, &config.quizzes_collection));
        quiz_repository.ensure_indexes().await?;

        let result_repository =
            Arc::new(MongoResultRepository::new(&db, &config.results_collection));
        result_repository.ensure_indexes().await?;

        let mut state = Self::from_repositories(config, quiz_repository, result_repository);
        state.db = Some(db);
        Ok(state)
    }

    pub fn from_repositories(
        config: Config,
        quizzes: Arc<dyn QuizRepository>,
        results: Arc<dyn ResultRepository>,
    ) -> Self {
        let timeout = config.store_timeout;

        Self {
            quiz_service: Arc::new(QuizService::new(quizzes.clone(), timeout)),
            result_service: Arc::new(ResultService::new(results.clone(), quizzes.clone(), timeout)),
            submission_service: Arc::new(SubmissionService::new(
                quizzes,
                results.clone(),
                timeout,
            )),
            leaderboard_service: Arc::new(LeaderboardService::new(
                results,
                config.leaderboard_limit,
                timeout,
            )),
            config: Arc::new(config),
            db: None,
        }
    }
}
