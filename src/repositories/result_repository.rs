use async_trait::async_trait;
use futures::TryStreamExt;
use mongodb::{bson::doc, options::IndexOptions, Collection, IndexModel};

use crate::{db::Database, errors::AppResult, models::domain::QuizResult};

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ResultRepository: Send + Sync {
    /// Inserts a new result. A second insert with the same id fails with
    /// `AppError::AlreadyExists`.
    async fn create(&self, result: QuizResult) -> AppResult<QuizResult>;
    async fn find_by_id(&self, id: &str) -> AppResult<Option<QuizResult>>;
    /// Results for a quiz ordered by score desc, completion time asc, id asc.
    async fn find_ranked_by_quiz(&self, quiz_id: &str, limit: i64) -> AppResult<Vec<QuizResult>>;
    /// Every result for a quiz, in the same order as `find_ranked_by_quiz`.
    async fn find_by_quiz(&self, quiz_id: &str) -> AppResult<Vec<QuizResult>>;
    async fn find_by_user(&self, user_id: &str) -> AppResult<Vec<QuizResult>>;
    async fn ensure_indexes(&self) -> AppResult<()>;
}

pub struct MongoResultRepository {
    collection: Collection<QuizResult>,
}

impl MongoResultRepository {
    pub fn new(db: &Database, collection_name: &str) -> Self {
        let collection = db.get_collection(collection_name);
        Self { collection }
    }
}

#[async_trait]
impl ResultRepository for MongoResultRepository {
    async fn create(&self, result: QuizResult) -> AppResult<QuizResult> {
        self.collection.insert_one(&result).await?;
        Ok(result)
    }

    async fn find_by_id(&self, id: &str) -> AppResult<Option<QuizResult>> {
        let result = self.collection.find_one(doc! { "id": id }).await?;
        Ok(result)
    }

    async fn find_ranked_by_quiz(&self, quiz_id: &str, limit: i64) -> AppResult<Vec<QuizResult>> {
        let results = self
            .collection
            .find(doc! { "quiz_id": quiz_id })
            .sort(doc! { "score": -1, "completed_at": 1, "id": 1 })
            .limit(limit)
            .await?
            .try_collect()
            .await?;
        Ok(results)
    }

    async fn find_by_quiz(&self, quiz_id: &str) -> AppResult<Vec<QuizResult>> {
        let results = self
            .collection
            .find(doc! { "quiz_id": quiz_id })
            .sort(doc! { "score": -1, "completed_at": 1, "id": 1 })
            .await?
            .try_collect()
            .await?;
        Ok(results)
    }

    async fn find_by_user(&self, user_id: &str) -> AppResult<Vec<QuizResult>> {
        let results = self
            .collection
            .find(doc! { "user_id": user_id })
            .sort(doc! { "completed_at": -1 })
            .await?
            .try_collect()
            .await?;
        Ok(results)
    }

    async fn ensure_indexes(&self) -> AppResult<()> {
        log::info!("Creating indexes for results collection");

        let id_index = IndexModel::builder()
            .keys(doc! { "id": 1 })
            .options(
                IndexOptions::builder()
                    .unique(true)
                    .name("id_unique".to_string())
                    .build(),
            )
            .build();

        let ranking_index = IndexModel::builder()
            .keys(doc! { "quiz_id": 1, "score": -1, "completed_at": 1 })
            .options(
                IndexOptions::builder()
                    .name("quiz_ranking".to_string())
                    .build(),
            )
            .build();

        let user_id_index = IndexModel::builder()
            .keys(doc! { "user_id": 1 })
            .options(
                IndexOptions::builder()
                    .name("user_id".to_string())
                    .build(),
            )
            .build();

        self.collection.create_index(id_index).await?;
        self.collection.create_index(ranking_index).await?;
        self.collection.create_index(user_id_index).await?;

        log::info!("Successfully created indexes for results collection");
        Ok(())
    }
}
