use async_graphql::{Context, ErrorExtensions, Object, Result, ID};

use crate::{
    app_state::AppState,
    models::dto::{
        request::ViewerResultInput,
        response::{LeaderboardDto, QuizDto, ResultDto},
    },
};

pub struct QueryRoot;

#[Object]
impl QueryRoot {
    async fn quiz(&self, ctx: &Context<'_>, id: ID) -> Result<QuizDto> {
        let state = ctx.data::<AppState>()?;
        let quiz = state.quiz_service.get_quiz(&id).await.map_err(|e| e.extend())?;
        Ok(quiz.into())
    }

    async fn quizzes_by_creator(
        &self,
        ctx: &Context<'_>,
        created_by: String,
    ) -> Result<Vec<QuizDto>> {
        let state = ctx.data::<AppState>()?;
        state
            .quiz_service
            .quizzes_by_creator(&created_by)
            .await
            .map_err(|e| e.extend())
    }

    async fn leaderboard(&self, ctx: &Context<'_>, quiz_id: ID) -> Result<Vec<ResultDto>> {
        let state = ctx.data::<AppState>()?;
        let results = state
            .leaderboard_service
            .top(&quiz_id)
            .await
            .map_err(|e| e.extend())?;
        Ok(results.into_iter().map(ResultDto::from).collect())
    }

    async fn viewer_leaderboard(
        &self,
        ctx: &Context<'_>,
        quiz_id: ID,
        viewer: ViewerResultInput,
    ) -> Result<LeaderboardDto> {
        let state = ctx.data::<AppState>()?;
        let viewer = viewer.into_result(&quiz_id).map_err(|e| e.extend())?;
        Ok(state.leaderboard_service.for_viewer(&viewer).await.into())
    }

    async fn results_for_user(&self, ctx: &Context<'_>, user_id: String) -> Result<Vec<ResultDto>> {
        let state = ctx.data::<AppState>()?;
        state
            .result_service
            .results_for_user(&user_id)
            .await
            .map_err(|e| e.extend())
    }
}
