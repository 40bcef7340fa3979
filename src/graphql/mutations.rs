use async_graphql::{Context, ErrorExtensions, Object, Result, ID};

use crate::{
    app_state::AppState,
    models::dto::{
        request::{CreateQuizRequest, SubmitResultRequest},
        response::{QuizDto, ResultDto},
    },
};

pub struct MutationRoot;

#[Object]
impl MutationRoot {
    async fn create_quiz(&self, ctx: &Context<'_>, input: CreateQuizRequest) -> Result<QuizDto> {
        let state = ctx.data::<AppState>()?;
        state
            .quiz_service
            .create_quiz(input)
            .await
            .map_err(|e| e.extend())
    }

    async fn submit_result(
        &self,
        ctx: &Context<'_>,
        quiz_id: ID,
        input: SubmitResultRequest,
    ) -> Result<ResultDto> {
        let state = ctx.data::<AppState>()?;
        let quiz = state
            .quiz_service
            .get_quiz(&quiz_id)
            .await
            .map_err(|e| e.extend())?;
        let result = state
            .submission_service
            .submit_request(&quiz, input)
            .await
            .map_err(|e| e.extend())?;
        Ok(result.into())
    }
}
