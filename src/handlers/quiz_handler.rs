use actix_web::{get, post, web, HttpResponse};

use crate::{
    app_state::AppState,
    errors::AppError,
    models::dto::{
        request::{
            required_param, CreateQuizRequest, CreatorQuery, SubmitResultRequest,
            ViewerResultInput,
        },
        response::{LeaderboardDto, QuizDto, ResultDto},
    },
};

#[post("/api/quiz")]
pub async fn create_quiz(
    state: web::Data<AppState>,
    request: web::Json<CreateQuizRequest>,
) -> Result<HttpResponse, AppError> {
    let quiz = state.quiz_service.create_quiz(request.into_inner()).await?;
    Ok(HttpResponse::Created().json(quiz))
}

#[get("/api/quiz")]
pub async fn list_quizzes(
    state: web::Data<AppState>,
    query: web::Query<CreatorQuery>,
) -> Result<HttpResponse, AppError> {
    let created_by = required_param(query.into_inner().created_by, "createdBy")?;
    let quizzes = state.quiz_service.quizzes_by_creator(&created_by).await?;
    Ok(HttpResponse::Ok().json(quizzes))
}

#[get("/api/quiz/{id}")]
pub async fn get_quiz(
    state: web::Data<AppState>,
    id: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    let quiz = state.quiz_service.get_quiz(&id).await?;
    Ok(HttpResponse::Ok().json(QuizDto::from(quiz)))
}

#[post("/api/quiz/{id}/submit")]
pub async fn submit_result(
    state: web::Data<AppState>,
    id: web::Path<String>,
    request: web::Json<SubmitResultRequest>,
) -> Result<HttpResponse, AppError> {
    let quiz = state.quiz_service.get_quiz(&id).await?;
    let result = state
        .submission_service
        .submit_request(&quiz, request.into_inner())
        .await?;
    Ok(HttpResponse::Created().json(ResultDto::from(result)))
}

/// Results ordered by score desc then completion asc, capped at the
/// leaderboard limit.
#[get("/api/quiz/{id}/leaderboard")]
pub async fn get_leaderboard(
    state: web::Data<AppState>,
    id: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    let results = state.leaderboard_service.top(&id).await?;
    let results: Vec<ResultDto> = results.into_iter().map(ResultDto::from).collect();
    Ok(HttpResponse::Ok().json(results))
}

/// Leaderboard as seen by the player who just finished; never fails on a
/// store outage.
#[post("/api/quiz/{id}/leaderboard")]
pub async fn viewer_leaderboard(
    state: web::Data<AppState>,
    id: web::Path<String>,
    viewer: web::Json<ViewerResultInput>,
) -> Result<HttpResponse, AppError> {
    let viewer = viewer.into_inner().into_result(&id)?;
    let board = state.leaderboard_service.for_viewer(&viewer).await;
    Ok(HttpResponse::Ok().json(LeaderboardDto::from(board)))
}
