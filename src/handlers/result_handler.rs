use actix_web::{get, web, HttpResponse};

use crate::{
    app_state::AppState,
    errors::AppError,
    models::dto::request::{required_param, UserResultsQuery},
};

#[get("/api/results")]
pub async fn list_user_results(
    state: web::Data<AppState>,
    query: web::Query<UserResultsQuery>,
) -> Result<HttpResponse, AppError> {
    let user_id = required_param(query.into_inner().user_id, "userId")?;
    let results = state.result_service.results_for_user(&user_id).await?;
    Ok(HttpResponse::Ok().json(results))
}
