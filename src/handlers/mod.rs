pub mod graphql_handler;
pub mod health_handler;
pub mod quiz_handler;
pub mod result_handler;

use actix_web::web;

pub use graphql_handler::{graphiql, graphql};
pub use health_handler::{health_check, health_check_ready};
pub use quiz_handler::{
    create_quiz, get_leaderboard, get_quiz, list_quizzes, submit_result, viewer_leaderboard,
};
pub use result_handler::list_user_results;

/// Registers the REST routes. The GraphQL routes are added separately since
/// they need the schema as app data.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(health_check)
        .service(health_check_ready)
        .service(create_quiz)
        .service(list_quizzes)
        .service(get_quiz)
        .service(submit_result)
        .service(get_leaderboard)
        .service(viewer_leaderboard)
        .service(list_user_results);
}
