use axum::routing::get;
use axum::Router;

use crate::handlers::qa;
use crate::state::AppState;

/// Q&A routes mounted at `/qa`.
///
/// ```text
/// GET  /   -> list_questions
/// POST /   -> create_question
/// ```
pub fn router() -> Router<AppState> {
    Router::new().route("/", get(qa::list_questions).post(qa::create_question))
}
