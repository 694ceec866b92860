use axum::{extract::State, http::StatusCode, routing::post, Json, Router};
use murmur_core::ApiResponse;
use tracing::{error, info};

use super::AppState;
use crate::prompt::SUGGESTION_PROMPT;

/// The only message a caller ever sees when generation fails.
pub const GENERIC_FAILURE: &str = "Something went wrong";

pub fn routes() -> Router<AppState> {
    Router::new().route("/api/suggest-messages", post(suggest_messages))
}

/// Ask the model for three `||`-separated questions and relay its text verbatim.
/// The request body is never read.
async fn suggest_messages(State(state): State<AppState>) -> (StatusCode, Json<ApiResponse>) {
    match state.model.generate(SUGGESTION_PROMPT).await {
        Ok(text) => {
            info!(model = state.model.model(), "generated message suggestions");
            (StatusCode::OK, Json(ApiResponse::with_questions(text)))
        }
        Err(e) => {
            error!(model = state.model.model(), "error generating suggestions: {e}");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ApiResponse::failure(GENERIC_FAILURE)),
            )
        }
    }
}
