pub mod health;
pub mod suggest;

use std::sync::Arc;

use axum::Router;
use tower_http::cors::CorsLayer;

use crate::genai::GenerativeModel;

pub struct InnerAppState {
    /// Shared provider client, constructed once at startup.
    pub model: Arc<dyn GenerativeModel>,
}

pub type AppState = Arc<InnerAppState>;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .merge(health::routes())
        .merge(suggest::routes())
        .layer(CorsLayer::permissive())
        .with_state(state)
}
