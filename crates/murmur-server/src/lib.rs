pub mod config;
pub mod genai;
pub mod prompt;
mod routes;
#[cfg(any(test, feature = "test-helpers"))]
pub mod test_helpers;

use std::sync::Arc;

use anyhow::Result;
use tokio::net::TcpListener;

use genai::GenerativeModel;

pub use routes::{build_router, AppState, InnerAppState};

pub async fn serve(listener: TcpListener, model: Arc<dyn GenerativeModel>) -> Result<()> {
    let state = Arc::new(InnerAppState { model });
    let app = routes::build_router(state);
    axum::serve(listener, app).await?;
    Ok(())
}
