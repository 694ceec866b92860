pub mod gemini;
pub mod mock;

pub use gemini::GeminiClient;
pub use mock::MockModel;

use async_trait::async_trait;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum GenAiError {
    #[error("generative AI API key is not configured")]
    MissingApiKey,

    #[error("request to model failed: {0}")]
    Transport(String),

    #[error("model API returned {status}: {body}")]
    Status { status: u16, body: String },

    #[error("prompt blocked by provider: {0}")]
    Blocked(String),

    #[error("model returned no candidates")]
    EmptyResponse,

    #[error("invalid model response: {0}")]
    Decode(String),
}

/// A hosted text model.
///
/// Built once at startup and shared by every request through `AppState`.
#[async_trait]
pub trait GenerativeModel: Send + Sync {
    /// Model identifier, for logging.
    fn model(&self) -> &str;

    /// Send a single prompt and return the model's raw text.
    async fn generate(&self, prompt: &str) -> Result<String, GenAiError>;
}
