use async_trait::async_trait;
use murmur_core::{ApiResponse, SuggestedQuestions, VerificationSubmission};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ServiceError {
    /// The request never produced an HTTP response.
    #[error("connection failed: {0}")]
    Transport(String),

    /// The server answered with a non-2xx status.
    #[error("request failed with status {status}")]
    Rejected {
        status: u16,
        message: Option<String>,
    },

    #[error("invalid response: {0}")]
    Decode(String),
}

impl ServiceError {
    /// Best-effort user-facing message taken from the error response body.
    pub fn message(&self) -> Option<&str> {
        match self {
            ServiceError::Rejected { message, .. } => message.as_deref(),
            _ => None,
        }
    }
}

/// Abstraction over the messaging backend's HTTP API.
///
/// The verify page programs against this trait.
/// `HttpService` talks to a running server; tests substitute their own.
#[async_trait]
pub trait MessagingService: Send + Sync {
    /// `POST /api/verify-code`. Any non-2xx answer is an error.
    async fn verify_code(
        &self,
        submission: &VerificationSubmission,
    ) -> Result<ApiResponse, ServiceError>;

    /// `POST /api/suggest-messages`.
    async fn suggest_messages(&self) -> Result<SuggestedQuestions, ServiceError>;
}
