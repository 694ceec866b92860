use async_trait::async_trait;
use murmur_core::{ApiResponse, SuggestedQuestions, VerificationSubmission};
use reqwest::{Client, StatusCode};

use crate::{MessagingService, ServiceError};

/// Async HTTP client implementation of MessagingService.
/// Connects to a running murmur backend.
pub struct HttpService {
    base_url: String,
    client: Client,
}

impl HttpService {
    pub fn new(base_url: &str) -> Self {
        let base_url = base_url.trim_end_matches('/').to_string();
        Self {
            base_url,
            client: Client::new(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Check if the server is reachable.
    pub async fn health_check(&self) -> Result<(), ServiceError> {
        let resp = self
            .client
            .get(format!("{}/api/health", self.base_url))
            .send()
            .await
            .map_err(|e| ServiceError::Transport(e.to_string()))?;
        if resp.status().is_success() {
            Ok(())
        } else {
            Err(parse_error_with_status(resp.status(), resp).await)
        }
    }

    /// POST a JSON body and hand back the response if it is 2xx.
    async fn post_json<B: serde::Serialize>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<reqwest::Response, ServiceError> {
        let resp = self
            .client
            .post(format!("{}{path}", self.base_url))
            .json(body)
            .send()
            .await
            .map_err(|e| ServiceError::Transport(e.to_string()))?;
        let status = resp.status();
        if status.is_success() {
            Ok(resp)
        } else {
            Err(parse_error_with_status(status, resp).await)
        }
    }

    async fn post_empty<T: serde::de::DeserializeOwned>(
        &self,
        path: &str,
    ) -> Result<T, ServiceError> {
        let resp = self
            .client
            .post(format!("{}{path}", self.base_url))
            .send()
            .await
            .map_err(|e| ServiceError::Transport(e.to_string()))?;
        handle_response(resp).await
    }
}

async fn handle_response<T: serde::de::DeserializeOwned>(
    resp: reqwest::Response,
) -> Result<T, ServiceError> {
    let status = resp.status();
    if status.is_success() {
        resp.json::<T>()
            .await
            .map_err(|e| ServiceError::Decode(format!("json decode: {e}")))
    } else {
        Err(parse_error_with_status(status, resp).await)
    }
}

async fn parse_error_with_status(status: StatusCode, resp: reqwest::Response) -> ServiceError {
    let body = resp.text().await.unwrap_or_default();
    ServiceError::Rejected {
        status: status.as_u16(),
        message: extract_message(&body),
    }
}

/// Read a 2xx body without requiring any particular shape.
///
/// The status alone decides success; a body that is empty, not JSON, or
/// missing fields still yields a response, with whatever `message` it had.
pub(crate) fn lenient_response(body: &str) -> ApiResponse {
    serde_json::from_str::<ApiResponse>(body).unwrap_or_else(|_| ApiResponse {
        success: true,
        message: extract_message(body).unwrap_or_default(),
        questions: None,
    })
}

/// Pull `message` out of a JSON error body. Anything else yields `None`.
pub(crate) fn extract_message(body: &str) -> Option<String> {
    serde_json::from_str::<serde_json::Value>(body)
        .ok()
        .and_then(|v| v["message"].as_str().map(String::from))
        .filter(|m| !m.is_empty())
}

#[async_trait]
impl MessagingService for HttpService {
    async fn verify_code(
        &self,
        submission: &VerificationSubmission,
    ) -> Result<ApiResponse, ServiceError> {
        let resp = self.post_json("/api/verify-code", submission).await?;
        let body = resp
            .text()
            .await
            .map_err(|e| ServiceError::Transport(e.to_string()))?;
        Ok(lenient_response(&body))
    }

    async fn suggest_messages(&self) -> Result<SuggestedQuestions, ServiceError> {
        let resp: ApiResponse = self.post_empty("/api/suggest-messages").await?;
        resp.questions
            .map(SuggestedQuestions::new)
            .ok_or_else(|| ServiceError::Decode("response has no questions".into()))
    }
}
