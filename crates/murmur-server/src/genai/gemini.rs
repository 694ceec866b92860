use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::{GenAiError, GenerativeModel};
use crate::config::GenAiConfig;

/// Client for the Google Generative Language REST API.
pub struct GeminiClient {
    client: Client,
    endpoint: String,
    model: String,
    api_key: Option<String>,
}

impl GeminiClient {
    pub fn new(config: &GenAiConfig) -> Self {
        Self {
            client: Client::new(),
            endpoint: config.endpoint.trim_end_matches('/').to_string(),
            model: config.model.clone(),
            api_key: config.api_key.clone().filter(|k| !k.is_empty()),
        }
    }

    fn generate_url(&self) -> String {
        format!(
            "{}/v1beta/models/{}:generateContent",
            self.endpoint, self.model
        )
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub(crate) struct GenerateContentRequest {
    pub contents: Vec<Content>,
}

#[derive(Debug, Default, Serialize, Deserialize)]
pub(crate) struct Content {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
    #[serde(default)]
    pub parts: Vec<Part>,
}

#[derive(Debug, Serialize, Deserialize)]
pub(crate) struct Part {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
    prompt_feedback: Option<PromptFeedback>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Candidate {
    content: Option<Content>,
    finish_reason: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PromptFeedback {
    block_reason: Option<String>,
}

/// Finish reasons that mean the candidate text was withheld.
const BLOCKED_FINISH_REASONS: &[&str] = &["SAFETY", "RECITATION"];

impl GenerateContentRequest {
    fn user_prompt(prompt: &str) -> Self {
        Self {
            contents: vec![Content {
                role: Some("user".into()),
                parts: vec![Part {
                    text: Some(prompt.to_string()),
                }],
            }],
        }
    }
}

/// Concatenate the text parts of the first candidate.
fn extract_text(resp: GenerateContentResponse) -> Result<String, GenAiError> {
    if let Some(reason) = resp.prompt_feedback.and_then(|f| f.block_reason) {
        return Err(GenAiError::Blocked(reason));
    }
    let candidate = resp
        .candidates
        .into_iter()
        .next()
        .ok_or(GenAiError::EmptyResponse)?;
    if let Some(reason) = candidate.finish_reason.as_deref() {
        if BLOCKED_FINISH_REASONS.contains(&reason) {
            return Err(GenAiError::Blocked(reason.to_string()));
        }
    }
    let text = candidate
        .content
        .unwrap_or_default()
        .parts
        .into_iter()
        .filter_map(|p| p.text)
        .collect::<String>();
    Ok(text)
}

#[async_trait]
impl GenerativeModel for GeminiClient {
    fn model(&self) -> &str {
        &self.model
    }

    async fn generate(&self, prompt: &str) -> Result<String, GenAiError> {
        let key = self.api_key.as_deref().ok_or(GenAiError::MissingApiKey)?;

        debug!(model = %self.model, "sending generateContent request");
        let resp = self
            .client
            .post(self.generate_url())
            .header("x-goog-api-key", key)
            .json(&GenerateContentRequest::user_prompt(prompt))
            .send()
            .await
            .map_err(|e| GenAiError::Transport(e.to_string()))?;

        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(GenAiError::Status {
                status: status.as_u16(),
                body,
            });
        }

        let body: GenerateContentResponse = resp
            .json()
            .await
            .map_err(|e| GenAiError::Decode(e.to_string()))?;
        extract_text(body)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_helpers::spawn_genai_stub;
    use axum::http::StatusCode;
    use serde_json::json;

    fn parse(value: serde_json::Value) -> GenerateContentResponse {
        serde_json::from_value(value).unwrap()
    }

    fn config(endpoint: &str, key: Option<&str>) -> GenAiConfig {
        GenAiConfig {
            api_key: key.map(String::from),
            model: "gemini-2.0-flash".into(),
            endpoint: endpoint.into(),
        }
    }

    #[test]
    fn extract_text_joins_parts() {
        let resp = parse(json!({
            "candidates": [{
                "content": { "role": "model", "parts": [{ "text": "A||B" }, { "text": "||C" }] },
                "finishReason": "STOP"
            }]
        }));
        assert_eq!(extract_text(resp).unwrap(), "A||B||C");
    }

    #[test]
    fn extract_text_uses_first_candidate() {
        let resp = parse(json!({
            "candidates": [
                { "content": { "parts": [{ "text": "first" }] } },
                { "content": { "parts": [{ "text": "second" }] } }
            ]
        }));
        assert_eq!(extract_text(resp).unwrap(), "first");
    }

    #[test]
    fn extract_text_no_candidates() {
        let err = extract_text(parse(json!({}))).unwrap_err();
        assert!(matches!(err, GenAiError::EmptyResponse), "got {err:?}");
    }

    #[test]
    fn extract_text_blocked_prompt() {
        let resp = parse(json!({ "promptFeedback": { "blockReason": "SAFETY" } }));
        let err = extract_text(resp).unwrap_err();
        assert!(matches!(err, GenAiError::Blocked(ref r) if r == "SAFETY"));
    }

    #[test]
    fn extract_text_blocked_candidate() {
        let resp = parse(json!({
            "candidates": [{ "content": { "parts": [] }, "finishReason": "RECITATION" }]
        }));
        assert!(matches!(extract_text(resp), Err(GenAiError::Blocked(_))));
    }

    #[test]
    fn generate_url_includes_model() {
        let client = GeminiClient::new(&config("https://example.test/", Some("k")));
        assert_eq!(
            client.generate_url(),
            "https://example.test/v1beta/models/gemini-2.0-flash:generateContent"
        );
        assert_eq!(client.model(), "gemini-2.0-flash");
    }

    #[tokio::test]
    async fn generate_without_key_fails_before_network() {
        let client = GeminiClient::new(&config("http://127.0.0.1:9", None));
        let err = client.generate("hi").await.unwrap_err();
        assert!(matches!(err, GenAiError::MissingApiKey));
    }

    #[tokio::test]
    async fn empty_key_counts_as_missing() {
        let client = GeminiClient::new(&config("http://127.0.0.1:9", Some("")));
        assert!(matches!(
            client.generate("hi").await,
            Err(GenAiError::MissingApiKey)
        ));
    }

    #[tokio::test]
    async fn generate_against_stub() {
        let stub = spawn_genai_stub(
            StatusCode::OK,
            json!({
                "candidates": [{ "content": { "role": "model", "parts": [{ "text": "A||B||C" }] } }]
            }),
        )
        .await;
        let client = GeminiClient::new(&config(&stub.base_url, Some("secret")));

        let text = client.generate("give me questions").await.unwrap();
        assert_eq!(text, "A||B||C");

        let requests = stub.requests();
        assert_eq!(requests.len(), 1);
        assert_eq!(requests[0].target, "gemini-2.0-flash:generateContent");
        assert_eq!(requests[0].api_key.as_deref(), Some("secret"));
        assert_eq!(
            requests[0].body["contents"][0]["parts"][0]["text"],
            "give me questions"
        );
    }

    #[tokio::test]
    async fn generate_maps_error_status() {
        let stub = spawn_genai_stub(
            StatusCode::TOO_MANY_REQUESTS,
            json!({ "error": { "message": "quota exceeded" } }),
        )
        .await;
        let client = GeminiClient::new(&config(&stub.base_url, Some("secret")));

        match client.generate("x").await {
            Err(GenAiError::Status { status, body }) => {
                assert_eq!(status, 429);
                assert!(body.contains("quota exceeded"));
            }
            other => panic!("expected Status error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn generate_connection_refused_is_transport() {
        // Bind then drop to get a port with nothing listening.
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let client = GeminiClient::new(&config(&format!("http://{addr}"), Some("k")));
        assert!(matches!(
            client.generate("x").await,
            Err(GenAiError::Transport(_))
        ));
    }
}
