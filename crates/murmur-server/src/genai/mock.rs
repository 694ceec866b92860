use std::sync::Mutex;

use async_trait::async_trait;

use super::{GenAiError, GenerativeModel};

/// A canned model for tests: always returns the same text or the same failure,
/// and records every prompt it receives.
pub struct MockModel {
    outcome: Result<String, String>,
    prompts: Mutex<Vec<String>>,
}

impl MockModel {
    /// A model that answers every prompt with `text`.
    pub fn returning(text: &str) -> Self {
        Self {
            outcome: Ok(text.to_string()),
            prompts: Mutex::new(Vec::new()),
        }
    }

    /// A model whose every call fails with a transport error carrying `reason`.
    pub fn failing(reason: &str) -> Self {
        Self {
            outcome: Err(reason.to_string()),
            prompts: Mutex::new(Vec::new()),
        }
    }

    pub fn prompts(&self) -> Vec<String> {
        self.prompts.lock().map(|p| p.clone()).unwrap_or_default()
    }
}

#[async_trait]
impl GenerativeModel for MockModel {
    fn model(&self) -> &str {
        "mock"
    }

    async fn generate(&self, prompt: &str) -> Result<String, GenAiError> {
        if let Ok(mut prompts) = self.prompts.lock() {
            prompts.push(prompt.to_string());
        }
        self.outcome.clone().map_err(GenAiError::Transport)
    }
}
