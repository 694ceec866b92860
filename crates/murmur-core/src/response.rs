use serde::{Deserialize, Serialize};

/// Envelope shared by the backend endpoints.
///
/// `message` is what the UI displays; `questions` is only set by the
/// suggestion endpoint.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiResponse {
    pub success: bool,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub questions: Option<String>,
}

impl ApiResponse {
    pub fn ok(message: impl Into<String>) -> Self {
        Self {
            success: true,
            message: message.into(),
            questions: None,
        }
    }

    pub fn failure(message: impl Into<String>) -> Self {
        Self {
            success: false,
            message: message.into(),
            questions: None,
        }
    }

    /// Successful suggestion payload. Carries no message.
    pub fn with_questions(questions: impl Into<String>) -> Self {
        Self {
            success: true,
            message: String::new(),
            questions: Some(questions.into()),
        }
    }

    /// The message, or `None` when the body carried an empty one.
    pub fn message(&self) -> Option<&str> {
        if self.message.is_empty() {
            None
        } else {
            Some(&self.message)
        }
    }
}
