use std::fmt;

use serde::{Deserialize, Serialize};

pub const QUESTION_DELIMITER: &str = "||";

/// Raw model output: three questions joined by `||`.
///
/// Nothing checks that the model actually produced three questions, so
/// readers go through [`SuggestedQuestions::questions`], which tolerates
/// missing, extra and empty pieces.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SuggestedQuestions(String);

impl SuggestedQuestions {
    pub fn new(raw: impl Into<String>) -> Self {
        Self(raw.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_inner(self) -> String {
        self.0
    }

    /// Split on the delimiter, trimming each piece and skipping blanks.
    pub fn questions(&self) -> Vec<&str> {
        self.0
            .split(QUESTION_DELIMITER)
            .map(str::trim)
            .filter(|q| !q.is_empty())
            .collect()
    }
}

impl fmt::Display for SuggestedQuestions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<String> for SuggestedQuestions {
    fn from(raw: String) -> Self {
        Self(raw)
    }
}
