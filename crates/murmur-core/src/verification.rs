use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

/// Body of `POST /api/verify-code`.
///
/// Built for a single submission attempt and dropped once the request
/// resolves. The code is sent exactly as typed; trimming only decides
/// whether there is anything to send.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VerificationSubmission {
    pub username: String,
    pub code: String,
}

impl VerificationSubmission {
    /// Build a submission, rejecting codes that are blank after trimming.
    pub fn new(username: &str, code: &str) -> Result<Self, ValidationError> {
        validate_code(code)?;
        Ok(Self {
            username: username.to_string(),
            code: code.to_string(),
        })
    }
}

/// The verify form's only rule: the code must be non-empty once trimmed.
pub fn validate_code(code: &str) -> Result<(), ValidationError> {
    if code.trim().is_empty() {
        Err(ValidationError::EmptyCode)
    } else {
        Ok(())
    }
}
