use murmur_core::{ApiResponse, VerificationSubmission};
use tokio::runtime::Runtime;

use crate::{HttpService, MessagingService, ServiceError};

/// Blocking wrapper around the async `HttpService`.
///
/// Creates an internal tokio runtime and uses `block_on()` for each call.
/// Designed for sync callers like the TUI.
pub struct BlockingHttpService {
    inner: HttpService,
    rt: Runtime,
}

impl BlockingHttpService {
    pub fn new(base_url: &str) -> Self {
        Self {
            inner: HttpService::new(base_url),
            rt: Runtime::new().expect("failed to create tokio runtime"),
        }
    }

    pub fn verify_code(
        &self,
        submission: &VerificationSubmission,
    ) -> Result<ApiResponse, ServiceError> {
        self.rt.block_on(self.inner.verify_code(submission))
    }
}
