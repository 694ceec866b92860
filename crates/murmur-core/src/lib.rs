pub mod error;
pub mod questions;
pub mod response;
pub mod verification;

pub use error::ValidationError;
pub use questions::SuggestedQuestions;
pub use response::ApiResponse;
pub use verification::{validate_code, VerificationSubmission};
