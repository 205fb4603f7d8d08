pub mod api;
pub mod articles;
pub mod challenge;
pub mod crypto;
pub mod events;
pub mod guard;
pub mod render;
pub mod sanitize;
pub mod secret;
pub mod session;

pub use articles::ArticleRepository;
pub use articles::FileArticleRepository;
pub use articles::InMemoryArticleRepository;
pub use challenge::CaptchaChallenge;
pub use guard::Saved;
pub use guard::SubmissionForm;
pub use guard::SubmissionGuard;
pub use secret::SecretString;
pub use session::FileSessionRepository;
pub use session::InMemorySessionRepository;
pub use session::SessionConfig;
pub use session::SessionHandle;
pub use session::SessionRepository;

use std::fmt;

/// Reasons a submission or lookup is refused.
///
/// Every variant is recoverable from the caller's perspective: the worst
/// outcome is a rejected request and a user-facing re-prompt. Session
/// storage failures surface as `StorageUnavailable` and cause all CSRF and
/// CAPTCHA validations to fail closed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GuardError {
    CsrfInvalid,
    CaptchaInvalid,
    MissingField,
    PathRejected,
    StorageUnavailable(String),
}

impl std::error::Error for GuardError {}

impl fmt::Display for GuardError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GuardError::CsrfInvalid => write!(f, "Invalid or expired CSRF token"),
            GuardError::CaptchaInvalid => write!(f, "CAPTCHA answer did not match"),
            GuardError::MissingField => write!(f, "Title and body are required"),
            GuardError::PathRejected => write!(f, "Article not found"),
            GuardError::StorageUnavailable(msg) => write!(f, "Storage error: {msg}"),
        }
    }
}
