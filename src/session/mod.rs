mod config;
mod cookie;
mod file_store;
mod handle;
mod memory_store;
mod repository;

use chrono::{DateTime, Utc};
pub use config::{SameSite, SessionConfig};
pub use cookie::{build_expired_cookie, build_set_cookie, sign_session_id, verify_signed_cookie};
pub use file_store::FileSessionRepository;
pub use handle::SessionHandle;
pub use memory_store::InMemorySessionRepository;
pub use repository::SessionRepository;
use serde::{Deserialize, Serialize};

/// Per-visitor state persisted by a [`SessionRepository`].
///
/// A session holds at most one live CSRF token at a time; a token older
/// than the configured expiry is invalid even if it matches. The CAPTCHA
/// answer is set when a challenge is issued and cleared exactly once after
/// a successful submission. The rendered challenge image is cached next to
/// the answer so re-displaying the form shows the challenge the stored
/// answer belongs to.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionData {
    /// Set once when the server assigns a fresh session id. A stored
    /// session without this flag is never adopted, which stops an
    /// attacker-supplied id from becoming a live session.
    pub initiated: bool,
    pub csrf_token: Option<String>,
    pub csrf_issued_at: Option<DateTime<Utc>>,
    pub captcha_answer: Option<String>,
    pub captcha_image: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl SessionData {
    /// Creates initiated session data with no token and no challenge.
    #[must_use]
    pub fn new() -> Self {
        Self {
            initiated: true,
            csrf_token: None,
            csrf_issued_at: None,
            captcha_answer: None,
            captcha_image: None,
            created_at: Utc::now(),
        }
    }
}

impl Default for SessionData {
    fn default() -> Self {
        Self::new()
    }
}

/// A stored session: server-assigned id plus its data.
#[derive(Debug, Clone)]
pub struct Session {
    pub id: String,
    pub data: SessionData,
}

impl Session {
    pub fn new(id: String, data: SessionData) -> Self {
        Self { id, data }
    }
}
