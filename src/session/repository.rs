//! Session repository trait.

use async_trait::async_trait;

use crate::GuardError;

use super::{Session, SessionData};

/// Repository for session storage.
///
/// Implementations provide different storage backends:
/// - [`InMemorySessionRepository`](super::InMemorySessionRepository): In-memory storage for testing
/// - [`FileSessionRepository`](super::FileSessionRepository): File-based storage
///
/// Callers treat a failing repository as "no session": no CSRF token or
/// CAPTCHA answer ever validates against a store that cannot be read.
#[async_trait]
pub trait SessionRepository: Send + Sync {
    /// Creates a new session with a fresh server-assigned id and returns
    /// the id.
    async fn create(&self, data: SessionData) -> Result<String, GuardError>;

    /// Finds a session by its ID.
    async fn find(&self, session_id: &str) -> Result<Option<Session>, GuardError>;

    /// Replaces the data stored for an existing session.
    async fn save(&self, session_id: &str, data: SessionData) -> Result<(), GuardError>;

    /// Destroys a session.
    async fn destroy(&self, session_id: &str) -> Result<(), GuardError>;
}
