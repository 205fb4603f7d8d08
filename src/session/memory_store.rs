//! In-memory session storage.
//!
//! Suitable for development, testing, and single-instance deployments.

use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use async_trait::async_trait;

use crate::GuardError;
use crate::crypto::generate_token;

use super::repository::SessionRepository;
use super::{Session, SessionData};

/// In-memory session storage.
///
/// Stores sessions in a `HashMap` protected by a `RwLock`.
/// Sessions are keyed by their session ID.
///
/// # Note
///
/// Sessions are lost when the process restarts.
/// For persistent storage, use [`FileSessionRepository`](super::FileSessionRepository).
#[derive(Clone)]
pub struct InMemorySessionRepository {
    sessions: Arc<RwLock<HashMap<String, SessionData>>>,
}

impl InMemorySessionRepository {
    /// Creates a new in-memory session repository.
    pub fn new() -> Self {
        Self {
            sessions: Arc::new(RwLock::new(HashMap::new())),
        }
    }

    /// Returns the number of sessions currently stored.
    pub fn len(&self) -> usize {
        self.sessions.read().map(|guard| guard.len()).unwrap_or(0)
    }

    /// Returns true if there are no sessions stored.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Default for InMemorySessionRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl SessionRepository for InMemorySessionRepository {
    async fn create(&self, data: SessionData) -> Result<String, GuardError> {
        let session_id = generate_token(32);

        self.sessions
            .write()
            .map_err(|_| GuardError::StorageUnavailable("Lock poisoned".to_owned()))?
            .insert(session_id.clone(), data);

        Ok(session_id)
    }

    async fn find(&self, session_id: &str) -> Result<Option<Session>, GuardError> {
        let sessions = self
            .sessions
            .read()
            .map_err(|_| GuardError::StorageUnavailable("Lock poisoned".to_owned()))?;

        Ok(sessions.get(session_id).map(|data| Session {
            id: session_id.to_owned(),
            data: data.clone(),
        }))
    }

    async fn save(&self, session_id: &str, data: SessionData) -> Result<(), GuardError> {
        let mut sessions = self
            .sessions
            .write()
            .map_err(|_| GuardError::StorageUnavailable("Lock poisoned".to_owned()))?;

        if let Some(stored) = sessions.get_mut(session_id) {
            *stored = data;
        }

        Ok(())
    }

    async fn destroy(&self, session_id: &str) -> Result<(), GuardError> {
        self.sessions
            .write()
            .map_err(|_| GuardError::StorageUnavailable("Lock poisoned".to_owned()))?
            .remove(session_id);

        Ok(())
    }
}
