//! File-based session storage.
//!
//! Stores sessions as JSON files in a directory.

use std::path::PathBuf;

use async_trait::async_trait;

use crate::GuardError;
use crate::crypto::generate_token;

use super::repository::SessionRepository;
use super::{Session, SessionData};

/// File-based session storage.
///
/// Each session is stored as a JSON file named `{session_id}.json`
/// in the configured directory.
#[derive(Clone)]
pub struct FileSessionRepository {
    directory: PathBuf,
}

impl FileSessionRepository {
    /// Creates a new file session repository.
    ///
    /// Creates the directory if it doesn't exist.
    ///
    /// # Errors
    ///
    /// Returns an error if the directory cannot be created.
    pub fn new(directory: impl Into<PathBuf>) -> Result<Self, GuardError> {
        let dir = directory.into();
        std::fs::create_dir_all(&dir).map_err(|e| {
            GuardError::StorageUnavailable(format!("Failed to create session directory: {e}"))
        })?;
        Ok(Self { directory: dir })
    }

    /// Returns the path for a session file.
    fn session_path(&self, session_id: &str) -> PathBuf {
        self.directory.join(format!("{session_id}.json"))
    }

    /// Reads session data from a file.
    fn read_session(&self, session_id: &str) -> Result<Option<SessionData>, GuardError> {
        let path = self.session_path(session_id);

        if !path.exists() {
            return Ok(None);
        }

        let content = std::fs::read_to_string(&path).map_err(|e| {
            GuardError::StorageUnavailable(format!("Failed to read session file: {e}"))
        })?;

        let data: SessionData = serde_json::from_str(&content).map_err(|e| {
            GuardError::StorageUnavailable(format!("Failed to parse session file: {e}"))
        })?;

        Ok(Some(data))
    }

    /// Writes session data to a file.
    fn write_session(&self, session_id: &str, data: &SessionData) -> Result<(), GuardError> {
        let path = self.session_path(session_id);

        let content = serde_json::to_string_pretty(data).map_err(|e| {
            GuardError::StorageUnavailable(format!("Failed to serialize session: {e}"))
        })?;

        std::fs::write(&path, content).map_err(|e| {
            GuardError::StorageUnavailable(format!("Failed to write session file: {e}"))
        })?;

        Ok(())
    }
}

#[async_trait]
impl SessionRepository for FileSessionRepository {
    async fn create(&self, data: SessionData) -> Result<String, GuardError> {
        let session_id = generate_token(32);
        self.write_session(&session_id, &data)?;
        Ok(session_id)
    }

    async fn find(&self, session_id: &str) -> Result<Option<Session>, GuardError> {
        // Validate session_id to prevent path traversal
        if !session_id.chars().all(|c| c.is_ascii_alphanumeric()) {
            return Ok(None);
        }

        Ok(self.read_session(session_id)?.map(|data| Session {
            id: session_id.to_owned(),
            data,
        }))
    }

    async fn save(&self, session_id: &str, data: SessionData) -> Result<(), GuardError> {
        // Validate session_id to prevent path traversal
        if !session_id.chars().all(|c| c.is_ascii_alphanumeric()) {
            return Ok(());
        }

        if self.session_path(session_id).exists() {
            self.write_session(session_id, &data)?;
        }

        Ok(())
    }

    async fn destroy(&self, session_id: &str) -> Result<(), GuardError> {
        // Validate session_id to prevent path traversal
        if !session_id.chars().all(|c| c.is_ascii_alphanumeric()) {
            return Ok(());
        }

        let path = self.session_path(session_id);
        if path.exists() {
            std::fs::remove_file(&path).map_err(|e| {
                GuardError::StorageUnavailable(format!("Failed to delete session file: {e}"))
            })?;
        }

        Ok(())
    }
}
