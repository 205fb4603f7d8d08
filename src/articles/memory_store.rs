//! In-memory article storage.
//!
//! Suitable for tests and examples; content is lost on restart.

use std::collections::BTreeMap;
use std::sync::{Arc, RwLock};

use async_trait::async_trait;

use crate::GuardError;
use crate::sanitize::{full_sanitize, sanitize_file_name};

use super::repository::ArticleRepository;

/// In-memory article storage keyed by sanitized title.
///
/// Applies the same title collapsing and body sanitization as the file
/// store, without touching the filesystem.
#[derive(Clone)]
pub struct InMemoryArticleRepository {
    articles: Arc<RwLock<BTreeMap<String, String>>>,
}

impl InMemoryArticleRepository {
    /// Creates a new in-memory article repository.
    pub fn new() -> Self {
        Self {
            articles: Arc::new(RwLock::new(BTreeMap::new())),
        }
    }

    /// Returns the number of articles stored.
    pub fn len(&self) -> usize {
        self.articles.read().map(|guard| guard.len()).unwrap_or(0)
    }

    /// Returns true if no articles are stored.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Default for InMemoryArticleRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ArticleRepository for InMemoryArticleRepository {
    async fn save(&self, title: &str, body: &str) -> Result<String, GuardError> {
        let safe_name = sanitize_file_name(title);
        if safe_name.is_empty() {
            return Err(GuardError::MissingField);
        }

        self.articles
            .write()
            .map_err(|_| GuardError::StorageUnavailable("Lock poisoned".to_owned()))?
            .insert(safe_name.clone(), full_sanitize(body));

        Ok(safe_name)
    }

    async fn fetch(&self, title: &str) -> Result<Option<String>, GuardError> {
        let safe_name = sanitize_file_name(title);
        if safe_name.is_empty() {
            return Ok(None);
        }

        let articles = self
            .articles
            .read()
            .map_err(|_| GuardError::StorageUnavailable("Lock poisoned".to_owned()))?;

        Ok(articles.get(&safe_name).cloned())
    }

    async fn list(&self) -> Result<Vec<String>, GuardError> {
        let articles = self
            .articles
            .read()
            .map_err(|_| GuardError::StorageUnavailable("Lock poisoned".to_owned()))?;

        Ok(articles.keys().cloned().collect())
    }

    async fn word_count(&self) -> Result<usize, GuardError> {
        let articles = self
            .articles
            .read()
            .map_err(|_| GuardError::StorageUnavailable("Lock poisoned".to_owned()))?;

        Ok(articles
            .values()
            .map(|body| body.split_whitespace().count())
            .sum())
    }
}
