//! Article repository trait.

use async_trait::async_trait;

use crate::GuardError;

/// Repository for article persistence.
///
/// An article is a title/body pair stored as a single unit. The title,
/// collapsed to the filename character set, is the article's identity:
/// saving under a title whose sanitized form already exists overwrites.
/// Articles are never deleted.
///
/// Implementations:
/// - [`FileArticleRepository`](super::FileArticleRepository): one file per article
/// - [`InMemoryArticleRepository`](super::InMemoryArticleRepository): in-memory, for testing
#[async_trait]
pub trait ArticleRepository: Send + Sync {
    /// Persists an article. The body is sanitized before it is written;
    /// storage only ever holds pre-escaped content.
    ///
    /// Returns the stored identity (the sanitized title).
    ///
    /// # Errors
    ///
    /// `MissingField` if the title sanitizes to nothing.
    async fn save(&self, title: &str, body: &str) -> Result<String, GuardError>;

    /// Fetches an article body by title.
    ///
    /// Returns `None` both for absent articles and for titles rejected by
    /// the path gate; the two cases are indistinguishable to the caller.
    async fn fetch(&self, title: &str) -> Result<Option<String>, GuardError>;

    /// Lists all stored article identities.
    async fn list(&self) -> Result<Vec<String>, GuardError>;

    /// Total word count across all articles.
    async fn word_count(&self) -> Result<usize, GuardError>;

    /// Articles whose identity starts with the given prefix,
    /// case-insensitively.
    async fn prefix_search(&self, prefix: &str) -> Result<Vec<String>, GuardError> {
        let needle = prefix.to_lowercase();
        Ok(self
            .list()
            .await?
            .into_iter()
            .filter(|title| title.to_lowercase().starts_with(&needle))
            .collect())
    }
}
