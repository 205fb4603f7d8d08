//! File-based article storage.
//!
//! One file per article under a fixed storage directory: filename is the
//! sanitized title (no extension), content is the sanitized body, UTF-8,
//! no embedded metadata. Every read goes through the path gate in
//! [`resolve_safe_article_path`].

use std::path::{Path, PathBuf};
use std::sync::{Arc, RwLock};

use async_trait::async_trait;

use crate::GuardError;
use crate::sanitize::{full_sanitize, sanitize_file_name};

use super::repository::ArticleRepository;

/// Resolves a raw title to a readable path inside the storage directory.
///
/// The candidate is stripped to the filename character set, resolved to a
/// canonical absolute path, and accepted only if canonicalization
/// succeeds, the canonical path stays under the canonical storage
/// directory, the sanitized name appears verbatim in a fresh enumeration
/// of the directory, and the target is readable. Every failure collapses
/// to `None` so callers cannot distinguish a rejected path from an absent
/// article.
pub fn resolve_safe_article_path(raw_title: &str, storage_dir: &Path) -> Option<PathBuf> {
    let safe_name = sanitize_file_name(raw_title);
    if safe_name.is_empty() {
        return None;
    }

    let canonical_dir = std::fs::canonicalize(storage_dir).ok()?;
    let resolved = std::fs::canonicalize(canonical_dir.join(&safe_name)).ok()?;

    if !resolved.starts_with(&canonical_dir) {
        log::warn!(target: "gazette::articles", "msg=\"path escaped storage directory\" name=\"{safe_name}\"");
        return None;
    }

    let listed = enumerate_articles(&canonical_dir)
        .ok()?
        .iter()
        .any(|entry| *entry == safe_name);
    if !listed {
        return None;
    }

    // Readability check doubles as a file-not-directory check.
    std::fs::File::open(&resolved).ok()?;

    Some(resolved)
}

fn enumerate_articles(dir: &Path) -> Result<Vec<String>, GuardError> {
    let entries = std::fs::read_dir(dir).map_err(|e| {
        GuardError::StorageUnavailable(format!("Failed to read article directory: {e}"))
    })?;

    let mut articles = Vec::new();
    for entry in entries.flatten() {
        if entry.path().is_file() {
            articles.push(entry.file_name().to_string_lossy().into_owned());
        }
    }
    articles.sort();

    Ok(articles)
}

/// File-based article storage.
///
/// Cloning shares the storage directory and the word-count cache.
#[derive(Clone)]
pub struct FileArticleRepository {
    directory: PathBuf,
    word_count_cache: Arc<RwLock<Option<usize>>>,
}

impl FileArticleRepository {
    /// Creates a new file article repository.
    ///
    /// Creates the directory if it doesn't exist.
    ///
    /// # Errors
    ///
    /// Returns an error if the directory cannot be created.
    pub fn new(directory: impl Into<PathBuf>) -> Result<Self, GuardError> {
        let dir = directory.into();
        std::fs::create_dir_all(&dir).map_err(|e| {
            GuardError::StorageUnavailable(format!("Failed to create article directory: {e}"))
        })?;
        Ok(Self {
            directory: dir,
            word_count_cache: Arc::new(RwLock::new(None)),
        })
    }

    /// Resolves a title through the path gate, keeping the rejection
    /// reason.
    ///
    /// Library callers that need to distinguish a refused path from plain
    /// absence can use this; the HTTP surface never does.
    ///
    /// # Errors
    ///
    /// `PathRejected` for traversal attempts, non-enumerated targets, and
    /// unreadable files alike.
    pub fn resolve(&self, title: &str) -> Result<PathBuf, GuardError> {
        resolve_safe_article_path(title, &self.directory).ok_or(GuardError::PathRejected)
    }

    fn invalidate_word_count(&self) {
        if let Ok(mut cache) = self.word_count_cache.write() {
            *cache = None;
        }
    }

    fn compute_word_count(&self) -> Result<usize, GuardError> {
        let mut total = 0;
        for name in enumerate_articles(&self.directory)? {
            if let Some(path) = resolve_safe_article_path(&name, &self.directory) {
                if let Ok(content) = std::fs::read_to_string(path) {
                    total += content.split_whitespace().count();
                }
            }
        }
        Ok(total)
    }
}

#[async_trait]
impl ArticleRepository for FileArticleRepository {
    async fn save(&self, title: &str, body: &str) -> Result<String, GuardError> {
        let safe_name = sanitize_file_name(title);
        if safe_name.is_empty() {
            return Err(GuardError::MissingField);
        }

        let path = self.directory.join(&safe_name);
        std::fs::write(&path, full_sanitize(body)).map_err(|e| {
            GuardError::StorageUnavailable(format!("Failed to write article file: {e}"))
        })?;

        self.invalidate_word_count();
        log::info!(target: "gazette::articles", "msg=\"article saved\" name=\"{safe_name}\"");

        Ok(safe_name)
    }

    async fn fetch(&self, title: &str) -> Result<Option<String>, GuardError> {
        let path = match resolve_safe_article_path(title, &self.directory) {
            Some(path) => path,
            None => return Ok(None),
        };

        let content = std::fs::read_to_string(&path).map_err(|e| {
            GuardError::StorageUnavailable(format!("Failed to read article file: {e}"))
        })?;

        Ok(Some(content))
    }

    async fn list(&self) -> Result<Vec<String>, GuardError> {
        enumerate_articles(&self.directory)
    }

    async fn word_count(&self) -> Result<usize, GuardError> {
        if let Ok(cache) = self.word_count_cache.read() {
            if let Some(count) = *cache {
                return Ok(count);
            }
        }

        let count = self.compute_word_count()?;
        if let Ok(mut cache) = self.word_count_cache.write() {
            *cache = Some(count);
        }

        Ok(count)
    }
}

#[cfg(test)]
mod tests {
    use std::env;

    use crate::crypto::generate_token;

    use super::*;

    fn temp_dir() -> PathBuf {
        let dir = env::temp_dir().join(format!("gazette_articles_test_{}", generate_token(8)));
        std::fs::create_dir_all(&dir).unwrap();
        dir
    }

    fn cleanup(dir: &PathBuf) {
        let _ = std::fs::remove_dir_all(dir);
    }

    #[tokio::test]
    async fn test_save_and_fetch_roundtrip() {
        let dir = temp_dir();
        let repo = FileArticleRepository::new(&dir).unwrap();

        let stored = repo.save("Hello", "World").await.unwrap();
        assert_eq!(stored, "Hello");

        let body = repo.fetch("Hello").await.unwrap();
        assert_eq!(body.as_deref(), Some("World"));

        cleanup(&dir);
    }

    #[tokio::test]
    async fn test_save_sanitizes_title_into_filename() {
        let dir = temp_dir();
        let repo = FileArticleRepository::new(&dir).unwrap();

        let stored = repo.save("My Title!", "content here").await.unwrap();
        assert_eq!(stored, "MyTitle");
        assert!(dir.join("MyTitle").exists());

        // The raw title resolves to the same stored article.
        let body = repo.fetch("My Title!").await.unwrap();
        assert_eq!(body.as_deref(), Some("content here"));

        cleanup(&dir);
    }

    #[tokio::test]
    async fn test_save_sanitizes_body_before_write() {
        let dir = temp_dir();
        let repo = FileArticleRepository::new(&dir).unwrap();

        repo.save("Post", "<script>alert(1)</script> & more")
            .await
            .unwrap();

        let on_disk = std::fs::read_to_string(dir.join("Post")).unwrap();
        assert_eq!(on_disk, "alert(1) &amp; more");

        cleanup(&dir);
    }

    #[tokio::test]
    async fn test_save_rejects_unusable_title() {
        let dir = temp_dir();
        let repo = FileArticleRepository::new(&dir).unwrap();

        let err = repo.save("!!!", "body").await.unwrap_err();
        assert_eq!(err, GuardError::MissingField);
        assert!(repo.list().await.unwrap().is_empty());

        cleanup(&dir);
    }

    #[tokio::test]
    async fn test_same_sanitized_title_overwrites() {
        let dir = temp_dir();
        let repo = FileArticleRepository::new(&dir).unwrap();

        repo.save("My Title", "first").await.unwrap();
        repo.save("MyTitle", "second").await.unwrap();

        assert_eq!(repo.list().await.unwrap(), vec!["MyTitle".to_owned()]);
        assert_eq!(
            repo.fetch("MyTitle").await.unwrap().as_deref(),
            Some("second")
        );

        cleanup(&dir);
    }

    #[tokio::test]
    async fn test_fetch_rejects_traversal() {
        let dir = temp_dir();
        let repo = FileArticleRepository::new(&dir).unwrap();
        repo.save("Legit", "content").await.unwrap();

        assert!(repo.fetch("../../etc/passwd").await.unwrap().is_none());
        assert!(repo.fetch("..").await.unwrap().is_none());
        assert!(repo.fetch("/etc/passwd").await.unwrap().is_none());

        cleanup(&dir);
    }

    #[tokio::test]
    async fn test_fetch_ignores_non_enumerated_entries() {
        let dir = temp_dir();
        let repo = FileArticleRepository::new(&dir).unwrap();

        // A subdirectory is not a file and must never be served.
        std::fs::create_dir(dir.join("nested")).unwrap();
        assert!(repo.fetch("nested").await.unwrap().is_none());

        cleanup(&dir);
    }

    #[tokio::test]
    async fn test_resolve_keeps_rejection_reason() {
        let dir = temp_dir();
        let repo = FileArticleRepository::new(&dir).unwrap();

        let err = repo.resolve("../../etc/passwd").unwrap_err();
        assert_eq!(err, GuardError::PathRejected);

        let err = repo.resolve("NoSuchArticle").unwrap_err();
        assert_eq!(err, GuardError::PathRejected);

        cleanup(&dir);
    }

    #[tokio::test]
    async fn test_resolve_safe_article_path_direct() {
        let dir = temp_dir();
        let repo = FileArticleRepository::new(&dir).unwrap();
        repo.save("MyTitle", "words").await.unwrap();

        assert!(resolve_safe_article_path("My Title!", &dir).is_some());
        assert!(resolve_safe_article_path("../../etc/passwd", &dir).is_none());
        assert!(resolve_safe_article_path("", &dir).is_none());

        cleanup(&dir);
    }

    #[tokio::test]
    async fn test_list_returns_files_only() {
        let dir = temp_dir();
        let repo = FileArticleRepository::new(&dir).unwrap();

        repo.save("Beta", "b").await.unwrap();
        repo.save("Alpha", "a").await.unwrap();
        std::fs::create_dir(dir.join("subdir")).unwrap();

        assert_eq!(
            repo.list().await.unwrap(),
            vec!["Alpha".to_owned(), "Beta".to_owned()]
        );

        cleanup(&dir);
    }

    #[tokio::test]
    async fn test_prefix_search_case_insensitive() {
        let dir = temp_dir();
        let repo = FileArticleRepository::new(&dir).unwrap();

        repo.save("HelloWorld", "x").await.unwrap();
        repo.save("HelpPage", "y").await.unwrap();
        repo.save("Other", "z").await.unwrap();

        let hits = repo.prefix_search("hel").await.unwrap();
        assert_eq!(hits, vec!["HelloWorld".to_owned(), "HelpPage".to_owned()]);

        assert!(repo.prefix_search("zzz").await.unwrap().is_empty());

        cleanup(&dir);
    }

    #[tokio::test]
    async fn test_word_count_and_cache_invalidation() {
        let dir = temp_dir();
        let repo = FileArticleRepository::new(&dir).unwrap();

        repo.save("One", "three little words").await.unwrap();
        assert_eq!(repo.word_count().await.unwrap(), 3);

        // Cached value survives a plain re-read.
        assert_eq!(repo.word_count().await.unwrap(), 3);

        // A write invalidates the cache.
        repo.save("Two", "two more").await.unwrap();
        assert_eq!(repo.word_count().await.unwrap(), 5);

        cleanup(&dir);
    }

    #[tokio::test]
    async fn test_word_count_cache_shared_across_clones() {
        let dir = temp_dir();
        let repo = FileArticleRepository::new(&dir).unwrap();
        let clone = repo.clone();

        repo.save("One", "a b c").await.unwrap();
        assert_eq!(clone.word_count().await.unwrap(), 3);

        clone.save("Two", "d e").await.unwrap();
        assert_eq!(repo.word_count().await.unwrap(), 5);

        cleanup(&dir);
    }
}
