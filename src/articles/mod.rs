mod file_store;
mod memory_store;
mod repository;

pub use file_store::{FileArticleRepository, resolve_safe_article_path};
pub use memory_store::InMemoryArticleRepository;
pub use repository::ArticleRepository;
