//! Axum front door.
//!
//! Mount [`routes`] with an [`AppState`] carrying your repositories:
//!
//! ```rust,ignore
//! use gazette::api::axum::{AppState, routes};
//! use gazette::{FileArticleRepository, FileSessionRepository, SessionConfig};
//!
//! let state = AppState {
//!     sessions: sessions_repo,
//!     articles: articles_repo,
//!     config: SessionConfig::default(),
//! };
//! let app = routes().with_state(state);
//! ```

mod error;
mod handlers;
mod routes;

pub use error::AppError;
pub use handlers::{editor_page, read_api, submit_article};
pub use routes::{AppState, routes};
