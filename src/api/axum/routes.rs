use axum::Router;
use axum::http::{HeaderValue, header};
use axum::routing::get;
use tower_http::set_header::SetResponseHeaderLayer;

use crate::articles::ArticleRepository;
use crate::session::{SessionConfig, SessionRepository};

use super::handlers;

/// Shared state for the front door: the two repositories plus session
/// settings. Repositories are cheap to clone and are cloned per request.
#[derive(Clone)]
pub struct AppState<S, A> {
    pub sessions: S,
    pub articles: A,
    pub config: SessionConfig,
}

/// The full router: editor page, submission endpoint and read-side API,
/// with the security response headers applied to every response.
pub fn routes<S, A>() -> Router<AppState<S, A>>
where
    S: SessionRepository + Clone + Send + Sync + 'static,
    A: ArticleRepository + Clone + Send + Sync + 'static,
{
    Router::new()
        .route(
            "/",
            get(handlers::editor_page::<S, A>).post(handlers::submit_article::<S, A>),
        )
        .route("/api", get(handlers::read_api::<S, A>))
        .layer(SetResponseHeaderLayer::overriding(
            header::X_CONTENT_TYPE_OPTIONS,
            HeaderValue::from_static("nosniff"),
        ))
        .layer(SetResponseHeaderLayer::overriding(
            header::X_FRAME_OPTIONS,
            HeaderValue::from_static("DENY"),
        ))
        .layer(SetResponseHeaderLayer::overriding(
            header::CONTENT_SECURITY_POLICY,
            HeaderValue::from_static("default-src 'self'"),
        ))
}
