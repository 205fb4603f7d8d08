//! HTTP handlers for the editor page, submissions and the read-side API.

use axum::Form;
use axum::extract::{Query, State};
use axum::http::{HeaderMap, StatusCode, header};
use axum::response::{Html, IntoResponse, Response};
use axum::Json;
use serde::Deserialize;

use super::error::AppError;
use super::routes::AppState;
use crate::GuardError;
use crate::api::{ArticleResponse, ListResponse};
use crate::articles::ArticleRepository;
use crate::challenge::issue_challenge;
use crate::guard::{SubmissionForm, SubmissionGuard};
use crate::render::{EditorPage, render_page};
use crate::session::{SessionHandle, SessionRepository};

const PAGE_TITLE: &str = "Article Editor";

#[derive(Debug, Deserialize)]
pub struct EditorQuery {
    pub title: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct ApiQuery {
    pub title: Option<String>,
    pub prefixsearch: Option<String>,
}

/// Extracts the session cookie value from the request headers.
fn session_cookie(headers: &HeaderMap, cookie_name: &str) -> Option<String> {
    let raw = headers.get(header::COOKIE)?.to_str().ok()?;
    raw.split(';').find_map(|pair| {
        let (name, value) = pair.trim().split_once('=')?;
        if name == cookie_name {
            Some(value.to_owned())
        } else {
            None
        }
    })
}

/// Renders the editor page with the session's CSRF token and CAPTCHA
/// challenge embedded in the form.
///
/// GET /
pub async fn editor_page<S, A>(
    State(state): State<AppState<S, A>>,
    headers: HeaderMap,
    Query(query): Query<EditorQuery>,
) -> Response
where
    S: SessionRepository + Clone + Send + Sync + 'static,
    A: ArticleRepository + Clone + Send + Sync + 'static,
{
    let cookie = session_cookie(&headers, &state.config.cookie_name);
    let mut session =
        match SessionHandle::open(state.sessions.clone(), state.config.clone(), cookie.as_deref())
            .await
        {
            Ok(session) => session,
            Err(err) => return AppError(err).into_response(),
        };

    match render_editor_response(&state, &mut session, &query.title.unwrap_or_default(), StatusCode::OK).await {
        Ok(response) => response,
        Err(err) => AppError(err).into_response(),
    }
}

/// Accepts an article submission.
///
/// POST /
///
/// Redirects to the editor on success. A rejected submission re-renders
/// the form with a challenge bound to the still-valid CSRF token, so the
/// visitor can retry without losing the session state.
pub async fn submit_article<S, A>(
    State(state): State<AppState<S, A>>,
    headers: HeaderMap,
    Form(form): Form<SubmissionForm>,
) -> Response
where
    S: SessionRepository + Clone + Send + Sync + 'static,
    A: ArticleRepository + Clone + Send + Sync + 'static,
{
    let cookie = session_cookie(&headers, &state.config.cookie_name);
    let mut session =
        match SessionHandle::open(state.sessions.clone(), state.config.clone(), cookie.as_deref())
            .await
        {
            Ok(session) => session,
            Err(err) => return AppError(err).into_response(),
        };

    let guard = SubmissionGuard::new(state.articles.clone());

    match guard.accept_submission(&form, &mut session).await {
        Ok(_saved) => (
            StatusCode::SEE_OTHER,
            [
                (header::LOCATION, "/".to_owned()),
                (header::SET_COOKIE, session.set_cookie_header()),
            ],
        )
            .into_response(),
        Err(
            err @ (GuardError::CsrfInvalid | GuardError::CaptchaInvalid | GuardError::MissingField),
        ) => {
            let status = AppError(err).status();
            match render_editor_response(&state, &mut session, "", status).await {
                Ok(response) => response,
                Err(render_err) => AppError(render_err).into_response(),
            }
        }
        Err(err) => AppError(err).into_response(),
    }
}

/// Read-side JSON API.
///
/// GET /api
///
/// With no parameters, lists all article titles. With `prefixsearch`,
/// lists matching titles. With `title`, returns that article's content,
/// empty when the title does not resolve.
pub async fn read_api<S, A>(
    State(state): State<AppState<S, A>>,
    Query(query): Query<ApiQuery>,
) -> Response
where
    S: SessionRepository + Clone + Send + Sync + 'static,
    A: ArticleRepository + Clone + Send + Sync + 'static,
{
    let title = query.title.as_deref().map(str::trim).filter(|t| !t.is_empty());
    let prefix = query
        .prefixsearch
        .as_deref()
        .map(str::trim)
        .filter(|p| !p.is_empty());

    let result = match (title, prefix) {
        (_, Some(prefix)) => state
            .articles
            .prefix_search(prefix)
            .await
            .map(|content| Json(ListResponse { content }).into_response()),
        (Some(title), None) => state.articles.fetch(title).await.map(|body| {
            Json(ArticleResponse {
                content: body.unwrap_or_default(),
            })
            .into_response()
        }),
        (None, None) => state
            .articles
            .list()
            .await
            .map(|content| Json(ListResponse { content }).into_response()),
    };

    match result {
        Ok(response) => response,
        Err(err) => AppError(err).into_response(),
    }
}

/// Builds the full editor page for the current session: issues or reuses
/// the CSRF token and CAPTCHA challenge, loads the preview article, and
/// binds the session cookie to the response.
async fn render_editor_response<S, A>(
    state: &AppState<S, A>,
    session: &mut SessionHandle<S>,
    raw_title: &str,
    status: StatusCode,
) -> Result<Response, GuardError>
where
    S: SessionRepository + Clone + Send + Sync + 'static,
    A: ArticleRepository + Clone + Send + Sync + 'static,
{
    let csrf_token = session.issue_or_refresh_csrf_token().await?;
    let challenge = issue_challenge(session).await?;

    let current_body = if raw_title.is_empty() {
        String::new()
    } else {
        state
            .articles
            .fetch(raw_title)
            .await?
            .unwrap_or_default()
    };

    let page = EditorPage {
        csrf_token,
        captcha_image_base64: challenge.image_base64,
        current_title: raw_title.to_owned(),
        current_body,
        articles: state.articles.list().await?,
        word_count: state.articles.word_count().await?,
    };

    Ok((
        status,
        [(header::SET_COOKIE, session.set_cookie_header())],
        Html(render_page(PAGE_TITLE, &page)),
    )
        .into_response())
}
