//! Submission guard.
//!
//! Single entry point for article writes. A submission passes the
//! session-bound CSRF check, then the CAPTCHA check, then field presence,
//! in that order, before anything is persisted. Nothing is written on a
//! rejected attempt, and the CAPTCHA answer survives every rejection so a
//! retry does not need a new challenge within the CSRF expiry window.

use chrono::Utc;
use serde::Deserialize;

use crate::GuardError;
use crate::articles::ArticleRepository;
use crate::events::{GuardEvent, dispatch};
use crate::sanitize::full_sanitize;
use crate::session::{SessionHandle, SessionRepository};

/// Fields of an article submission, as posted by the form.
///
/// Missing fields deserialize to empty strings; an absent CSRF token is
/// just an invalid one.
#[derive(Debug, Clone, Deserialize)]
pub struct SubmissionForm {
    #[serde(default)]
    pub csrf_token: String,
    #[serde(default)]
    pub captcha_answer: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub body: String,
}

/// A successfully persisted submission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Saved {
    /// The stored identity (sanitized title).
    pub title: String,
}

/// Validates submissions and delegates accepted ones to the article store.
pub struct SubmissionGuard<A: ArticleRepository> {
    articles: A,
}

impl<A: ArticleRepository> SubmissionGuard<A> {
    pub fn new(articles: A) -> Self {
        SubmissionGuard { articles }
    }

    /// Accepts or rejects one submission.
    ///
    /// The caller guarantees the request used the write method; everything
    /// else is checked here, in order:
    ///
    /// 1. the CSRF token must validate against the session,
    /// 2. the CAPTCHA answer must match the session's challenge,
    /// 3. title and body must be non-empty after sanitization.
    ///
    /// Only when all checks pass is the article persisted; the CAPTCHA
    /// answer is then cleared (one-time use). On rejection no state
    /// changes, so the same challenge answers a retried attempt.
    ///
    /// # Errors
    ///
    /// `CsrfInvalid`, `CaptchaInvalid` or `MissingField` for rejected
    /// submissions; `StorageUnavailable` if persistence itself fails.
    pub async fn accept_submission<R: SessionRepository>(
        &self,
        form: &SubmissionForm,
        session: &mut SessionHandle<R>,
    ) -> Result<Saved, GuardError> {
        if !session.validate_csrf_token(&form.csrf_token) {
            return Err(self.reject(GuardError::CsrfInvalid).await);
        }

        if !session.validate_captcha_answer(&form.captcha_answer) {
            return Err(self.reject(GuardError::CaptchaInvalid).await);
        }

        let title = full_sanitize(&form.title);
        let body = full_sanitize(&form.body);
        if title.is_empty() || body.is_empty() {
            return Err(self.reject(GuardError::MissingField).await);
        }

        let stored = match self.articles.save(&form.title, &form.body).await {
            Ok(stored) => stored,
            Err(err) => return Err(self.reject(err).await),
        };

        session.clear_captcha_answer().await?;

        dispatch(GuardEvent::ArticleSaved {
            title: stored.clone(),
            at: Utc::now(),
        })
        .await;

        Ok(Saved { title: stored })
    }

    async fn reject(&self, err: GuardError) -> GuardError {
        log::info!(target: "gazette::guard", "msg=\"submission rejected\" reason=\"{err}\"");
        dispatch(GuardEvent::SubmissionRejected {
            reason: err.to_string(),
            at: Utc::now(),
        })
        .await;
        err
    }
}
