//! Request-scoped session handle.
//!
//! The handle binds one request to its visitor's persisted session and
//! owns the CSRF and CAPTCHA lifecycle for that session. It is acquired
//! with [`SessionHandle::open`] at the start of a request and dropped at
//! the end; there is no ambient session state.

use chrono::{DateTime, Utc};

use crate::GuardError;
use crate::crypto::{constant_time_eq, generate_csrf_token};
use crate::events::{GuardEvent, dispatch};
use crate::sanitize::sanitize_file_name;

use super::cookie::{build_expired_cookie, build_set_cookie, verify_signed_cookie};
use super::repository::SessionRepository;
use super::{SessionConfig, SessionData};

/// One visitor's session, bound for the duration of a request.
///
/// Opening the handle is fixation-resistant: a cookie that does not verify,
/// or that names a session the repository does not hold, is discarded and a
/// fresh server-assigned id is created in its place. A client-supplied id
/// is never adopted.
pub struct SessionHandle<R: SessionRepository> {
    repository: R,
    config: SessionConfig,
    id: String,
    data: SessionData,
}

impl<R: SessionRepository> SessionHandle<R> {
    /// Binds to the visitor's persisted session.
    ///
    /// `cookie_value` is the raw value of the session cookie, if the
    /// request carried one. On a brand-new session (no cookie, bad
    /// signature, or unknown/uninitiated session) a fresh session is
    /// created and persisted immediately.
    ///
    /// # Errors
    ///
    /// Returns `StorageUnavailable` if the repository cannot be read or
    /// written. Callers must treat that as "no session": nothing
    /// validates against a session that could not be opened.
    pub async fn open(
        repository: R,
        config: SessionConfig,
        cookie_value: Option<&str>,
    ) -> Result<Self, GuardError> {
        if let Some(raw) = cookie_value {
            if let Some(id) = verify_signed_cookie(raw, &config.secret_key) {
                if let Some(session) = repository.find(&id).await? {
                    if session.data.initiated {
                        return Ok(Self {
                            repository,
                            config,
                            id,
                            data: session.data,
                        });
                    }
                }
            }
        }

        // Fresh session. The id comes from the repository, never from the
        // client, and the initiated flag is set exactly once here.
        let data = SessionData::new();
        let id = repository.create(data.clone()).await?;
        log::debug!(target: "gazette::session", "msg=\"new session initiated\"");

        Ok(Self {
            repository,
            config,
            id,
            data,
        })
    }

    /// The server-assigned session id.
    pub fn id(&self) -> &str {
        &self.id
    }

    /// `Set-Cookie` value binding this session to the client.
    pub fn set_cookie_header(&self) -> String {
        build_set_cookie(&self.id, &self.config)
    }

    /// Returns the current CSRF token, generating a new one if absent or
    /// expired.
    ///
    /// Repeated calls within the expiry window return the identical token,
    /// so re-rendering the form after a failed submission does not
    /// desynchronize the token from what the user was already shown.
    ///
    /// # Errors
    ///
    /// Returns `StorageUnavailable` if a newly generated token cannot be
    /// persisted.
    pub async fn issue_or_refresh_csrf_token(&mut self) -> Result<String, GuardError> {
        if let (Some(token), Some(issued_at)) = (&self.data.csrf_token, self.data.csrf_issued_at) {
            if !self.token_expired(issued_at) {
                return Ok(token.clone());
            }
        }

        let token = generate_csrf_token();
        self.data.csrf_token = Some(token.clone());
        self.data.csrf_issued_at = Some(Utc::now());
        self.persist().await?;

        Ok(token)
    }

    /// Validates a candidate CSRF token.
    ///
    /// True iff a token exists, is unexpired, and equals the raw candidate
    /// under constant-time comparison. The candidate is compared as
    /// received; transforming it first could turn an invalid token into a
    /// valid one.
    pub fn validate_csrf_token(&self, candidate: &str) -> bool {
        match (&self.data.csrf_token, self.data.csrf_issued_at) {
            (Some(token), Some(issued_at)) => {
                !self.token_expired(issued_at)
                    && constant_time_eq(token.as_bytes(), candidate.as_bytes())
            }
            _ => false,
        }
    }

    /// The expected CAPTCHA answer, if a challenge has been issued.
    pub fn captcha_answer(&self) -> Option<&str> {
        self.data.captcha_answer.as_deref()
    }

    /// The cached challenge image for the stored answer, base64-encoded.
    pub fn captcha_image(&self) -> Option<&str> {
        self.data.captcha_image.as_deref()
    }

    /// Stores the expected answer for a newly issued challenge.
    ///
    /// Drops any cached challenge image, since it no longer matches.
    pub async fn set_captcha_answer(&mut self, answer: &str) -> Result<(), GuardError> {
        self.data.captcha_answer = Some(answer.to_owned());
        self.data.captcha_image = None;
        self.persist().await
    }

    /// Stores a challenge pair: expected answer plus its rendered image.
    pub async fn set_captcha_challenge(
        &mut self,
        answer: &str,
        image_base64: &str,
    ) -> Result<(), GuardError> {
        self.data.captcha_answer = Some(answer.to_owned());
        self.data.captcha_image = Some(image_base64.to_owned());
        self.persist().await
    }

    /// Clears the stored CAPTCHA answer and image.
    ///
    /// Called exactly once, on the success path of a submission.
    pub async fn clear_captcha_answer(&mut self) -> Result<(), GuardError> {
        self.data.captcha_answer = None;
        self.data.captcha_image = None;
        self.persist().await
    }

    /// Validates a candidate CAPTCHA answer.
    ///
    /// The candidate is reduced to the filename character set before the
    /// case-sensitive comparison; stored answers only ever contain
    /// characters from that set, so the reduction cannot widen a match.
    /// False when no challenge has been issued.
    pub fn validate_captcha_answer(&self, candidate: &str) -> bool {
        match &self.data.captcha_answer {
            Some(answer) => sanitize_file_name(candidate) == *answer,
            None => false,
        }
    }

    /// Destroys the session: clears all fields and removes the stored
    /// session. The returned `Set-Cookie` value expires the client cookie
    /// immediately.
    pub async fn destroy(mut self) -> Result<String, GuardError> {
        self.data = SessionData {
            initiated: false,
            ..SessionData::new()
        };
        self.repository.destroy(&self.id).await?;
        log::debug!(target: "gazette::session", "msg=\"session destroyed\"");
        dispatch(GuardEvent::SessionDestroyed { at: Utc::now() }).await;
        Ok(build_expired_cookie(&self.config))
    }

    fn token_expired(&self, issued_at: DateTime<Utc>) -> bool {
        Utc::now() - issued_at > self.config.csrf_token_expiry
    }

    async fn persist(&self) -> Result<(), GuardError> {
        self.repository.save(&self.id, self.data.clone()).await
    }
}
