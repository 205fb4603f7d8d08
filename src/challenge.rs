//! CAPTCHA challenge lifecycle.
//!
//! A challenge is a rendered image plus its expected answer. Once issued,
//! the same challenge is reused across re-renders of the session's form
//! until a successful submission consumes it. A rejected submission never
//! invalidates the challenge, so an attempt in a second browser tab stays
//! answerable.

use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use captcha::{Difficulty, gen};
use chrono::Utc;

use crate::GuardError;
use crate::events::{GuardEvent, dispatch};
use crate::session::{SessionHandle, SessionRepository};

/// A human-verification challenge: inline-renderable image and the answer
/// the visitor is expected to type.
#[derive(Debug, Clone)]
pub struct CaptchaChallenge {
    /// Base64-encoded PNG, suitable for a `data:image/png;base64,` URI.
    pub image_base64: String,
    /// Expected answer phrase. Alphanumeric.
    pub answer: String,
}

/// Renders a fresh challenge.
///
/// # Errors
///
/// Returns `StorageUnavailable` if the image cannot be rendered.
pub fn generate_challenge() -> Result<CaptchaChallenge, GuardError> {
    let captcha = gen(Difficulty::Easy);
    let answer = captcha.chars_as_string();
    let png = captcha
        .as_png()
        .ok_or_else(|| GuardError::StorageUnavailable("Failed to render challenge".to_owned()))?;

    Ok(CaptchaChallenge {
        image_base64: STANDARD.encode(png),
        answer,
    })
}

/// Returns the session's current challenge, issuing one if none is live.
///
/// Re-renders of the form within one session see the identical challenge
/// until [`SessionHandle::clear_captcha_answer`] consumes it on the
/// success path.
///
/// # Errors
///
/// Returns `StorageUnavailable` if rendering fails or the session cannot
/// be persisted.
pub async fn issue_challenge<R: SessionRepository>(
    session: &mut SessionHandle<R>,
) -> Result<CaptchaChallenge, GuardError> {
    if let (Some(answer), Some(image)) = (session.captcha_answer(), session.captcha_image()) {
        return Ok(CaptchaChallenge {
            image_base64: image.to_owned(),
            answer: answer.to_owned(),
        });
    }

    let challenge = generate_challenge()?;
    session
        .set_captcha_challenge(&challenge.answer, &challenge.image_base64)
        .await?;
    log::debug!(target: "gazette::challenge", "msg=\"captcha challenge issued\"");
    dispatch(GuardEvent::ChallengeIssued { at: Utc::now() }).await;

    Ok(challenge)
}

#[cfg(test)]
mod tests {
    use crate::SecretString;
    use crate::session::{InMemorySessionRepository, SessionConfig};

    use super::*;

    fn test_config() -> SessionConfig {
        SessionConfig {
            secret_key: SecretString::new("test-secret-key-that-is-long-enough"),
            ..Default::default()
        }
    }

    #[test]
    fn test_generate_challenge() {
        let challenge = generate_challenge().unwrap();
        assert!(!challenge.answer.is_empty());
        assert!(!challenge.image_base64.is_empty());
        assert!(challenge.answer.chars().all(|c| c.is_ascii_alphanumeric()));
    }

    #[test]
    fn test_challenges_differ() {
        let a = generate_challenge().unwrap();
        let b = generate_challenge().unwrap();
        // Random phrases; a collision here would be astonishing.
        assert_ne!(a.answer, b.answer);
    }

    #[tokio::test]
    async fn test_issue_challenge_stores_answer() {
        let repo = InMemorySessionRepository::new();
        let mut session = SessionHandle::open(repo.clone(), test_config(), None)
            .await
            .unwrap();

        let challenge = issue_challenge(&mut session).await.unwrap();
        assert_eq!(session.captcha_answer(), Some(challenge.answer.as_str()));
    }

    #[tokio::test]
    async fn test_issue_challenge_reuses_live_challenge() {
        let repo = InMemorySessionRepository::new();
        let mut session = SessionHandle::open(repo.clone(), test_config(), None)
            .await
            .unwrap();

        let first = issue_challenge(&mut session).await.unwrap();
        let second = issue_challenge(&mut session).await.unwrap();

        assert_eq!(first.answer, second.answer);
        assert_eq!(first.image_base64, second.image_base64);
    }

    #[tokio::test]
    async fn test_issue_after_clear_generates_new_challenge() {
        let repo = InMemorySessionRepository::new();
        let mut session = SessionHandle::open(repo.clone(), test_config(), None)
            .await
            .unwrap();

        let first = issue_challenge(&mut session).await.unwrap();
        session.clear_captcha_answer().await.unwrap();
        let second = issue_challenge(&mut session).await.unwrap();

        assert_ne!(first.answer, second.answer);
    }
}
