//! Signed cookie helpers for session binding.
//!
//! Uses HMAC-SHA256 to sign session IDs, making cookies tamper-proof.

use hmac::{Hmac, Mac};
use sha2::Sha256;

use crate::SecretString;
use crate::crypto::constant_time_eq;

use super::SessionConfig;

type HmacSha256 = Hmac<Sha256>;

/// Signs a session ID with HMAC-SHA256.
///
/// Returns a string in the format `{session_id}.{signature}`.
pub fn sign_session_id(session_id: &str, secret: &SecretString) -> String {
    let signature = compute_hmac(session_id.as_bytes(), secret.expose_secret().as_bytes());
    format!("{}.{}", session_id, hex::encode(signature))
}

/// Verifies a signed cookie value and extracts the session ID.
///
/// Returns `None` if the signature is invalid (tampered).
pub fn verify_signed_cookie(cookie_value: &str, secret: &SecretString) -> Option<String> {
    let (session_id, signature_hex) = cookie_value.rsplit_once('.')?;

    let actual_sig = hex::decode(signature_hex).ok()?;
    let expected_sig = compute_hmac(session_id.as_bytes(), secret.expose_secret().as_bytes());

    if constant_time_eq(&expected_sig, &actual_sig) {
        Some(session_id.to_owned())
    } else {
        log::warn!(target: "gazette::session", "msg=\"session cookie tampered\" cookie_prefix=\"{}...\"", &cookie_value.chars().take(8).collect::<String>());
        None
    }
}

/// Builds a `Set-Cookie` header value binding the signed session id with
/// the configured attributes.
pub fn build_set_cookie(session_id: &str, config: &SessionConfig) -> String {
    let mut cookie = format!(
        "{}={}; Path={}",
        config.cookie_name,
        sign_session_id(session_id, &config.secret_key),
        config.cookie_path
    );
    if let Some(domain) = &config.cookie_domain {
        cookie.push_str("; Domain=");
        cookie.push_str(domain);
    }
    if config.cookie_secure {
        cookie.push_str("; Secure");
    }
    if config.cookie_http_only {
        cookie.push_str("; HttpOnly");
    }
    cookie.push_str("; SameSite=");
    cookie.push_str(config.cookie_same_site.as_str());
    cookie
}

/// Builds a `Set-Cookie` header value that expires the session cookie
/// immediately.
pub fn build_expired_cookie(config: &SessionConfig) -> String {
    format!(
        "{}=; Path={}; Max-Age=0; Expires=Thu, 01 Jan 1970 00:00:00 GMT",
        config.cookie_name, config.cookie_path
    )
}

/// Computes HMAC-SHA256.
///
/// # Panics
///
/// This function cannot panic as HMAC accepts keys of any size.
fn compute_hmac(message: &[u8], key: &[u8]) -> Vec<u8> {
    // SAFETY: HmacSha256::new_from_slice only fails if the key is invalid,
    // but HMAC-SHA256 accepts keys of any length, so this cannot fail.
    #[allow(clippy::expect_used)]
    let mut mac = HmacSha256::new_from_slice(key).expect("HMAC accepts keys of any size");
    mac.update(message);
    mac.finalize().into_bytes().to_vec()
}
