//! Token generation and comparison primitives.

use rand::RngCore;
use rand::rngs::OsRng;

/// Number of random bytes in a CSRF token (256 bits).
pub const CSRF_TOKEN_BYTES: usize = 32;

/// Generates a cryptographically secure random token.
///
/// The token consists of alphanumeric characters (a-z, A-Z, 0-9),
/// providing approximately 5.95 bits of entropy per character. Used for
/// session identifiers, which must stay path-safe.
///
/// # Example
///
/// ```rust
/// use gazette::crypto::generate_token;
///
/// let token = generate_token(32);
/// assert_eq!(token.len(), 32);
/// ```
pub fn generate_token(length: usize) -> String {
    use rand::Rng;
    let mut rng = rand::thread_rng();
    (0..length)
        .map(|_| char::from(rng.sample(rand::distributions::Alphanumeric)))
        .collect()
}

/// Generates a hex-encoded 256-bit CSRF token.
///
/// The result is 64 lowercase hex characters.
pub fn generate_csrf_token() -> String {
    let mut bytes = [0u8; CSRF_TOKEN_BYTES];
    OsRng.fill_bytes(&mut bytes);
    hex::encode(bytes)
}

/// Constant-time comparison to prevent timing attacks.
///
/// Length is compared first; the byte loop always runs to completion for
/// equal-length inputs.
pub fn constant_time_eq(a: &[u8], b: &[u8]) -> bool {
    if a.len() != b.len() {
        return false;
    }

    let mut result = 0u8;
    for (x, y) in a.iter().zip(b.iter()) {
        result |= x ^ y;
    }
    result == 0
}
