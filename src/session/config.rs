use chrono::Duration;

use crate::SecretString;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SameSite {
    None,
    Lax,
    #[default]
    Strict,
}

impl SameSite {
    pub(crate) fn as_str(self) -> &'static str {
        match self {
            SameSite::None => "None",
            SameSite::Lax => "Lax",
            SameSite::Strict => "Strict",
        }
    }
}

/// Session cookie and CSRF settings.
///
/// Defaults follow the hardened posture: host-only cookie (no `Domain`
/// attribute), `HttpOnly`, `SameSite=Strict`, `Secure` when serving over
/// TLS, and a 30 minute CSRF token lifetime.
#[derive(Debug, Clone)]
pub struct SessionConfig {
    pub cookie_name: String,
    pub cookie_path: String,
    /// `None` keeps the cookie host-only.
    pub cookie_domain: Option<String>,
    pub cookie_secure: bool,
    pub cookie_http_only: bool,
    pub cookie_same_site: SameSite,
    /// Lifetime of an issued CSRF token, independent of use.
    pub csrf_token_expiry: Duration,
    pub secret_key: SecretString,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            cookie_name: "gazette_session".to_owned(),
            cookie_path: "/".to_owned(),
            cookie_domain: None,
            cookie_secure: true,
            cookie_http_only: true,
            cookie_same_site: SameSite::Strict,
            csrf_token_expiry: Duration::seconds(1800),
            secret_key: SecretString::new(""),
        }
    }
}

impl SessionConfig {
    /// Settings for local development: no TLS requirement, long token life.
    pub fn development() -> Self {
        Self {
            cookie_secure: false,
            csrf_token_expiry: Duration::hours(24),
            ..Default::default()
        }
    }

    /// Stricter settings: short-lived tokens.
    pub fn strict() -> Self {
        Self {
            csrf_token_expiry: Duration::seconds(300),
            ..Default::default()
        }
    }

    pub fn validate(&self) -> Result<(), &'static str> {
        if self.secret_key.is_empty() {
            return Err("secret_key must not be empty");
        }
        if self.secret_key.len() < 32 {
            return Err("secret_key should be at least 32 bytes");
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = SessionConfig::default();
        assert_eq!(config.cookie_name, "gazette_session");
        assert_eq!(config.cookie_path, "/");
        assert!(config.cookie_domain.is_none());
        assert!(config.cookie_secure);
        assert!(config.cookie_http_only);
        assert_eq!(config.cookie_same_site, SameSite::Strict);
        assert_eq!(config.csrf_token_expiry, Duration::seconds(1800));
    }

    #[test]
    fn test_validate_empty_secret() {
        let config = SessionConfig::default();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_short_secret() {
        let config = SessionConfig {
            secret_key: SecretString::new("short"),
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_valid_secret() {
        let config = SessionConfig {
            secret_key: SecretString::new("this-is-a-very-long-secret-key-for-testing"),
            ..Default::default()
        };
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_development_preset() {
        let config = SessionConfig::development();
        assert!(!config.cookie_secure);
        assert!(config.csrf_token_expiry > Duration::seconds(1800));
    }

    #[test]
    fn test_strict_preset() {
        let config = SessionConfig::strict();
        assert_eq!(config.csrf_token_expiry, Duration::seconds(300));
    }
}
