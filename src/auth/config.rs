use std::time::Duration;

use crate::auth::password::verify_password;

/// Default inactivity window before an admin session is forced out.
pub const DEFAULT_INACTIVITY_TIMEOUT: Duration = Duration::from_secs(5 * 60);

/// Admin credentials and session policy.
#[derive(Debug, Clone)]
pub struct AdminConfig {
    /// The one admin account name.
    pub username: String,
    /// Argon2 PHC string. Takes precedence over `password` when set.
    pub password_hash: Option<String>,
    /// Plaintext password, for local development only.
    pub password: Option<String>,
    pub inactivity_timeout: Duration,
}

impl AdminConfig {
    /// Build with explicit values (useful for testing).
    pub fn new(username: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password_hash: None,
            password: None,
            inactivity_timeout: DEFAULT_INACTIVITY_TIMEOUT,
        }
    }

    pub fn with_password_hash(mut self, hash: impl Into<String>) -> Self {
        self.password_hash = Some(hash.into());
        self
    }

    pub fn with_password(mut self, password: impl Into<String>) -> Self {
        self.password = Some(password.into());
        self
    }

    pub fn with_inactivity_timeout(mut self, timeout: Duration) -> Self {
        self.inactivity_timeout = timeout;
        self
    }

    /// Check a login attempt against the configured account.
    ///
    /// No lockout or backoff is applied.
    pub fn check_credentials(&self, username: &str, password: &str) -> bool {
        if username != self.username {
            return false;
        }

        if let Some(hash) = self.password_hash.as_deref().filter(|h| !h.is_empty()) {
            return verify_password(hash, password);
        }

        if let Some(plain) = self.password.as_deref().filter(|p| !p.is_empty()) {
            return password == plain;
        }

        tracing::error!(
            "Admin password is not configured. Set ADMIN_PASSWORD_HASH (recommended) or ADMIN_PASSWORD."
        );
        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::password::hash_password;

    #[test]
    fn test_hash_takes_precedence() {
        let config = AdminConfig::new("admin")
            .with_password_hash(hash_password("from-hash").unwrap())
            .with_password("from-plain");

        assert!(config.check_credentials("admin", "from-hash"));
        assert!(!config.check_credentials("admin", "from-plain"));
    }

    #[test]
    fn test_plaintext_fallback() {
        let config = AdminConfig::new("admin").with_password("dev");
        assert!(config.check_credentials("admin", "dev"));
        assert!(!config.check_credentials("admin", "Dev"));
    }

    #[test]
    fn test_wrong_username() {
        let config = AdminConfig::new("admin").with_password("dev");
        assert!(!config.check_credentials("root", "dev"));
    }

    #[test]
    fn test_legacy_hash_never_falls_back_to_plaintext() {
        let config = AdminConfig::new("admin")
            .with_password_hash("pbkdf2:sha256:600000$salt$0123abcd")
            .with_password("dev");

        assert!(!config.check_credentials("admin", "dev"));
        assert!(!config.check_credentials("admin", "pbkdf2:sha256:600000$salt$0123abcd"));
    }

    #[test]
    fn test_unconfigured_password_rejects() {
        let config = AdminConfig::new("admin");
        assert!(!config.check_credentials("admin", ""));
        assert!(!config.check_credentials("admin", "anything"));
    }
}
