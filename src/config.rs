use std::collections::HashMap;
use std::path::PathBuf;
use std::time::Duration;

use config::{Config, Environment, File};
use serde::Deserialize;

use crate::auth::config::AdminConfig;
use crate::state::DEFAULT_MAX_UPLOAD_BYTES;

/// Where JSON resources and uploads live.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StorageBackend {
    Local,
    S3,
}

/// Server settings.
///
/// Layered as built-in defaults, then an optional `orgsite.toml` in the
/// working directory, then environment variables (`ADMIN_USERNAME`,
/// `DATA_DIR`, ...). Later layers win.
#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    pub admin_username: String,
    pub admin_password_hash: Option<String>,
    pub admin_password: Option<String>,
    pub admin_inactivity_timeout_secs: u64,
    pub data_dir: PathBuf,
    pub storage_backend: StorageBackend,
    pub s3_bucket: Option<String>,
    pub s3_endpoint: Option<String>,
    pub session_cookie_secure: bool,
    pub bind_addr: String,
    pub max_upload_bytes: usize,
    pub seed_demo_data: bool,
}

impl Settings {
    /// Load from `orgsite.toml` and the process environment.
    pub fn load() -> Result<Self, config::ConfigError> {
        Self::from_sources(None)
    }

    /// Load with an explicit environment map instead of the process one.
    pub fn from_sources(env: Option<HashMap<String, String>>) -> Result<Self, config::ConfigError> {
        Config::builder()
            .set_default("admin_username", "admin")?
            .set_default("admin_inactivity_timeout_secs", 300)?
            .set_default("data_dir", "data")?
            .set_default("storage_backend", "local")?
            .set_default("session_cookie_secure", false)?
            .set_default("bind_addr", "0.0.0.0:3000")?
            .set_default("max_upload_bytes", DEFAULT_MAX_UPLOAD_BYTES as u64)?
            .set_default("seed_demo_data", false)?
            .add_source(File::with_name("orgsite").required(false))
            .add_source(Environment::default().source(env))
            .build()?
            .try_deserialize()
    }

    pub fn admin_config(&self) -> AdminConfig {
        AdminConfig {
            username: self.admin_username.clone(),
            password_hash: self.admin_password_hash.clone().filter(|h| !h.is_empty()),
            password: self.admin_password.clone().filter(|p| !p.is_empty()),
            inactivity_timeout: Duration::from_secs(self.admin_inactivity_timeout_secs),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn env(pairs: &[(&str, &str)]) -> Option<HashMap<String, String>> {
        Some(
            pairs
                .iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect(),
        )
    }

    #[test]
    fn test_defaults() {
        let settings = Settings::from_sources(env(&[])).unwrap();
        assert_eq!(settings.admin_username, "admin");
        assert_eq!(settings.admin_inactivity_timeout_secs, 300);
        assert_eq!(settings.storage_backend, StorageBackend::Local);
        assert_eq!(settings.data_dir, PathBuf::from("data"));
        assert!(!settings.session_cookie_secure);
        assert!(settings.admin_password_hash.is_none());
    }

    #[test]
    fn test_environment_overrides() {
        let settings = Settings::from_sources(env(&[
            ("ADMIN_USERNAME", "editor"),
            ("ADMIN_INACTIVITY_TIMEOUT_SECS", "60"),
            ("STORAGE_BACKEND", "s3"),
            ("S3_BUCKET", "org-site"),
            ("SESSION_COOKIE_SECURE", "true"),
        ]))
        .unwrap();

        assert_eq!(settings.admin_username, "editor");
        assert_eq!(settings.storage_backend, StorageBackend::S3);
        assert_eq!(settings.s3_bucket.as_deref(), Some("org-site"));
        assert!(settings.session_cookie_secure);
        assert_eq!(
            settings.admin_config().inactivity_timeout,
            Duration::from_secs(60)
        );
    }

    #[test]
    fn test_numeric_looking_credentials_stay_verbatim() {
        let settings = Settings::from_sources(env(&[
            ("ADMIN_USERNAME", "007"),
            ("ADMIN_PASSWORD", "0123"),
            ("MAX_UPLOAD_BYTES", "1024"),
        ]))
        .unwrap();

        assert_eq!(settings.admin_username, "007");
        assert_eq!(settings.admin_password.as_deref(), Some("0123"));
        assert_eq!(settings.max_upload_bytes, 1024);
        assert!(settings.admin_config().check_credentials("007", "0123"));
    }

    #[test]
    fn test_empty_password_settings_are_unset() {
        let settings =
            Settings::from_sources(env(&[("ADMIN_PASSWORD_HASH", ""), ("ADMIN_PASSWORD", "dev")]))
                .unwrap();
        let admin = settings.admin_config();
        assert!(admin.password_hash.is_none());
        assert_eq!(admin.password.as_deref(), Some("dev"));
    }
}
