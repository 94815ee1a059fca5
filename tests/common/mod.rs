#![allow(dead_code)]

use std::sync::Arc;
use std::time::Duration;

use axum::http::{HeaderName, HeaderValue};
use axum::Router;
use tempfile::TempDir;

use orgsite::app::build_router;
use orgsite::auth::config::AdminConfig;
use orgsite::state::AppState;
use orgsite::storage::client::{LocalStorageClient, StorageClient};

pub const ADMIN_USER: &str = "admin";
pub const ADMIN_PASSWORD: &str = "correct horse battery staple";

/// A throwaway data directory plus the router wired to it.
///
/// The directory is removed when this struct is dropped.
pub struct TestEnv {
    pub data_dir: TempDir,
    pub router: Router,
    pub state: AppState,
    pub storage: Arc<dyn StorageClient>,
}

impl TestEnv {
    pub async fn start() -> Self {
        Self::with_timeout(Duration::from_secs(300)).await
    }

    /// Environment whose admin sessions expire after `timeout` of inactivity.
    pub async fn with_timeout(timeout: Duration) -> Self {
        let data_dir = tempfile::tempdir().expect("Failed to create temp dir");
        let storage: Arc<dyn StorageClient> = Arc::new(LocalStorageClient::new(data_dir.path()));

        let admin = AdminConfig::new(ADMIN_USER)
            .with_password(ADMIN_PASSWORD)
            .with_inactivity_timeout(timeout);
        let state = AppState::new(storage.clone(), admin);
        let router = build_router(state.clone(), false);

        Self {
            data_dir,
            router,
            state,
            storage,
        }
    }

    /// Build an `axum_test::TestServer` from this environment's router.
    ///
    /// Each server keeps its own cookie jar, so two servers act as two browsers.
    pub fn server(&self) -> axum_test::TestServer {
        axum_test::TestServer::builder()
            .save_cookies()
            .expect_success_by_default()
            .try_build(self.router.clone())
            .expect("Failed to build TestServer")
    }

    /// Build a `TestServer` that does NOT expect success by default (for error tests).
    pub fn server_permissive(&self) -> axum_test::TestServer {
        axum_test::TestServer::builder()
            .save_cookies()
            .try_build(self.router.clone())
            .expect("Failed to build TestServer")
    }

    /// Helper: log in as the admin and return the CSRF token.
    pub async fn login(&self, server: &axum_test::TestServer) -> String {
        let response = server
            .post("/admin/login")
            .json(&serde_json::json!({
                "username": ADMIN_USER,
                "password": ADMIN_PASSWORD,
            }))
            .await;
        response.assert_status_ok();

        let body: serde_json::Value = response.json();
        body["csrf_token"]
            .as_str()
            .expect("Login response should contain csrf_token")
            .to_string()
    }

    pub fn data_file(&self, name: &str) -> std::path::PathBuf {
        self.data_dir.path().join(name)
    }
}

pub fn csrf_header() -> HeaderName {
    HeaderName::from_static("x-csrf-token")
}

pub fn header_value(value: &str) -> HeaderValue {
    HeaderValue::from_str(value).expect("Invalid header value")
}
