//! Admin session lifecycle.
//!
//! A session is valid only while all of these hold: it is logged in, its
//! token still occupies the active-session slot, it has been used within the
//! inactivity window, and the client fingerprint has not changed. Checks run
//! in that order and the first failure is reported.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use tower_sessions::Session;

use crate::auth::config::AdminConfig;
use crate::auth::csrf::issue_token;
use crate::auth::models::{AdminSession, ClientInfo, InvalidReason};
use crate::db::session_slot::SessionSlot;
use crate::error::AppError;

/// Key the admin state is stored under in the server-side session.
pub const SESSION_KEY: &str = "admin";

#[derive(Clone)]
pub struct SessionManager {
    config: Arc<AdminConfig>,
    slot: Arc<dyn SessionSlot>,
}

impl SessionManager {
    pub fn new(config: AdminConfig, slot: Arc<dyn SessionSlot>) -> Self {
        Self {
            config: Arc::new(config),
            slot,
        }
    }

    pub fn config(&self) -> &AdminConfig {
        &self.config
    }

    /// Check credentials. Does not touch any session.
    pub fn login(&self, username: &str, password: &str) -> bool {
        self.config.check_credentials(username, password)
    }

    /// Make `session` the one active admin session.
    ///
    /// Any other admin session, on any client, is invalidated by this call.
    pub async fn start_session(
        &self,
        session: &Session,
        username: &str,
        client: &ClientInfo,
    ) -> Result<AdminSession, AppError> {
        // New session id on login against fixation.
        session.cycle_id().await?;

        let session_token = issue_token();
        if !self.slot.claim(&session_token).await {
            return Err(AppError::Storage("Failed to record active session".into()));
        }

        let admin = AdminSession {
            username: username.to_string(),
            session_token,
            last_activity: Utc::now(),
            client_fingerprint: client.fingerprint(),
            csrf_token: issue_token(),
        };
        session.insert(SESSION_KEY, &admin).await?;

        tracing::info!("Admin '{}' logged in from {}", username, client.ip);
        Ok(admin)
    }

    /// Admin state stored in `session`, if any.
    pub async fn current(&self, session: &Session) -> Result<Option<AdminSession>, AppError> {
        Ok(session.get::<AdminSession>(SESSION_KEY).await?)
    }

    /// Run the validity checks against the clock value `now`.
    ///
    /// Activity is not refreshed here; call [`SessionManager::touch`] after
    /// a successful check.
    pub async fn validate_at(
        &self,
        admin: Option<&AdminSession>,
        client: &ClientInfo,
        now: DateTime<Utc>,
    ) -> Result<(), InvalidReason> {
        let admin = admin.ok_or(InvalidReason::NotLoggedIn)?;

        let active = self.slot.current().await;
        if active.as_deref() != Some(admin.session_token.as_str()) {
            return Err(InvalidReason::SessionTokenMismatch);
        }

        let elapsed = now.signed_duration_since(admin.last_activity);
        let timeout = chrono::Duration::from_std(self.config.inactivity_timeout)
            .unwrap_or(chrono::Duration::MAX);
        if elapsed > timeout {
            return Err(InvalidReason::Timeout);
        }

        if admin.client_fingerprint.is_empty() || admin.client_fingerprint != client.fingerprint() {
            return Err(InvalidReason::FingerprintMismatch);
        }

        Ok(())
    }

    /// Validate the admin session on `session`.
    ///
    /// On success the activity timestamp is refreshed and the state returned.
    /// On failure the session is destroyed and the reason returned as
    /// [`AppError::Session`].
    pub async fn validate(
        &self,
        session: &Session,
        client: &ClientInfo,
    ) -> Result<AdminSession, AppError> {
        let admin = self.current(session).await?;

        match self.validate_at(admin.as_ref(), client, Utc::now()).await {
            Ok(()) => {
                let mut admin = admin.ok_or(AppError::Session(InvalidReason::NotLoggedIn))?;
                self.touch(session, &mut admin).await?;
                Ok(admin)
            }
            Err(reason) => {
                if reason != InvalidReason::NotLoggedIn {
                    tracing::warn!("Admin session rejected: {} (client {})", reason, client.ip);
                }
                self.logout(session).await?;
                Err(AppError::Session(reason))
            }
        }
    }

    /// Stamp activity as now.
    pub async fn touch(&self, session: &Session, admin: &mut AdminSession) -> Result<(), AppError> {
        admin.last_activity = Utc::now();
        session.insert(SESSION_KEY, &*admin).await?;
        Ok(())
    }

    /// End the session. The active slot is only cleared if it still belongs
    /// to this session, so logging out a superseded session leaves the newer
    /// one alone.
    pub async fn logout(&self, session: &Session) -> Result<(), AppError> {
        if let Some(admin) = self.current(session).await? {
            if self.slot.release_if(&admin.session_token).await {
                tracing::info!("Admin '{}' logged out", admin.username);
            }
        }
        session.flush().await?;
        Ok(())
    }
}
