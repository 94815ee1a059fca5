use axum::extract::State;
use axum::Json;
use serde::{Deserialize, Serialize};
use tower_sessions::Session;

use crate::auth::models::{AdminSession, ClientInfo};
use crate::error::AppError;
use crate::state::AppState;

/// Login request body.
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

/// What the admin UI needs to know about its session.
#[derive(Debug, Serialize)]
pub struct SessionInfo {
    pub username: String,
    /// Echo in `X-CSRF-Token` (or a `csrf_token` form field) on every write.
    pub csrf_token: String,
    pub inactivity_timeout_secs: u64,
}

impl SessionInfo {
    fn new(state: &AppState, admin: &AdminSession) -> Self {
        Self {
            username: admin.username.clone(),
            csrf_token: admin.csrf_token.clone(),
            inactivity_timeout_secs: state.sessions.config().inactivity_timeout.as_secs(),
        }
    }
}

/// `POST /admin/login` checks credentials and starts the one active session.
pub async fn login_handler(
    State(state): State<AppState>,
    session: Session,
    client: ClientInfo,
    Json(req): Json<LoginRequest>,
) -> Result<Json<SessionInfo>, AppError> {
    if !state.sessions.login(&req.username, &req.password) {
        tracing::warn!("Failed admin login for '{}' from {}", req.username, client.ip);
        return Err(AppError::Auth("Invalid username or password".into()));
    }

    let admin = state
        .sessions
        .start_session(&session, &req.username, &client)
        .await?;

    Ok(Json(SessionInfo::new(&state, &admin)))
}

/// `GET /admin/session`: the current admin, behind the session guard.
pub async fn session_handler(
    State(state): State<AppState>,
    admin: AdminSession,
) -> Json<SessionInfo> {
    Json(SessionInfo::new(&state, &admin))
}

/// `POST /admin/logout` always succeeds, logged in or not.
pub async fn logout_handler(
    State(state): State<AppState>,
    session: Session,
) -> Result<Json<serde_json::Value>, AppError> {
    state.sessions.logout(&session).await?;
    Ok(Json(serde_json::json!({
        "message": "You have been logged out successfully."
    })))
}
