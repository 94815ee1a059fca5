//! Route guards for the admin surface.
//!
//! Each guard is a plain check returning [`Access`], wrapped by an axum
//! middleware that turns a denial into the matching [`AppError`].

use std::convert::Infallible;
use std::net::SocketAddr;

use axum::body::{to_bytes, Body, Bytes};
use axum::extract::{ConnectInfo, FromRequest, FromRequestParts, Multipart, Request, State};
use axum::http::request::Parts;
use axum::http::{header, HeaderMap, Method};
use axum::middleware::Next;
use axum::response::Response;
use tower_sessions::Session;

use crate::auth::csrf::{is_exempt, token_from_form, validate_token, CSRF_FORM_FIELD, CSRF_HEADER};
use crate::auth::models::{AdminSession, ClientInfo, InvalidReason};
use crate::auth::session::SessionManager;
use crate::error::AppError;
use crate::state::AppState;

/// Outcome of a guard check.
#[derive(Debug)]
pub enum Access {
    Allow(AdminSession),
    Deny(InvalidReason),
}

impl ClientInfo {
    /// Client identity from request headers and the peer address.
    ///
    /// The IP is the first `X-Forwarded-For` entry, else the peer, else
    /// `unknown`.
    pub fn from_headers(headers: &HeaderMap, peer: Option<SocketAddr>) -> Self {
        let user_agent = headers
            .get(header::USER_AGENT)
            .and_then(|v| v.to_str().ok())
            .unwrap_or("")
            .to_string();

        let forwarded = headers
            .get("x-forwarded-for")
            .and_then(|v| v.to_str().ok())
            .and_then(|v| v.split(',').next())
            .map(str::trim)
            .filter(|ip| !ip.is_empty());

        let ip = match (forwarded, peer) {
            (Some(ip), _) => ip.to_string(),
            (None, Some(addr)) => addr.ip().to_string(),
            (None, None) => "unknown".to_string(),
        };

        Self { user_agent, ip }
    }
}

impl<S> FromRequestParts<S> for ClientInfo
where
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let peer = parts
            .extensions
            .get::<ConnectInfo<SocketAddr>>()
            .map(|ConnectInfo(addr)| *addr);
        Ok(ClientInfo::from_headers(&parts.headers, peer))
    }
}

/// Validated admin state, available to handlers behind [`require_admin`].
impl<S> FromRequestParts<S> for AdminSession
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<AdminSession>()
            .cloned()
            .ok_or(AppError::Session(InvalidReason::NotLoggedIn))
    }
}

/// Session guard check.
pub async fn check_admin(
    sessions: &SessionManager,
    session: &Session,
    client: &ClientInfo,
) -> Result<Access, AppError> {
    match sessions.validate(session, client).await {
        Ok(admin) => Ok(Access::Allow(admin)),
        Err(AppError::Session(reason)) => Ok(Access::Deny(reason)),
        Err(e) => Err(e),
    }
}

/// Middleware: only a valid admin session gets through.
pub async fn require_admin(
    State(state): State<AppState>,
    session: Session,
    client: ClientInfo,
    mut request: Request,
    next: Next,
) -> Result<Response, AppError> {
    match check_admin(&state.sessions, &session, &client).await? {
        Access::Allow(admin) => {
            request.extensions_mut().insert(admin);
            Ok(next.run(request).await)
        }
        Access::Deny(reason) => Err(AppError::Session(reason)),
    }
}

/// CSRF guard check for an already validated admin.
pub fn check_csrf(method: &Method, admin: &AdminSession, candidate: Option<&str>) -> bool {
    is_exempt(method) || validate_token(&admin.csrf_token, candidate)
}

/// Middleware: state-changing requests must echo the session's CSRF token.
///
/// Must run inside [`require_admin`]. The token is read from the
/// `X-CSRF-Token` header, or from the `csrf_token` field of a urlencoded or
/// multipart form. Form bodies are buffered and handed on unchanged.
pub async fn csrf_protect(
    State(state): State<AppState>,
    request: Request,
    next: Next,
) -> Result<Response, AppError> {
    if is_exempt(request.method()) {
        return Ok(next.run(request).await);
    }

    let admin = request
        .extensions()
        .get::<AdminSession>()
        .cloned()
        .ok_or(AppError::Session(InvalidReason::NotLoggedIn))?;

    let header_token = request
        .headers()
        .get(CSRF_HEADER)
        .and_then(|v| v.to_str().ok())
        .map(str::to_string);

    let (request, candidate) = match header_token {
        Some(token) => (request, Some(token)),
        None if is_form(request.headers()) => {
            let (parts, body) = request.into_parts();
            let bytes = to_bytes(body, state.max_upload_bytes)
                .await
                .map_err(|e| AppError::BadRequest(format!("Failed to read form: {e}")))?;
            let token = token_from_form(&bytes);
            (Request::from_parts(parts, Body::from(bytes)), token)
        }
        None if is_multipart(request.headers()) => {
            let (parts, body) = request.into_parts();
            let bytes = to_bytes(body, state.max_upload_bytes)
                .await
                .map_err(|e| AppError::BadRequest(format!("Failed to read form: {e}")))?;
            let token = token_from_multipart(&parts, bytes.clone()).await;
            (Request::from_parts(parts, Body::from(bytes)), token)
        }
        None => (request, None),
    };

    if !check_csrf(request.method(), &admin, candidate.as_deref()) {
        tracing::warn!("CSRF validation failed for {} {}", request.method(), request.uri());
        return Err(AppError::Csrf);
    }

    Ok(next.run(request).await)
}

fn is_form(headers: &HeaderMap) -> bool {
    headers
        .get(header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .is_some_and(|ct| ct.starts_with("application/x-www-form-urlencoded"))
}

fn is_multipart(headers: &HeaderMap) -> bool {
    headers
        .get(header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .is_some_and(|ct| ct.starts_with("multipart/form-data"))
}

/// First `csrf_token` field of a buffered multipart body.
async fn token_from_multipart(parts: &Parts, body: Bytes) -> Option<String> {
    let mut request = Request::new(Body::from(body));
    *request.method_mut() = parts.method.clone();
    *request.uri_mut() = parts.uri.clone();
    *request.headers_mut() = parts.headers.clone();
    *request.extensions_mut() = parts.extensions.clone();

    let mut multipart = Multipart::from_request(request, &()).await.ok()?;
    while let Ok(Some(field)) = multipart.next_field().await {
        if field.name() == Some(CSRF_FORM_FIELD) {
            return field.text().await.ok();
        }
    }
    None
}
