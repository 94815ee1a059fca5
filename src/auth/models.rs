use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

/// Why an admin session stopped being valid.
///
/// Variants are listed in the order validation checks them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InvalidReason {
    /// No admin session in this cookie.
    NotLoggedIn,
    /// A newer login elsewhere took the active-session slot.
    SessionTokenMismatch,
    /// No activity within the inactivity window.
    Timeout,
    /// User agent or IP changed since login.
    FingerprintMismatch,
}

impl InvalidReason {
    pub fn as_str(&self) -> &'static str {
        match self {
            InvalidReason::NotLoggedIn => "not_logged_in",
            InvalidReason::SessionTokenMismatch => "session_token_mismatch",
            InvalidReason::Timeout => "timeout",
            InvalidReason::FingerprintMismatch => "fingerprint_mismatch",
        }
    }

    /// Message shown on the login page after a forced logout.
    pub fn user_message(&self) -> &'static str {
        match self {
            InvalidReason::NotLoggedIn => "Please login to access this page.",
            InvalidReason::SessionTokenMismatch => {
                "You have been logged out because a new login occurred elsewhere."
            }
            InvalidReason::Timeout => {
                "Your session has expired due to inactivity. Please login again."
            }
            InvalidReason::FingerprintMismatch => "Security validation failed. Please login again.",
        }
    }
}

impl fmt::Display for InvalidReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Admin state kept in the server-side session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AdminSession {
    pub username: String,
    /// Must match the active-session slot for the session to stay valid.
    pub session_token: String,
    pub last_activity: DateTime<Utc>,
    pub client_fingerprint: String,
    pub csrf_token: String,
}

/// Who is on the other end of a request, as far as fingerprinting goes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientInfo {
    pub user_agent: String,
    pub ip: String,
}

impl ClientInfo {
    pub fn new(user_agent: impl Into<String>, ip: impl Into<String>) -> Self {
        Self {
            user_agent: user_agent.into(),
            ip: ip.into(),
        }
    }

    /// SHA-256 hex of `"{user_agent}:{ip}"`.
    pub fn fingerprint(&self) -> String {
        let digest = Sha256::digest(format!("{}:{}", self.user_agent, self.ip).as_bytes());
        digest.iter().map(|b| format!("{:02x}", b)).collect()
    }
}
