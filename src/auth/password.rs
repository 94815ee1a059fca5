use argon2::password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString};
use argon2::Argon2;
use rand::RngCore;

use crate::error::AppError;

/// Hash a password into an argon2 PHC string suitable for `ADMIN_PASSWORD_HASH`.
pub fn hash_password(password: &str) -> Result<String, AppError> {
    let mut salt_bytes = [0u8; 16];
    rand::rng().fill_bytes(&mut salt_bytes);
    let salt = SaltString::encode_b64(&salt_bytes).map_err(|e| AppError::Auth(e.to_string()))?;

    Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|e| AppError::Auth(e.to_string()))
}

/// Scheme name of a Werkzeug-style hash (`pbkdf2:sha256:...`, `scrypt:...`).
///
/// These are not accepted and must be regenerated with `hash-password`.
pub fn legacy_scheme(hash: &str) -> Option<&str> {
    let (scheme, _) = hash.split_once(':')?;
    matches!(scheme, "pbkdf2" | "scrypt").then_some(scheme)
}

/// Check a password against a PHC string. A malformed hash never matches.
pub fn verify_password(hash: &str, password: &str) -> bool {
    if let Some(scheme) = legacy_scheme(hash) {
        tracing::error!(
            "Admin password hash uses the unsupported {} format; regenerate it with hash-password",
            scheme
        );
        return false;
    }

    let parsed = match PasswordHash::new(hash) {
        Ok(parsed) => parsed,
        Err(e) => {
            tracing::error!("Configured admin password hash is malformed: {}", e);
            return false;
        }
    };

    Argon2::default()
        .verify_password(password.as_bytes(), &parsed)
        .is_ok()
}
