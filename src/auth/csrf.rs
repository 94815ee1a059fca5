use axum::http::Method;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine;
use rand::RngCore;
use sha2::{Digest, Sha256};
use subtle::ConstantTimeEq;

/// Header carrying the token on XHR requests.
pub const CSRF_HEADER: &str = "x-csrf-token";
/// Form field carrying the token on classic form posts.
pub const CSRF_FORM_FIELD: &str = "csrf_token";

const TOKEN_BYTES: usize = 32;

/// A fresh URL-safe token from 32 random bytes.
///
/// Also used for the active-session token.
pub fn issue_token() -> String {
    let mut bytes = [0u8; TOKEN_BYTES];
    rand::rng().fill_bytes(&mut bytes);
    URL_SAFE_NO_PAD.encode(bytes)
}

/// Compare a submitted token with the stored one in constant time.
///
/// Both sides are hashed first so the comparison does not leak length.
pub fn validate_token(expected: &str, candidate: Option<&str>) -> bool {
    let Some(candidate) = candidate.filter(|c| !c.is_empty()) else {
        return false;
    };
    if expected.is_empty() {
        return false;
    }

    let expected = Sha256::digest(expected.as_bytes());
    let candidate = Sha256::digest(candidate.as_bytes());
    expected.as_slice().ct_eq(candidate.as_slice()).into()
}

/// Safe methods never carry a token.
pub fn is_exempt(method: &Method) -> bool {
    matches!(*method, Method::GET | Method::HEAD | Method::OPTIONS)
}

/// Pull `csrf_token` out of an `application/x-www-form-urlencoded` body.
pub fn token_from_form(body: &[u8]) -> Option<String> {
    url::form_urlencoded::parse(body)
        .find(|(key, _)| key == CSRF_FORM_FIELD)
        .map(|(_, value)| value.into_owned())
}
