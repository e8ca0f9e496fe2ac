//! Session JWT validation.
//!
//! The authentication provider signs session tokens with HS256 using a secret
//! shared with this server. A token arrives either as
//! `Authorization: Bearer <token>` or in the `__session` cookie.

use axum::http::header::{AUTHORIZATION, COOKIE};
use axum::http::HeaderMap;
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};

/// Name of the cookie carrying the session token.
pub const SESSION_COOKIE: &str = "__session";

/// Claims embedded in every session token.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct SessionClaims {
    /// Subject -- the provider's user id.
    pub sub: String,
    /// Primary email address, when the provider knows one.
    #[serde(default)]
    pub email: Option<String>,
    /// Expiration time (UTC Unix timestamp).
    pub exp: i64,
    /// Issued-at time (UTC Unix timestamp).
    pub iat: i64,
}

#[derive(Debug, Clone)]
pub struct SessionConfig {
    /// HMAC-SHA256 secret shared with the authentication provider.
    pub secret: String,
}

impl SessionConfig {
    /// Load from `SESSION_JWT_SECRET`.
    ///
    /// # Panics
    ///
    /// Panics if `SESSION_JWT_SECRET` is not set or is empty.
    pub fn from_env() -> Self {
        let secret = std::env::var("SESSION_JWT_SECRET")
            .expect("SESSION_JWT_SECRET must be set in the environment");
        assert!(!secret.is_empty(), "SESSION_JWT_SECRET must not be empty");
        Self { secret }
    }
}

/// Validate and decode a session token (signature and `exp`).
pub fn validate_session(
    token: &str,
    config: &SessionConfig,
) -> Result<SessionClaims, jsonwebtoken::errors::Error> {
    let data = decode::<SessionClaims>(
        token,
        &DecodingKey::from_secret(config.secret.as_bytes()),
        &Validation::default(),
    )?;
    Ok(data.claims)
}

/// Sign a session token the way the authentication provider does.
///
/// Used by local tooling and the integration tests.
pub fn sign_session(
    sub: &str,
    email: Option<&str>,
    ttl_secs: i64,
    config: &SessionConfig,
) -> Result<String, jsonwebtoken::errors::Error> {
    let now = chrono::Utc::now().timestamp();
    let claims = SessionClaims {
        sub: sub.to_string(),
        email: email.map(str::to_string),
        exp: now + ttl_secs,
        iat: now,
    };
    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(config.secret.as_bytes()),
    )
}

/// Find the raw session token on a request. The bearer header wins over
/// the cookie.
pub fn token_from_headers(headers: &HeaderMap) -> Option<&str> {
    let bearer = headers
        .get(AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.strip_prefix("Bearer "))
        .map(str::trim)
        .filter(|t| !t.is_empty());
    if bearer.is_some() {
        return bearer;
    }

    headers
        .get_all(COOKIE)
        .iter()
        .filter_map(|v| v.to_str().ok())
        .flat_map(|v| v.split(';'))
        .filter_map(|pair| pair.trim().split_once('='))
        .find(|(name, value)| *name == SESSION_COOKIE && !value.is_empty())
        .map(|(_, value)| value)
}
