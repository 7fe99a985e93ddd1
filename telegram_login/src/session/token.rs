//! Session token issuance and validation.

use chrono::Utc;
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation};

use super::config::{JWT_ALGORITHM, JWT_EXPIRE_SECONDS, JWT_SECRET};
use super::errors::SessionError;
use super::types::SessionClaims;

/// Sign a session token for `user_id` using the configured secret.
pub(crate) fn issue_session_token(user_id: &str) -> Result<String, SessionError> {
    issue_with_secret(
        user_id,
        &JWT_SECRET,
        *JWT_ALGORITHM,
        *JWT_EXPIRE_SECONDS,
        Utc::now().timestamp(),
    )
}

/// Validate a session token and return the user id it is bound to.
pub(crate) fn validate_session_token(token: &str) -> Result<String, SessionError> {
    validate_with_secret(token, &JWT_SECRET, *JWT_ALGORITHM)
}

fn issue_with_secret(
    user_id: &str,
    secret: &[u8],
    algorithm: Algorithm,
    expire_seconds: i64,
    now: i64,
) -> Result<String, SessionError> {
    let claims = SessionClaims {
        sub: user_id.to_string(),
        iat: now,
        exp: now + expire_seconds,
    };

    jsonwebtoken::encode(
        &Header::new(algorithm),
        &claims,
        &EncodingKey::from_secret(secret),
    )
    .map_err(|e| SessionError::TokenCreation(e.to_string()))
}

fn validate_with_secret(
    token: &str,
    secret: &[u8],
    algorithm: Algorithm,
) -> Result<String, SessionError> {
    let mut validation = Validation::new(algorithm);
    // No clock leeway: a token is expired the second its exp passes.
    validation.leeway = 0;

    let data = jsonwebtoken::decode::<SessionClaims>(
        token,
        &DecodingKey::from_secret(secret),
        &validation,
    )
    .map_err(|e| {
        tracing::debug!("Session token rejected: {}", e);
        SessionError::InvalidToken
    })?;

    Ok(data.claims.sub)
}
