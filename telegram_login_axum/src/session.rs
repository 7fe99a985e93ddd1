use axum::{RequestPartsExt, extract::FromRequestParts};
use axum_extra::{
    TypedHeader,
    headers::{Authorization, authorization::Bearer},
};
use chrono::{DateTime, Utc};
use http::{StatusCode, request::Parts};

use telegram_login::{User, get_user_from_token};

use super::error::IntoResponseError;

/// Authenticated user, available as an axum extractor.
///
/// Reads the `Authorization: Bearer` header, validates the session token and
/// loads the user record. Rejects with 401 and one of "Missing token",
/// "Invalid token" or "User not found"; lookup failures that are not the
/// caller's fault keep their usual status, e.g. 500 when the user store is
/// unreachable.
///
/// # Example
///
/// ```no_run
/// use axum::{Router, routing::get};
/// use telegram_login_axum::AuthUser;
///
/// async fn protected(user: AuthUser) -> String {
///     format!("Hello, telegram user {}!", user.telegram_id)
/// }
///
/// let app: Router = Router::new().route("/protected", get(protected));
/// ```
#[derive(Clone, Debug)]
pub struct AuthUser {
    /// Internal user id, the session token's subject
    pub id: String,
    /// Stable numeric Telegram id
    pub telegram_id: i64,
    pub username: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub photo_url: Option<String>,
    /// Whether the user has administrator privileges
    pub is_admin: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<User> for AuthUser {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            telegram_id: user.telegram_id,
            username: user.username,
            first_name: user.first_name,
            last_name: user.last_name,
            photo_url: user.photo_url,
            is_admin: user.is_admin,
            created_at: user.created_at,
            updated_at: user.updated_at,
        }
    }
}

impl From<AuthUser> for User {
    fn from(user: AuthUser) -> Self {
        Self {
            id: user.id,
            telegram_id: user.telegram_id,
            username: user.username,
            first_name: user.first_name,
            last_name: user.last_name,
            photo_url: user.photo_url,
            is_admin: user.is_admin,
            created_at: user.created_at,
            updated_at: user.updated_at,
        }
    }
}

impl<S> FromRequestParts<S> for AuthUser
where
    S: Send + Sync,
{
    type Rejection = (StatusCode, String);

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let TypedHeader(Authorization(bearer)) = parts
            .extract::<TypedHeader<Authorization<Bearer>>>()
            .await
            .map_err(|_| (StatusCode::UNAUTHORIZED, "Missing token".to_string()))?;

        let user = get_user_from_token(bearer.token())
            .await
            .into_response_error()?;

        Ok(AuthUser::from(user))
    }
}
