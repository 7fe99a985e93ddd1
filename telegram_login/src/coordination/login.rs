//! Orchestration of the three login flows: verify the proof, reconcile the
//! user record, mint a session token.

use super::errors::CoordinationError;
use super::types::StartedLogin;
use super::user::upsert_telegram_user;
use crate::session::{TokenResponse, issue_session_token};
use crate::storage::LOGIN_CHALLENGE_TTL_SECS;
use crate::userdb::{TelegramIdentity, User};
use crate::widget::{WidgetPayload, verify_widget_payload};
use crate::{botcode, phone};

/// Log in with a signed login-widget payload.
pub async fn login_with_widget(
    payload: &WidgetPayload,
) -> Result<TokenResponse, CoordinationError> {
    if !verify_widget_payload(payload) {
        return Err(
            CoordinationError::Authentication("Telegram auth failed".to_string()).log(),
        );
    }

    let identity = TelegramIdentity {
        telegram_id: payload.id,
        username: payload.username.clone(),
        first_name: payload.first_name.clone(),
        last_name: payload.last_name.clone(),
        photo_url: payload.photo_url.clone(),
    };
    let user = upsert_telegram_user(identity).await?;
    issue_token_for(&user)
}

/// Start a bot-relayed code login for `chat_id`.
pub async fn start_code_login(chat_id: i64) -> Result<StartedLogin, CoordinationError> {
    let challenge_id = botcode::start_code_login(chat_id).await?;
    Ok(StartedLogin {
        challenge_id,
        ttl_seconds: LOGIN_CHALLENGE_TTL_SECS,
    })
}

/// Redeem a bot-relayed code challenge.
pub async fn verify_code_login(
    challenge_id: &str,
    code: &str,
) -> Result<TokenResponse, CoordinationError> {
    let identity = botcode::verify_code_login(challenge_id, code).await?;
    let user = upsert_telegram_user(identity).await?;
    issue_token_for(&user)
}

/// Start a full-protocol phone login for `phone`.
pub async fn start_phone_login(phone: &str) -> Result<StartedLogin, CoordinationError> {
    let challenge_id = phone::start_phone_login(phone).await?;
    Ok(StartedLogin {
        challenge_id,
        ttl_seconds: LOGIN_CHALLENGE_TTL_SECS,
    })
}

/// Redeem a phone challenge with the received code and, when the account has
/// one, the two-factor password.
pub async fn verify_phone_login(
    challenge_id: &str,
    code: &str,
    password: Option<&str>,
) -> Result<TokenResponse, CoordinationError> {
    let identity = phone::verify_phone_login(challenge_id, code, password).await?;
    let user = upsert_telegram_user(identity).await?;
    issue_token_for(&user)
}

fn issue_token_for(user: &User) -> Result<TokenResponse, CoordinationError> {
    let token = issue_session_token(&user.id)?;
    tracing::debug!("Issued session token for user {}", user.id);
    Ok(TokenResponse::bearer(token))
}
