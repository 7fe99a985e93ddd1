//! User-facing operations on top of the user store: identity upsert, token
//! resolution, admin assignment.

use super::errors::CoordinationError;
use crate::config::TELEGRAM_ADMIN_IDS;
use crate::session::validate_session_token;
use crate::userdb::{TelegramIdentity, User, UserStore};

/// Reconcile a proven Telegram identity with the local user record.
///
/// First sight creates the user; a returning identity has its profile fields
/// refreshed. Membership in the configured admin set can promote, never
/// demote: the flag stays set even if the id later leaves the set.
pub(crate) async fn upsert_telegram_user(
    identity: TelegramIdentity,
) -> Result<User, CoordinationError> {
    let in_admin_set = TELEGRAM_ADMIN_IDS.contains(&identity.telegram_id);
    let user = UserStore::upsert_user(User::new(identity, in_admin_set)).await?;

    tracing::debug!(
        "Upserted user {} (telegram id {}, admin: {})",
        user.id,
        user.telegram_id,
        user.is_admin
    );
    Ok(user)
}

/// Resolve a bearer token to the user it was issued to.
pub async fn get_user_from_token(token: &str) -> Result<User, CoordinationError> {
    let user_id = validate_session_token(token)?;
    match UserStore::get_user(&user_id).await? {
        Some(user) => Ok(user),
        // Valid signature but the subject is gone, e.g. the database was reset
        None => Err(CoordinationError::Authentication("User not found".to_string()).log()),
    }
}

/// Grant admin to the user with `target_telegram_id`, on behalf of
/// `acting_user`. Promotion only; there is no demotion path.
pub async fn assign_admin(
    acting_user: &User,
    target_telegram_id: i64,
) -> Result<User, CoordinationError> {
    if !acting_user.is_admin {
        return Err(CoordinationError::AdminPrivilegeRequired.log());
    }

    match UserStore::promote_admin(target_telegram_id).await? {
        Some(user) => {
            tracing::info!(
                "User {} granted admin to telegram id {}",
                acting_user.id,
                target_telegram_id
            );
            Ok(user)
        }
        None => Err(CoordinationError::TargetUserNotFound.log()),
    }
}
