//! Admin endpoints. All of them require an authenticated admin caller.

use axum::{Json, Router, extract::Path, routing::post};
use http::StatusCode;
use serde_json::{Value, json};

use telegram_login::assign_admin;

use super::error::IntoResponseError;
use super::session::AuthUser;

pub(super) fn router() -> Router {
    Router::new().route("/assign/{telegram_id}", post(assign))
}

/// POST /assign/{telegram_id} - grant admin to the target account.
/// Promotion only; 403 for non-admin callers, 404 for unknown targets.
async fn assign(
    user: AuthUser,
    Path(telegram_id): Path<i64>,
) -> Result<Json<Value>, (StatusCode, String)> {
    let target = assign_admin(&user.into(), telegram_id)
        .await
        .into_response_error()?;

    Ok(Json(json!({
        "ok": true,
        "telegram_id": target.telegram_id,
        "is_admin": target.is_admin,
    })))
}
