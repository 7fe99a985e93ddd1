//! Authenticated user endpoints.

use axum::{Json, Router, routing::get};
use serde::Serialize;

use super::session::AuthUser;

pub(super) fn router() -> Router {
    Router::new().route("/me", get(me))
}

/// Profile of the authenticated user.
#[derive(Debug, Serialize)]
struct MeResponse {
    id: String,
    telegram_id: i64,
    username: Option<String>,
    first_name: Option<String>,
    last_name: Option<String>,
    is_admin: bool,
}

/// GET /me - profile of the bearer-token holder.
async fn me(user: AuthUser) -> Json<MeResponse> {
    Json(MeResponse {
        id: user.id,
        telegram_id: user.telegram_id,
        username: user.username,
        first_name: user.first_name,
        last_name: user.last_name,
        is_admin: user.is_admin,
    })
}
