//! Login endpoints for the three proof mechanisms.

use axum::{Json, Router, routing::post};
use http::StatusCode;
use serde::Deserialize;

use telegram_login::{
    StartedLogin, TokenResponse, WidgetPayload, login_with_widget, start_code_login,
    start_phone_login, verify_code_login, verify_phone_login,
};

use super::error::IntoResponseError;

pub(super) fn router() -> Router {
    Router::new()
        .route("/telegram", post(widget_login))
        .route("/telegram/code/start", post(code_start))
        .route("/telegram/code/verify", post(code_verify))
        .route("/telegram/phone/start", post(phone_start))
        .route("/telegram/phone/verify", post(phone_verify))
}

/// POST /telegram - login with a signed widget payload.
async fn widget_login(
    Json(payload): Json<WidgetPayload>,
) -> Result<Json<TokenResponse>, (StatusCode, String)> {
    login_with_widget(&payload)
        .await
        .into_response_error()
        .map(Json)
}

#[derive(Deserialize)]
struct CodeStartRequest {
    chat_id: i64,
}

/// POST /telegram/code/start - relay a one-time code to a chat.
async fn code_start(
    Json(request): Json<CodeStartRequest>,
) -> Result<Json<StartedLogin>, (StatusCode, String)> {
    start_code_login(request.chat_id)
        .await
        .into_response_error()
        .map(Json)
}

#[derive(Deserialize)]
struct CodeVerifyRequest {
    challenge_id: String,
    code: String,
}

/// POST /telegram/code/verify - redeem a relayed code.
async fn code_verify(
    Json(request): Json<CodeVerifyRequest>,
) -> Result<Json<TokenResponse>, (StatusCode, String)> {
    verify_code_login(&request.challenge_id, &request.code)
        .await
        .into_response_error()
        .map(Json)
}

#[derive(Deserialize)]
struct PhoneStartRequest {
    phone: String,
}

/// POST /telegram/phone/start - begin full-protocol phone verification.
async fn phone_start(
    Json(request): Json<PhoneStartRequest>,
) -> Result<Json<StartedLogin>, (StatusCode, String)> {
    start_phone_login(&request.phone)
        .await
        .into_response_error()
        .map(Json)
}

#[derive(Deserialize)]
struct PhoneVerifyRequest {
    challenge_id: String,
    code: String,
    password: Option<String>,
}

/// POST /telegram/phone/verify - submit the code, and the two-factor
/// password when the account has one. Responds 428 when the password is
/// still missing.
async fn phone_verify(
    Json(request): Json<PhoneVerifyRequest>,
) -> Result<Json<TokenResponse>, (StatusCode, String)> {
    verify_phone_login(
        &request.challenge_id,
        &request.code,
        request.password.as_deref(),
    )
    .await
    .into_response_error()
    .map(Json)
}
