use serde::{Deserialize, Serialize};

/// Payload posted by the Telegram login widget.
///
/// `hash` is Telegram's HMAC signature over the remaining fields; `auth_date`
/// is the Unix timestamp the payload was signed at. The optional profile
/// fields are absent when the user has not set them.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WidgetPayload {
    pub id: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub first_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub photo_url: Option<String>,
    pub auth_date: i64,
    pub hash: String,
}
