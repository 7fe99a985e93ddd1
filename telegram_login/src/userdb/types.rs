use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// A local user record keyed by a stable internal id, linked to exactly one
/// Telegram identity.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, PartialEq)]
pub struct User {
    /// Unique internal identifier (UUIDv4); session tokens are bound to it
    pub id: String,
    /// Stable numeric Telegram id this account belongs to
    pub telegram_id: i64,
    /// Telegram @username, if the user has one
    pub username: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    /// Avatar reference provided by the login widget
    pub photo_url: Option<String>,
    /// Whether the user has administrator privileges
    pub is_admin: bool,
    /// When the user account was created
    pub created_at: DateTime<Utc>,
    /// When the user account was last updated
    pub updated_at: DateTime<Utc>,
}

impl User {
    /// Create a new user record from an external identity.
    pub fn new(identity: TelegramIdentity, is_admin: bool) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4().to_string(),
            telegram_id: identity.telegram_id,
            username: identity.username,
            first_name: identity.first_name,
            last_name: identity.last_name,
            photo_url: identity.photo_url,
            is_admin,
            created_at: now,
            updated_at: now,
        }
    }
}

/// The normalized external identity produced by a successful proof, whatever
/// flow it came through. Input to the identity upsert.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TelegramIdentity {
    pub telegram_id: i64,
    pub username: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub photo_url: Option<String>,
}
