//! telegram-login - session credentials for Telegram identities.
//!
//! Three proof mechanisms lead to the same outcome, a signed bearer token:
//! the login-widget handshake (offline HMAC verification), a bot-relayed
//! one-time code, and a full-protocol phone verification with optional
//! two-factor password. Pending code/phone attempts live in a process-wide,
//! TTL-bounded challenge store; user records go through a pluggable
//! sqlite/postgres store.
//!
//! The crate never talks MTProto itself: embedders register a
//! [`ProtocolClient`] (and optionally a [`MessageRelay`]) at startup.

mod botcode;
mod config;
mod coordination;
mod phone;
mod session;
mod storage;
mod userdb;
mod utils;
mod widget;

#[cfg(test)]
mod test_utils;

pub use config::TELEGRAM_LOGIN_ROUTE_PREFIX;

pub use coordination::{
    CoordinationError, StartedLogin, assign_admin, get_user_from_token, login_with_widget,
    start_code_login, start_phone_login, verify_code_login, verify_phone_login,
};

pub use botcode::{MessageRelay, RelayError, register_message_relay};
pub use phone::{
    ProtocolClient, ProtocolError, SentCode, SignInOutcome, register_protocol_client,
};

pub use session::TokenResponse;
pub use userdb::{TelegramIdentity, User, UserError, UserStore};
pub use widget::{WidgetPayload, verify_widget_payload};

/// Initialize the storage layer and user tables. Call once at startup,
/// before serving logins.
pub async fn init() -> Result<(), Box<dyn std::error::Error>> {
    storage::init().await?;
    userdb::init().await?;
    Ok(())
}
