//! Shared setup for integration tests: environment loading, store init, and
//! collaborator doubles for the message relay and protocol client.

use std::sync::{Arc, Mutex, Once};

use async_trait::async_trait;
use hmac::{Hmac, Mac};
use sha2::{Digest, Sha256};

use telegram_login::{
    MessageRelay, ProtocolClient, ProtocolError, RelayError, SentCode, SignInOutcome,
    TelegramIdentity, WidgetPayload,
};

/// Load `.env_test`, reset the sqlite test database, initialize the stores.
pub async fn init_test_environment() {
    static ENV_INIT: Once = Once::new();
    ENV_INIT.call_once(|| {
        if dotenvy::from_filename(".env_test").is_err() {
            dotenvy::dotenv().ok();
        }
        if let Ok(url) = std::env::var("GENERIC_DATA_STORE_URL") {
            if let Some(path) = url.strip_prefix("sqlite:") {
                let _ = std::fs::remove_file(path);
            }
        }
    });

    telegram_login::init()
        .await
        .expect("store initialization should succeed");
}

/// Sign a widget payload the way Telegram's widget does: HMAC-SHA256 over
/// the sorted `key=value` lines, keyed by SHA-256 of the bot token.
pub fn sign_widget_payload(payload: &mut WidgetPayload) {
    let bot_token =
        std::env::var("TELEGRAM_BOT_TOKEN").expect("test env sets TELEGRAM_BOT_TOKEN");

    let mut fields: Vec<(&str, String)> = vec![
        ("id", payload.id.to_string()),
        ("auth_date", payload.auth_date.to_string()),
    ];
    if let Some(v) = &payload.first_name {
        fields.push(("first_name", v.clone()));
    }
    if let Some(v) = &payload.last_name {
        fields.push(("last_name", v.clone()));
    }
    if let Some(v) = &payload.username {
        fields.push(("username", v.clone()));
    }
    if let Some(v) = &payload.photo_url {
        fields.push(("photo_url", v.clone()));
    }
    fields.sort_by(|a, b| a.0.cmp(b.0));
    let check_string = fields
        .iter()
        .map(|(k, v)| format!("{k}={v}"))
        .collect::<Vec<_>>()
        .join("\n");

    let secret_key = Sha256::digest(bot_token.as_bytes());
    let mut mac = Hmac::<Sha256>::new_from_slice(&secret_key)
        .expect("HMAC can take key of any size");
    mac.update(check_string.as_bytes());
    payload.hash = hex::encode(mac.finalize().into_bytes());
}

/// Message relay double that records deliveries and can be told to fail.
pub struct RecordingRelay {
    pub sent: Arc<Mutex<Vec<(i64, String)>>>,
    fail: bool,
}

impl RecordingRelay {
    pub fn working() -> (Arc<Self>, Arc<Mutex<Vec<(i64, String)>>>) {
        let sent = Arc::new(Mutex::new(Vec::new()));
        (
            Arc::new(Self {
                sent: Arc::clone(&sent),
                fail: false,
            }),
            sent,
        )
    }

    pub fn failing() -> Arc<Self> {
        Arc::new(Self {
            sent: Arc::new(Mutex::new(Vec::new())),
            fail: true,
        })
    }
}

#[async_trait]
impl MessageRelay for RecordingRelay {
    async fn send(&self, chat_id: i64, text: &str) -> Result<(), RelayError> {
        if self.fail {
            return Err(RelayError::Delivery("relay down".to_string()));
        }
        self.sent
            .lock()
            .expect("relay state lock poisoned")
            .push((chat_id, text.to_string()));
        Ok(())
    }
}

/// Pull the 6-digit code out of a relayed message text.
pub fn code_from_text(text: &str) -> String {
    text.chars().filter(|c| c.is_ascii_digit()).take(6).collect()
}

/// Protocol client double that accepts one fixed code and optionally demands
/// a two-factor password first.
pub struct FakeProtocolClient {
    identity: TelegramIdentity,
    accepted_code: String,
    requires_password: bool,
}

impl FakeProtocolClient {
    pub fn accepting(code: &str, identity: TelegramIdentity) -> Arc<Self> {
        Arc::new(Self {
            identity,
            accepted_code: code.to_string(),
            requires_password: false,
        })
    }

    pub fn password_protected(code: &str, identity: TelegramIdentity) -> Arc<Self> {
        Arc::new(Self {
            identity,
            accepted_code: code.to_string(),
            requires_password: true,
        })
    }
}

#[async_trait]
impl ProtocolClient for FakeProtocolClient {
    async fn send_code(&self, _phone: &str) -> Result<SentCode, ProtocolError> {
        Ok(SentCode {
            client_session: "itest-session-blob".to_string(),
            phone_code_hash: "itest-pch".to_string(),
        })
    }

    async fn resume_and_verify(
        &self,
        client_session: &str,
        _phone: &str,
        phone_code_hash: &str,
        code: &str,
        password: Option<&str>,
    ) -> Result<SignInOutcome, ProtocolError> {
        // The flow must hand the opaque state back verbatim
        if client_session != "itest-session-blob" || phone_code_hash != "itest-pch" {
            return Err(ProtocolError::Client(
                "session state was not preserved".to_string(),
            ));
        }
        if code != self.accepted_code {
            return Ok(SignInOutcome::InvalidCode);
        }
        if self.requires_password && password.is_none() {
            return Ok(SignInOutcome::PasswordRequired);
        }
        Ok(SignInOutcome::SignedIn(self.identity.clone()))
    }
}
