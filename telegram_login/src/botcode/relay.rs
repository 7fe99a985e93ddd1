//! Message relay seam for one-time code delivery.
//!
//! The default relay posts to the Telegram Bot API; tests and embedders can
//! swap in their own implementation via [`register_message_relay`].

use std::sync::{Arc, LazyLock};
use std::time::Duration;

use async_trait::async_trait;
use serde_json::json;
use tokio::sync::Mutex;

use super::config::TELEGRAM_BOT_API_BASE;
use super::errors::RelayError;
use crate::config::TELEGRAM_BOT_TOKEN;

/// External collaborator that delivers a text message to a chat.
#[async_trait]
pub trait MessageRelay: Send + Sync {
    async fn send(&self, chat_id: i64, text: &str) -> Result<(), RelayError>;
}

static MESSAGE_RELAY: LazyLock<Mutex<Arc<dyn MessageRelay>>> =
    LazyLock::new(|| Mutex::new(Arc::new(TelegramBotApi::new())));

/// Replace the process-wide message relay.
///
/// Intended for embedders that deliver codes through something other than
/// the Bot API, and for tests.
pub async fn register_message_relay(relay: Arc<dyn MessageRelay>) {
    *MESSAGE_RELAY.lock().await = relay;
}

/// Clone out the current relay so the registry lock is not held across the
/// network round trip.
pub(super) async fn current_relay() -> Arc<dyn MessageRelay> {
    MESSAGE_RELAY.lock().await.clone()
}

/// Relay that delivers through the Telegram Bot API `sendMessage` method.
pub(crate) struct TelegramBotApi {
    client: reqwest::Client,
    api_base: String,
    bot_token: String,
}

impl TelegramBotApi {
    pub(crate) fn new() -> Self {
        Self::with_base(
            TELEGRAM_BOT_API_BASE.clone(),
            TELEGRAM_BOT_TOKEN.clone(),
        )
    }

    fn with_base(api_base: String, bot_token: String) -> Self {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(30))
            .pool_idle_timeout(Duration::from_secs(90))
            .build()
            .expect("Failed to create HTTP client");

        Self {
            client,
            api_base,
            bot_token,
        }
    }
}

#[async_trait]
impl MessageRelay for TelegramBotApi {
    async fn send(&self, chat_id: i64, text: &str) -> Result<(), RelayError> {
        if self.bot_token.is_empty() {
            return Err(RelayError::Misconfigured(
                "TELEGRAM_BOT_TOKEN is not set".to_string(),
            ));
        }

        let url = format!("{}/bot{}/sendMessage", self.api_base, self.bot_token);
        let response = self
            .client
            .post(&url)
            .json(&json!({ "chat_id": chat_id, "text": text }))
            .send()
            .await
            .map_err(|e| RelayError::Delivery(format!("sendMessage request failed: {e}")))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            tracing::debug!("Bot API rejected sendMessage: {} {}", status, body);
            return Err(RelayError::Delivery(format!(
                "sendMessage returned {status}"
            )));
        }

        Ok(())
    }
}
