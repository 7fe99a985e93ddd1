//! Protocol client seam for full MTProto-style phone login.
//!
//! This crate never speaks the protocol itself. An embedder registers a
//! client (e.g. one wrapping an MTProto library) at startup; until then the
//! phone flow reports a gateway failure.

use std::sync::{Arc, LazyLock};

use async_trait::async_trait;
use tokio::sync::Mutex;

use super::errors::ProtocolError;
use super::types::{SentCode, SignInOutcome};

/// External full-protocol collaborator for phone verification.
#[async_trait]
pub trait ProtocolClient: Send + Sync {
    /// Ask the platform to send a verification code to `phone`. Returns the
    /// client's resumable session state and the code correlation hash.
    async fn send_code(&self, phone: &str) -> Result<SentCode, ProtocolError>;

    /// Resume from `client_session` and submit the code the user received,
    /// plus the two-factor password when the account has one.
    async fn resume_and_verify(
        &self,
        client_session: &str,
        phone: &str,
        phone_code_hash: &str,
        code: &str,
        password: Option<&str>,
    ) -> Result<SignInOutcome, ProtocolError>;
}

static PROTOCOL_CLIENT: LazyLock<Mutex<Option<Arc<dyn ProtocolClient>>>> =
    LazyLock::new(|| Mutex::new(None));

/// Register the process-wide protocol client.
pub async fn register_protocol_client(client: Arc<dyn ProtocolClient>) {
    *PROTOCOL_CLIENT.lock().await = Some(client);
}

/// Clone out the registered client so the registry lock is not held across
/// the network round trip.
pub(super) async fn current_client() -> Option<Arc<dyn ProtocolClient>> {
    PROTOCOL_CLIENT.lock().await.clone()
}

#[cfg(test)]
pub(super) async fn clear_protocol_client() {
    *PROTOCOL_CLIENT.lock().await = None;
}
