//! Bot-relayed one-time code login.
//!
//! `start` creates a challenge and pushes the code to the user's chat;
//! `verify` redeems it. A code the relay failed to deliver is rolled back
//! before the failure surfaces, so no challenge exists for a code the user
//! never saw.

use chrono::{Duration, Utc};
use rand::Rng;

use super::errors::CodeFlowError;
use super::relay::current_relay;
use crate::storage::{
    Challenge, CodeChallenge, LOGIN_CHALLENGE_TTL_SECS, LOGIN_CHALLENGES,
};
use crate::userdb::TelegramIdentity;
use crate::utils::gen_random_string;

/// Start a code login for `chat_id`. Returns the challenge id the caller
/// must present together with the code.
pub(crate) async fn start_code_login(chat_id: i64) -> Result<String, CodeFlowError> {
    if chat_id == 0 {
        return Err(CodeFlowError::Validation(
            "chat_id must be non-zero".to_string(),
        ));
    }

    let code = gen_login_code();
    let challenge_id = gen_random_string(32)?;
    let now = Utc::now();

    {
        let mut store = LOGIN_CHALLENGES.lock().await;
        store.sweep(now);
        store.put(
            challenge_id.clone(),
            Challenge::Code(CodeChallenge {
                chat_id,
                code: code.clone(),
                expires_at: now + Duration::seconds(LOGIN_CHALLENGE_TTL_SECS),
            }),
        );
    }

    let text = format!(
        "Your login code is {code}. It expires in {} minutes.",
        LOGIN_CHALLENGE_TTL_SECS / 60
    );
    // The relay call runs outside the store lock.
    let relay = current_relay().await;
    if let Err(e) = relay.send(chat_id, &text).await {
        // The user never received this code; do not leave it redeemable.
        LOGIN_CHALLENGES.lock().await.remove(&challenge_id);
        tracing::error!("Code delivery to chat {} failed: {}", chat_id, e);
        return Err(e.into());
    }

    tracing::info!("Started code login for chat {}", chat_id);
    Ok(challenge_id)
}

/// Redeem a code challenge, yielding the Telegram identity it was issued to.
///
/// A wrong guess does not burn the challenge: it is put back and stays valid
/// until its TTL lapses, so the user can mistype within the window.
pub(crate) async fn verify_code_login(
    challenge_id: &str,
    code: &str,
) -> Result<TelegramIdentity, CodeFlowError> {
    let now = Utc::now();
    let taken = {
        let mut store = LOGIN_CHALLENGES.lock().await;
        store.sweep(now);
        store.take(challenge_id, now)
    };

    let challenge = match taken {
        Some(Challenge::Code(c)) => c,
        // A phone challenge id submitted to the code flow is reported exactly
        // like an unknown id, and put back untouched.
        Some(other @ Challenge::Phone(_)) => {
            LOGIN_CHALLENGES
                .lock()
                .await
                .put(challenge_id.to_string(), other);
            return Err(CodeFlowError::ChallengeNotFound);
        }
        None => return Err(CodeFlowError::ChallengeNotFound),
    };

    if challenge.code != code {
        LOGIN_CHALLENGES
            .lock()
            .await
            .put(challenge_id.to_string(), Challenge::Code(challenge));
        return Err(CodeFlowError::InvalidCode);
    }

    tracing::info!("Code login verified for chat {}", challenge.chat_id);
    Ok(TelegramIdentity {
        telegram_id: challenge.chat_id,
        ..Default::default()
    })
}

/// Uniform 6-digit code, zero-padded, from a CSPRNG-backed generator.
fn gen_login_code() -> String {
    format!("{:06}", rand::thread_rng().gen_range(0..=999_999))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::botcode::errors::RelayError;
    use crate::botcode::relay::{MessageRelay, register_message_relay};
    use crate::test_utils::init_test_environment;
    use async_trait::async_trait;
    use serial_test::serial;
    use std::sync::{Arc, Mutex as StdMutex};

    /// Relay that records every message and can be told to fail.
    struct RecordingRelay {
        sent: Arc<StdMutex<Vec<(i64, String)>>>,
        fail: bool,
    }

    impl RecordingRelay {
        fn working() -> (Arc<Self>, Arc<StdMutex<Vec<(i64, String)>>>) {
            let sent = Arc::new(StdMutex::new(Vec::new()));
            (
                Arc::new(Self {
                    sent: Arc::clone(&sent),
                    fail: false,
                }),
                sent,
            )
        }

        fn failing() -> Arc<Self> {
            Arc::new(Self {
                sent: Arc::new(StdMutex::new(Vec::new())),
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
    fn code_from_text(text: &str) -> String {
        text.chars().filter(|c| c.is_ascii_digit()).take(6).collect()
    }

    #[tokio::test]
    #[serial]
    async fn test_start_then_verify_roundtrip() {
        init_test_environment().await;

        let (relay, sent) = RecordingRelay::working();
        register_message_relay(relay).await;

        let challenge_id = start_code_login(42).await.expect("start should succeed");
        assert_eq!(challenge_id.len(), 43, "32 random bytes as base64url");

        let messages = sent.lock().expect("relay state lock poisoned").clone();
        assert_eq!(messages.len(), 1);
        assert_eq!(messages[0].0, 42);
        let code = code_from_text(&messages[0].1);
        assert_eq!(code.len(), 6);

        let identity = verify_code_login(&challenge_id, &code)
            .await
            .expect("correct code should verify");
        assert_eq!(identity.telegram_id, 42);
    }

    #[tokio::test]
    #[serial]
    async fn test_start_rejects_zero_chat_id() {
        let result = start_code_login(0).await;
        assert!(matches!(result, Err(CodeFlowError::Validation(_))));
    }

    #[tokio::test]
    #[serial]
    async fn test_relay_failure_rolls_back_challenge() {
        init_test_environment().await;

        register_message_relay(RecordingRelay::failing()).await;

        let before = LOGIN_CHALLENGES.lock().await.len();
        let result = start_code_login(42).await;

        assert!(matches!(result, Err(CodeFlowError::Relay(_))));
        assert_eq!(
            LOGIN_CHALLENGES.lock().await.len(),
            before,
            "no challenge may survive a failed delivery"
        );
    }

    #[tokio::test]
    #[serial]
    async fn test_wrong_code_keeps_challenge_alive() {
        init_test_environment().await;

        let (relay, sent) = RecordingRelay::working();
        register_message_relay(relay).await;

        let challenge_id = start_code_login(42).await.expect("start should succeed");
        let messages = sent.lock().expect("relay state lock poisoned").clone();
        let code = code_from_text(&messages[0].1);
        let wrong = if code == "000000" { "000001" } else { "000000" };

        // Wrong guess is InvalidCode, not ChallengeNotFound
        assert!(matches!(
            verify_code_login(&challenge_id, wrong).await,
            Err(CodeFlowError::InvalidCode)
        ));

        // And the challenge is still redeemable with the right code
        let identity = verify_code_login(&challenge_id, &code)
            .await
            .expect("retry with the correct code should verify");
        assert_eq!(identity.telegram_id, 42);
    }

    #[tokio::test]
    #[serial]
    async fn test_challenge_is_single_use_on_success() {
        init_test_environment().await;

        let (relay, sent) = RecordingRelay::working();
        register_message_relay(relay).await;

        let challenge_id = start_code_login(42).await.expect("start should succeed");
        let messages = sent.lock().expect("relay state lock poisoned").clone();
        let code = code_from_text(&messages[0].1);

        verify_code_login(&challenge_id, &code)
            .await
            .expect("first redemption should succeed");

        assert!(matches!(
            verify_code_login(&challenge_id, &code).await,
            Err(CodeFlowError::ChallengeNotFound)
        ));
    }

    #[tokio::test]
    #[serial]
    async fn test_verify_unknown_challenge() {
        assert!(matches!(
            verify_code_login("no-such-challenge", "123456").await,
            Err(CodeFlowError::ChallengeNotFound)
        ));
    }

    #[test]
    fn test_gen_login_code_shape() {
        for _ in 0..256 {
            let code = gen_login_code();
            assert_eq!(code.len(), 6);
            assert!(code.chars().all(|c| c.is_ascii_digit()));
        }
    }
}
