//! Full-protocol phone login.
//!
//! `start` asks the registered protocol client to send a verification code
//! and parks the client's resumable session in a challenge; `verify` resumes
//! the client and submits the code. The session string is treated as an
//! opaque blob throughout.

use std::future::Future;
use std::time::Duration;

use chrono::{Duration as TtlDuration, Utc};

use super::client::current_client;
use super::config::protocol_credentials_configured;
use super::errors::{PhoneFlowError, ProtocolError};
use super::types::SignInOutcome;
use crate::storage::{
    Challenge, LOGIN_CHALLENGE_TTL_SECS, LOGIN_CHALLENGES, PhoneChallenge,
};
use crate::userdb::TelegramIdentity;
use crate::utils::gen_random_string;

/// Upper bound on a single protocol-client round trip. Code delivery over
/// MTProto can be slow, hence the generous window.
const PROTOCOL_CALL_TIMEOUT: Duration = Duration::from_secs(120);

/// Start a phone login. Returns the challenge id for the verify step.
pub(crate) async fn start_phone_login(phone: &str) -> Result<String, PhoneFlowError> {
    start_with_config(phone, protocol_credentials_configured()).await
}

pub(super) async fn start_with_config(
    phone: &str,
    credentials_configured: bool,
) -> Result<String, PhoneFlowError> {
    if phone.trim().is_empty() {
        return Err(PhoneFlowError::Validation(
            "phone must not be empty".to_string(),
        ));
    }
    if !credentials_configured {
        return Err(ProtocolError::Unavailable(
            "TELEGRAM_API_ID/TELEGRAM_API_HASH are not configured".to_string(),
        )
        .into());
    }
    let client = current_client().await.ok_or_else(|| {
        ProtocolError::Unavailable("no protocol client registered".to_string())
    })?;

    // No challenge exists yet, so a failure here leaves nothing to roll back.
    let sent = call_with_timeout(client.send_code(phone)).await?;

    let challenge_id = gen_random_string(32)?;
    let now = Utc::now();
    {
        let mut store = LOGIN_CHALLENGES.lock().await;
        store.sweep(now);
        store.put(
            challenge_id.clone(),
            Challenge::Phone(PhoneChallenge {
                phone: phone.to_string(),
                client_session: sent.client_session,
                phone_code_hash: sent.phone_code_hash,
                expires_at: now + TtlDuration::seconds(LOGIN_CHALLENGE_TTL_SECS),
            }),
        );
    }

    tracing::info!("Started phone login");
    Ok(challenge_id)
}

/// Submit the verification code (and optional two-factor password) for a
/// pending phone challenge.
///
/// The challenge is consumed by every outcome except "password required
/// without a password": that one re-admits it so the caller can resubmit the
/// same challenge id with the password instead of restarting the whole flow.
pub(crate) async fn verify_phone_login(
    challenge_id: &str,
    code: &str,
    password: Option<&str>,
) -> Result<TelegramIdentity, PhoneFlowError> {
    let now = Utc::now();
    let taken = {
        let mut store = LOGIN_CHALLENGES.lock().await;
        store.sweep(now);
        store.take(challenge_id, now)
    };

    let challenge = match taken {
        Some(Challenge::Phone(c)) => c,
        // A code challenge id submitted to the phone flow is reported exactly
        // like an unknown id, and put back untouched.
        Some(other @ Challenge::Code(_)) => {
            LOGIN_CHALLENGES
                .lock()
                .await
                .put(challenge_id.to_string(), other);
            return Err(PhoneFlowError::ChallengeNotFound);
        }
        None => return Err(PhoneFlowError::ChallengeNotFound),
    };

    let client = current_client().await.ok_or_else(|| {
        ProtocolError::Unavailable("no protocol client registered".to_string())
    })?;

    let outcome = call_with_timeout(client.resume_and_verify(
        &challenge.client_session,
        &challenge.phone,
        &challenge.phone_code_hash,
        code,
        password,
    ))
    .await?;

    match outcome {
        SignInOutcome::SignedIn(identity) => {
            tracing::info!("Phone login verified for telegram id {}", identity.telegram_id);
            Ok(identity)
        }
        SignInOutcome::InvalidCode => Err(PhoneFlowError::InvalidCode),
        SignInOutcome::ExpiredCode => Err(PhoneFlowError::ExpiredCode),
        SignInOutcome::PasswordRequired => {
            if password.is_none() {
                // Keep the attempt resumable: the user still has to produce
                // the password for this very sign-in.
                LOGIN_CHALLENGES
                    .lock()
                    .await
                    .put(challenge_id.to_string(), Challenge::Phone(challenge));
            }
            Err(PhoneFlowError::PasswordRequired)
        }
    }
}

async fn call_with_timeout<T>(
    call: impl Future<Output = Result<T, ProtocolError>>,
) -> Result<T, ProtocolError> {
    match tokio::time::timeout(PROTOCOL_CALL_TIMEOUT, call).await {
        Ok(result) => result,
        Err(_) => {
            tracing::error!("Protocol client call exceeded {:?}", PROTOCOL_CALL_TIMEOUT);
            Err(ProtocolError::Timeout)
        }
    }
}
