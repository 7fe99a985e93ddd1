use crate::userdb::TelegramIdentity;

/// Result of the protocol client's send-code step.
///
/// `client_session` is the client's resumable state, serialized to a string.
/// It is stored in the challenge and handed back on verify, never inspected.
#[derive(Debug, Clone, PartialEq)]
pub struct SentCode {
    pub client_session: String,
    pub phone_code_hash: String,
}

/// Outcome of submitting a verification code (and optional password).
#[derive(Debug, Clone, PartialEq)]
pub enum SignInOutcome {
    SignedIn(TelegramIdentity),
    InvalidCode,
    ExpiredCode,
    PasswordRequired,
}
