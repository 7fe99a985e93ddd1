use thiserror::Error;

use crate::utils::UtilError;

/// Transport or configuration failure of the external protocol client.
///
/// Code/password outcomes are not errors at this layer; they come back as
/// [`super::types::SignInOutcome`] variants.
#[derive(Debug, Error, Clone)]
pub enum ProtocolError {
    #[error("Protocol client not available: {0}")]
    Unavailable(String),

    #[error("Protocol client error: {0}")]
    Client(String),

    #[error("Protocol client call timed out")]
    Timeout,
}

#[derive(Debug, Error, Clone)]
pub enum PhoneFlowError {
    #[error("Validation error: {0}")]
    Validation(String),

    /// Absent, expired and already-consumed challenges all land here.
    #[error("Login challenge not found or expired")]
    ChallengeNotFound,

    #[error("Invalid code")]
    InvalidCode,

    #[error("Code expired")]
    ExpiredCode,

    /// The account has a two-factor password; the caller must resubmit the
    /// same challenge with it.
    #[error("Two-factor password required")]
    PasswordRequired,

    #[error(transparent)]
    Protocol(#[from] ProtocolError),

    #[error(transparent)]
    Util(#[from] UtilError),
}
