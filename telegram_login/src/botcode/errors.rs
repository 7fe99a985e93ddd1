use thiserror::Error;

use crate::utils::UtilError;

/// Failure of the external message-relay collaborator.
#[derive(Debug, Error, Clone)]
pub enum RelayError {
    /// The relay cannot be used at all, e.g. no bot token configured.
    #[error("Message relay not configured: {0}")]
    Misconfigured(String),

    /// The relay was reached but refused or failed to deliver.
    #[error("Message relay error: {0}")]
    Delivery(String),
}

#[derive(Debug, Error, Clone)]
pub enum CodeFlowError {
    #[error("Validation error: {0}")]
    Validation(String),

    /// Absent, expired and already-consumed challenges all land here.
    #[error("Login challenge not found or expired")]
    ChallengeNotFound,

    #[error("Invalid code")]
    InvalidCode,

    #[error(transparent)]
    Relay(#[from] RelayError),

    #[error(transparent)]
    Util(#[from] UtilError),
}
