//! Umbrella error for the coordination layer.
//!
//! Per-module errors converge here through `From` impls that log once at the
//! conversion boundary: caller mistakes at debug, upstream failures at error.

use thiserror::Error;

use crate::botcode::CodeFlowError;
use crate::phone::PhoneFlowError;
use crate::session::SessionError;
use crate::userdb::UserError;
use crate::utils::UtilError;

/// Errors surfaced by the login flows and user operations.
///
/// Display strings are the client-facing detail; the HTTP layer maps each
/// variant to a status code.
#[derive(Debug, Error)]
pub enum CoordinationError {
    /// Bad proof: failed signature, wrong/expired code, invalid token.
    #[error("{0}")]
    Authentication(String),

    /// Absent, expired and consumed challenges, reported identically.
    #[error("Login challenge not found or expired")]
    ChallengeNotFound,

    /// Caller input rejected before any side effect.
    #[error("{0}")]
    Validation(String),

    /// The message relay or protocol client failed, not the caller.
    #[error("Upstream service unavailable: {0}")]
    UpstreamUnavailable(String),

    /// The account has a two-factor password; resubmit the same challenge
    /// with it.
    #[error("Two-factor password required")]
    SecondaryFactorRequired,

    #[error("Admin access required")]
    AdminPrivilegeRequired,

    #[error("Target user not found")]
    TargetUserNotFound,

    #[error("Database error: {0}")]
    Database(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl CoordinationError {
    /// Log the error at a level matching its class and return self, for
    /// chaining at the point an error is first constructed.
    pub fn log(self) -> Self {
        match &self {
            Self::Authentication(detail) => tracing::debug!("Authentication failed: {}", detail),
            Self::ChallengeNotFound => tracing::debug!("Login challenge not found or expired"),
            Self::Validation(detail) => tracing::debug!("Validation failed: {}", detail),
            Self::UpstreamUnavailable(detail) => {
                tracing::error!("Upstream service unavailable: {}", detail)
            }
            Self::SecondaryFactorRequired => {
                tracing::debug!("Two-factor password required to continue login")
            }
            Self::AdminPrivilegeRequired => tracing::debug!("Admin access required"),
            Self::TargetUserNotFound => tracing::debug!("Target user not found"),
            Self::Database(detail) => tracing::error!("Database error: {}", detail),
            Self::Internal(detail) => tracing::error!("Internal error: {}", detail),
        }
        self
    }
}

impl From<UserError> for CoordinationError {
    fn from(err: UserError) -> Self {
        Self::Database(err.to_string()).log()
    }
}

impl From<SessionError> for CoordinationError {
    fn from(err: SessionError) -> Self {
        match err {
            SessionError::InvalidToken => Self::Authentication("Invalid token".to_string()).log(),
            SessionError::TokenCreation(detail) => Self::Internal(detail).log(),
        }
    }
}

impl From<UtilError> for CoordinationError {
    fn from(err: UtilError) -> Self {
        Self::Internal(err.to_string()).log()
    }
}

impl From<CodeFlowError> for CoordinationError {
    fn from(err: CodeFlowError) -> Self {
        match err {
            CodeFlowError::Validation(detail) => Self::Validation(detail),
            CodeFlowError::ChallengeNotFound => Self::ChallengeNotFound,
            CodeFlowError::InvalidCode => Self::Authentication("Invalid code".to_string()),
            CodeFlowError::Relay(relay) => Self::UpstreamUnavailable(relay.to_string()),
            CodeFlowError::Util(util) => Self::Internal(util.to_string()),
        }
        .log()
    }
}

impl From<PhoneFlowError> for CoordinationError {
    fn from(err: PhoneFlowError) -> Self {
        match err {
            PhoneFlowError::Validation(detail) => Self::Validation(detail),
            PhoneFlowError::ChallengeNotFound => Self::ChallengeNotFound,
            PhoneFlowError::InvalidCode => Self::Authentication("Invalid code".to_string()),
            PhoneFlowError::ExpiredCode => Self::Authentication("Code expired".to_string()),
            PhoneFlowError::PasswordRequired => Self::SecondaryFactorRequired,
            PhoneFlowError::Protocol(protocol) => Self::UpstreamUnavailable(protocol.to_string()),
            PhoneFlowError::Util(util) => Self::Internal(util.to_string()),
        }
        .log()
    }
}
