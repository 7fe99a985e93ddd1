use thiserror::Error;

#[derive(Debug, Error, Clone)]
pub enum SessionError {
    /// Signing failed; never caused by caller input.
    #[error("Failed to create session token: {0}")]
    TokenCreation(String),

    /// One variant for every validation failure. Expired, tampered and
    /// malformed tokens are deliberately indistinguishable to callers.
    #[error("Invalid or expired session token")]
    InvalidToken,
}
