mod config;
mod errors;
mod token;
mod types;

pub use errors::SessionError;
pub use types::TokenResponse;

pub(crate) use token::{issue_session_token, validate_session_token};
