mod client;
mod config;
mod errors;
mod flow;
mod types;

pub use client::{ProtocolClient, register_protocol_client};
pub use errors::{PhoneFlowError, ProtocolError};
pub use types::{SentCode, SignInOutcome};

pub(crate) use flow::{start_phone_login, verify_phone_login};
