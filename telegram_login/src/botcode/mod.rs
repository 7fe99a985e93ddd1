mod config;
mod errors;
mod flow;
mod relay;

pub use errors::{CodeFlowError, RelayError};
pub use relay::{MessageRelay, register_message_relay};

pub(crate) use flow::{start_code_login, verify_code_login};
