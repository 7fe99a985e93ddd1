mod config;
mod types;
mod verify;

pub use types::WidgetPayload;
pub use verify::verify_widget_payload;

pub(crate) use verify::{compute_widget_hash, data_check_string};
