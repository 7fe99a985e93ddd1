mod errors;
mod login;
mod types;
mod user;

pub use errors::CoordinationError;
pub use login::{
    login_with_widget, start_code_login, start_phone_login, verify_code_login,
    verify_phone_login,
};
pub use types::StartedLogin;
pub use user::{assign_admin, get_user_from_token};
