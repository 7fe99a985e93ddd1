//! Axum endpoints for the telegram-login library.
//!
//! Mount [`telegram_login_router`] under [`TELEGRAM_LOGIN_ROUTE_PREFIX`] and
//! every login flow, the authenticated `/user/me` endpoint and the admin
//! assignment endpoint are served. [`AuthUser`] is the bearer-token
//! extractor for the embedding application's own protected routes.

mod admin;
mod auth;
mod error;
mod router;
mod session;
mod user;

pub use router::{telegram_login_router, telegram_login_router_no_trace};
pub use session::AuthUser;

// Re-exported so embedders only need this crate for the common path.
pub use telegram_login::{TELEGRAM_LOGIN_ROUTE_PREFIX, init};
