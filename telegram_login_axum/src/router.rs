//! Combined router for all login endpoints.

use axum::Router;
use tower_http::LatencyUnit;
use tower_http::trace::{DefaultMakeSpan, DefaultOnRequest, DefaultOnResponse, TraceLayer};
use tracing::Level;

/// Router serving every telegram-login endpoint, with HTTP tracing.
///
/// Mount it once, typically at `TELEGRAM_LOGIN_ROUTE_PREFIX`:
/// - `POST {prefix}/telegram` - widget login
/// - `POST {prefix}/telegram/code/{start,verify}` - bot-code login
/// - `POST {prefix}/telegram/phone/{start,verify}` - phone login
/// - `GET  {prefix}/user/me` - authenticated profile
/// - `POST {prefix}/admin/assign/{telegram_id}` - grant admin
pub fn telegram_login_router() -> Router {
    telegram_login_router_no_trace().layer(
        TraceLayer::new_for_http()
            .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
            .on_request(DefaultOnRequest::new().level(Level::INFO))
            .on_response(
                DefaultOnResponse::new()
                    .level(Level::INFO)
                    .latency_unit(LatencyUnit::Millis),
            ),
    )
}

/// Same endpoints without the tracing middleware, for applications that
/// bring their own.
pub fn telegram_login_router_no_trace() -> Router {
    Router::new()
        .merge(super::auth::router())
        .nest("/user", super::user::router())
        .nest("/admin", super::admin::router())
}
