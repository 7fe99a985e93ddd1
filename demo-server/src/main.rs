//! Minimal server exposing the telegram-login endpoints.
//!
//! Serves the login routes under `TELEGRAM_LOGIN_ROUTE_PREFIX` plus a
//! `/health` probe. No protocol client is registered here, so the phone flow
//! answers 502; a real deployment registers its MTProto client through
//! `telegram_login::register_protocol_client` before serving.

use axum::{Json, Router, routing::get};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

use telegram_login_axum::{TELEGRAM_LOGIN_ROUTE_PREFIX, telegram_login_router};

fn init_tracing(app_name: &str) {
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        #[cfg(debug_assertions)]
        {
            format!("telegram_login_axum=trace,telegram_login=trace,{app_name}=trace,info")
                .into()
        }

        #[cfg(not(debug_assertions))]
        {
            "info".into()
        }
    });

    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer())
        .init();
}

async fn health() -> Json<serde_json::Value> {
    Json(serde_json::json!({"status": "ok"}))
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();
    init_tracing("demo_server");
    telegram_login_axum::init().await?;

    let app = Router::new()
        .route("/health", get(health))
        .nest(TELEGRAM_LOGIN_ROUTE_PREFIX.as_str(), telegram_login_router());

    let host = std::env::var("APP_HOST").unwrap_or_else(|_| "0.0.0.0".to_string());
    let port = std::env::var("APP_PORT").unwrap_or_else(|_| "8000".to_string());
    let addr = format!("{host}:{port}");

    tracing::info!("Starting server on http://{}", addr);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;
    Ok(())
}
