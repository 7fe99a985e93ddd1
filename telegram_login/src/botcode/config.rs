use std::sync::LazyLock;

/// Base URL of the Telegram Bot API.
///
/// Overridable so tests (and self-hosted Bot API deployments) can point the
/// relay at a different server. Default: `https://api.telegram.org`.
pub(super) static TELEGRAM_BOT_API_BASE: LazyLock<String> = LazyLock::new(|| {
    std::env::var("TELEGRAM_BOT_API_BASE")
        .unwrap_or_else(|_| "https://api.telegram.org".to_string())
});
