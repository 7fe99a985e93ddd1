use std::sync::LazyLock;

/// Maximum accepted age of a widget payload's `auth_date`, in seconds.
/// Default: 86400 (one day).
pub(crate) static TELEGRAM_AUTH_MAX_AGE: LazyLock<i64> = LazyLock::new(|| {
    std::env::var("TELEGRAM_AUTH_MAX_AGE")
        .ok()
        .and_then(|s| s.parse().ok())
        .unwrap_or(86400)
});
