use std::sync::LazyLock;

/// MTProto application id. Zero means the phone flow is not available.
pub(super) static TELEGRAM_API_ID: LazyLock<i64> = LazyLock::new(|| {
    std::env::var("TELEGRAM_API_ID")
        .ok()
        .and_then(|s| s.parse().ok())
        .unwrap_or(0)
});

/// MTProto application hash, paired with [`TELEGRAM_API_ID`].
pub(super) static TELEGRAM_API_HASH: LazyLock<String> =
    LazyLock::new(|| std::env::var("TELEGRAM_API_HASH").unwrap_or_default());

/// True when both protocol credentials are configured.
pub(super) fn protocol_credentials_configured() -> bool {
    *TELEGRAM_API_ID != 0 && !TELEGRAM_API_HASH.is_empty()
}
