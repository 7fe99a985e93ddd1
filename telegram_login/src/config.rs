//! Central configuration for the telegram_login crate

use std::collections::HashSet;
use std::sync::LazyLock;

/// Route prefix for all telegram_login endpoints
///
/// This is the main prefix under which all authentication endpoints will be mounted.
/// Default: "/auth"
pub static TELEGRAM_LOGIN_ROUTE_PREFIX: LazyLock<String> = LazyLock::new(|| {
    std::env::var("TELEGRAM_LOGIN_ROUTE_PREFIX").unwrap_or_else(|_| "/auth".to_string())
});

/// Bot token shared with the Telegram Bot API
///
/// Doubles as the widget-signature secret (the signing key is SHA-256 of this
/// value) and as the credential for relaying one-time codes. An empty token
/// makes widget verification fail closed and code relaying error out.
pub(crate) static TELEGRAM_BOT_TOKEN: LazyLock<String> =
    LazyLock::new(|| std::env::var("TELEGRAM_BOT_TOKEN").unwrap_or_default());

/// Telegram ids that are granted admin on login
///
/// Comma-separated list of numeric ids; entries that do not parse are skipped
/// with a warning. Membership only ever promotes - admin status is never
/// revoked by a login.
pub(crate) static TELEGRAM_ADMIN_IDS: LazyLock<HashSet<i64>> = LazyLock::new(|| {
    parse_admin_ids(&std::env::var("TELEGRAM_ADMIN_IDS").unwrap_or_default())
});

fn parse_admin_ids(raw: &str) -> HashSet<i64> {
    raw.split(',')
        .map(str::trim)
        .filter(|part| !part.is_empty())
        .filter_map(|part| match part.parse::<i64>() {
            Ok(id) => Some(id),
            Err(_) => {
                tracing::warn!("Ignoring unparsable TELEGRAM_ADMIN_IDS entry: {}", part);
                None
            }
        })
        .collect()
}
