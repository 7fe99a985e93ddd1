use std::env;
use std::sync::LazyLock;

use jsonwebtoken::Algorithm;

/// Secret used to sign session tokens. Required; there is no fallback value.
pub(super) static JWT_SECRET: LazyLock<Vec<u8>> =
    LazyLock::new(|| env::var("JWT_SECRET").expect("JWT_SECRET must be set").into_bytes());

/// Signing algorithm for session tokens. HMAC family only, since the same
/// shared secret is used for signing and validation. Default: HS256.
pub(super) static JWT_ALGORITHM: LazyLock<Algorithm> = LazyLock::new(|| {
    let name = env::var("JWT_ALGORITHM").unwrap_or_else(|_| "HS256".to_string());
    match name.as_str() {
        "HS256" => Algorithm::HS256,
        "HS384" => Algorithm::HS384,
        "HS512" => Algorithm::HS512,
        other => panic!("Unsupported JWT_ALGORITHM: {other}. Supported: HS256, HS384, HS512"),
    }
});

/// Session token lifetime in seconds. Default: 2592000 (30 days).
pub(super) static JWT_EXPIRE_SECONDS: LazyLock<i64> = LazyLock::new(|| {
    env::var("JWT_EXPIRE_SECONDS")
        .ok()
        .and_then(|s| s.parse().ok())
        .unwrap_or(2_592_000)
});
