//! Offline verification of Telegram login-widget payloads.
//!
//! The widget signs every payload with HMAC-SHA256, keyed by the SHA-256
//! digest of the bot token. Verification is a pure function of the payload
//! and the current time, failing closed on any missing precondition.

use hmac::{Hmac, Mac};
use sha2::{Digest, Sha256};
use subtle::ConstantTimeEq;

use super::config::TELEGRAM_AUTH_MAX_AGE;
use super::types::WidgetPayload;
use crate::config::TELEGRAM_BOT_TOKEN;

type HmacSha256 = Hmac<Sha256>;

/// Check a widget payload against the configured bot token.
///
/// Returns `false` when the token is unconfigured, the payload is missing
/// its `hash` or `auth_date`, the payload is older than
/// `TELEGRAM_AUTH_MAX_AGE`, or the signature does not match. Payloads dated
/// in the future are accepted; only staleness is rejected.
pub fn verify_widget_payload(payload: &WidgetPayload) -> bool {
    verify_with_secret(
        payload,
        TELEGRAM_BOT_TOKEN.as_str(),
        *TELEGRAM_AUTH_MAX_AGE,
        chrono::Utc::now().timestamp(),
    )
}

pub(crate) fn verify_with_secret(
    payload: &WidgetPayload,
    bot_token: &str,
    max_age_secs: i64,
    now: i64,
) -> bool {
    if bot_token.is_empty() {
        tracing::debug!("Widget payload rejected: bot token not configured");
        return false;
    }
    if payload.hash.is_empty() || payload.auth_date == 0 {
        tracing::debug!("Widget payload rejected: hash or auth_date missing");
        return false;
    }
    if now - payload.auth_date > max_age_secs {
        tracing::debug!("Widget payload rejected: auth_date too old");
        return false;
    }

    let expected = signature_bytes(bot_token, &data_check_string(payload));
    // Accepting either hex case; decoding keeps the comparison byte-exact
    // and constant-time over the digest itself.
    match hex::decode(&payload.hash) {
        Ok(submitted) => expected.as_slice().ct_eq(&submitted).into(),
        Err(_) => false,
    }
}

/// Canonical serialization the widget signature covers: every non-null field
/// except `hash`, sorted by field name, rendered `key=value`, joined by `\n`.
pub(crate) fn data_check_string(payload: &WidgetPayload) -> String {
    let mut fields: Vec<(&str, String)> = vec![
        ("id", payload.id.to_string()),
        ("auth_date", payload.auth_date.to_string()),
    ];
    if let Some(first_name) = &payload.first_name {
        fields.push(("first_name", first_name.clone()));
    }
    if let Some(last_name) = &payload.last_name {
        fields.push(("last_name", last_name.clone()));
    }
    if let Some(username) = &payload.username {
        fields.push(("username", username.clone()));
    }
    if let Some(photo_url) = &payload.photo_url {
        fields.push(("photo_url", photo_url.clone()));
    }
    fields.sort_by(|a, b| a.0.cmp(b.0));

    fields
        .iter()
        .map(|(key, value)| format!("{key}={value}"))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Lowercase hex signature for a check string, as the widget would send it.
pub(crate) fn compute_widget_hash(bot_token: &str, check_string: &str) -> String {
    hex::encode(signature_bytes(bot_token, check_string))
}

fn signature_bytes(bot_token: &str, check_string: &str) -> Vec<u8> {
    let secret_key = Sha256::digest(bot_token.as_bytes());
    let mut mac =
        HmacSha256::new_from_slice(&secret_key).expect("HMAC can take key of any size");
    mac.update(check_string.as_bytes());
    mac.finalize().into_bytes().to_vec()
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    const MAX_AGE: i64 = 86400;

    fn signed_payload(bot_token: &str, auth_date: i64) -> WidgetPayload {
        let mut payload = WidgetPayload {
            id: 42,
            first_name: Some("Ann".to_string()),
            last_name: None,
            username: None,
            photo_url: None,
            auth_date,
            hash: String::new(),
        };
        payload.hash = compute_widget_hash(bot_token, &data_check_string(&payload));
        payload
    }

    #[test]
    fn test_valid_payload_verifies() {
        let now = 1_700_000_000;
        let payload = signed_payload("tok", now);

        assert!(verify_with_secret(&payload, "tok", MAX_AGE, now));
    }

    #[test]
    fn test_mutated_field_fails() {
        let now = 1_700_000_000;
        let mut payload = signed_payload("tok", now);
        payload.first_name = Some("Bob".to_string());

        assert!(!verify_with_secret(&payload, "tok", MAX_AGE, now));
    }

    #[test]
    fn test_every_field_participates_in_signature() {
        let now = 1_700_000_000;
        let mut signed = WidgetPayload {
            id: 7,
            first_name: Some("Ann".to_string()),
            last_name: Some("Lee".to_string()),
            username: Some("ann_lee".to_string()),
            photo_url: Some("https://t.me/i/userpic/320/ann.jpg".to_string()),
            auth_date: now,
            hash: String::new(),
        };
        signed.hash = compute_widget_hash("tok", &data_check_string(&signed));
        assert!(verify_with_secret(&signed, "tok", MAX_AGE, now));

        let mutations: Vec<Box<dyn Fn(&mut WidgetPayload)>> = vec![
            Box::new(|p| p.id += 1),
            Box::new(|p| p.first_name = Some("Axn".to_string())),
            Box::new(|p| p.last_name = None),
            Box::new(|p| p.username = Some("ann_lee2".to_string())),
            Box::new(|p| p.photo_url = Some("https://example.com/x.jpg".to_string())),
            Box::new(|p| p.auth_date += 1),
        ];

        for (i, mutate) in mutations.iter().enumerate() {
            let mut tampered = signed.clone();
            mutate(&mut tampered);
            assert!(
                !verify_with_secret(&tampered, "tok", MAX_AGE, now),
                "mutation {i} should invalidate the signature"
            );
        }
    }

    #[test]
    fn test_unconfigured_token_fails_closed() {
        let now = 1_700_000_000;
        // Signed under the empty token; verification must still refuse
        let payload = signed_payload("", now);

        assert!(!verify_with_secret(&payload, "", MAX_AGE, now));
    }

    #[test]
    fn test_missing_hash_or_auth_date_fails() {
        let now = 1_700_000_000;

        let mut no_hash = signed_payload("tok", now);
        no_hash.hash = String::new();
        assert!(!verify_with_secret(&no_hash, "tok", MAX_AGE, now));

        let mut epoch_dated = signed_payload("tok", 0);
        epoch_dated.hash =
            compute_widget_hash("tok", &data_check_string(&epoch_dated));
        assert!(!verify_with_secret(&epoch_dated, "tok", MAX_AGE, now));
    }

    #[test]
    fn test_stale_payload_fails_despite_valid_signature() {
        let now = 1_700_000_000;
        let payload = signed_payload("tok", now - MAX_AGE - 1);

        assert!(!verify_with_secret(&payload, "tok", MAX_AGE, now));
    }

    #[test]
    fn test_payload_at_exact_max_age_still_verifies() {
        let now = 1_700_000_000;
        let payload = signed_payload("tok", now - MAX_AGE);

        assert!(verify_with_secret(&payload, "tok", MAX_AGE, now));
    }

    #[test]
    fn test_future_dated_payload_verifies() {
        let now = 1_700_000_000;
        let payload = signed_payload("tok", now + 1000);

        assert!(verify_with_secret(&payload, "tok", MAX_AGE, now));
    }

    #[test]
    fn test_hash_hex_case_is_insensitive() {
        let now = 1_700_000_000;
        let mut payload = signed_payload("tok", now);
        payload.hash = payload.hash.to_uppercase();

        assert!(verify_with_secret(&payload, "tok", MAX_AGE, now));
    }

    #[test]
    fn test_non_hex_hash_fails() {
        let now = 1_700_000_000;
        let mut payload = signed_payload("tok", now);
        payload.hash = "not-hex-at-all".to_string();

        assert!(!verify_with_secret(&payload, "tok", MAX_AGE, now));
    }

    #[test]
    fn test_truncated_hash_fails() {
        let now = 1_700_000_000;
        let mut payload = signed_payload("tok", now);
        payload.hash.truncate(32);

        assert!(!verify_with_secret(&payload, "tok", MAX_AGE, now));
    }

    #[test]
    fn test_wrong_secret_fails() {
        let now = 1_700_000_000;
        let payload = signed_payload("tok", now);

        assert!(!verify_with_secret(&payload, "other-token", MAX_AGE, now));
    }

    #[test]
    fn test_data_check_string_is_sorted_and_skips_null_fields() {
        let payload = WidgetPayload {
            id: 42,
            first_name: Some("Ann".to_string()),
            last_name: None,
            username: Some("ann42".to_string()),
            photo_url: None,
            auth_date: 1_700_000_000,
            hash: "ignored".to_string(),
        };

        assert_eq!(
            data_check_string(&payload),
            "auth_date=1700000000\nfirst_name=Ann\nid=42\nusername=ann42"
        );
    }

    #[test]
    fn test_data_check_string_has_no_trailing_newline() {
        let payload = WidgetPayload {
            id: 1,
            first_name: None,
            last_name: None,
            username: None,
            photo_url: None,
            auth_date: 2,
            hash: String::new(),
        };

        assert_eq!(data_check_string(&payload), "auth_date=2\nid=1");
    }

    proptest! {
        /// Any payload signed with the right token verifies, and any
        /// single-field mutation afterwards does not.
        #[test]
        fn test_sign_verify_roundtrip_and_tamper(
            id in 1..i64::MAX / 2,
            first_name in proptest::option::of("[a-zA-Z0-9 ]{1,24}"),
            username in proptest::option::of("[a-z0-9_]{1,24}"),
            bot_token in "[a-zA-Z0-9:_-]{8,48}",
        ) {
            let now = 1_700_000_000;
            let mut payload = WidgetPayload {
                id,
                first_name,
                last_name: None,
                username,
                photo_url: None,
                auth_date: now,
                hash: String::new(),
            };
            payload.hash = compute_widget_hash(&bot_token, &data_check_string(&payload));

            prop_assert!(verify_with_secret(&payload, &bot_token, MAX_AGE, now));

            let mut tampered = payload.clone();
            tampered.id += 1;
            prop_assert!(!verify_with_secret(&tampered, &bot_token, MAX_AGE, now));
        }
    }
}
