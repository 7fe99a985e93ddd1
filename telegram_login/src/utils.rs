use base64::{Engine as _, engine::general_purpose::URL_SAFE_NO_PAD};
use ring::rand::SecureRandom;

use thiserror::Error;

#[derive(Debug, Error, Clone)]
pub enum UtilError {
    #[error("Crypto error: {0}")]
    Crypto(String),
}

/// Generate a URL-safe random string from `len` bytes of CSPRNG output.
///
/// The output is base64url (no padding) encoded, so the string is longer
/// than `len`; 32 input bytes give 43 characters and 256 bits of entropy.
pub fn gen_random_string(len: usize) -> Result<String, UtilError> {
    let rng = ring::rand::SystemRandom::new();
    let mut bytes = vec![0u8; len];
    rng.fill(&mut bytes)
        .map_err(|_| UtilError::Crypto("Failed to generate random string".to_string()))?;
    Ok(URL_SAFE_NO_PAD.encode(bytes))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_gen_random_string_length() {
        // 32 bytes of entropy encode to ceil(32 * 4 / 3) = 43 characters without padding
        let s = gen_random_string(32).expect("random generation should succeed");
        assert_eq!(s.len(), 43);
    }

    #[test]
    fn test_gen_random_string_is_url_safe() {
        let s = gen_random_string(64).expect("random generation should succeed");
        assert!(
            s.chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_'),
            "base64url output must not contain '+', '/' or '='"
        );
    }

    #[test]
    fn test_gen_random_string_unique() {
        let a = gen_random_string(32).expect("random generation should succeed");
        let b = gen_random_string(32).expect("random generation should succeed");
        assert_ne!(a, b, "two 256-bit random strings must not collide");
    }
}
