//! Shared test initialization: loads `.env_test` once, resets the sqlite
//! test database file, and brings up the user store.

use std::sync::Once;

/// Centralized setup for tests that touch env-backed config or the database.
///
/// Environment loading runs once per process; store initialization is
/// idempotent and runs every call so tests cannot observe a missing table.
pub async fn init_test_environment() {
    static ENV_INIT: Once = Once::new();
    ENV_INIT.call_once(|| {
        if dotenvy::from_filename(".env_test").is_err() {
            dotenvy::dotenv().ok();
        }

        // Start from an empty database file; the pool connects lazily, so
        // removing it before first use is safe.
        if let Some(db_path) = extract_sqlite_file_path() {
            let _ = std::fs::remove_file(&db_path);
        }
    });

    if let Err(e) = crate::userdb::UserStore::init().await {
        eprintln!("Warning: failed to initialize UserStore: {e}");
    }
}

/// File path behind a `sqlite:` store URL, if the tests use a file-backed
/// database.
fn extract_sqlite_file_path() -> Option<String> {
    let url = std::env::var("GENERIC_DATA_STORE_URL").ok()?;
    let path = url.strip_prefix("sqlite:")?;
    let path = path.strip_prefix("//").unwrap_or(path);
    if path.starts_with(':') {
        // e.g. sqlite::memory:
        return None;
    }
    Some(path.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    #[tokio::test]
    #[serial]
    async fn test_init_is_idempotent() {
        init_test_environment().await;
        init_test_environment().await;

        assert!(std::env::var("GENERIC_DATA_STORE_TYPE").is_ok());
        assert!(std::env::var("JWT_SECRET").is_ok());
    }
}
