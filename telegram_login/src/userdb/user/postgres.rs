use sqlx::{Pool, Postgres};

use crate::storage::{DB_TABLE_USERS, validate_postgres_table_schema};
use crate::userdb::{errors::UserError, types::User};

// PostgreSQL implementations
pub(super) async fn create_tables_postgres(pool: &Pool<Postgres>) -> Result<(), UserError> {
    let table_name = DB_TABLE_USERS.as_str();

    sqlx::query(&format!(
        r#"
        CREATE TABLE IF NOT EXISTS {table_name} (
            id TEXT PRIMARY KEY NOT NULL,
            telegram_id BIGINT NOT NULL UNIQUE,
            username TEXT,
            first_name TEXT,
            last_name TEXT,
            photo_url TEXT,
            is_admin BOOLEAN NOT NULL DEFAULT FALSE,
            created_at TIMESTAMPTZ NOT NULL,
            updated_at TIMESTAMPTZ NOT NULL
        )
        "#
    ))
    .execute(pool)
    .await
    .map_err(|e| UserError::Storage(e.to_string()))?;

    Ok(())
}

/// Validates that the users table schema matches what we expect
pub(super) async fn validate_user_tables_postgres(pool: &Pool<Postgres>) -> Result<(), UserError> {
    let users_table = DB_TABLE_USERS.as_str();

    let expected_columns = vec![
        ("id", "text"),
        ("telegram_id", "bigint"),
        ("username", "text"),
        ("first_name", "text"),
        ("last_name", "text"),
        ("photo_url", "text"),
        ("is_admin", "boolean"),
        ("created_at", "timestamp with time zone"),
        ("updated_at", "timestamp with time zone"),
    ];

    validate_postgres_table_schema(pool, users_table, &expected_columns, UserError::Storage).await
}

pub(super) async fn get_user_postgres(
    pool: &Pool<Postgres>,
    id: &str,
) -> Result<Option<User>, UserError> {
    let table_name = DB_TABLE_USERS.as_str();

    sqlx::query_as::<_, User>(&format!(
        r#"
        SELECT * FROM {table_name} WHERE id = $1
        "#
    ))
    .bind(id)
    .fetch_optional(pool)
    .await
    .map_err(|e| UserError::Storage(e.to_string()))
}

pub(super) async fn get_user_by_telegram_id_postgres(
    pool: &Pool<Postgres>,
    telegram_id: i64,
) -> Result<Option<User>, UserError> {
    let table_name = DB_TABLE_USERS.as_str();

    sqlx::query_as::<_, User>(&format!(
        r#"
        SELECT * FROM {table_name} WHERE telegram_id = $1
        "#
    ))
    .bind(telegram_id)
    .fetch_optional(pool)
    .await
    .map_err(|e| UserError::Storage(e.to_string()))
}

pub(super) async fn upsert_user_postgres(
    pool: &Pool<Postgres>,
    user: User,
) -> Result<User, UserError> {
    let table_name = DB_TABLE_USERS.as_str();
    let now = chrono::Utc::now();
    let mut updated_user = user;
    updated_user.updated_at = now;

    // One statement for both first sight and re-authentication. On conflict
    // the existing id and created_at stay untouched, the profile fields are
    // refreshed, and is_admin can only move from false to true.
    sqlx::query(&format!(
        r#"
        INSERT INTO {table_name}
            (id, telegram_id, username, first_name, last_name, photo_url, is_admin, created_at, updated_at)
        VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
        ON CONFLICT (telegram_id) DO UPDATE SET
            username = excluded.username,
            first_name = excluded.first_name,
            last_name = excluded.last_name,
            photo_url = excluded.photo_url,
            is_admin = {table_name}.is_admin OR excluded.is_admin,
            updated_at = excluded.updated_at
        "#
    ))
    .bind(&updated_user.id)
    .bind(updated_user.telegram_id)
    .bind(&updated_user.username)
    .bind(&updated_user.first_name)
    .bind(&updated_user.last_name)
    .bind(&updated_user.photo_url)
    .bind(updated_user.is_admin)
    .bind(updated_user.created_at)
    .bind(updated_user.updated_at)
    .execute(pool)
    .await
    .map_err(|e| UserError::Storage(e.to_string()))?;

    // Fetch the authoritative row; on conflict it kept its original id
    sqlx::query_as::<_, User>(&format!(
        r#"
        SELECT * FROM {table_name} WHERE telegram_id = $1
        "#
    ))
    .bind(updated_user.telegram_id)
    .fetch_one(pool)
    .await
    .map_err(|e| UserError::Storage(e.to_string()))
}

pub(super) async fn promote_admin_postgres(
    pool: &Pool<Postgres>,
    telegram_id: i64,
) -> Result<Option<User>, UserError> {
    let table_name = DB_TABLE_USERS.as_str();
    let now = chrono::Utc::now();

    let result = sqlx::query(&format!(
        r#"
        UPDATE {table_name} SET is_admin = TRUE, updated_at = $1 WHERE telegram_id = $2
        "#
    ))
    .bind(now)
    .bind(telegram_id)
    .execute(pool)
    .await
    .map_err(|e| UserError::Storage(e.to_string()))?;

    if result.rows_affected() == 0 {
        return Ok(None);
    }

    get_user_by_telegram_id_postgres(pool, telegram_id).await
}
