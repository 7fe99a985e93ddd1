mod challenge_store;
mod data_store;
mod errors;
mod schema_validation;

pub async fn init() -> Result<(), errors::StorageError> {
    let _ = *data_store::GENERIC_DATA_STORE;
    let _ = *challenge_store::LOGIN_CHALLENGES;

    Ok(())
}

pub(crate) use challenge_store::{
    Challenge, CodeChallenge, LOGIN_CHALLENGE_TTL_SECS, LOGIN_CHALLENGES, PhoneChallenge,
};
pub(crate) use data_store::{DB_TABLE_USERS, GENERIC_DATA_STORE};
pub use data_store::DataStore;

// Re-export schema validation functions for internal use
pub(crate) use schema_validation::{validate_postgres_table_schema, validate_sqlite_table_schema};
