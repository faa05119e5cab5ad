//! SQLite error mapping.
//!
//! Maps `tokio_rusqlite::Error` to `RepositoryError`, turning constraint
//! violations and empty results into their semantic variants.

use arena_core::storage::RepositoryError;
use rusqlite::ffi;

/// Maps a rusqlite error raised while operating on the entity `id`.
///
/// # Error Mapping
///
/// - `SQLITE_CONSTRAINT_UNIQUE` / `SQLITE_CONSTRAINT_PRIMARYKEY` → `AlreadyExists`
/// - `SQLITE_CONSTRAINT_FOREIGNKEY` → `InvalidData`
/// - `QueryReturnedNoRows` → `NotFound`
/// - `CannotOpen` → `ConnectionFailed`
/// - All other errors → `QueryFailed`
fn map_rusqlite_error(err: &rusqlite::Error, entity_type: &'static str, id: &str) -> RepositoryError {
    match err {
        rusqlite::Error::SqliteFailure(sqlite_err, _)
            if sqlite_err.extended_code == ffi::SQLITE_CONSTRAINT_UNIQUE
                || sqlite_err.extended_code == ffi::SQLITE_CONSTRAINT_PRIMARYKEY =>
        {
            RepositoryError::already_exists(entity_type, id)
        }

        rusqlite::Error::SqliteFailure(sqlite_err, _)
            if sqlite_err.extended_code == ffi::SQLITE_CONSTRAINT_FOREIGNKEY =>
        {
            RepositoryError::InvalidData(format!(
                "Foreign key constraint violation for {entity_type}"
            ))
        }

        rusqlite::Error::SqliteFailure(sqlite_err, _)
            if sqlite_err.code == rusqlite::ErrorCode::CannotOpen =>
        {
            RepositoryError::ConnectionFailed(format!("Cannot open database: {err}"))
        }

        rusqlite::Error::QueryReturnedNoRows => RepositoryError::not_found(entity_type, id),

        rusqlite::Error::FromSqlConversionFailure(..) => {
            RepositoryError::Serialization(err.to_string())
        }

        _ => RepositoryError::QueryFailed(err.to_string()),
    }
}

/// Maps a tokio_rusqlite error for an operation on a single entity.
pub fn map_tokio_rusqlite_error_with_id(
    err: tokio_rusqlite::Error,
    entity_type: &'static str,
    id: impl Into<String>,
) -> RepositoryError {
    let id = id.into();
    match &err {
        tokio_rusqlite::Error::Rusqlite(rusqlite_err) => {
            map_rusqlite_error(rusqlite_err, entity_type, &id)
        }
        tokio_rusqlite::Error::ConnectionClosed | tokio_rusqlite::Error::Close(_) => {
            RepositoryError::ConnectionFailed("Connection closed unexpectedly".to_string())
        }
        _ => RepositoryError::QueryFailed(err.to_string()),
    }
}

/// Maps a tokio_rusqlite error for an operation spanning many entities.
pub fn map_tokio_rusqlite_error(
    err: tokio_rusqlite::Error,
    entity_type: &'static str,
) -> RepositoryError {
    map_tokio_rusqlite_error_with_id(err, entity_type, "unknown")
}
