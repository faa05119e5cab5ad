//! Status codes for repository failures.
//!
//! Handlers surface storage errors unchanged; this is the single place that
//! decides which HTTP status each one becomes.

use super::RepositoryError;

/// Maps a [`RepositoryError`] to an HTTP status code.
///
/// - `NotFound` -> 404
/// - `AlreadyExists` -> 409
/// - `ConnectionFailed` -> 503, the store is down and the request may be retried
/// - `QueryFailed`, `Serialization` -> 500
/// - `InvalidData` -> 400, e.g. a tournament naming a game that does not exist
///
/// # Examples
///
/// ```
/// use arena_core::storage::{RepositoryError, repository_error_to_status_code};
///
/// let error = RepositoryError::not_found("game", "abc-123");
/// assert_eq!(repository_error_to_status_code(&error), 404);
/// ```
pub fn repository_error_to_status_code(error: &RepositoryError) -> u16 {
    match error {
        RepositoryError::NotFound { .. } => 404,
        RepositoryError::AlreadyExists { .. } => 409,
        RepositoryError::ConnectionFailed(_) => 503,
        RepositoryError::QueryFailed(_) | RepositoryError::Serialization(_) => 500,
        RepositoryError::InvalidData(_) => 400,
    }
}
