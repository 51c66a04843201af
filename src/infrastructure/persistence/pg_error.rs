use crate::application::ports::RepositoryError;

/// Maps a driver error, keeping constraint violations distinguishable.
pub(crate) fn query_error(error: sqlx::Error) -> RepositoryError {
    if let Some(db_error) = error.as_database_error() {
        if db_error.is_unique_violation()
            || db_error.is_foreign_key_violation()
            || db_error.is_check_violation()
        {
            return RepositoryError::ConstraintViolation(db_error.message().to_string());
        }
    }
    RepositoryError::QueryFailed(error.to_string())
}
