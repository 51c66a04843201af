/// Failure of a Postgres-backed store: files, chat messages, friendships,
/// annotations or extraction rows.
#[derive(Debug, thiserror::Error)]
pub enum RepositoryError {
    #[error("database unreachable: {0}")]
    ConnectionFailed(String),
    #[error("database query failed: {0}")]
    QueryFailed(String),
    #[error("row rejected by a table constraint: {0}")]
    ConstraintViolation(String),
}
