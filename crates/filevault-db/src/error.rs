//! Error types for metadata database operations

/// Errors surfaced by the metadata repositories.
///
/// `Unavailable` covers faults where the database could not be reached at
/// all; everything else is a `Query` error.
#[derive(Debug, thiserror::Error)]
pub enum DbError {
    #[error("Metadata database unavailable: {0}")]
    Unavailable(#[source] sqlx::Error),

    #[error("Error executing database query: {0}")]
    Query(#[source] sqlx::Error),
}

impl DbError {
    /// Returns `true` if the database could not be reached.
    pub fn is_connection_error(&self) -> bool {
        matches!(self, DbError::Unavailable(_))
    }
}

/// Classify a `sqlx` error as a connectivity fault.
///
/// The following errors count as connectivity faults:
/// - `sqlx::Error::Io`: a network issue or a closed socket.
/// - `sqlx::Error::Tls`: the TLS handshake failed.
/// - `sqlx::Error::PoolTimedOut`: no connection became free within the acquire timeout.
/// - `sqlx::Error::PoolClosed`: the pool was closed while an operation was pending.
/// - `sqlx::Error::WorkerCrashed`: the connection's background worker died.
pub fn is_connection_error(err: &sqlx::Error) -> bool {
    matches!(
        err,
        sqlx::Error::Io(_)
            | sqlx::Error::Tls(_)
            | sqlx::Error::PoolTimedOut
            | sqlx::Error::PoolClosed
            | sqlx::Error::WorkerCrashed
    )
}

impl From<sqlx::Error> for DbError {
    fn from(err: sqlx::Error) -> Self {
        if is_connection_error(&err) {
            DbError::Unavailable(err)
        } else {
            DbError::Query(err)
        }
    }
}

pub type DbResult<T> = Result<T, DbError>;
