use thiserror::Error;

/// Error type covering every failure surfaced by this crate.
///
/// Engine failures (malformed SQL, constraint violations, type mismatches,
/// I/O) pass through transparently; the remaining variants distinguish the
/// connect/close phase from statement dispatch.
#[derive(Debug, Error)]
pub enum SqliteDispatchError {
    #[error(transparent)]
    SqliteError(#[from] rusqlite::Error),

    #[error("Connection error: {0}")]
    ConnectionError(String),

    #[error("SQL execution error: {0}")]
    ExecutionError(String),
}
