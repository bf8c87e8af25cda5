use std::fmt;
use std::future::Future;
use std::path::Path;
use std::pin::Pin;
use std::sync::Arc;
use std::task::{Context, Poll};

use rusqlite::Connection;
use tokio::sync::oneshot;

use crate::error::SqliteDispatchError;
use crate::params::convert_params;
use crate::results::ResultSet;
use crate::types::RowValues;
use crate::worker::{Command, Worker};

/// Async client owning one `SQLite` connection behind a dedicated worker
/// thread.
///
/// Cloning the client is cheap and shares the same worker; statements from
/// all clones execute in strict submission order, one at a time, because the
/// underlying connection is never touched concurrently.
#[derive(Clone)]
pub struct SqliteClient {
    worker: Arc<Worker>,
}

impl SqliteClient {
    /// Open the database at `path` (created if absent, `:memory:` accepted)
    /// and start the worker thread.
    ///
    /// # Errors
    /// Returns `SqliteDispatchError::ConnectionError` if the engine rejects
    /// the path or the worker thread cannot be spawned.
    pub fn open(path: impl AsRef<Path>) -> Result<Self, SqliteDispatchError> {
        let path = path.as_ref();
        let connection = Connection::open(path).map_err(|err| {
            SqliteDispatchError::ConnectionError(format!(
                "failed to open database {}: {err}",
                path.display()
            ))
        })?;
        let worker = Worker::spawn(connection)?;
        Ok(Self {
            worker: Arc::new(worker),
        })
    }

    /// Schedule a SELECT-style statement and return a deferred result.
    ///
    /// The statement is enqueued when this method is called, not when the
    /// returned future is first polled, so call order alone fixes execution
    /// order. Parameters bind positionally to `?` placeholders; neither the
    /// SQL text nor the parameter count is validated locally.
    ///
    /// The resolved [`ResultSet`] holds every row of the result set, with
    /// `rows_affected` equal to the row count. Failures (malformed SQL, type
    /// errors, a closed client) surface when the future is awaited.
    pub fn query(&self, sql: impl Into<String>, params: &[RowValues]) -> Deferred<ResultSet> {
        let (tx, rx) = oneshot::channel();
        let command = Command::Query {
            sql: sql.into(),
            params: convert_params(params),
            respond_to: tx,
        };
        match self.worker.send(command) {
            Ok(()) => Deferred::pending(rx),
            Err(err) => Deferred::failed(err),
        }
    }

    /// Schedule an INSERT/UPDATE/DELETE/DDL statement and return a deferred
    /// result.
    ///
    /// Scheduling and error semantics match [`query`](Self::query); the
    /// resolved [`ResultSet`] always has an empty row sequence and carries
    /// the engine-reported affected-row count.
    pub fn execute(&self, sql: impl Into<String>, params: &[RowValues]) -> Deferred<ResultSet> {
        let (tx, rx) = oneshot::channel();
        let command = Command::Execute {
            sql: sql.into(),
            params: convert_params(params),
            respond_to: tx,
        };
        match self.worker.send(command) {
            Ok(()) => Deferred::pending(rx),
            Err(err) => Deferred::failed(err),
        }
    }

    /// Close the connection and stop the worker.
    ///
    /// Work queued before this call drains first; the connection is then
    /// closed and the worker thread exits. Close is not idempotent: after it
    /// returns, every operation on this client fails with
    /// `SqliteDispatchError::ConnectionError`, including a second `close()`.
    ///
    /// # Errors
    /// Returns `SqliteDispatchError::ConnectionError` if the engine reports
    /// a failure while closing, or if the client was already closed.
    pub async fn close(&self) -> Result<(), SqliteDispatchError> {
        let (tx, rx) = oneshot::channel();
        self.worker.send(Command::Shutdown {
            respond_to: Some(tx),
        })?;
        rx.await.map_err(|_| {
            SqliteDispatchError::ConnectionError("SQLite worker dropped while closing".into())
        })?
    }
}

impl fmt::Debug for SqliteClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SqliteClient").finish_non_exhaustive()
    }
}

/// Deferred result of a scheduled statement.
///
/// Resolves once the worker finishes the statement, in submission order.
/// Dropping a `Deferred` does not cancel the statement; it still runs and
/// its outcome is discarded.
#[must_use = "futures do nothing unless you `.await` or poll them"]
pub struct Deferred<T> {
    state: State<T>,
}

enum State<T> {
    Pending(oneshot::Receiver<Result<T, SqliteDispatchError>>),
    Failed(Option<SqliteDispatchError>),
}

impl<T> Deferred<T> {
    fn pending(receiver: oneshot::Receiver<Result<T, SqliteDispatchError>>) -> Self {
        Self {
            state: State::Pending(receiver),
        }
    }

    fn failed(error: SqliteDispatchError) -> Self {
        Self {
            state: State::Failed(Some(error)),
        }
    }
}

impl<T> Future for Deferred<T> {
    type Output = Result<T, SqliteDispatchError>;

    fn poll(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Self::Output> {
        match &mut self.get_mut().state {
            State::Pending(receiver) => Pin::new(receiver).poll(cx).map(|received| {
                received.unwrap_or_else(|_| {
                    Err(SqliteDispatchError::ConnectionError(
                        "SQLite worker dropped before responding".into(),
                    ))
                })
            }),
            State::Failed(error) => Poll::Ready(Err(error.take().unwrap_or_else(|| {
                SqliteDispatchError::ConnectionError(
                    "deferred result polled after completion".into(),
                )
            }))),
        }
    }
}

impl<T> fmt::Debug for Deferred<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let state = match &self.state {
            State::Pending(_) => "pending",
            State::Failed(_) => "failed",
        };
        f.debug_struct("Deferred").field("state", &state).finish()
    }
}
